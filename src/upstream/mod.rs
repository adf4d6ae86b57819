//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch action (News / ExchangeRate)
//!     → client.rs (build call descriptor, send)
//!     → gather.rs (JSON round-trip or raw text)
//!     → String body handed back to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client; no other state survives a call
//! - Failures surface as UpstreamError and become 502 in the HTTP layer

pub mod client;
pub mod error;
pub mod gather;

pub use client::{UpstreamCall, UpstreamClient};
pub use error::UpstreamError;
pub use gather::{gather_response, BodyKind};
