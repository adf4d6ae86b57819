//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (walk the dispatch table)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: every matching Rule, in order
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields the same rules
//! - Last match wins

pub mod matcher;
pub mod router;

pub use router::{Action, DispatchTable, Rule};
