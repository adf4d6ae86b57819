//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (add request ID)
//!     → middleware/cors.rs (answer OPTIONS)
//!     → [routing table picks actions, upstream module fetches payloads]
//!     → response.rs (shape body and content-type)
//!     → middleware/cors.rs (stamp CORS headers)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, EdgeServer};
