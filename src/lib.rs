//! Edge request router.
//!
//! Serves a news feed and a currency exchange-rate lookup from two upstream
//! REST APIs behind one origin, with permissive CORS.
//!
//! ```text
//!   Client ──▶ http::server ──▶ cors (OPTIONS?) ──▶ routing::DispatchTable
//!                                                        │
//!                                                        ▼
//!   Client ◀── cors stamp ◀── http::response ◀── upstream::UpstreamClient ◀── News / Rates API
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::EdgeConfig;
pub use http::EdgeServer;
pub use lifecycle::Shutdown;
