//! Request/response middleware owned by the edge.

pub mod cors;
