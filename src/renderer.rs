//! The function environment injected into every template parse.
//!
//! - `functions`: the helper functions themselves (`eq`, `ne`, `in`, `nl2br`, `raw`, `date`)
//! - `router`: the `url(...)` collaborator seam and a static route table
//! - `environment`: [`FunctionEnv`], the immutable table handed to the composer

pub mod environment;
pub mod functions;
pub mod router;

pub use environment::FunctionEnv;
pub use router::{NoRouter, RouteTable, UrlReverser};
