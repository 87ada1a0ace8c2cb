//! Template set construction for viewset
//!
//! Construction runs strictly in order, one module per stage:
//! - `scanner`: walks application roots and lists layout and content sources
//! - `normalize`: maps identifiers to canonical lookup keys
//! - `collision`: rejects sources of one tier sharing a lookup key
//! - `composer`: compiles sources, optionally inside a layout
//! - `set`: the immutable registry exposed to the rendering layer

pub mod collision;
pub mod composer;
pub mod normalize;
pub mod scanner;
pub mod set;

pub use composer::CompiledUnit;
pub use normalize::normalize;
pub use scanner::{ScanOptions, SourceFile};
pub use set::{ident, Application, TemplateSet};
