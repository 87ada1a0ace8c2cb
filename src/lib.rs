/// Command line interface for building and inspecting template sets.
pub mod cli;

/// Project configuration files.
pub mod config;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// Atomic swapping of the active template set.
pub mod reload;

/// The function environment available to template bodies.
pub mod renderer;

/// Template discovery, composition and lookup.
pub mod template;

pub use renderer::{FunctionEnv, UrlReverser};
pub use template::{Application, CompiledUnit, ScanOptions, TemplateSet};
