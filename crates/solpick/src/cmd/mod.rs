//! Command modules for the solpick CLI

pub mod compile;
pub mod extract;
pub mod pragma;
pub mod versions;

pub use compile::compile_file;
pub use extract::{print_binary, print_version};
pub use pragma::print_pragma;
pub use versions::list_versions;

/// Placeholder printed when nothing was resolved.
pub const NONE: &str = "none";
