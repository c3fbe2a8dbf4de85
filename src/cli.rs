//! CLI domain: parse, route, help, output, and presentation only.
//! Route handlers stay thin and call into the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_resolution, format_sites, format_tree};
pub use route::RunContext;
