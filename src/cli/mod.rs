//! Command-line interface: process arguments and prompt commands.
//!
//! ```ignore
//! use synapse_chat::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Run(options) => { /* start the client */ }
//!     other => { /* print and exit */ }
//! }
//! ```

pub mod args;
pub mod command;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions};
pub use command::{ChatRef, InputCommand, HELP};
pub use version::{version_line, VERSION};

/// Usage text for `--help`.
pub fn usage() -> String {
    format!(
        "{}\n\nUsage: synapse [--api-url <url>] [--chat <id>]\n\n\
         Options:\n  \
         --api-url <url>  backend base URL (default: $SYNAPSE_API_URL or http://localhost:8000)\n  \
         --chat <id>      open this conversation\n  \
         -h, --help       show this help\n  \
         -V, --version    show the version",
        version_line()
    )
}
