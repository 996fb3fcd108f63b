//! Line-oriented command shell over the record store.

pub mod command;
pub mod config;
pub mod error;
pub mod shell;

pub use command::{Command, Token};
pub use config::{ConsoleConfig, PROMPT};
pub use error::{ShellError, ShellResult};
pub use shell::{Console, Flow};
