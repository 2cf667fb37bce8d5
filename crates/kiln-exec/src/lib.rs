mod error;
pub use error::ExecError;

mod output;
pub use output::OutputLogConfig;

mod command;
pub use command::run_captured;

#[cfg(feature = "docker")]
pub mod docker;
