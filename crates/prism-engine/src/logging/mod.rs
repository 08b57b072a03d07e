//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only talks to the `log`
//! facade; `env_logger` is installed once by the binary through
//! [`init_logging`].

mod init;

pub use init::{init_logging, resolve_filter, LoggingConfig};
