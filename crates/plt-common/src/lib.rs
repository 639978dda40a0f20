//! ---
//! plt_section: "01-core-functionality"
//! plt_subsection: "module"
//! plt_type: "source"
//! plt_scope: "code"
//! plt_description: "Shared primitives for the load-test harness crates."
//! plt_version: "v0.1.0"
//! plt_owner: "tbd"
//! ---
//! Shared primitives for the pipeline load-test workspace.
//! This crate owns the configuration-loading boundary, the configuration
//! error taxonomy and tracing initialisation.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    FixtureSettings, HarnessConfig, LoadedHarnessConfig, LoggingConfig, RequestSettings,
    TargetSettings,
};
pub use error::{ConfigResult, ConfigurationError};
pub use logging::{init_console, init_tracing, LogFormat};
