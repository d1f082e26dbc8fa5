//! Command-line entry point for the qiita-mcp server.
//!
//! # Key Abstractions
//!
//! - [`QiitaCli`]: loads configuration, sets up logging and serves MCP on stdio
//! - [`QiitaConfig`]: file/env backed [`qiita_core::ConfigProvider`]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::QiitaCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::QiitaConfig;
