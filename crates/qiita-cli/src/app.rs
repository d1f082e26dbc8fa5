//! QiitaCli application.
//!
//! Wires configuration, logging and the MCP server together.

use crate::cli::{CliArgs, Command};
use crate::config::QiitaConfig;
use crate::config_handlers;
use qiita_core::traits::ConfigProvider;
use qiita_items::{HttpTransport, ItemFetcher, ReqwestTransport};
use qiita_mcp::{ItemTools, QiitaMcpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const INSTRUCTIONS: &str = "Lists Qiita articles. Call get_items with optional page, per_page, \
     created_from, created_to, tags and additional_fields.";

// ============================================================================
// QiitaCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct QiitaCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl QiitaCli<QiitaConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> qiita_core::Result<Self> {
        let config = QiitaConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> QiitaCli<C> {
    /// Wraps an already-loaded configuration; `name` is what `version` prints.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Version reported by `version` and advertised in the MCP handshake.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Upstream endpoint and credentials in use.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Installs the stderr subscriber.
    ///
    /// A parseable `RUST_LOG` takes precedence over `--verbose`/`--quiet`.
    /// A second call is a no-op.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose, quiet)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Build the MCP server over the given transport.
    pub fn build_server(&self, transport: Arc<dyn HttpTransport>) -> QiitaMcpServer<ItemTools> {
        let fetcher = ItemFetcher::from_config(transport, &*self.config);
        QiitaMcpServer::new(ItemTools::new(fetcher))
            .with_name(self.config.project_name())
            .with_version(self.version.clone())
            .with_instructions(INSTRUCTIONS)
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> anyhow::Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)?;
                Ok(())
            }
            Some(Command::Serve) | None => self.serve().await,
        }
    }

    async fn serve(&self) -> anyhow::Result<()> {
        if self.config.access_token().is_empty() {
            tracing::warn!("No access token configured; Qiita may reject requests");
        }
        tracing::debug!(items_url = %self.config.items_url(), "Using Qiita endpoint");
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new());
        self.build_server(transport).serve_stdio().await
    }
}

/// Level used when `RUST_LOG` is unset; `--quiet` beats `--verbose`.
fn default_log_level(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (_, true) => "warn",
        (true, false) => "debug",
        (false, false) => "info",
    }
}

// ============================================================================
// Tests
// ============================================================================
