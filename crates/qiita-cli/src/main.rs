//! qiita-mcp binary: serves the `get_items` MCP tool over stdio.

use clap::Parser;
use qiita_cli::{CliArgs, QiitaCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = QiitaCli::from_args("qiita-mcp", &args)?;
    cli.run(args).await
}
