/*!
`serve.rs`

Implements the `serve` subcommand (also the default when no subcommand is
given): run the MCP server on stdio until the client disconnects.

stdout carries the protocol; logs go to stderr.
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::adb::Dispatcher;
use crate::mcp;

/// CLI arguments for `mcp-adb serve`
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

pub fn execute_serve(_args: ServeArgs, dispatcher: Dispatcher) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(mcp::serve_stdio(dispatcher))
}
