use anyhow::Result;
use clap::{Parser, Subcommand};

mod adb;
mod cmd;
mod mcp;
mod utils;

use adb::{AdbConfig, Dispatcher};
use cmd::{ExecArgs, ListArgs, ServeArgs};

/// MCP ADB - Android Debug Bridge operations as MCP tools
///
/// Command layout:
///   mcp-adb [serve]                                   MCP server on stdio (default)
///   mcp-adb list [--json]                             show the tool catalog
///   mcp-adb exec <tool> [--param k=v ...] [--json]    run one tool directly
///
/// Global flags / env:
///   -v / -vv        Increase verbosity (logs go to stderr)
///   -q / --quiet    Errors only
///   -a / --adb      adb binary (or ADB_PATH env; defaults to `adb` on PATH)
///   RUST_LOG        Overrides the verbosity flags
///
/// Examples:
///   mcp-adb --adb /opt/android-sdk/platform-tools/adb
///   mcp-adb exec get-devices
///   mcp-adb exec input-text --param text="hello world" --param useUsb=true
///   mcp-adb exec start-activity --param-file intent.yaml --dry-run
#[derive(Parser, Debug)]
#[command(
    name = "mcp-adb",
    version,
    author,
    about = "MCP ADB - Android Debug Bridge tools for MCP clients",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the adb binary
    #[arg(short = 'a', long = "adb", global = true, value_name = "PATH")]
    adb: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the tools over MCP stdio (default)
    Serve(ServeArgs),

    /// List the tool catalog
    List(ListArgs),

    /// Execute (invoke) a tool without an MCP client
    Exec(ExecArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    // CLI flag > ADB_PATH env > `adb`
    let adb_path = match utils::resolve_adb_path(
        cli.adb.clone(),
        std::env::var(utils::ADB_PATH_ENV).ok(),
    ) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid adb path: {e}");
            std::process::exit(2);
        }
    };
    let dispatcher = Dispatcher::new(AdbConfig { adb_path });

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => cmd::execute_serve(args, dispatcher),
        Commands::List(args) => cmd::execute_list(args, &dispatcher),
        Commands::Exec(args) => cmd::execute_exec(args, &dispatcher),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["mcp-adb", "--adb", "/opt/adb"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.adb.as_deref(), Some("/opt/adb"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mcp-adb", "exec", "help", "-vv", "-a", "adb2"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.adb.as_deref(), Some("adb2"));
        assert!(matches!(cli.command, Some(Commands::Exec(_))));
    }
}
