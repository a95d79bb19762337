/*!
`exec.rs`

Implements the `exec` subcommand: run one catalog tool through the same
dispatcher the MCP server uses, without an MCP client.

  - Tool selection by name (`mcp-adb list` shows the catalog)
  - Parameter injection via:
      --param KEY=VALUE               (repeatable)
      --param-file params.(json|yaml) (merged; CLI --param overrides file entries)
  - Values are coerced per catalog argument kind (bool / list / extras JSON)
  - --dry-run prints the adb argument vector instead of running it
  - Ctrl-C cancels the call and terminates the adb process

JSON Success Output:
{
  "status": "ok",
  "tool": "get-devices",
  "command": ["adb", "devices", "-l"],
  "elapsed_ms": 42,
  "output": "List of devices attached ..."
}

JSON Error Output:
{
  "status": "error",
  "tool": "push",
  "kind": "tool",
  "error": "Failed to push file: ..."
}

The process exits non-zero whenever the tool result is an error.
*/

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, json};
use std::time::Instant;

use crate::adb::{Dispatcher, Operation, Outcome};
use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji};
use crate::cmd::shared::{build_params, load_param_file};

/* ---- Argument Struct ---- */

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Tool name to invoke (see `mcp-adb list`)
    #[arg(value_name = "TOOL")]
    pub tool: String,

    /// Provide parameter (KEY=VALUE), repeatable
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Load parameters from file (JSON or YAML). CLI --param overrides file entries
    #[arg(long = "param-file", value_name = "PATH")]
    pub param_file: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Print the adb command line without running it
    #[arg(long)]
    pub dry_run: bool,
}

/* ---- Public Entry Point ---- */

pub fn execute_exec(args: ExecArgs, dispatcher: &Dispatcher) -> Result<()> {
    let name = args.tool.trim();
    let Some(op) = Operation::from_name(name) else {
        return output_error(
            args.json,
            name,
            None,
            &format!("unknown tool '{name}' (see `mcp-adb list`)"),
        );
    };

    let file_params = match args.param_file.as_deref() {
        Some(path) => match load_param_file(path) {
            Ok(map) => map,
            Err(e) => return output_error(args.json, name, None, &format!("{e:#}")),
        },
        None => Map::new(),
    };
    let params = match build_params(op, file_params, &args.params) {
        Ok(p) => p,
        Err(e) => return output_error(args.json, name, None, &e.to_string()),
    };

    let cmd = match dispatcher.prepare(op, &params) {
        Ok(cmd) => cmd,
        Err(e) => {
            let msg = format!("{}: {e}", op.spec().failure);
            return output_error(args.json, name, Some(e.kind().as_str()), &msg);
        }
    };

    if args.dry_run {
        if args.json {
            let out = json!({
                "status": "ok",
                "tool": name,
                "dry_run": true,
                "command": cmd.argv(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
            );
        } else {
            println!("{cmd}");
        }
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let started = Instant::now();
    let outcome = rt.block_on(dispatcher.dispatch(op, &params, interrupted()));
    let elapsed_ms = started.elapsed().as_millis();

    if let Some(kind) = outcome.error {
        return output_error(args.json, name, Some(kind.as_str()), &outcome.text);
    }

    if args.json {
        let out = json!({
            "status": "ok",
            "tool": name,
            "command": cmd.argv(),
            "elapsed_ms": elapsed_ms,
            "output": outcome.text,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
        );
    } else {
        print_success(name, &cmd.to_string(), elapsed_ms, &outcome);
    }
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/* ---- Output Helpers ---- */

fn print_success(tool: &str, command: &str, elapsed_ms: u128, outcome: &Outcome) {
    let style = StyleOptions::detect();
    let header = box_header(
        format!("{} {tool}", emoji("success", &style)),
        Some(format!("{elapsed_ms} ms")),
        &style,
    );
    eprintln!("{header}");
    eprintln!("{}", color(Role::Dim, format!("$ {command}"), &style));
    // Output goes to stdout alone so it can be piped.
    println!("{}", outcome.text.trim_end_matches('\n'));
}

fn output_error(json: bool, tool: &str, kind: Option<&str>, msg: &str) -> Result<()> {
    if json {
        let err = json!({"status": "error", "tool": tool, "kind": kind, "error": msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} Exec Error", emoji("error", &style));
        eprintln!("{}", box_header(title, Some(tool), &style));
        eprintln!("{}", color(Role::Error, msg, &style));
    }
    anyhow::bail!(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::AdbConfig;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        Exec(ExecArgs),
    }

    fn parse(argv: &[&str]) -> ExecArgs {
        let TestSub::Exec(a) = TestCli::try_parse_from(argv).unwrap().cmd;
        a
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(AdbConfig {
            adb_path: "adb".into(),
        })
    }

    #[test]
    fn clap_parses_repeated_params() {
        let a = parse(&[
            "t",
            "exec",
            "push",
            "-p",
            "localPath=/tmp/a",
            "--param",
            "remotePath=/sdcard/a",
            "--dry-run",
        ]);
        assert_eq!(a.tool, "push");
        assert_eq!(a.params.len(), 2);
        assert!(a.dry_run);
        assert!(!a.json);
    }

    #[test]
    fn dry_run_succeeds_without_spawning() {
        let a = parse(&["t", "exec", "help", "--dry-run", "--json"]);
        assert!(execute_exec(a, &dispatcher()).is_ok());
    }

    #[test]
    fn unknown_tool_is_an_error() {
        let a = parse(&["t", "exec", "reboot", "--json"]);
        let err = execute_exec(a, &dispatcher()).unwrap_err();
        assert!(err.to_string().contains("unknown tool 'reboot'"));
    }

    #[test]
    fn validation_error_carries_operation_prefix() {
        let a = parse(&["t", "exec", "start-activity", "--dry-run", "--json"]);
        let err = execute_exec(a, &dispatcher()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to start activity: Either component or action must be specified"
        );
    }
}
