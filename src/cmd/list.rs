/*!
`list.rs`

Implements the `list` subcommand: prints the tool catalog exactly as the MCP
server publishes it, with the adb sub-command each tool runs.

JSON Output Shape:
{
  "status": "ok",
  "adb": "/usr/bin/adb",
  "count": 17,
  "tools": [
    {
      "name": "clear-app-data",
      "description": "...",
      "command": "shell pm clear",
      "params": [ { "name": "packageName", "kind": "string!" } ],
      "input_schema": { ... }
    }
  ]
}

Kinds: bool, string, list, extras; a trailing `!` marks a required argument.
*/

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::adb::Dispatcher;
use crate::cmd::format::{Role, StyleOptions, TableOpts, box_header, color, emoji, table};
use crate::cmd::shared::{CatalogEntry, catalog_entries};

/// CLI arguments for `mcp-adb list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the list subcommand.
pub fn execute_list(args: ListArgs, dispatcher: &Dispatcher) -> Result<()> {
    let entries = catalog_entries(dispatcher);
    let adb = dispatcher.config().adb_path.as_str();

    if args.json {
        let tools: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| {
                json!({
                    "name": e.name(),
                    "description": e.description,
                    "command": e.command(),
                    "params": e.params.iter()
                        .map(|(name, kind)| json!({"name": name, "kind": kind}))
                        .collect::<Vec<_>>(),
                    "input_schema": e.input_schema,
                })
            })
            .collect();
        let out = json!({
            "status": "ok",
            "adb": adb,
            "count": tools.len(),
            "tools": tools,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!("{}", render_table(&entries, adb, &style));
    println!(
        "\n{} {}",
        emoji("info", &style),
        color(
            Role::Dim,
            "Every tool also accepts deviceId / useUsb / useEmulator. Try `mcp-adb exec <name> --dry-run`.",
            &style
        )
    );
    Ok(())
}

fn render_table(entries: &[CatalogEntry], adb: &str, style: &StyleOptions) -> String {
    let header = box_header(
        format!("{} Tools ({})", emoji("list", style), entries.len()),
        Some(format!("adb={adb}")),
        style,
    );

    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            let params = if e.params.is_empty() {
                "-".to_string()
            } else {
                e.params
                    .iter()
                    .map(|(name, kind)| format!("{name}:{kind}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            vec![
                (idx + 1).to_string(),
                e.name().to_string(),
                e.command(),
                params,
                e.description.replace('\n', " "),
            ]
        })
        .collect();

    let tbl = table(
        &["#", "NAME", "COMMAND", "PARAMS", "DESCRIPTION"],
        &rows,
        TableOpts {
            max_width: style.term_width,
            ..TableOpts::default()
        },
        style,
    );
    format!("{header}\n{tbl}")
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
        List(ListArgs),
    }

    #[test]
    fn clap_parses_list_json() {
        let cli = TestCli::try_parse_from(["t", "list", "--json"]).unwrap();
        let TestSub::List(a) = cli.cmd;
        assert!(a.json);
    }

    #[test]
    fn table_lists_every_tool() {
        let dispatcher = Dispatcher::new(AdbConfig {
            adb_path: "adb".into(),
        });
        let entries = catalog_entries(&dispatcher);
        let out = render_table(&entries, "adb", &StyleOptions::plain(220));
        assert!(out.contains("Tools (17)"));
        assert!(out.contains("adb=adb"));
        let help_row = out
            .lines()
            .find(|l| l.contains(" help "))
            .expect("help row");
        assert!(help_row.contains('-'), "help takes no arguments: {help_row}");
        assert!(out.contains("packageName:string!"));
        assert!(out.contains("shell am start"));
    }
}
