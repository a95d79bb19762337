/*!
shared.rs - helpers shared by the `list` / `exec` subcommands.

Focus:
  - catalog_entries: published tool descriptors joined with the catalog's adb command
  - coerce_value / param_kind: CLI `KEY=VALUE` strings -> typed JSON per catalog rule
  - build_params: merge param file + CLI values into dispatcher `Params`
  - load_param_file: JSON or YAML object
*/

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::adb::selector::SelectorInput;
use crate::adb::{Dispatcher, Operation, Params};
use crate::mcp::AdbServer;

/* ---- Catalog View ---- */

/// One row of `mcp-adb list`.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub op: Operation,
    pub description: String,
    /// `(name, kind)` pairs in argument order, selector fields excluded.
    pub params: Vec<(&'static str, &'static str)>,
    pub input_schema: Value,
}

impl CatalogEntry {
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// adb sub-command as typed on a shell, e.g. `shell pm clear`.
    pub fn command(&self) -> String {
        self.op.spec().command.join(" ")
    }
}

/// Tools as the MCP router publishes them, in catalog order.
pub fn catalog_entries(dispatcher: &Dispatcher) -> Vec<CatalogEntry> {
    let server = AdbServer::new(dispatcher.clone());
    let published: BTreeMap<String, Value> = server
        .tools()
        .into_iter()
        .filter_map(|t| {
            let v = serde_json::to_value(&t).ok()?;
            let name = v.get("name")?.as_str()?.to_string();
            Some((name, v))
        })
        .collect();

    Operation::ALL
        .into_iter()
        .map(|op| {
            let tool = published.get(op.name());
            let description = tool
                .and_then(|t| t.get("description"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let input_schema = tool
                .and_then(|t| t.get("inputSchema").or_else(|| t.get("input_schema")))
                .cloned()
                .unwrap_or(Value::Null);
            CatalogEntry {
                op,
                description,
                params: op
                    .spec()
                    .args
                    .iter()
                    .map(|r| (r.param(), r.kind_label()))
                    .collect(),
                input_schema,
            }
        })
        .collect()
}

/* ---- Parameter Coercion ---- */

/// Kind label of `key` for `op`, including the shared selector fields.
pub fn param_kind(op: Operation, key: &str) -> Option<&'static str> {
    match key {
        SelectorInput::DEVICE_ID => return Some("string"),
        SelectorInput::USE_USB | SelectorInput::USE_EMULATOR => return Some("bool"),
        _ => {}
    }
    op.spec()
        .args
        .iter()
        .find(|r| r.param() == key)
        .map(|r| r.kind_label())
}

/// Coerce a raw CLI string using a catalog kind label.
///
/// Values that do not fit the kind stay strings, so the builder reports the
/// type mismatch with the parameter's name.
pub fn coerce_value(raw: &str, kind: &str) -> Value {
    match kind {
        "bool" => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Value::Bool(true),
            "false" | "0" | "no" | "n" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        "list" => Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        "extras" => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
        _ => Value::String(raw.to_string()),
    }
}

/// Merge file-provided values with `KEY=VALUE` pairs (CLI wins) into `Params`.
pub fn build_params(op: Operation, file: Map<String, Value>, cli: &[String]) -> Result<Params> {
    let mut merged = file;
    for kv in cli {
        let Some((k, v)) = kv.split_once('=') else {
            bail!("invalid --param (expected KEY=VALUE): {kv}");
        };
        let key = k.trim();
        if key.is_empty() {
            bail!("invalid --param (empty key): {kv}");
        }
        let kind = param_kind(op, key).unwrap_or("string");
        merged.insert(key.to_string(), coerce_value(v, kind));
    }

    for key in merged.keys() {
        if param_kind(op, key).is_none() {
            bail!("unknown parameter '{key}' for tool '{}'", op.name());
        }
    }
    Ok(Params::from(merged))
}

/* ---- Parameter File Loading ---- */

/// Read a JSON (`.json`) or YAML (`.yaml` / `.yml`) object of parameters.
pub fn load_param_file(path: &str) -> Result<Map<String, Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read param file: {path}"))?;
    let lower = path.to_ascii_lowercase();

    let value: Value = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        let yaml_v: serde_yaml::Value =
            serde_yaml::from_str(&raw).context("failed to parse YAML param file")?;
        serde_json::to_value(yaml_v).context("failed to convert YAML to JSON")?
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON param file")?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("param file root must be an object"),
    }
}
