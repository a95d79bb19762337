/*!
Command builder: one generic routine driven by the catalog's `ArgRule` tables.

Output layout (fixed per operation):

    [adb] [selector flags] [sub-command tokens] [rules, in table order]

Every user-supplied string becomes exactly one argv element, untouched. No quoting is
added and no shell ever sees the vector; see `executor`.
*/

use std::fmt;
use std::str::FromStr;

use super::catalog::{ArgRule, OnSuccess, OperationSpec};
use super::params::Params;
use super::selector::DeviceSelector;
use super::DispatchError;

/// Fully assembled invocation: program plus ordered argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandLine {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Shell-quoted rendering; for logs and `--dry-run` only, never executed.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_words::join(self.argv()))
    }
}

/// Type tag of an intent extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraKind {
    String,
    Int,
    Long,
    Float,
    Boolean,
    Uri,
    Component,
}

impl ExtraKind {
    pub const ALL: [ExtraKind; 7] = [
        ExtraKind::String,
        ExtraKind::Int,
        ExtraKind::Long,
        ExtraKind::Float,
        ExtraKind::Boolean,
        ExtraKind::Uri,
        ExtraKind::Component,
    ];

    /// `am start` flag for this extra type.
    pub fn flag(self) -> &'static str {
        match self {
            ExtraKind::String => "--es",
            ExtraKind::Int => "--ei",
            ExtraKind::Long => "--el",
            ExtraKind::Float => "--ef",
            ExtraKind::Boolean => "--ez",
            ExtraKind::Uri => "--eu",
            ExtraKind::Component => "--ecn",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExtraKind::String => "string",
            ExtraKind::Int => "int",
            ExtraKind::Long => "long",
            ExtraKind::Float => "float",
            ExtraKind::Boolean => "boolean",
            ExtraKind::Uri => "uri",
            ExtraKind::Component => "component",
        }
    }
}

impl FromStr for ExtraKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtraKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                DispatchError::validation(format!(
                    "unknown extra type '{s}' (expected one of: {})",
                    ExtraKind::ALL.map(ExtraKind::as_str).join(", ")
                ))
            })
    }
}

/// Assemble the argument vector for one call. Pure: no filesystem, no network.
pub fn build(
    spec: &OperationSpec,
    params: &Params,
    selector: &DeviceSelector,
    adb_path: &str,
) -> Result<CommandLine, DispatchError> {
    check_one_of(spec, params)?;

    let mut args = selector.flag_tokens();
    args.extend(spec.command.iter().map(|t| t.to_string()));

    for rule in spec.args {
        match *rule {
            ArgRule::Switch {
                param,
                flag,
                default,
            } => {
                if params.switch(param, default)? {
                    args.push(flag.to_string());
                }
            }
            ArgRule::Valued { param, flag } => {
                if let Some(value) = non_empty(params.text(param)?) {
                    args.push(flag.to_string());
                    args.push(value.to_string());
                }
            }
            ArgRule::Repeated { param, flag } => {
                for value in params.list(param)? {
                    args.push(flag.to_string());
                    args.push(value.to_string());
                }
            }
            ArgRule::Extras { param } => {
                for extra in params.extras(param)? {
                    let kind: ExtraKind = extra.kind.parse()?;
                    args.push(kind.flag().to_string());
                    args.push(extra.key);
                    args.push(extra.value);
                }
            }
            ArgRule::Positional { param, required } => match non_empty(params.text(param)?) {
                Some(value) => args.push(value.to_string()),
                None if required => {
                    return Err(DispatchError::validation(format!(
                        "missing required parameter: {param}"
                    )));
                }
                None => {}
            },
        }
    }

    Ok(CommandLine::new(adb_path, args))
}

/// Text answered on success, applying the operation's reply policy.
pub fn success_text(spec: &OperationSpec, params: &Params, stdout: String) -> String {
    match spec.reply {
        OnSuccess::Fixed(text) => text.to_string(),
        OnSuccess::OutputOr(_) if !stdout.is_empty() => stdout,
        OnSuccess::OutputOr(template) => fill_placeholders(template, spec, params),
    }
}

/// Single left-to-right pass over the template; substituted values are never rescanned.
fn fill_placeholders(template: &str, spec: &OperationSpec, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };
        let name = &tail[1..close];
        let value = spec
            .args
            .iter()
            .find(|rule| rule.param() == name)
            .and_then(|rule| params.text(rule.param()).ok().flatten());
        match value {
            Some(value) => out.push_str(value),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

fn check_one_of(spec: &OperationSpec, params: &Params) -> Result<(), DispatchError> {
    if spec.one_of.is_empty() {
        return Ok(());
    }
    for name in spec.one_of {
        if non_empty(params.text(name)?).is_some() {
            return Ok(());
        }
    }
    Err(DispatchError::validation(format!(
        "Either {} must be specified",
        spec.one_of.join(" or ")
    )))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
