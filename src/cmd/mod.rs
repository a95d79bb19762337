/*!
Command dispatcher module: one file per subcommand.

  src/cmd/
    mod.rs      (this file)
    serve.rs    (ServeArgs + execute_serve)   MCP server on stdio
    list.rs     (ListArgs  + execute_list)    catalog listing
    exec.rs     (ExecArgs  + execute_exec)    one-shot tool invocation
    shared.rs   catalog view, parameter coercion, param files
    format.rs   table / box / color helpers for human output

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function
    that returns `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` and are kept minimal.
*/

pub mod exec;
pub mod format;
pub mod list;
pub mod serve;
pub mod shared;

pub use exec::{ExecArgs, execute_exec};
pub use list::{ListArgs, execute_list};
pub use serve::{ServeArgs, execute_serve};
