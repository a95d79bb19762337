/*!
adb command dispatch engine.

Per call, strictly linear:

  params ──► selector::resolve ──► builder::build ──► executor::execute ──► Outcome
             (DeviceSelector)      (CommandLine)      (ExecutionResult)

Modules:
  catalog   static per-operation tables (sub-command, ArgRules, reply policy)
  params    JSON parameter view with typed accessors
  selector  device targeting precedence
  builder   table-driven argv assembly
  executor  process spawn + outcome classification
  dispatch  the boundary that renders every result into an `Outcome`
  error     DispatchError / ErrorKind

Nothing here holds mutable state between calls.
*/

pub mod builder;
pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod params;
pub mod selector;

pub use catalog::Operation;
pub use dispatch::{AdbConfig, Dispatcher, Outcome};
pub use error::{DispatchError, ErrorKind};
pub use params::Params;
