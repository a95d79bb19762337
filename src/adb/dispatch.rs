//! Dispatch boundary: selector -> builder -> executor, then the reply policy.
//!
//! Every failure is caught here and rendered as "<operation prefix>: <cause>"; nothing
//! escapes a single call as an unhandled error.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::builder::{self, CommandLine};
use super::catalog::Operation;
use super::ErrorKind;
use super::executor::{self, ExecutionResult};
use super::params::Params;
use super::selector::{self, SelectorInput};

/// Process-wide configuration, fixed at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbConfig {
    /// Path (or bare name resolved through `PATH`) of the adb binary.
    pub adb_path: String,
}

/// Normalized per-call answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub text: String,
    /// `None` on success.
    pub error: Option<ErrorKind>,
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Cheap to clone; holds no mutable state, so concurrent calls need no locking.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<AdbConfig>,
}

impl Dispatcher {
    pub fn new(config: AdbConfig) -> Self {
        Dispatcher {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AdbConfig {
        &self.config
    }

    /// Resolve the selector and build the argument vector without running anything.
    pub fn prepare(
        &self,
        op: Operation,
        params: &Params,
    ) -> Result<CommandLine, super::DispatchError> {
        let target = selector::resolve(&SelectorInput::from_params(params)?);
        builder::build(op.spec(), params, &target, &self.config.adb_path)
    }

    /// Prepare and execute; the raw classified result.
    pub async fn execute<C>(&self, op: Operation, params: &Params, cancel: C) -> ExecutionResult
    where
        C: Future<Output = ()>,
    {
        let cmd = self.prepare(op, params)?;
        debug!(tool = op.name(), command = %cmd, "spawning adb");
        executor::execute(&cmd, cancel).await
    }

    /// Full call: execute, then apply the success policy or the failure prefix.
    pub async fn dispatch<C>(&self, op: Operation, params: &Params, cancel: C) -> Outcome
    where
        C: Future<Output = ()>,
    {
        let spec = op.spec();
        let started = Instant::now();
        let result = self.execute(op, params, cancel).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(stdout) => {
                info!(tool = spec.name, elapsed_ms, bytes = stdout.len(), "adb call succeeded");
                Outcome {
                    text: builder::success_text(spec, params, stdout),
                    error: None,
                }
            }
            Err(err) => {
                let kind = err.kind();
                warn!(tool = spec.name, elapsed_ms, kind = kind.as_str(), error = %err, "adb call failed");
                Outcome {
                    text: format!("{}: {}", spec.failure, err),
                    error: Some(kind),
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::future::pending;

    // `true` / `false` stand in for adb: they ignore argv and exit 0 / 1 silently.
    fn dispatcher(program: &str) -> Dispatcher {
        Dispatcher::new(AdbConfig {
            adb_path: program.to_string(),
        })
    }

    fn params(v: serde_json::Value) -> Params {
        Params::from_value(v).unwrap()
    }

    #[test]
    fn prepare_applies_selector_precedence() {
        let d = dispatcher("adb");
        let cmd = d
            .prepare(
                Operation::GetDevices,
                &params(json!({"deviceId": "emulator-5554", "useUsb": true, "useEmulator": true})),
            )
            .unwrap();
        assert_eq!(cmd.argv(), ["adb", "-s", "emulator-5554", "devices", "-l"]);

        let cmd = d
            .prepare(Operation::Help, &params(json!({"useUsb": true, "useEmulator": true})))
            .unwrap();
        assert_eq!(cmd.argv(), ["adb", "-d", "help"]);
    }

    #[tokio::test]
    async fn empty_output_uses_fallback_text() {
        let out = dispatcher("true")
            .dispatch(
                Operation::UninstallApk,
                &params(json!({"packageName": "com.example"})),
                pending(),
            )
            .await;
        assert!(!out.is_error());
        assert_eq!(out.text, "Package uninstalled successfully");
    }

    #[tokio::test]
    async fn failures_carry_operation_prefix() {
        let out = dispatcher("false")
            .dispatch(
                Operation::InstallApk,
                &params(json!({"apkPath": "/tmp/a.apk"})),
                pending(),
            )
            .await;
        assert_eq!(out.error, Some(ErrorKind::Tool));
        assert_eq!(out.text, "Failed to install APK: adb process failed (exit status 1)");
    }

    #[tokio::test]
    async fn validation_failure_never_spawns() {
        // A missing binary would surface as Spawn if anything were started.
        let out = dispatcher("/definitely/not/here/adb")
            .dispatch(Operation::StartActivity, &params(json!({})), pending())
            .await;
        assert_eq!(out.error, Some(ErrorKind::Validation));
        assert_eq!(
            out.text,
            "Failed to start activity: Either component or action must be specified"
        );
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let out = dispatcher("/definitely/not/here/adb")
            .dispatch(Operation::KillServer, &Params::new(), pending())
            .await;
        assert_eq!(out.error, Some(ErrorKind::Spawn));
        assert!(out.text.starts_with("Failed to kill ADB server: failed to start"));
    }
}
