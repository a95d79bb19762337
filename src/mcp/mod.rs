//! MCP front end: one tool per catalog operation, served over stdio.
//!
//! AdbServer::new(dispatcher) -> tool router (rmcp macros)
//! serve_stdio(dispatcher)    -> run until the client disconnects
//!
//! Tool handlers only convert their typed input into `Params` and hand off to the
//! dispatcher; every adb failure comes back as an `is_error` tool result, never as a
//! protocol error. Cancelling a request kills the adb process it spawned.

pub mod params;

use anyhow::{Context, Result};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tracing::info;

use crate::adb::{Dispatcher, Operation, Outcome, Params};
use params::{
    DeviceSelection, GetDevicesParams, InputTextParams, InstallApkParams, ListPackagesParams,
    PackageParams, PermissionParams, PullParams, PushParams, RmParams, ScreencapParams,
    StartActivityParams, UninstallApkParams,
};

#[derive(Clone)]
pub struct AdbServer {
    dispatcher: Dispatcher,
    tool_router: ToolRouter<AdbServer>,
}

#[tool_router]
impl AdbServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(name = "get-devices", description = "Get a list of connected Android devices")]
    async fn get_devices(
        &self,
        Parameters(p): Parameters<GetDevicesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::GetDevices, &p, ctx).await
    }

    #[tool(name = "list-packages", description = "Get a list of installed applications")]
    async fn list_packages(
        &self,
        Parameters(p): Parameters<ListPackagesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::ListPackages, &p, ctx).await
    }

    #[tool(
        name = "input-text",
        description = "Input text to the connected Android device. The text is passed to adb as one argument, but the device shell re-splits it: quote or escape shell metacharacters yourself"
    )]
    async fn input_text(
        &self,
        Parameters(p): Parameters<InputTextParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::InputText, &p, ctx).await
    }

    #[tool(name = "help", description = "Show ADB help information")]
    async fn help(
        &self,
        Parameters(p): Parameters<DeviceSelection>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::Help, &p, ctx).await
    }

    #[tool(name = "kill-server", description = "Kill the ADB server process")]
    async fn kill_server(
        &self,
        Parameters(p): Parameters<DeviceSelection>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::KillServer, &p, ctx).await
    }

    #[tool(name = "start-server", description = "Start the ADB server process")]
    async fn start_server(
        &self,
        Parameters(p): Parameters<DeviceSelection>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::StartServer, &p, ctx).await
    }

    #[tool(name = "install-apk", description = "Install an APK file to the device")]
    async fn install_apk(
        &self,
        Parameters(p): Parameters<InstallApkParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::InstallApk, &p, ctx).await
    }

    #[tool(name = "uninstall-apk", description = "Uninstall an application from the device")]
    async fn uninstall_apk(
        &self,
        Parameters(p): Parameters<UninstallApkParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::UninstallApk, &p, ctx).await
    }

    #[tool(
        name = "clear-app-data",
        description = "Clear application data for a specific package"
    )]
    async fn clear_app_data(
        &self,
        Parameters(p): Parameters<PackageParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::ClearAppData, &p, ctx).await
    }

    #[tool(
        name = "pull",
        description = "Pull a file from the Android device to the local machine"
    )]
    async fn pull(
        &self,
        Parameters(p): Parameters<PullParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::Pull, &p, ctx).await
    }

    #[tool(
        name = "push",
        description = "Push a file from the local machine to the Android device"
    )]
    async fn push(
        &self,
        Parameters(p): Parameters<PushParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::Push, &p, ctx).await
    }

    #[tool(name = "screencap", description = "Take a screenshot of the device display")]
    async fn screencap(
        &self,
        Parameters(p): Parameters<ScreencapParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::Screencap, &p, ctx).await
    }

    #[tool(
        name = "rm",
        description = "Remove a file from the Android device. The path is passed to adb as one argument, but the device shell re-splits it: quote paths containing spaces or shell metacharacters yourself"
    )]
    async fn rm(
        &self,
        Parameters(p): Parameters<RmParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::Rm, &p, ctx).await
    }

    #[tool(
        name = "reset-permissions",
        description = "Reset all permissions for a specific package"
    )]
    async fn reset_permissions(
        &self,
        Parameters(p): Parameters<PackageParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::ResetPermissions, &p, ctx).await
    }

    #[tool(name = "grant-permission", description = "Grant a specific permission to an app")]
    async fn grant_permission(
        &self,
        Parameters(p): Parameters<PermissionParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::GrantPermission, &p, ctx).await
    }

    #[tool(
        name = "revoke-permission",
        description = "Revoke a specific permission from an app"
    )]
    async fn revoke_permission(
        &self,
        Parameters(p): Parameters<PermissionParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::RevokePermission, &p, ctx).await
    }

    #[tool(
        name = "start-activity",
        description = "Start an activity using activity manager (am start); requires component or action"
    )]
    async fn start_activity(
        &self,
        Parameters(p): Parameters<StartActivityParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(Operation::StartActivity, &p, ctx).await
    }
}

impl AdbServer {
    /// Published tool descriptors (name, description, input schema).
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call<P: Serialize>(
        &self,
        op: Operation,
        typed: &P,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = match Params::from_serialize(typed) {
            Ok(params) => {
                self.dispatcher
                    .dispatch(op, &params, ctx.ct.cancelled())
                    .await
            }
            Err(err) => Outcome {
                text: format!("{}: {err}", op.spec().failure),
                error: Some(err.kind()),
            },
        };
        Ok(to_call_result(outcome))
    }
}

#[tool_handler]
impl ServerHandler for AdbServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Android Debug Bridge tools. Every tool accepts deviceId / useUsb / useEmulator \
                 to pick the target device (deviceId wins)."
                    .to_string(),
            ),
        }
    }
}

pub fn to_call_result(outcome: Outcome) -> CallToolResult {
    let error = outcome.is_error();
    let content = vec![Content::text(outcome.text)];
    if error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

/// Serve the tool catalog on stdin/stdout until the peer goes away.
pub async fn serve_stdio(dispatcher: Dispatcher) -> Result<()> {
    let adb = dispatcher.config().adb_path.clone();
    let service = AdbServer::new(dispatcher)
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to initialize MCP service on stdio")?;
    info!(adb = %adb, "ADB MCP server running on stdio");

    let reason = service.waiting().await.context("MCP service task failed")?;
    info!(?reason, "MCP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::{AdbConfig, ErrorKind};
    use std::collections::HashSet;

    fn server() -> AdbServer {
        AdbServer::new(Dispatcher::new(AdbConfig {
            adb_path: "adb".into(),
        }))
    }

    #[test]
    fn router_exposes_exactly_the_catalog() {
        let published: HashSet<String> = server()
            .tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        let catalog: HashSet<String> = Operation::ALL
            .iter()
            .map(|op| op.name().to_string())
            .collect();
        assert_eq!(published, catalog);
    }

    #[test]
    fn every_schema_offers_device_selection() {
        for tool in server().tools() {
            let schema = serde_json::Value::Object(tool.input_schema.as_ref().clone());
            let props = &schema["properties"];
            for key in ["deviceId", "useUsb", "useEmulator"] {
                assert!(
                    props.get(key).is_some(),
                    "{} schema lacks {key}: {schema}",
                    tool.name
                );
            }
        }
    }

    #[test]
    fn device_shell_tools_warn_about_quoting() {
        for tool in server().tools() {
            if tool.name == "input-text" || tool.name == "rm" {
                let desc = tool.description.as_deref().unwrap_or_default();
                assert!(desc.contains("device shell re-splits"), "{}: {desc}", tool.name);
            }
        }
    }

    #[test]
    fn outcome_maps_to_error_flag() {
        let ok = to_call_result(Outcome {
            text: "fine".into(),
            error: None,
        });
        assert_eq!(ok.is_error, Some(false));

        let failed = to_call_result(Outcome {
            text: "Failed to push file: nope".into(),
            error: Some(ErrorKind::Tool),
        });
        assert_eq!(failed.is_error, Some(true));
        let v = serde_json::to_value(&failed).unwrap();
        assert_eq!(v["content"][0]["text"], "Failed to push file: nope");
    }
}
