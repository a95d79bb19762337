//! Typed tool inputs. Field names and doc comments become the published JSON schemas.
//!
//! Defaults are not filled in here: absent switches stay `None` and the catalog's
//! per-operation default applies when the argument vector is built.

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

/// Device selection accepted by every tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSelection {
    /// Target specific device by ID (takes precedence over useUsb and useEmulator)
    #[serde(default)]
    pub device_id: Option<String>,
    /// Target USB connected device (-d), default false
    #[serde(default)]
    pub use_usb: Option<bool>,
    /// Target emulator instance (-e), default false
    #[serde(default)]
    pub use_emulator: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetDevicesParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Show device details (-l), default true
    #[serde(default)]
    pub show_details: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPackagesParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Show the APK file path for each package (-f)
    #[serde(default)]
    pub show_path: Option<bool>,
    /// Filter to only show disabled packages (-d)
    #[serde(default)]
    pub show_disabled: Option<bool>,
    /// Filter to only show enabled packages (-e)
    #[serde(default)]
    pub show_enabled: Option<bool>,
    /// Filter to only show system packages (-s)
    #[serde(default)]
    pub show_system: Option<bool>,
    /// Filter to only show third party packages (-3)
    #[serde(default)]
    pub show_third_party: Option<bool>,
    /// Show the installer for each package (-i)
    #[serde(default)]
    pub show_installer: Option<bool>,
    /// Include uninstalled packages (-u)
    #[serde(default)]
    pub include_uninstalled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InputTextParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Text to input to the device
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallApkParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Path to the APK file
    pub apk_path: String,
    /// Allow reinstalling an existing app (-r), default true
    #[serde(default)]
    pub allow_reinstall: Option<bool>,
    /// Allow test packages (-t), default true
    #[serde(default)]
    pub allow_test_packages: Option<bool>,
    /// Allow version code downgrade (-d), default true
    #[serde(default)]
    pub allow_downgrade: Option<bool>,
    /// Grant all runtime permissions (-g), default false
    #[serde(default)]
    pub grant_permissions: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UninstallApkParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Package name of the application
    pub package_name: String,
    /// Keep the app data and cache directories (-k)
    #[serde(default)]
    pub keep_data: Option<bool>,
}

/// Shared by clear-app-data and reset-permissions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Package name of the application
    pub package_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PullParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Path to the file on the device
    pub remote_path: String,
    /// Where to save the file locally (defaults to the current directory)
    #[serde(default)]
    pub local_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Path to the local file
    pub local_path: String,
    /// Destination path on the device
    pub remote_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreencapParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Path on device where to save the screenshot (e.g. /sdcard/screenshot.png)
    pub remote_path: String,
    /// Save as PNG format (-p), default true
    #[serde(default)]
    pub use_png: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RmParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Path to the file on device to remove
    pub path: String,
    /// Force removal (-f)
    #[serde(default)]
    pub force: Option<bool>,
    /// Recursive removal (-r)
    #[serde(default)]
    pub recursive: Option<bool>,
}

/// Shared by grant-permission and revoke-permission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Package name of the application
    pub package_name: String,
    /// Permission name (e.g. android.permission.CAMERA)
    pub permission: String,
}

/// Tags accepted by the builder; anything else is rejected there as a validation failure.
const EXTRA_TYPES: [&str; 7] = ["string", "int", "long", "float", "boolean", "uri", "component"];

fn extra_type_schema(_: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "string",
        "enum": EXTRA_TYPES,
        "description": "Extra type (string, int, long, float, boolean, uri, component)"
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IntentExtra {
    #[serde(rename = "type")]
    #[schemars(schema_with = "extra_type_schema")]
    pub kind: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartActivityParams {
    #[serde(flatten)]
    pub device: DeviceSelection,
    /// Component name (e.g. com.example/.MainActivity)
    #[serde(default)]
    pub component: Option<String>,
    /// Intent action (e.g. android.intent.action.VIEW)
    #[serde(default)]
    pub action: Option<String>,
    /// Intent data URI
    #[serde(default)]
    pub data: Option<String>,
    /// MIME type (e.g. image/png)
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Intent categories (e.g. ["android.intent.category.LAUNCHER"])
    #[serde(default)]
    pub category: Option<Vec<String>>,
    /// Typed intent extras (e.g. [{"type": "string", "key": "k", "value": "v"}])
    #[serde(default)]
    pub extras: Option<Vec<IntentExtra>>,
    /// Intent flags (e.g. ["activity_new_task"])
    #[serde(default)]
    pub flags: Option<Vec<String>>,
    /// Wait for launch to complete (-W)
    #[serde(default)]
    pub wait_for_launch: Option<bool>,
    /// Debug mode (-D)
    #[serde(default)]
    pub debuggable: Option<bool>,
    /// Force stop the target app before starting the activity (-S)
    #[serde(default)]
    pub stop_app: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::{Operation, Params};
    use serde_json::json;

    #[test]
    fn flattened_selection_serializes_to_wire_names() {
        let p = InstallApkParams {
            device: DeviceSelection {
                device_id: Some("R58M".into()),
                ..Default::default()
            },
            apk_path: "/tmp/a.apk".into(),
            allow_reinstall: None,
            allow_test_packages: Some(false),
            allow_downgrade: None,
            grant_permissions: None,
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["deviceId"], json!("R58M"));
        assert_eq!(v["apkPath"], json!("/tmp/a.apk"));
        assert_eq!(v["allowTestPackages"], json!(false));
        assert!(v["allowReinstall"].is_null());
    }

    #[test]
    fn extras_keep_lowercase_type_tags() {
        let p: StartActivityParams = serde_json::from_value(json!({
            "action": "android.intent.action.VIEW",
            "extras": [{"type": "component", "key": "target", "value": "com.a/.B"}]
        }))
        .unwrap();
        let params = Params::from_serialize(&p).unwrap();
        let extras = params.extras("extras").unwrap();
        assert_eq!(extras[0].kind, "component");
    }

    #[test]
    fn unknown_extra_type_reaches_the_builder() {
        let p: StartActivityParams = serde_json::from_value(json!({
            "action": "A",
            "extras": [{"type": "double", "key": "k", "value": "1"}]
        }))
        .unwrap();
        let params = Params::from_serialize(&p).unwrap();
        let d = crate::adb::Dispatcher::new(crate::adb::AdbConfig {
            adb_path: "adb".into(),
        });
        let err = d.prepare(Operation::StartActivity, &params).unwrap_err();
        assert_eq!(err.kind(), crate::adb::ErrorKind::Validation);
        assert!(err.to_string().starts_with("unknown extra type 'double'"), "{err}");
    }

    #[test]
    fn extra_type_schema_lists_known_tags() {
        let schema = serde_json::to_value(schemars::schema_for!(IntentExtra)).unwrap();
        let tags = &schema["properties"]["type"]["enum"];
        assert_eq!(tags.as_array().map(Vec::len), Some(EXTRA_TYPES.len()));
        assert_eq!(tags[6], "component");
    }

    #[test]
    fn typed_params_build_the_same_argv_as_raw_json() {
        let typed = StartActivityParams {
            action: Some("android.intent.action.VIEW".into()),
            data: Some("https://example.com".into()),
            ..Default::default()
        };
        let from_typed = Params::from_serialize(&typed).unwrap();
        let from_raw = Params::from_value(json!({
            "action": "android.intent.action.VIEW",
            "data": "https://example.com"
        }))
        .unwrap();

        let d = crate::adb::Dispatcher::new(crate::adb::AdbConfig {
            adb_path: "adb".into(),
        });
        assert_eq!(
            d.prepare(Operation::StartActivity, &from_typed).unwrap(),
            d.prepare(Operation::StartActivity, &from_raw).unwrap()
        );
    }
}
