/*!
Static operation catalog.

Each supported operation is one `OperationSpec`: the adb sub-command tokens followed by an
ordered list of `ArgRule`s. The generic builder (`builder::build`) walks the rules in order,
so the order written here IS the argument order adb receives.

Rule kinds:
  Switch      boolean -> single flag token when true (`default` applies when absent)
  Valued      flag + value when the string is present and non-empty
  Repeated    flag + value per list element, input order
  Extras      typed intent extras -> (flag, key, value) triples
  Positional  bare token; `required` ones must be present and non-empty

The `OnSuccess` policy decides what a successful call returns when adb prints nothing.
*/

/// Argument rule for one parameter of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRule {
    Switch {
        param: &'static str,
        flag: &'static str,
        default: bool,
    },
    Valued {
        param: &'static str,
        flag: &'static str,
    },
    Repeated {
        param: &'static str,
        flag: &'static str,
    },
    Extras {
        param: &'static str,
    },
    Positional {
        param: &'static str,
        required: bool,
    },
}

impl ArgRule {
    pub fn param(&self) -> &'static str {
        match *self {
            ArgRule::Switch { param, .. }
            | ArgRule::Valued { param, .. }
            | ArgRule::Repeated { param, .. }
            | ArgRule::Extras { param }
            | ArgRule::Positional { param, .. } => param,
        }
    }

    /// Short type label used by the CLI (`list`, `exec --param` coercion).
    pub fn kind_label(&self) -> &'static str {
        match self {
            ArgRule::Switch { .. } => "bool",
            ArgRule::Valued { .. } => "string",
            ArgRule::Repeated { .. } => "list",
            ArgRule::Extras { .. } => "extras",
            ArgRule::Positional { required: true, .. } => "string!",
            ArgRule::Positional { required: false, .. } => "string",
        }
    }
}

/// What a successful call answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnSuccess {
    /// adb's stdout verbatim, or the fallback text when stdout is empty.
    /// `{param}` placeholders in the fallback are filled from the call's parameters.
    OutputOr(&'static str),
    /// Fixed confirmation regardless of stdout.
    Fixed(&'static str),
}

#[derive(Debug)]
pub struct OperationSpec {
    /// Tool name on the wire.
    pub name: &'static str,
    /// adb sub-command tokens (after the global selector flags).
    pub command: &'static [&'static str],
    pub args: &'static [ArgRule],
    /// At least one of these parameters must be present (non-empty).
    pub one_of: &'static [&'static str],
    pub reply: OnSuccess,
    /// Prefix of every failure message, e.g. "Failed to install APK".
    pub failure: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetDevices,
    ListPackages,
    InputText,
    Help,
    KillServer,
    StartServer,
    InstallApk,
    UninstallApk,
    ClearAppData,
    Pull,
    Push,
    Screencap,
    Rm,
    ResetPermissions,
    GrantPermission,
    RevokePermission,
    StartActivity,
}

impl Operation {
    pub const ALL: [Operation; 17] = [
        Operation::GetDevices,
        Operation::ListPackages,
        Operation::InputText,
        Operation::Help,
        Operation::KillServer,
        Operation::StartServer,
        Operation::InstallApk,
        Operation::UninstallApk,
        Operation::ClearAppData,
        Operation::Pull,
        Operation::Push,
        Operation::Screencap,
        Operation::Rm,
        Operation::ResetPermissions,
        Operation::GrantPermission,
        Operation::RevokePermission,
        Operation::StartActivity,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        match self {
            Operation::GetDevices => &GET_DEVICES,
            Operation::ListPackages => &LIST_PACKAGES,
            Operation::InputText => &INPUT_TEXT,
            Operation::Help => &HELP,
            Operation::KillServer => &KILL_SERVER,
            Operation::StartServer => &START_SERVER,
            Operation::InstallApk => &INSTALL_APK,
            Operation::UninstallApk => &UNINSTALL_APK,
            Operation::ClearAppData => &CLEAR_APP_DATA,
            Operation::Pull => &PULL,
            Operation::Push => &PUSH,
            Operation::Screencap => &SCREENCAP,
            Operation::Rm => &RM,
            Operation::ResetPermissions => &RESET_PERMISSIONS,
            Operation::GrantPermission => &GRANT_PERMISSION,
            Operation::RevokePermission => &REVOKE_PERMISSION,
            Operation::StartActivity => &START_ACTIVITY,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Exact (case-sensitive) tool-name lookup.
    pub fn from_name(name: &str) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

/* ---- Table ---- */

static GET_DEVICES: OperationSpec = OperationSpec {
    name: "get-devices",
    command: &["devices"],
    args: &[ArgRule::Switch {
        param: "showDetails",
        flag: "-l",
        default: true,
    }],
    one_of: &[],
    reply: OnSuccess::OutputOr("No devices reported"),
    failure: "Failed to get device list",
};

static LIST_PACKAGES: OperationSpec = OperationSpec {
    name: "list-packages",
    command: &["shell", "pm", "list", "packages"],
    args: &[
        ArgRule::Switch {
            param: "showPath",
            flag: "-f",
            default: false,
        },
        ArgRule::Switch {
            param: "showDisabled",
            flag: "-d",
            default: false,
        },
        ArgRule::Switch {
            param: "showEnabled",
            flag: "-e",
            default: false,
        },
        ArgRule::Switch {
            param: "showSystem",
            flag: "-s",
            default: false,
        },
        ArgRule::Switch {
            param: "showThirdParty",
            flag: "-3",
            default: false,
        },
        ArgRule::Switch {
            param: "showInstaller",
            flag: "-i",
            default: false,
        },
        ArgRule::Switch {
            param: "includeUninstalled",
            flag: "-u",
            default: false,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("No packages matched"),
    failure: "Failed to get package list",
};

static INPUT_TEXT: OperationSpec = OperationSpec {
    name: "input-text",
    command: &["shell", "input", "text"],
    args: &[ArgRule::Positional {
        param: "text",
        required: true,
    }],
    one_of: &[],
    reply: OnSuccess::Fixed("Text input completed successfully"),
    failure: "Failed to input text",
};

static HELP: OperationSpec = OperationSpec {
    name: "help",
    command: &["help"],
    args: &[],
    one_of: &[],
    reply: OnSuccess::OutputOr("No help output"),
    failure: "Failed to get ADB help",
};

static KILL_SERVER: OperationSpec = OperationSpec {
    name: "kill-server",
    command: &["kill-server"],
    args: &[],
    one_of: &[],
    reply: OnSuccess::Fixed("ADB server has been killed successfully"),
    failure: "Failed to kill ADB server",
};

static START_SERVER: OperationSpec = OperationSpec {
    name: "start-server",
    command: &["start-server"],
    args: &[],
    one_of: &[],
    reply: OnSuccess::Fixed("ADB server has been started successfully"),
    failure: "Failed to start ADB server",
};

static INSTALL_APK: OperationSpec = OperationSpec {
    name: "install-apk",
    command: &["install"],
    args: &[
        ArgRule::Switch {
            param: "allowReinstall",
            flag: "-r",
            default: true,
        },
        ArgRule::Switch {
            param: "allowTestPackages",
            flag: "-t",
            default: true,
        },
        ArgRule::Switch {
            param: "allowDowngrade",
            flag: "-d",
            default: true,
        },
        ArgRule::Switch {
            param: "grantPermissions",
            flag: "-g",
            default: false,
        },
        ArgRule::Positional {
            param: "apkPath",
            required: true,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("APK installed successfully"),
    failure: "Failed to install APK",
};

static UNINSTALL_APK: OperationSpec = OperationSpec {
    name: "uninstall-apk",
    command: &["uninstall"],
    args: &[
        ArgRule::Switch {
            param: "keepData",
            flag: "-k",
            default: false,
        },
        ArgRule::Positional {
            param: "packageName",
            required: true,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("Package uninstalled successfully"),
    failure: "Failed to uninstall package",
};

static CLEAR_APP_DATA: OperationSpec = OperationSpec {
    name: "clear-app-data",
    command: &["shell", "pm", "clear"],
    args: &[ArgRule::Positional {
        param: "packageName",
        required: true,
    }],
    one_of: &[],
    reply: OnSuccess::OutputOr("Application data cleared successfully"),
    failure: "Failed to clear application data",
};

static PULL: OperationSpec = OperationSpec {
    name: "pull",
    command: &["pull"],
    args: &[
        ArgRule::Positional {
            param: "remotePath",
            required: true,
        },
        ArgRule::Positional {
            param: "localPath",
            required: false,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("File pulled successfully"),
    failure: "Failed to pull file",
};

static PUSH: OperationSpec = OperationSpec {
    name: "push",
    command: &["push"],
    args: &[
        ArgRule::Positional {
            param: "localPath",
            required: true,
        },
        ArgRule::Positional {
            param: "remotePath",
            required: true,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("File pushed successfully"),
    failure: "Failed to push file",
};

static SCREENCAP: OperationSpec = OperationSpec {
    name: "screencap",
    command: &["shell", "screencap"],
    args: &[
        ArgRule::Switch {
            param: "usePng",
            flag: "-p",
            default: true,
        },
        ArgRule::Positional {
            param: "remotePath",
            required: true,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("Screenshot captured successfully"),
    failure: "Failed to capture screenshot",
};

static RM: OperationSpec = OperationSpec {
    name: "rm",
    command: &["shell", "rm"],
    args: &[
        ArgRule::Switch {
            param: "force",
            flag: "-f",
            default: false,
        },
        ArgRule::Switch {
            param: "recursive",
            flag: "-r",
            default: false,
        },
        ArgRule::Positional {
            param: "path",
            required: true,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("File removed successfully"),
    failure: "Failed to remove file",
};

static RESET_PERMISSIONS: OperationSpec = OperationSpec {
    name: "reset-permissions",
    command: &["shell", "pm", "reset-permissions", "-p"],
    args: &[ArgRule::Positional {
        param: "packageName",
        required: true,
    }],
    one_of: &[],
    reply: OnSuccess::OutputOr("Permissions reset successfully"),
    failure: "Failed to reset permissions",
};

static GRANT_PERMISSION: OperationSpec = OperationSpec {
    name: "grant-permission",
    command: &["shell", "pm", "grant"],
    args: &[
        ArgRule::Positional {
            param: "packageName",
            required: true,
        },
        ArgRule::Positional {
            param: "permission",
            required: true,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("Permission {permission} granted successfully to {packageName}"),
    failure: "Failed to grant permission",
};

static REVOKE_PERMISSION: OperationSpec = OperationSpec {
    name: "revoke-permission",
    command: &["shell", "pm", "revoke"],
    args: &[
        ArgRule::Positional {
            param: "packageName",
            required: true,
        },
        ArgRule::Positional {
            param: "permission",
            required: true,
        },
    ],
    one_of: &[],
    reply: OnSuccess::OutputOr("Permission {permission} revoked successfully from {packageName}"),
    failure: "Failed to revoke permission",
};

static START_ACTIVITY: OperationSpec = OperationSpec {
    name: "start-activity",
    command: &["shell", "am", "start"],
    args: &[
        ArgRule::Switch {
            param: "waitForLaunch",
            flag: "-W",
            default: false,
        },
        ArgRule::Switch {
            param: "debuggable",
            flag: "-D",
            default: false,
        },
        ArgRule::Switch {
            param: "stopApp",
            flag: "-S",
            default: false,
        },
        ArgRule::Valued {
            param: "action",
            flag: "-a",
        },
        ArgRule::Valued {
            param: "data",
            flag: "-d",
        },
        ArgRule::Valued {
            param: "mimeType",
            flag: "-t",
        },
        ArgRule::Repeated {
            param: "category",
            flag: "-c",
        },
        ArgRule::Repeated {
            param: "flags",
            flag: "-f",
        },
        ArgRule::Extras { param: "extras" },
        // component goes last: `am start` treats the trailing bare token as the target
        ArgRule::Positional {
            param: "component",
            required: false,
        },
    ],
    one_of: &["component", "action"],
    reply: OnSuccess::OutputOr("Activity started successfully"),
    failure: "Failed to start activity",
};
