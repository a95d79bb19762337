/*!
Device selection.

Every operation accepts the same three optional fields; they collapse into a single
`DeviceSelector` with a fixed precedence:

    deviceId (non-empty)  ->  -s <id>
    useUsb                ->  -d
    useEmulator           ->  -e
    (none)                ->  no targeting flag

The id is never validated here; adb reports unknown serials itself.
*/

use std::fmt;

use super::params::Params;

/// Raw caller-supplied selection fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorInput {
    pub device_id: Option<String>,
    pub use_usb: bool,
    pub use_emulator: bool,
}

impl SelectorInput {
    /// Parameter keys consumed by the selector, shared by every operation.
    pub const DEVICE_ID: &'static str = "deviceId";
    pub const USE_USB: &'static str = "useUsb";
    pub const USE_EMULATOR: &'static str = "useEmulator";

    /// Read the selection fields out of a call's parameter map.
    pub fn from_params(params: &Params) -> Result<Self, super::DispatchError> {
        Ok(SelectorInput {
            device_id: params.text(Self::DEVICE_ID)?.map(str::to_string),
            use_usb: params.switch(Self::USE_USB, false)?,
            use_emulator: params.switch(Self::USE_EMULATOR, false)?,
        })
    }
}

/// Resolved targeting for one call. `Eq + Hash` so an outer layer can key
/// per-device serialization on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DeviceSelector {
    #[default]
    None,
    ById(String),
    Usb,
    Emulator,
}

impl DeviceSelector {
    /// Global adb flag tokens; placed before the sub-command.
    pub fn flag_tokens(&self) -> Vec<String> {
        match self {
            DeviceSelector::None => Vec::new(),
            DeviceSelector::ById(id) => vec!["-s".to_string(), id.clone()],
            DeviceSelector::Usb => vec!["-d".to_string()],
            DeviceSelector::Emulator => vec!["-e".to_string()],
        }
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelector::None => write!(f, "any"),
            DeviceSelector::ById(id) => write!(f, "serial:{id}"),
            DeviceSelector::Usb => write!(f, "usb"),
            DeviceSelector::Emulator => write!(f, "emulator"),
        }
    }
}

/// First match wins; an empty id falls through to the boolean flags.
pub fn resolve(input: &SelectorInput) -> DeviceSelector {
    if let Some(id) = input.device_id.as_deref()
        && !id.is_empty()
    {
        return DeviceSelector::ById(id.to_string());
    }
    if input.use_usb {
        DeviceSelector::Usb
    } else if input.use_emulator {
        DeviceSelector::Emulator
    } else {
        DeviceSelector::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(id: Option<&str>, usb: bool, emu: bool) -> SelectorInput {
        SelectorInput {
            device_id: id.map(str::to_string),
            use_usb: usb,
            use_emulator: emu,
        }
    }

    #[test]
    fn explicit_id_wins_over_every_flag_combination() {
        for (usb, emu) in [(false, false), (true, false), (false, true), (true, true)] {
            let sel = resolve(&input(Some("emulator-5554"), usb, emu));
            assert_eq!(sel, DeviceSelector::ById("emulator-5554".into()));
            assert_eq!(sel.flag_tokens(), vec!["-s", "emulator-5554"]);
        }
    }

    #[test]
    fn usb_beats_emulator() {
        assert_eq!(resolve(&input(None, true, true)), DeviceSelector::Usb);
        assert_eq!(resolve(&input(None, false, true)), DeviceSelector::Emulator);
    }

    #[test]
    fn empty_id_is_treated_as_absent() {
        assert_eq!(resolve(&input(Some(""), false, true)), DeviceSelector::Emulator);
        assert_eq!(resolve(&input(Some(""), false, false)), DeviceSelector::None);
        assert!(DeviceSelector::None.flag_tokens().is_empty());
    }

    #[test]
    fn id_with_spaces_stays_one_token() {
        let sel = resolve(&input(Some("192.168.0.7:5555 extra"), false, false));
        assert_eq!(sel.flag_tokens(), vec!["-s", "192.168.0.7:5555 extra"]);
    }

    #[test]
    fn reads_fields_from_params() {
        let params = Params::from_value(json!({"deviceId": "abc", "useUsb": true})).unwrap();
        let sel = SelectorInput::from_params(&params).unwrap();
        assert_eq!(sel, input(Some("abc"), true, false));
        assert_eq!(resolve(&sel).to_string(), "serial:abc");
    }
}
