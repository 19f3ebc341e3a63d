use serde::{ Serialize, Deserialize };

use crate::light::LightSetting;

const SET_PILOT: &str = "setPilot";
const ENV: &str = "pro";

/// JSON datagram understood by the bulbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub method: String,
    pub env: String,
    pub params: Params,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub state: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimming: Option<u8>,
}

impl Payload {
    /// Switches the bulbs on or off, keeping their last color and brightness.
    pub fn state(on: bool) -> Self {
        Payload::set_pilot(Params { state: on, temp: None, dimming: None })
    }

    /// Switches the bulbs on with `setting`.
    pub fn setting(setting: LightSetting) -> Self {
        Payload::set_pilot(Params {
            state: true,
            temp: Some(setting.temperature()),
            dimming: Some(setting.brightness()),
        })
    }

    fn set_pilot(params: Params) -> Self {
        Payload { method: SET_PILOT.to_string(), env: ENV.to_string(), params }
    }

    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
