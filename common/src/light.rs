use std::fmt;

pub const MIN_TEMPERATURE: u32 = 2200;
pub const MAX_TEMPERATURE: u32 = 6000;
pub const MIN_BRIGHTNESS: u8 = 10;
pub const MAX_BRIGHTNESS: u8 = 100;

/// Color temperature in kelvin and brightness in percent, always within what bulbs accept.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LightSetting {
    temperature: u32,
    brightness: u8,
}

impl LightSetting {
    pub fn clamped(temperature: i64, brightness: i64) -> Self {
        LightSetting {
            temperature: temperature.clamp(MIN_TEMPERATURE as i64, MAX_TEMPERATURE as i64) as u32,
            brightness: brightness.clamp(MIN_BRIGHTNESS as i64, MAX_BRIGHTNESS as i64) as u8,
        }
    }

    pub fn temperature(&self) -> u32 { self.temperature }

    pub fn brightness(&self) -> u8 { self.brightness }
}

impl fmt::Display for LightSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K at {}%", self.temperature, self.brightness)
    }
}
