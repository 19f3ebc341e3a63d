use std::net::IpAddr;
use std::time::Duration;

use serde::{ Deserialize, Deserializer, de::Unexpected };

#[derive(Debug, Deserialize)]
pub struct General {
    pub module: BulbModule,

    #[serde(default)]
    pub bulb_ips: Vec<IpAddr>,

    #[serde(deserialize_with = "deserialize_bulb_port")]
    pub bulb_port: u16,

    /// Local port replies arrive on, 0 picks any free port.
    pub socket_port: u16,

    #[serde(deserialize_with = "deserialize_reply_timeout")]
    pub reply_timeout: Duration,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulbModule {
    Dummy,
    Udp,
}

fn deserialize_bulb_port<'de, D>(d: D) -> Result<u16, D::Error> where D: Deserializer<'de> {
    let value = u16::deserialize(d)?;
    if value > 0 { Ok(value) }
    else { Err(serde::de::Error::invalid_value(Unexpected::Unsigned(value as u64), &"to be greater than zero. (general.bulb_port)")) }
}

fn deserialize_reply_timeout<'de, D>(d: D) -> Result<Duration, D::Error> where D: Deserializer<'de> {
    let value = f64::deserialize(d)?;
    if value.is_finite() && value > 0.0 { Ok(Duration::from_secs_f64(value)) }
    else { Err(serde::de::Error::invalid_value(Unexpected::Float(value), &"to be greater than zero. (general.reply_timeout)")) }
}
