use log::LevelFilter;
use serde::{ Deserialize, Deserializer, de::Unexpected };

#[derive(Debug, Deserialize)]
pub struct Logging {
    #[serde(deserialize_with = "deserialize_level")]
    pub level: LevelFilter,
    pub path: String,
    /// Size in MiB after which the log file is rolled.
    #[serde(deserialize_with = "deserialize_size")]
    pub size: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub count: u32,
}

fn deserialize_level<'de, D>(d: D) -> Result<LevelFilter, D::Error> where D: Deserializer<'de> {
    match String::deserialize(d)?.as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        invalid => Err(serde::de::Error::invalid_value(Unexpected::Str(invalid), &"off, error, warn, info, debug or trace")),
    }
}

fn deserialize_size<'de, D>(d: D) -> Result<u64, D::Error> where D: Deserializer<'de> {
    let value = u64::deserialize(d)?;
    if value > 0 { Ok(value) }
    else { Err(serde::de::Error::invalid_value(Unexpected::Unsigned(value), &"to be greater than zero. (logging.size)")) }
}

fn deserialize_count<'de, D>(d: D) -> Result<u32, D::Error> where D: Deserializer<'de> {
    let value = u32::deserialize(d)?;
    if value > 0 { Ok(value) }
    else { Err(serde::de::Error::invalid_value(Unexpected::Unsigned(value as u64), &"to be greater than zero. (logging.count)")) }
}
