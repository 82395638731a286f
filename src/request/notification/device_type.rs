use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The platforms a push can be delivered to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Ios,
    Android,
    Amazon,
    Wns,
    Mpns,
    Blackberry,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Ios => "ios",
            DeviceType::Android => "android",
            DeviceType::Amazon => "amazon",
            DeviceType::Wns => "wns",
            DeviceType::Mpns => "mpns",
            DeviceType::Blackberry => "blackberry",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(DeviceType::Ios),
            "android" => Ok(DeviceType::Android),
            "amazon" => Ok(DeviceType::Amazon),
            "wns" => Ok(DeviceType::Wns),
            "mpns" => Ok(DeviceType::Mpns),
            "blackberry" => Ok(DeviceType::Blackberry),
            other => Err(Error::InvalidArgument(format!("Invalid device type: {}", other))),
        }
    }
}

impl From<DeviceType> for Value {
    fn from(device_type: DeviceType) -> Value {
        Value::String(device_type.as_str().to_string())
    }
}
