//! Case domain model.
//!
//! A `Case` is the immutable snapshot of everything the user has told us so
//! far: the appliance under diagnosis, the free-text symptom, and the ordered
//! question/answer history. It is sent to the oracle in full on every round
//! and grows by exactly one `QaPair` per round.

use crate::error::SmartfixError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of appliance under diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Refrigerator,
    WashingMachine,
    AirConditioner,
    Microwave,
}

impl Device {
    /// Wire name of the device, as sent to the oracle.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Refrigerator => "refrigerator",
            Device::WashingMachine => "washing_machine",
            Device::AirConditioner => "air_conditioner",
            Device::Microwave => "microwave",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = SmartfixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "refrigerator" => Ok(Device::Refrigerator),
            "washing_machine" => Ok(Device::WashingMachine),
            "air_conditioner" => Ok(Device::AirConditioner),
            "microwave" => Ok(Device::Microwave),
            other => Err(SmartfixError::config(format!(
                "unknown device '{other}' (expected refrigerator, washing_machine, air_conditioner or microwave)"
            ))),
        }
    }
}

/// A user's reply to a diagnostic question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Unknown,
}

impl Answer {
    /// Wire name of the answer, as sent to the oracle.
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One answered question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    /// The question exactly as it was shown to the user.
    pub question: String,
    /// The user's reply.
    pub answer: Answer,
}

/// The full diagnostic case sent to the oracle on every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// The appliance under diagnosis.
    pub device: Device,
    /// Free-text symptom description. Non-empty; enforced by the caller
    /// that opens the session.
    pub symptom: String,
    /// Ordered question/answer history, oldest first.
    #[serde(default)]
    pub history: Vec<QaPair>,
}

impl Case {
    /// Creates a new case with an empty history.
    pub fn new(device: Device, symptom: impl Into<String>) -> Self {
        Self {
            device,
            symptom: symptom.into(),
            history: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_round_trips_through_wire_name() {
        for device in [
            Device::Refrigerator,
            Device::WashingMachine,
            Device::AirConditioner,
            Device::Microwave,
        ] {
            assert_eq!(device.as_str().parse::<Device>().unwrap(), device);
        }
    }

    #[test]
    fn unknown_device_is_rejected() {
        assert!("toaster".parse::<Device>().is_err());
    }

    #[test]
    fn case_serializes_with_snake_case_wire_names() {
        let mut case = Case::new(Device::WashingMachine, "leaking from the door");
        case.history.push(QaPair {
            question: "Is the door seal visibly damaged?".to_string(),
            answer: Answer::No,
        });

        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(value["device"], "washing_machine");
        assert_eq!(value["history"][0]["answer"], "no");
    }
}
