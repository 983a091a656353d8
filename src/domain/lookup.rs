//! Device report returned by the lookup endpoint, and the provider's check tiers.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use utoipa::ToSchema;

const UNKNOWN: &str = "Unknown";

/// Check tiers offered by the lookup provider, keyed by the provider's numeric service id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckService {
    /// Basic device info, carrier status, activation details.
    Basic,
    /// Adds warranty, repair history and Find My status.
    Advanced,
    /// Adds security, MDM lock status and technical specifications.
    Full,
}

impl CheckService {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(CheckService::Basic),
            2 => Some(CheckService::Advanced),
            3 => Some(CheckService::Full),
            _ => None,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            CheckService::Basic => 1,
            CheckService::Advanced => 2,
            CheckService::Full => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CheckService::Basic => "Basic Check",
            CheckService::Advanced => "Advanced Check",
            CheckService::Full => "Full Check",
        }
    }
}

impl Default for CheckService {
    fn default() -> Self {
        CheckService::Basic
    }
}

impl fmt::Display for CheckService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (service {})", self.title(), self.id())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct DeviceSpecifications {
    pub model_name: String,
    pub manufacturer: String,
    pub model_number: String,
    pub device_type: String,
    pub release_date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct BlacklistStatus {
    /// Provider status string, `unknown` when the provider did not report one.
    pub status: String,
    pub reported_date: Option<String>,
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AdditionalInfo {
    pub carrier: String,
    pub country: String,
    pub warranty: String,
    pub activation_status: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct DeviceReport {
    pub specifications: DeviceSpecifications,
    pub blacklist: BlacklistStatus,
    pub additional_info: AdditionalInfo,
}

impl DeviceReport {
    /// Maps a raw provider payload onto the report shape.
    ///
    /// Missing, null, non-string and empty fields fall back to the defaults.
    pub fn from_provider(payload: &JsonValue) -> Self {
        let text = |section: &str, field: &str| -> Option<String> {
            payload
                .get(section)
                .and_then(|s| s.get(field))
                .and_then(JsonValue::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let or_unknown =
            |section: &str, field: &str| text(section, field).unwrap_or_else(|| UNKNOWN.to_string());

        DeviceReport {
            specifications: DeviceSpecifications {
                model_name: or_unknown("device", "model_name"),
                manufacturer: or_unknown("device", "manufacturer"),
                model_number: or_unknown("device", "model_number"),
                device_type: or_unknown("device", "type"),
                release_date: or_unknown("device", "release_date"),
            },
            blacklist: BlacklistStatus {
                status: text("blacklist", "status").unwrap_or_else(|| "unknown".to_string()),
                reported_date: text("blacklist", "reported_date"),
                reason: text("blacklist", "reason"),
            },
            additional_info: AdditionalInfo {
                carrier: or_unknown("carrier", "name"),
                country: or_unknown("carrier", "country"),
                warranty: or_unknown("warranty", "status"),
                activation_status: or_unknown("activation", "status"),
            },
        }
    }
}
