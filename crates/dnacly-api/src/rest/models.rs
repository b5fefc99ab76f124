// DNA Center REST response types
//
// Inventory endpoints wrap their payload as `{ "response": [...], "version": "1.0" }`.
// The controller returns dozens of fields per object, varies them across
// releases and is loose about their JSON types, so items are kept exactly as
// received. Typed accessors read the few fields callers look at.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Envelopes ────────────────────────────────────────────────────────

/// Body of `POST /dna/system/api/v1/auth/token`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(rename = "Token", default)]
    pub token: Option<String>,
}

/// Standard inventory envelope. A missing or `null` `response` means no data.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope<T> {
    pub response: Option<Vec<T>>,
}

impl<T> ResponseEnvelope<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        self.response.unwrap_or_default()
    }
}

// ── Raw items ────────────────────────────────────────────────────────

/// Field readers shared by [`Device`] and [`Interface`].
fn str_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str)
}

/// Strings as-is, numbers and booleans in their JSON spelling, else `None`.
fn text_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    }
}

macro_rules! raw_item {
    ($name:ident) => {
        impl $name {
            /// The item exactly as the controller returned it.
            pub fn as_value(&self) -> &Value {
                &self.0
            }

            pub fn into_value(self) -> Value {
                self.0
            }

            /// A field by its wire name, whatever its type.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// A string field; `None` when absent, `null` or not a string.
            pub fn str_field(&self, key: &str) -> Option<&str> {
                str_field(&self.0, key)
            }

            /// A scalar field rendered as text, for display.
            pub fn text(&self, key: &str) -> Option<String> {
                text_field(&self.0, key)
            }
        }

        impl From<Value> for $name {
            fn from(raw: Value) -> Self {
                Self(raw)
            }
        }
    };
}

// ── Device ───────────────────────────────────────────────────────────

/// Network device from `/api/v1/network-device`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Device(Value);

raw_item!(Device);

impl Device {
    /// Controller-internal identifier, used to scope interface queries.
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn management_ip_address(&self) -> Option<&str> {
        self.str_field("managementIpAddress")
    }

    pub fn hostname(&self) -> Option<&str> {
        self.str_field("hostname")
    }

    /// Exact string comparison against `managementIpAddress`.
    pub fn has_management_ip(&self, ip: &str) -> bool {
        self.management_ip_address() == Some(ip)
    }
}

// ── Interface ────────────────────────────────────────────────────────

/// Interface from `/api/v1/interface?deviceId=<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interface(Value);

raw_item!(Interface);

impl Interface {
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn port_name(&self) -> Option<&str> {
        self.str_field("portName")
    }

    /// Operational status, "up" or "down".
    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }
}
