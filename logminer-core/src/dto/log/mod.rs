//! Log DTOs for the collector API

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use uuid::Uuid;

/// Body of `POST /logs/upload`
///
/// Every field is optional on the wire; required fields are enforced by the
/// collector's validation step. Scalar values are accepted for the string
/// fields (`"pipelineId": 42` reads as `"42"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLog {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub repo: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub pipeline_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub content: Option<String>,
    pub metadata: Option<Value>,
    /// RFC 3339 string or epoch milliseconds; anything else is ignored and
    /// submission time is used
    #[serde(default, deserialize_with = "loose_timestamp")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            if other.is_array() { "an array" } else { "an object" }
        ))),
    }
}

fn loose_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let timestamp = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => chrono::DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|t| t.with_timezone(&chrono::Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis),
        _ => None,
    };

    Ok(timestamp)
}

/// Successful upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLogResponse {
    pub message: String,
    pub log_id: Uuid,
}

impl UploadLogResponse {
    pub fn uploaded(log_id: Uuid) -> Self {
        Self {
            message: "Log uploaded successfully".to_string(),
            log_id,
        }
    }
}
