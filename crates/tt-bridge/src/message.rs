//! Envelope codec for bridge messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope kind carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Request,
    Response,
    Event,
}

impl MessageType {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "request" => Some(Self::Request),
            "response" => Some(Self::Response),
            "event" => Some(Self::Event),
            _ => None,
        }
    }
}

/// A malformed envelope. Always dropped without a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    InvalidJson(String),

    #[error("envelope is not an object")]
    NotAnObject,

    #[error("missing or non-string field: {0}")]
    MissingField(&'static str),

    #[error("unknown message type: {0}")]
    UnknownType(String),
}

/// One bridge envelope.
///
/// `id` is present on requests and responses; `success` and `error` only
/// on responses. `payload` is opaque to the codec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeMessage {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeMessage {
    /// Decode a raw envelope.
    ///
    /// Requests must carry string `id` and `name`; responses a string `id`
    /// and boolean `success`; events a string `name`.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut obj) = value else {
            return Err(DecodeError::NotAnObject);
        };

        let kind_raw = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(DecodeError::MissingField("type"))?;
        let kind = MessageType::parse(kind_raw)
            .ok_or_else(|| DecodeError::UnknownType(kind_raw.to_string()))?;

        let id = string_field(&obj, "id");
        let name = string_field(&obj, "name");
        let payload = obj.remove("payload").filter(|p| !p.is_null());

        match kind {
            MessageType::Request => Ok(Self {
                kind,
                id: Some(id.ok_or(DecodeError::MissingField("id"))?),
                name: Some(name.ok_or(DecodeError::MissingField("name"))?),
                success: None,
                payload,
                error: None,
            }),
            MessageType::Response => {
                let success = obj
                    .get("success")
                    .and_then(Value::as_bool)
                    .ok_or(DecodeError::MissingField("success"))?;
                Ok(Self {
                    kind,
                    id: Some(id.ok_or(DecodeError::MissingField("id"))?),
                    name: None,
                    success: Some(success),
                    payload,
                    error: string_field(&obj, "error"),
                })
            }
            MessageType::Event => Ok(Self {
                kind,
                id: None,
                name: Some(name.ok_or(DecodeError::MissingField("name"))?),
                success: None,
                payload,
                error: None,
            }),
        }
    }

    /// Successful response. `payload` is omitted when `None`.
    pub fn response_ok(id: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            kind: MessageType::Response,
            id: Some(id.into()),
            name: None,
            success: Some(true),
            payload,
            error: None,
        }
    }

    /// Failed response carrying an error message and no payload.
    pub fn response_err(id: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            kind: MessageType::Response,
            id: Some(id.into()),
            name: None,
            success: Some(false),
            payload: None,
            error: (!error.is_empty()).then_some(error),
        }
    }

    /// Host-initiated event. Events always carry a payload object.
    pub fn event(name: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: MessageType::Event,
            id: None,
            name: Some(name.into()),
            success: None,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn is_request(&self) -> bool {
        self.kind == MessageType::Request
    }

    /// Serialize to the wire form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            // Only reachable with a non-string map key inside `payload`.
            match &self.id {
                Some(id) => serde_json::json!({
                    "type": "response",
                    "id": id,
                    "success": false,
                    "error": "native host response encoding failed",
                })
                .to_string(),
                None => "{}".to_string(),
            }
        })
    }
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

// =============================================================================
// TESTS
// =============================================================================
