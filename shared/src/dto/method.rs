//! Envelope for remote method calls tunnelled through the REST bridge
//! (`POST /api/v1/method.call/{method}`).
//!
//! The bridge wraps a DDP `method` message as a JSON string inside
//! `{"message": ...}` and answers the same way.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, SharedError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodCall {
    pub msg: String,
    pub id: String,
    pub method: String,
    pub params: Vec<Value>,
}

impl MethodCall {
    pub fn new(method: &str, params: Vec<Value>) -> Self {
        Self {
            msg: "method".to_string(),
            id: Uuid::new_v4().to_string(),
            method: method.to_string(),
            params,
        }
    }

    /// Request body expected by the bridge
    pub fn to_body(&self) -> Result<BridgeEnvelope> {
        Ok(BridgeEnvelope {
            message: serde_json::to_string(self)?,
            success: None,
        })
    }
}

/// Outer `{"message": "<json>"}` object used in both directions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodError {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MethodError {
    fn describe(&self) -> String {
        self.reason
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.error.as_ref().map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }))
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MethodReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<MethodError>,
}

/// Decodes a bridge reply into the method's result type.
///
/// A missing `result` decodes as JSON `null`, so methods returning nothing
/// can be read as `()` or `Option<T>`.
pub fn decode_reply<T: DeserializeOwned>(method: &str, envelope: &BridgeEnvelope) -> Result<T> {
    let reply: MethodReply = serde_json::from_str(&envelope.message)?;
    if let Some(error) = reply.error {
        return Err(SharedError::Method {
            method: method.to_string(),
            reason: error.describe(),
        });
    }
    let result = reply.result.unwrap_or(Value::Null);
    serde_json::from_value(result).map_err(|e| {
        SharedError::Conversion(format!("Failed to parse {} result: {}", method, e))
    })
}
