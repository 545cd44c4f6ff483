use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::CodecError;
use crate::types::JsonRpcVersion;
use crate::{JSONRPC_VERSION, RESERVED_METHOD_PREFIX};

/// A JSON-RPC notification (a request without an id, expecting no reply)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Wire shape before validation. Missing fields decode to their defaults so
/// the version check below reports the violation instead of serde.
#[derive(Deserialize)]
struct RawNotification {
    #[serde(default)]
    jsonrpc: String,
    #[serde(default)]
    method: String,
    params: Option<Value>,
}

impl Notification {
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method: method.into(),
            params,
        }
    }

    /// Parse a notification from raw bytes.
    ///
    /// Notifications have no reply channel, so every failure mode is a local
    /// [`CodecError`] rather than a protocol error object.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let raw: RawNotification = serde_json::from_slice(bytes)?;

        if raw.jsonrpc != JSONRPC_VERSION {
            trace!(jsonrpc = %raw.jsonrpc, "rejecting notification with wrong protocol version");
            return Err(CodecError::VersionMismatch);
        }

        if raw.method.starts_with(RESERVED_METHOD_PREFIX) {
            trace!(method = %raw.method, "rejecting notification with reserved method name");
            return Err(CodecError::ReservedMethod);
        }

        Ok(Self {
            version: JsonRpcVersion::V2_0,
            method: raw.method,
            params: raw.params,
        })
    }

    /// Serialize `method` and `params` straight to wire bytes. `None` params
    /// are omitted from the output entirely, never emitted as `null`.
    pub fn build<P: Serialize>(method: &str, params: Option<P>) -> Result<Vec<u8>, CodecError> {
        let params = params.map(serde_json::to_value).transpose()?;
        Self::new(method, params).to_bytes()
    }

    /// Wire bytes of this notification, terminated by a single newline for
    /// line-delimited framing.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut bytes = serde_json::to_vec(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_notification() {
        let notification = Notification::from_bytes(
            br#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23]}"#,
        )
        .unwrap();

        assert_eq!(notification.method, "subtract");
        assert_eq!(notification.params, Some(json!([42, 23])));
    }

    #[test]
    fn test_parse_truncated_bytes() {
        let result = Notification::from_bytes(
            br#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23]"#,
        );
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_parse_wrong_protocol_version() {
        let result = Notification::from_bytes(
            br#"{"jsonrpc": "1.0", "method": "subtract", "params": [42, 23]}"#,
        );
        assert!(matches!(result, Err(CodecError::VersionMismatch)));
    }

    #[test]
    fn test_parse_missing_protocol_version() {
        let result = Notification::from_bytes(br#"{"method": "subtract"}"#);
        assert!(matches!(result, Err(CodecError::VersionMismatch)));
    }

    #[test]
    fn test_parse_reserved_method_prefix() {
        let result = Notification::from_bytes(
            br#"{"jsonrpc": "2.0", "method": "rpc.subtract", "params": [42, 23]}"#,
        );
        assert!(matches!(result, Err(CodecError::ReservedMethod)));
    }

    #[test]
    fn test_build_with_params() {
        let bytes = Notification::build("subtract", Some(vec![42, 43])).unwrap();
        assert_eq!(
            bytes,
            b"{\"jsonrpc\":\"2.0\",\"method\":\"subtract\",\"params\":[42,43]}\n"
        );
    }

    #[test]
    fn test_build_without_params_omits_field() {
        let bytes = Notification::build::<Value>("subtract", None).unwrap();
        assert_eq!(bytes, b"{\"jsonrpc\":\"2.0\",\"method\":\"subtract\"}\n");
    }

    #[test]
    fn test_round_trip() {
        let bytes = Notification::build("log", Some(json!({"level": "info"}))).unwrap();
        let parsed = Notification::from_bytes(&bytes).unwrap();

        assert_eq!(parsed.method, "log");
        assert_eq!(parsed.params, Some(json!({"level": "info"})));
    }
}
