use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::{CodecError, ErrorObject, INVALID_REQUEST, PARSE_ERROR};
use crate::response::Response;
use crate::types::{JsonRpcVersion, RequestId};
use crate::{JSONRPC_VERSION, RESERVED_METHOD_PREFIX};

/// A JSON-RPC request: a method invocation expecting exactly one response,
/// correlated by [`RequestId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub id: RequestId,
}

/// Wire shape before validation. The id stays an untyped [`Value`] here so
/// that a wrong id type maps to Invalid Request instead of a decode failure.
#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    jsonrpc: String,
    #[serde(default)]
    method: String,
    params: Option<Value>,
    id: Option<Value>,
}

impl Request {
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            method: method.into(),
            params,
            id,
        }
    }

    /// Parse a request from raw bytes.
    ///
    /// Every failure yields a canonical [`ErrorObject`] ready to be wrapped
    /// in an error response, checked in this fixed order:
    ///
    /// 1. malformed JSON: Parse error
    /// 2. `jsonrpc` not exactly `"2.0"`: Invalid Request
    /// 3. method name starting with `rpc.`: Invalid Request
    /// 4. id missing, null, or neither number nor string: Invalid Request
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ErrorObject> {
        let raw: RawRequest = serde_json::from_slice(bytes).map_err(|err| {
            trace!(%err, "rejecting request that is not well-formed JSON");
            PARSE_ERROR.clone()
        })?;

        if raw.jsonrpc != JSONRPC_VERSION {
            trace!(jsonrpc = %raw.jsonrpc, "rejecting request with wrong protocol version");
            return Err(INVALID_REQUEST.clone());
        }

        if raw.method.starts_with(RESERVED_METHOD_PREFIX) {
            trace!(method = %raw.method, "rejecting request with reserved method name");
            return Err(INVALID_REQUEST.clone());
        }

        let id = raw
            .id
            .as_ref()
            .and_then(|value| RequestId::try_from(value).ok())
            .ok_or_else(|| {
                trace!("rejecting request without a number or string id");
                INVALID_REQUEST.clone()
            })?;

        Ok(Self {
            version: JsonRpcVersion::V2_0,
            method: raw.method,
            params: raw.params,
            id,
        })
    }

    /// Serialize `method`, `params` and `id` straight to wire bytes. The
    /// `Into<RequestId>` bound keeps invalid id types out at the interface,
    /// so no runtime id check exists on this path. `None` params are omitted
    /// from the output entirely.
    pub fn build<P: Serialize>(
        method: &str,
        params: Option<P>,
        id: impl Into<RequestId>,
    ) -> Result<Vec<u8>, CodecError> {
        let params = params.map(serde_json::to_value).transpose()?;
        Self::new(id.into(), method, params).to_bytes()
    }

    /// Wire bytes of this request, terminated by a single newline for
    /// line-delimited framing.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut bytes = serde_json::to_vec(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Build the result response correlated with this request. The id is
    /// taken from the parsed request, so callers never re-extract or retype
    /// it.
    pub fn result_response<R: Serialize>(&self, result: R) -> Result<Vec<u8>, CodecError> {
        Response::build_result(self.id.clone(), result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_request() {
        let request = Request::from_bytes(
            br#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1}"#,
        )
        .unwrap();

        assert_eq!(request.method, "subtract");
        assert_eq!(request.params, Some(json!([42, 23])));
        assert_eq!(request.id, RequestId::from(1i64));
    }

    #[test]
    fn test_parse_error_maps_to_parse_error() {
        let error = Request::from_bytes(
            br#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1"#,
        )
        .unwrap_err();
        assert_eq!(error, PARSE_ERROR.clone());
    }

    #[test]
    fn test_wrong_version_maps_to_invalid_request() {
        let error = Request::from_bytes(
            br#"{"jsonrpc": "1.0", "method": "subtract", "params": [42, 23], "id": 1}"#,
        )
        .unwrap_err();
        assert_eq!(error, INVALID_REQUEST.clone());
    }

    #[test]
    fn test_reserved_method_maps_to_invalid_request() {
        let error = Request::from_bytes(
            br#"{"jsonrpc": "2.0", "method": "rpc.subtract", "params": [42, 23], "id": 1}"#,
        )
        .unwrap_err();
        assert_eq!(error, INVALID_REQUEST.clone());
    }

    #[test]
    fn test_missing_id_maps_to_invalid_request() {
        let error =
            Request::from_bytes(br#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23]}"#)
                .unwrap_err();
        assert_eq!(error, INVALID_REQUEST.clone());
    }

    #[test]
    fn test_invalid_id_type_maps_to_invalid_request() {
        for id in [r#"{"test": 1}"#, "null", "true", "[1]"] {
            let payload =
                format!(r#"{{"jsonrpc": "2.0", "method": "subtract", "id": {}}}"#, id);
            let error = Request::from_bytes(payload.as_bytes()).unwrap_err();
            assert_eq!(error, INVALID_REQUEST.clone(), "id payload: {}", id);
        }
    }

    #[test]
    fn test_version_checked_before_id() {
        // First violation wins: wrong version and missing id together must
        // still report the version problem path (both map to Invalid
        // Request), while broken JSON beats everything.
        let error =
            Request::from_bytes(br#"{"jsonrpc": "1.0", "method": "rpc.x""#).unwrap_err();
        assert_eq!(error, PARSE_ERROR.clone());
    }

    #[test]
    fn test_build_request() {
        let bytes = Request::build(
            "database",
            Some(json!({"count": 2, "names": ["foo", "bar"]})),
            "84dca59c-d3c2-4a0b-9ec7-627e810aeab7",
        )
        .unwrap();

        assert_eq!(
            bytes,
            format!(
                "{}\n",
                r#"{"jsonrpc":"2.0","method":"database","params":{"count":2,"names":["foo","bar"]},"id":"84dca59c-d3c2-4a0b-9ec7-627e810aeab7"}"#
            )
            .as_bytes()
        );
    }

    #[test]
    fn test_build_parse_round_trip() {
        let bytes = Request::build("sum", Some(json!([1, 2, 3])), 7i64).unwrap();
        let parsed = Request::from_bytes(&bytes).unwrap();

        assert_eq!(parsed.method, "sum");
        assert_eq!(parsed.params, Some(json!([1, 2, 3])));
        assert_eq!(parsed.id, RequestId::from(7i64));
    }

    #[test]
    fn test_result_response_reuses_request_id() {
        let request = Request::from_bytes(
            br#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1}"#,
        )
        .unwrap();

        let bytes = request.result_response("ok").unwrap();
        assert_eq!(bytes, b"{\"jsonrpc\":\"2.0\",\"result\":\"ok\",\"id\":1}\n");
    }
}
