use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::JSONRPC_VERSION;
use crate::error::{CodecError, ErrorCode, ErrorObject};
use crate::types::{JsonRpcVersion, RequestId};

/// The single mandatory member of a response body: a result or an error,
/// never both, never neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePayload {
    Result(Value),
    Error(ErrorObject),
}

/// The id member of a response. `Null` is a distinct state serializing to
/// the JSON `null` literal; it is only legal when the error code is Parse
/// error or Invalid Request, where the incoming request may never have
/// yielded a usable id. An absent id on the wire parses as `Null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseId {
    Id(RequestId),
    Null,
}

/// A JSON-RPC response, correlated with a request by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    #[serde(flatten)]
    pub payload: ResponsePayload,
    pub id: ResponseId,
}

/// Only these two codes may appear in a response without an id.
fn identifierless_code(code: i64) -> bool {
    code == ErrorCode::ParseError.code() || code == ErrorCode::InvalidRequest.code()
}

impl Response {
    /// Create a success response. The id is always carried.
    pub fn result<R: Serialize>(id: RequestId, result: R) -> Result<Self, CodecError> {
        Ok(Self {
            version: JsonRpcVersion::V2_0,
            payload: ResponsePayload::Result(serde_json::to_value(result)?),
            id: ResponseId::Id(id),
        })
    }

    /// Create an error response.
    ///
    /// For Parse error and Invalid Request the passed id is discarded and
    /// the response carries a `null` id, since no id could have been read
    /// from the offending request. Every other code requires an id.
    pub fn error(id: Option<RequestId>, error: ErrorObject) -> Result<Self, CodecError> {
        let id = if identifierless_code(error.code) {
            ResponseId::Null
        } else {
            ResponseId::Id(id.ok_or(CodecError::MissingId)?)
        };

        Ok(Self {
            version: JsonRpcVersion::V2_0,
            payload: ResponsePayload::Error(error),
            id,
        })
    }

    /// Success response straight to wire bytes.
    pub fn build_result<R: Serialize>(id: RequestId, result: R) -> Result<Vec<u8>, CodecError> {
        Self::result(id, result)?.to_bytes()
    }

    /// Error response straight to wire bytes.
    pub fn build_error(id: Option<RequestId>, error: ErrorObject) -> Result<Vec<u8>, CodecError> {
        Self::error(id, error)?.to_bytes()
    }

    /// Parse a response from raw bytes, validated in this fixed order:
    ///
    /// 1. malformed JSON
    /// 2. `jsonrpc` not exactly `"2.0"`
    /// 3. neither `result` nor `error` present
    /// 4. both present
    /// 5. id null/absent with no error
    /// 6. id null/absent with an error whose code is neither Parse error
    ///    nor Invalid Request
    ///
    /// The first violation found is reported.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let value: Value = serde_json::from_slice(bytes)?;

        if value.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            trace!("rejecting response with wrong protocol version");
            return Err(CodecError::VersionMismatch);
        }

        let payload = match (value.get("result"), value.get("error")) {
            (None, None) => return Err(CodecError::MissingResultAndError),
            (Some(_), Some(_)) => return Err(CodecError::BothResultAndError),
            (Some(result), None) => ResponsePayload::Result(result.clone()),
            (None, Some(error)) => {
                let error: ErrorObject = serde_json::from_value(error.clone())
                    .map_err(|_| CodecError::MalformedErrorObject)?;
                ResponsePayload::Error(error)
            }
        };

        let id = match value.get("id") {
            None | Some(Value::Null) => ResponseId::Null,
            Some(id) => ResponseId::Id(RequestId::try_from(id)?),
        };

        if id == ResponseId::Null {
            match &payload {
                ResponsePayload::Result(_) => {
                    trace!("rejecting success response without an id");
                    return Err(CodecError::MissingId);
                }
                ResponsePayload::Error(error) if !identifierless_code(error.code) => {
                    trace!(code = error.code, "rejecting identifierless response");
                    return Err(CodecError::MissingId);
                }
                ResponsePayload::Error(_) => {}
            }
        }

        Ok(Self {
            version: JsonRpcVersion::V2_0,
            payload,
            id,
        })
    }

    /// Wire bytes of this response, terminated by a single newline for
    /// line-delimited framing.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut bytes = serde_json::to_vec(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload, ResponsePayload::Error(_))
    }

    pub fn id(&self) -> Option<&RequestId> {
        match &self.id {
            ResponseId::Id(id) => Some(id),
            ResponseId::Null => None,
        }
    }

    pub fn result_value(&self) -> Option<&Value> {
        match &self.payload {
            ResponsePayload::Result(value) => Some(value),
            ResponsePayload::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&ErrorObject> {
        match &self.payload {
            ResponsePayload::Result(_) => None,
            ResponsePayload::Error(error) => Some(error),
        }
    }
}
