use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error_codes::{SERVER_ERROR_END, SERVER_ERROR_START};

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64), // -32099 to -32000
}

impl ErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ServerError(_) => "Server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// JSON-RPC Error object carried in the `error` member of a response.
///
/// The five canonical objects ([`PARSE_ERROR`], [`INVALID_REQUEST`],
/// [`METHOD_NOT_FOUND`], [`INVALID_PARAMS`], [`INTERNAL_ERROR`]) are
/// process-wide immutable statics; application errors are built with
/// [`ErrorObject::server_error`] and must use a code in
/// [-32099, -32000].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Canonical Parse error (-32700).
pub static PARSE_ERROR: LazyLock<ErrorObject> =
    LazyLock::new(|| ErrorObject::from_code(ErrorCode::ParseError));

/// Canonical Invalid Request (-32600).
pub static INVALID_REQUEST: LazyLock<ErrorObject> =
    LazyLock::new(|| ErrorObject::from_code(ErrorCode::InvalidRequest));

/// Canonical Method not found (-32601).
pub static METHOD_NOT_FOUND: LazyLock<ErrorObject> =
    LazyLock::new(|| ErrorObject::from_code(ErrorCode::MethodNotFound));

/// Canonical Invalid params (-32602).
pub static INVALID_PARAMS: LazyLock<ErrorObject> =
    LazyLock::new(|| ErrorObject::from_code(ErrorCode::InvalidParams));

/// Canonical Internal error (-32603).
pub static INTERNAL_ERROR: LazyLock<ErrorObject> =
    LazyLock::new(|| ErrorObject::from_code(ErrorCode::InternalError));

impl ErrorObject {
    /// Build an error object from a code using its canonical message and
    /// no data payload.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
            data: None,
        }
    }

    /// Create an application-defined error. The code must lie in the
    /// reserved server range [-32099, -32000], endpoints included.
    pub fn server_error<D: Serialize>(
        code: i64,
        message: &str,
        data: Option<D>,
    ) -> Result<Self, CodecError> {
        if !(SERVER_ERROR_START..=SERVER_ERROR_END).contains(&code) {
            return Err(CodecError::CodeOutOfRange(code));
        }

        let data = match data {
            Some(data) => Some(serde_json::to_value(data)?),
            None => None,
        };

        Ok(Self {
            code,
            message: message.to_string(),
            data,
        })
    }

    /// Return a copy of this error with the given data attached. The
    /// original is left untouched, so the canonical statics can be shared
    /// freely and specialized per response.
    pub fn with_data<D: Serialize>(&self, data: D) -> Result<Self, CodecError> {
        Ok(Self {
            code: self.code,
            message: self.message.clone(),
            data: Some(serde_json::to_value(data)?),
        })
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code: {} Message: {}", self.code, self.message)?;
        if let Some(data) = &self.data {
            write!(f, " Data: {}", data)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorObject {}

/// Local codec failures: structural problems with a payload, invalid
/// construction arguments, serialization errors. These are reported to the
/// immediate caller and never travel to the remote peer, unlike
/// [`ErrorObject`] which is protocol data.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("payload is not well-formed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("jsonrpc field must be the string \"2.0\"")]
    VersionMismatch,

    #[error("method names prefixed with \"rpc.\" are reserved")]
    ReservedMethod,

    #[error("error code {0} must be between -32099 and -32000")]
    CodeOutOfRange(i64),

    #[error("response must have either a result or an error")]
    MissingResultAndError,

    #[error("response must not have both a result and an error")]
    BothResultAndError,

    #[error("response is missing a request id")]
    MissingId,

    #[error("id must be a number or a string")]
    InvalidId,

    #[error("error member is not a valid JSON-RPC error object")]
    MalformedErrorObject,
}
