//! # JSON-RPC 2.0 Message Codec
//!
//! A pure, transport-agnostic codec for JSON-RPC 2.0 messages. It parses raw
//! byte payloads into validated requests, notifications and responses, and
//! serializes them back into protocol-conformant, newline-terminated payloads
//! ready for line-delimited framing. No I/O happens here: transports hand
//! this crate buffers and get buffers back.
//!
//! ## Features
//! - Fixed, specification-ordered validation with canonical error mapping
//! - Invalid request ids are unrepresentable ([`RequestId`] is number/string only)
//! - Absent optional fields are omitted on the wire, never emitted as `null`
//! - Canonical error objects shared as process-wide immutable statics
//! - No transport, no method dispatch, no batching
//!
//! ## Example
//! ```rust
//! use jsonrpc_codec::{Request, Response};
//!
//! let payload = br#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1}"#;
//! let bytes = match Request::from_bytes(payload) {
//!     Ok(request) => request.result_response(19).unwrap(),
//!     Err(error) => Response::build_error(None, error).unwrap(),
//! };
//! assert_eq!(bytes, b"{\"jsonrpc\":\"2.0\",\"result\":19,\"id\":1}\n");
//! ```

pub mod error;
pub mod notification;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types
pub use error::{
    CodecError, ErrorCode, ErrorObject, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use notification::Notification;
pub use request::Request;
pub use response::{Response, ResponseId, ResponsePayload};
pub use types::{JsonRpcVersion, RequestId};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Method names with this prefix are reserved for protocol-internal use and
/// rejected on every parse path.
pub const RESERVED_METHOD_PREFIX: &str = "rpc.";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}
