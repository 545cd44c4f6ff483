//! # Codec Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use jsonrpc_codec::prelude::*;
//! ```

pub use crate::error::{
    CodecError, ErrorCode, ErrorObject, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use crate::notification::Notification;
pub use crate::request::Request;
pub use crate::response::{Response, ResponseId, ResponsePayload};
pub use crate::types::{JsonRpcVersion, RequestId};

// Standard error codes
pub use crate::error_codes::*;
