use serde::{Deserialize, Serialize};

pub const CODE_OK: u16 = 200;
pub const CODE_ERROR: u16 = 400;

/// Uniform `{code, message, data}` body returned by every upload route.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResponseEnvelope<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    pub fn ok(data: T) -> Self {
        ResponseEnvelope {
            code: CODE_OK,
            message: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ResponseEnvelope {
            code: CODE_ERROR,
            message: message.into(),
            data: None,
        }
    }
}
