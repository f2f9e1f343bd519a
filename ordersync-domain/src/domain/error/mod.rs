#[cfg(feature = "axum-error")]
pub mod axum_error;

use crate::prelude::StringExt;
use http::StatusCode;
use serde::Serialize;
use std::convert::AsRef;
use std::{
    error::Error as StdError,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
};
use strum::AsRefStr;
use thiserror::Error as ThisError;

pub trait ErrorMeta {
    fn code(&self) -> ErrorCode;
    fn key(&self) -> ErrorKey;
    fn message(&self) -> ErrorMessage;
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorCode(u16);

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorKey(String);

impl ErrorKey {
    pub fn internal(key: &str, subtype: Option<&str>) -> Self {
        match subtype {
            Some(subtype) => ErrorKey(format!("err::internal::{key}::{subtype}")),
            None => ErrorKey(format!("err::internal::{key}")),
        }
    }

    pub fn application(key: &str, subtype: Option<&str>) -> Self {
        match subtype {
            Some(subtype) => ErrorKey(format!("err::application::{key}::{subtype}")),
            None => ErrorKey(format!("err::application::{key}")),
        }
    }
}

impl Display for ErrorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub struct ErrorMessage(String);

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Failures that must never reach the webhook sender verbatim. They are
/// converted into an [`ApplicationError`] before being rendered.
#[derive(ThisError, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum InternalError {
    #[error("Upstream service unavailable: {}", .message)]
    UpstreamUnavailable {
        message: String,
        subtype: Option<String>,
    },
    #[error("A connection error occurred: {}", .message)]
    ConnectionError {
        message: String,
        subtype: Option<String>,
    },
    #[error("An error while performing an IO operation: {}", .message)]
    IOErr {
        message: String,
        subtype: Option<String>,
    },
    #[error("Configuration error: {}", .message)]
    ConfigurationError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Serialization error: {}", .message)]
    SerializeError {
        message: String,
        subtype: Option<String>,
    },
    #[error("Deserialization error: {}", .message)]
    DeserializeError {
        message: String,
        subtype: Option<String>,
    },
}

impl InternalError {
    pub fn upstream_unavailable(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::internal(InternalError::UpstreamUnavailable {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }

    pub fn connection_error(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::internal(InternalError::ConnectionError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }

    pub fn io_err(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::internal(InternalError::IOErr {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }

    pub fn configuration_error(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::internal(InternalError::ConfigurationError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }

    pub fn serialize_error(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::internal(InternalError::SerializeError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }

    pub fn deserialize_error(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::internal(InternalError::DeserializeError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }
}

impl ErrorMeta for InternalError {
    fn code(&self) -> ErrorCode {
        match self {
            InternalError::UpstreamUnavailable { .. } => ErrorCode(1000),
            InternalError::ConnectionError { .. } => ErrorCode(1001),
            InternalError::IOErr { .. } => ErrorCode(1002),
            InternalError::ConfigurationError { .. } => ErrorCode(1003),
            InternalError::SerializeError { .. } => ErrorCode(1004),
            InternalError::DeserializeError { .. } => ErrorCode(1005),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            InternalError::UpstreamUnavailable { subtype, .. } => {
                ErrorKey::internal("upstream_unavailable", subtype.as_deref())
            }
            InternalError::ConnectionError { subtype, .. } => {
                ErrorKey::internal("connection_error", subtype.as_deref())
            }
            InternalError::IOErr { subtype, .. } => {
                ErrorKey::internal("io_err", subtype.as_deref())
            }
            InternalError::ConfigurationError { subtype, .. } => {
                ErrorKey::internal("configuration_error", subtype.as_deref())
            }
            InternalError::SerializeError { subtype, .. } => {
                ErrorKey::internal("serialize_error", subtype.as_deref())
            }
            InternalError::DeserializeError { subtype, .. } => {
                ErrorKey::internal("deserialize_error", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            InternalError::UpstreamUnavailable { message, .. }
            | InternalError::ConnectionError { message, .. }
            | InternalError::IOErr { message, .. }
            | InternalError::ConfigurationError { message, .. }
            | InternalError::SerializeError { message, .. }
            | InternalError::DeserializeError { message, .. } => ErrorMessage(message.to_string()),
        }
    }
}

impl Debug for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}\n", &self)?;
        let mut current = self.source();

        while let Some(cause) = current {
            writeln!(f, "Caused by:\n\t{}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}

/// Failures whose message is safe to hand back to the caller.
#[derive(ThisError, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum ApplicationError {
    #[error("Bad Request: {}", .message)]
    BadRequest {
        message: String,
        subtype: Option<String>,
    },
    #[error("Not Found: {}", .message)]
    NotFound {
        message: String,
        subtype: Option<String>,
    },
    #[error("Internal Server Error: {}", .message)]
    InternalServerError {
        message: String,
        subtype: Option<String>,
    },
}

impl ApplicationError {
    pub fn bad_request(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::application(ApplicationError::BadRequest {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }

    pub fn not_found(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::application(ApplicationError::NotFound {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }

    pub fn internal_server_error(message: &str, subtype: Option<&str>) -> OrderSyncError {
        OrderSyncError::application(ApplicationError::InternalServerError {
            message: message.to_string(),
            subtype: subtype.map(|s| s.to_string().snake_case()),
        })
    }
}

impl ErrorMeta for ApplicationError {
    fn code(&self) -> ErrorCode {
        match self {
            ApplicationError::BadRequest { .. } => ErrorCode(2000),
            ApplicationError::NotFound { .. } => ErrorCode(2001),
            ApplicationError::InternalServerError { .. } => ErrorCode(2002),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            ApplicationError::BadRequest { subtype, .. } => {
                ErrorKey::application("bad_request", subtype.as_deref())
            }
            ApplicationError::NotFound { subtype, .. } => {
                ErrorKey::application("not_found", subtype.as_deref())
            }
            ApplicationError::InternalServerError { subtype, .. } => {
                ErrorKey::application("internal_server_error", subtype.as_deref())
            }
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            ApplicationError::BadRequest { message, .. }
            | ApplicationError::NotFound { message, .. }
            | ApplicationError::InternalServerError { message, .. } => {
                ErrorMessage(message.to_string())
            }
        }
    }
}

impl Debug for ApplicationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}\n", &self)?;
        let mut current = self.source();

        while let Some(cause) = current {
            writeln!(f, "Caused by:\n\t{}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}

impl From<InternalError> for ApplicationError {
    fn from(error: InternalError) -> Self {
        match error {
            InternalError::UpstreamUnavailable { subtype, .. } => {
                ApplicationError::InternalServerError {
                    message: "Upstream service unavailable".into(),
                    subtype,
                }
            }
            InternalError::ConnectionError { .. }
            | InternalError::IOErr { .. }
            | InternalError::ConfigurationError { .. }
            | InternalError::SerializeError { .. }
            | InternalError::DeserializeError { .. } => ApplicationError::InternalServerError {
                message: "Webhook processing failed".into(),
                subtype: None,
            },
        }
    }
}

#[derive(ThisError, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum OrderSyncError {
    Internal(InternalError),
    Application(ApplicationError),
}

impl AsRef<str> for OrderSyncError {
    fn as_ref(&self) -> &str {
        match self {
            OrderSyncError::Internal(e) => e.as_ref(),
            OrderSyncError::Application(e) => e.as_ref(),
        }
    }
}

impl<'a> From<&'a OrderSyncError> for StatusCode {
    fn from(value: &'a OrderSyncError) -> Self {
        match value {
            OrderSyncError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OrderSyncError::Application(e) => match e {
                ApplicationError::BadRequest { .. } => StatusCode::BAD_REQUEST,
                ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
                ApplicationError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<OrderSyncError> for StatusCode {
    fn from(value: OrderSyncError) -> Self {
        (&value).into()
    }
}

impl OrderSyncError {
    fn internal(internal: InternalError) -> Self {
        OrderSyncError::Internal(internal)
    }

    fn application(application: ApplicationError) -> Self {
        OrderSyncError::Application(application)
    }

    /// The form of this error that may be shown to the webhook sender.
    pub fn as_application(&self) -> OrderSyncError {
        match self {
            OrderSyncError::Application(e) => OrderSyncError::Application(e.clone()),
            OrderSyncError::Internal(e) => OrderSyncError::Application(e.clone().into()),
        }
    }

    /// Renders the `{ success: false, error }` envelope. Internal errors are
    /// sanitised first.
    pub fn as_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": self.as_application().message().to_string(),
        })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, OrderSyncError::Internal(_))
    }
}

impl ErrorMeta for OrderSyncError {
    fn code(&self) -> ErrorCode {
        match self {
            OrderSyncError::Internal(e) => e.code(),
            OrderSyncError::Application(e) => e.code(),
        }
    }

    fn key(&self) -> ErrorKey {
        match self {
            OrderSyncError::Internal(e) => e.key(),
            OrderSyncError::Application(e) => e.key(),
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            OrderSyncError::Internal(e) => e.message(),
            OrderSyncError::Application(e) => e.message(),
        }
    }
}

impl Display for OrderSyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OrderSyncError::Internal(e) => write!(f, "{}", e),
            OrderSyncError::Application(e) => write!(f, "{}", e),
        }
    }
}
