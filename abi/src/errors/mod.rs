use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use mongodb::error::{ErrorKind as MongoErrorKind, WriteFailure};
use serde::Serialize;
use serde_json::json;
use std::error::Error as StdError;
use std::fmt;
use tracing::error;

/// mongodb server code for unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// body message for every 5xx response, the real reason only goes to the log
const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ConfigReadError,
    ConfigParseError,
    NotFound,
    BadRequest,
    BodyParsing,
    PathParsing,
    InternalServer,
    MongoDbOperateError,
    DuplicateKey,
    IOError,
}

#[derive(Debug, Serialize)]
pub struct Error {
    kind: ErrorKind,
    details: Option<String>,
    #[serde(skip)]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    #[inline]
    pub fn new(
        kind: ErrorKind,
        details: impl Into<String>,
        source: impl StdError + 'static + Send + Sync,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            details: Some(details.into()),
        }
    }

    #[inline]
    pub fn with_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            source: None,
            details: None,
        }
    }

    #[inline]
    pub fn with_details(kind: ErrorKind, details: impl Into<String>) -> Self {
        Self {
            kind,
            source: None,
            details: Some(details.into()),
        }
    }

    #[inline]
    pub fn internal_with_details(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::InternalServer, details)
    }

    #[inline]
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::BadRequest, details)
    }

    #[inline]
    pub fn not_found() -> Self {
        Self::with_kind(ErrorKind::NotFound)
    }

    #[inline]
    pub fn not_found_with_details(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::NotFound, details)
    }

    #[inline]
    pub fn body_parsing(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::BodyParsing, details)
    }

    #[inline]
    pub fn path_parsing(details: impl Into<String>) -> Self {
        Self::with_details(ErrorKind::PathParsing, details)
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest
            | ErrorKind::BodyParsing
            | ErrorKind::PathParsing
            | ErrorKind::DuplicateKey => StatusCode::BAD_REQUEST,
            ErrorKind::ConfigReadError
            | ErrorKind::ConfigParseError
            | ErrorKind::InternalServer
            | ErrorKind::MongoDbOperateError
            | ErrorKind::IOError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{:?}: {}", self.kind, details),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        let msg = if status_code.is_server_error() {
            error!("http request api error: {:?}", self);
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.details.unwrap_or_else(|| format!("{:?}", self.kind))
        };

        (status_code, Json(json!({ "message": msg }))).into_response()
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value.to_string(), value)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::ConfigParseError, value.to_string(), value)
    }
}

impl From<mongodb::error::Error> for Error {
    fn from(value: mongodb::error::Error) -> Self {
        let kind = match value.kind.as_ref() {
            MongoErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
                ErrorKind::DuplicateKey
            }
            _ => ErrorKind::MongoDbOperateError,
        };
        Self::new(kind, value.to_string(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_message(error: Error) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, value["message"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn client_error_should_expose_details() {
        let (status, msg) = body_message(Error::bad_request("Friend request already exists")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "Friend request already exists");

        let (status, msg) = body_message(Error::not_found_with_details("User(s) not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "User(s) not found");
    }

    #[tokio::test]
    async fn server_error_should_hide_details() {
        let err = Error::internal_with_details("connection reset by peer");
        let (status, msg) = body_message(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, SERVER_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn error_without_details_should_use_kind() {
        let (status, msg) = body_message(Error::not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "NotFound");
    }

    #[test]
    fn io_error_should_keep_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::from(io);
        assert_eq!(err.kind(), ErrorKind::IOError);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "IOError: boom");
    }

    #[test]
    fn duplicate_key_should_be_client_error() {
        let err = Error::with_details(ErrorKind::DuplicateKey, "E11000");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
