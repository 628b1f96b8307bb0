use abi::errors::Error;
use axum::{
    async_trait,
    extract::{path::ErrorKind, rejection::PathRejection, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;

// We define our own `Path` extractor that customizes the errors from `axum::extract::Path`
pub struct PathExtractor<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathExtractor<T>
where
    // these trait bounds are copied from `impl FromRequest for axum::extract::path::Path`
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Error);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let (status, body) = match rejection {
                    PathRejection::FailedToDeserializePathParams(inner) => {
                        let mut status = StatusCode::BAD_REQUEST;

                        let kind = inner.into_kind();
                        let body = match &kind {
                            ErrorKind::ParseErrorAtKey { key, .. }
                            | ErrorKind::InvalidUtf8InPathParam { key } => {
                                Error::path_parsing(format!("in {key}: {kind}"))
                            }

                            ErrorKind::ParseErrorAtIndex { index, .. } => {
                                Error::path_parsing(format!("in {index}: {kind}"))
                            }

                            ErrorKind::UnsupportedType { .. } => {
                                // this errors is caused by the programmer using an unsupported type
                                // (such as nested maps) so respond with `500` instead
                                status = StatusCode::INTERNAL_SERVER_ERROR;
                                Error::internal_with_details(kind.to_string())
                            }

                            ErrorKind::Message(msg) => Error::path_parsing(msg.clone()),
                            _ => Error::path_parsing(kind.to_string()),
                        };

                        (status, body)
                    }
                    PathRejection::MissingPathParams(error) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Error::internal_with_details(error.to_string()),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Error::internal_with_details(format!(
                            "Unhandled path rejection: {rejection}"
                        )),
                    ),
                };

                Err((status, body))
            }
        }
    }
}
