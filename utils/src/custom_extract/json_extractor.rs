use abi::errors::Error;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
};

/// `axum::Json` with our error body, `{"message": ...}` instead of plain text
pub struct JsonExtractor<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Error);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            // missing content type, bad syntax and wrong fields all answer 400
            Err(rejection) => Err((
                StatusCode::BAD_REQUEST,
                Error::body_parsing(rejection.body_text()),
            )),
        }
    }
}
