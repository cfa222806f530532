//! Custom axum extractors and responders.

use super::error::{ApiError, ClientError, InternalError};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use http::request::Parts;
use serde::{de::DeserializeOwned, Serialize};

/// A custom JSON responder since axum's does not let us customize the error response.
///
/// Encoding failures are answered with an [`InternalError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> AsRef<T> for Json<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(e) => ApiError::InternalError(InternalError::SerdeJsonError(e)).into_response(),
        }
    }
}

/// A custom Path extractor since axum's does not let us customize the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

impl<T> AsRef<T> for Path<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ClientError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let res = axum::extract::Path::<T>::from_request_parts(parts, state).await?;
        Ok(Path(res.0))
    }
}
