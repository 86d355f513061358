//! Request extractors shared by the HTTP handlers.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::Response;

use super::response;

/// JSON body extractor whose rejection answers 400 in the standard
/// response envelope instead of axum's plain-text 422.
///
/// Missing required fields and unknown enum values are validation
/// failures like any other, so they go through the same error shape.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(response::bad_request(
                "Invalid request body",
                rejection.body_text(),
            )),
        }
    }
}
