//! Typed path identifiers.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use taskhub_core::error::AppError;

use crate::error::ApiError;

/// A single typed id from the route path. A value that does not parse is
/// a 400, not a 404.
#[derive(Debug, Clone, Copy)]
pub struct PathId<T>(pub T);

impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        raw.parse::<T>()
            .map(PathId)
            .map_err(|_| AppError::validation(format!("Invalid id: {raw}")).into())
    }
}
