use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use tracing::debug;

/// Bearer token from the incoming request, if any, to be forwarded to the
/// hospital API as-is.
///
/// The token is never validated here; the hospital API decides what the
/// caller may see. A missing or malformed `Authorization` header simply
/// yields `ForwardedToken(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedToken(pub Option<String>);

impl ForwardedToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for ForwardedToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(auth)) => Ok(ForwardedToken(Some(auth.token().to_string()))),
            Err(rejection) => {
                debug!("No bearer token to forward: {}", rejection);
                Ok(ForwardedToken(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> ForwardedToken {
        let (mut parts, _) = request.into_parts();
        ForwardedToken::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_bearer_token_is_forwarded() {
        let request = Request::builder()
            .header("Authorization", "Bearer abc.def")
            .body(())
            .unwrap();

        assert_eq!(extract(request).await.as_deref(), Some("abc.def"));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_yields_none() {
        let missing = Request::builder().body(()).unwrap();
        assert_eq!(extract(missing).await, ForwardedToken(None));

        let basic = Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();
        assert_eq!(extract(basic).await, ForwardedToken(None));
    }
}
