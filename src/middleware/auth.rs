use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
    services::auth::TokenType,
};

/// The authenticated caller, inserted into request extensions by [`require_auth`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Middleware that rejects requests without a valid bearer access token.
///
/// The token's subject must still exist in the store; deleted accounts lose
/// access immediately even if their token has not expired.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Authentication credentials were not provided".to_string()))?;

    let claims = state.tokens.validate(token, TokenType::Access)?;

    let user = state
        .store
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(header_value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/collection");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        for header_value in ["bearer abc.def", "BEARER abc.def"] {
            let request = request_with(Some(header_value));
            assert_eq!(bearer_token(&request), Some("abc.def"));
        }
    }

    #[test]
    fn test_bearer_token_extracted() {
        let request = request_with(Some("Bearer abc.def"));
        assert_eq!(bearer_token(&request), Some("abc.def"));
    }

    #[test]
    fn test_other_schemes_ignored() {
        assert_eq!(bearer_token(&request_with(Some("Basic dXNlcjpwYXNz"))), None);
        assert_eq!(bearer_token(&request_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&request_with(None)), None);
    }
}
