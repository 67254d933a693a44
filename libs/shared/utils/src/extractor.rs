use axum::{
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
    body::Body,
};
use tracing::debug;

use shared_models::auth::{Role, Session};
use shared_models::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_NAME_HEADER: &str = "x-user-name";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AppError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.trim()).filter(|v| !v.is_empty()))
            .map_err(|_| AppError::Auth(format!("Invalid {} header format", name))),
    }
}

/// Builds the caller's `Session` from the identity headers the front end sends.
pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, AppError> {
    let user_id = header_value(headers, USER_ID_HEADER)?
        .ok_or_else(|| AppError::Auth("Missing user id header".to_string()))?;

    let role: Role = header_value(headers, USER_ROLE_HEADER)?
        .ok_or_else(|| AppError::Auth("Missing user role header".to_string()))?
        .parse()
        .map_err(AppError::Auth)?;

    let mut session = Session::new(user_id, role);
    if let Some(name) = header_value(headers, USER_NAME_HEADER)? {
        session = session.with_display_name(name);
    }

    Ok(session)
}

// Middleware that threads the session through request extensions
pub async fn session_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = session_from_headers(request.headers())?;
    debug!("Request from {} ({})", session.user_id, session.role);

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn builds_session_from_identity_headers() {
        let session = session_from_headers(&headers(&[
            (USER_ID_HEADER, "P001"),
            (USER_ROLE_HEADER, "patient"),
            (USER_NAME_HEADER, "Jane Doe"),
        ]))
        .unwrap();

        assert_eq!(session.user_id, "P001");
        assert_eq!(session.role, Role::Patient);
        assert_eq!(session.display_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn missing_user_id_is_rejected() {
        let err = session_from_headers(&headers(&[(USER_ROLE_HEADER, "doctor")])).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = session_from_headers(&headers(&[
            (USER_ID_HEADER, "X1"),
            (USER_ROLE_HEADER, "janitor"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Auth(msg) if msg.contains("janitor")));
    }
}
