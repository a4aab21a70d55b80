use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Cookie holding the session ID
pub const SESSION_COOKIE: &str = "session_id";

/// Header alternative to the cookie for non-browser clients
pub const SESSION_HEADER: &str = "x-session-id";

/// Request extension identifying the caller's session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts the session ID from the `x-session-id` header, falling back to
/// the `session_id` cookie. Malformed values are ignored.
fn session_from_request(request: &Request) -> Option<SessionId> {
    let from_header = request
        .headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok());

    from_header
        .or_else(|| {
            request
                .headers()
                .get_all(header::COOKIE)
                .iter()
                .filter_map(|h| h.to_str().ok())
                .flat_map(|cookies| cookies.split(';'))
                .filter_map(|pair| pair.trim().split_once('='))
                .find(|(name, _)| *name == SESSION_COOKIE)
                .and_then(|(_, value)| Uuid::parse_str(value).ok())
        })
        .map(SessionId)
}

/// Middleware that attaches a `SessionId` to every request.
///
/// Callers without a valid session get a new one, announced with a
/// `Set-Cookie` header on the response.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let existing = session_from_request(&request);
    let session_id = existing.unwrap_or_else(|| SessionId(Uuid::new_v4()));
    request.extensions_mut().insert(session_id);

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session_id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        tracing::debug!(session_id = %session_id, "Started new session");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(name: header::HeaderName, value: &str) -> Request {
        axum::http::Request::builder()
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_session_from_cookie() {
        let id = Uuid::new_v4();
        let request = request_with(header::COOKIE, &format!("theme=dark; session_id={}", id));
        assert_eq!(session_from_request(&request), Some(SessionId(id)));
    }

    #[test]
    fn test_session_from_header_wins() {
        let header_id = Uuid::new_v4();
        let request = axum::http::Request::builder()
            .header(SESSION_HEADER, header_id.to_string())
            .header(header::COOKIE, format!("session_id={}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_from_request(&request), Some(SessionId(header_id)));
    }

    #[test]
    fn test_malformed_cookie_ignored() {
        let request = request_with(header::COOKIE, "session_id=garbage");
        assert_eq!(session_from_request(&request), None);
    }

    #[test]
    fn test_no_session() {
        let request = axum::http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(session_from_request(&request), None);
    }
}
