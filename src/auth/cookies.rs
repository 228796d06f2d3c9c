use std::collections::HashMap;

use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sessionId";

/// Collects every `name=value` pair across all `Cookie` headers. Pairs
/// without `=` or with an empty name are skipped; the first occurrence of a
/// name wins.
pub fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else { continue };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.trim().trim_matches('"').to_string());
        }
    }
    cookies
}

/// The session id carried by the request, if there is a well-formed one.
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    parse_cookies(headers)
        .get(SESSION_COOKIE)
        .and_then(|v| Uuid::parse_str(v).ok())
}

pub fn session_cookie(id: Uuid, secure: bool) -> anyhow::Result<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE}={id}; HttpOnly; Path=/");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(|e| anyhow::anyhow!("session cookie header: {e}"))
}

pub fn expired_session_cookie() -> HeaderValue {
    HeaderValue::from_static("sessionId=; HttpOnly; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut h = HeaderMap::new();
        for v in values {
            h.append(header::COOKIE, HeaderValue::from_str(v).unwrap());
        }
        h
    }

    #[test]
    fn parses_pairs_across_headers() {
        let cookies = parse_cookies(&headers(&["theme=dark; lang=es", "sessionId=abc"]));
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(cookies.get("lang").map(String::as_str), Some("es"));
        assert_eq!(cookies.get("sessionId").map(String::as_str), Some("abc"));
    }

    #[test]
    fn name_must_match_exactly() {
        let id = Uuid::new_v4();
        let h = headers(&[&format!("xsessionId={id}; sessionIdx={id}")]);
        assert_eq!(session_id(&h), None);
    }

    #[test]
    fn absent_and_malformed_sessions_look_the_same() {
        assert_eq!(session_id(&HeaderMap::new()), None);
        assert_eq!(session_id(&headers(&["sessionId="])), None);
        assert_eq!(session_id(&headers(&["sessionId=not-a-uuid"])), None);
        assert_eq!(session_id(&headers(&["garbage;;=;"])), None);
    }

    #[test]
    fn reads_session_id_among_other_cookies() {
        let id = Uuid::new_v4();
        let h = headers(&[&format!("a=1; sessionId={id}; b=2")]);
        assert_eq!(session_id(&h), Some(id));
    }

    #[test]
    fn session_cookie_flags() {
        let id = Uuid::new_v4();
        let plain = session_cookie(id, false).unwrap();
        assert_eq!(plain.to_str().unwrap(), format!("sessionId={id}; HttpOnly; Path=/"));
        let secure = session_cookie(id, true).unwrap();
        assert!(secure.to_str().unwrap().ends_with("; Secure"));
    }
}
