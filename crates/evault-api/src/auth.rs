//! Auth context from the trusted `x-role` / `x-org-id` headers.
//!
//! There is no authentication in front of these headers; the claimed
//! role and organization id are taken at face value and scoping is
//! enforced downstream by the access gateway and the store.

use axum::http::HeaderMap;

pub const ROLE_HEADER: &str = "x-role";
pub const ORG_HEADER: &str = "x-org-id";

/// Claimed identity of the caller. `role` stays a raw string here; the
/// core validates it after existence checks so unknown ids still 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub role: String,
    pub org_id: String,
}

/// Reads a non-empty header value.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
}

/// Both headers, role first; the error is the message for the 400.
pub fn auth_context(headers: &HeaderMap) -> Result<AuthContext, &'static str> {
    let role = header_str(headers, ROLE_HEADER).ok_or("Missing x-role header")?;
    let org_id = header_str(headers, ORG_HEADER).ok_or("Missing x-org-id header")?;
    Ok(AuthContext {
        role: role.to_string(),
        org_id: org_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_role_reported_first() {
        let headers = HeaderMap::new();
        assert_eq!(auth_context(&headers), Err("Missing x-role header"));

        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("buyer"));
        assert_eq!(auth_context(&headers), Err("Missing x-org-id header"));
    }

    #[test]
    fn test_empty_header_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static(""));
        headers.insert(ORG_HEADER, HeaderValue::from_static("org_1"));
        assert_eq!(auth_context(&headers), Err("Missing x-role header"));
    }

    #[test]
    fn test_context_carries_both_values() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("factory"));
        headers.insert(ORG_HEADER, HeaderValue::from_static("factory_1"));
        let ctx = auth_context(&headers).unwrap();
        assert_eq!(ctx.role, "factory");
        assert_eq!(ctx.org_id, "factory_1");
    }
}
