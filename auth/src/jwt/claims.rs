use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::scope::TokenScope;

/// Claim names owned by the typed fields; never taken from `extra`.
pub const RESERVED_CLAIMS: [&str; 5] = ["sub", "iat", "exp", "scope", "jti"];

/// JWT claims carried by access and refresh tokens.
///
/// Standard RFC 7519 fields plus the `scope` tag. Any other subject data
/// travels in the flattened `extra` map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the user's email address)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Token kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<TokenScope>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims identifying a user by email.
    pub fn for_subject(subject: impl ToString) -> Self {
        Self::new().with_subject(subject)
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set scope.
    pub fn with_scope(mut self, scope: TokenScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set token identifier.
    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Add a custom field.
    ///
    /// Reserved claim names are ignored; set those through their own builder.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        let key = key.to_string();
        if RESERVED_CLAIMS.contains(&key.as_str()) {
            return self;
        }
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key, json_value);
        }
        self
    }

    /// Drop `extra` entries that would duplicate a typed claim in the payload.
    pub fn without_reserved_extras(mut self) -> Self {
        self.extra
            .retain(|key, _| !RESERVED_CLAIMS.contains(&key.as_str()));
        self
    }

    /// Subject, treating an empty string as absent.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// Check if token is expired.
    ///
    /// A token is expired from the second named by `exp` onwards. Claims
    /// without `exp` are always considered expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::for_subject("a@x.com");
        assert_eq!(claims.sub, Some("a@x.com".to_string()));
        assert!(claims.exp.is_none());
        assert!(claims.scope.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new()
            .with_subject("a@x.com")
            .with_issued_at(1234567800)
            .with_expiration(1234567890)
            .with_scope(TokenScope::AccessToken)
            .with_token_id("abc")
            .with_extra("role", "admin");

        assert_eq!(claims.sub, Some("a@x.com".to_string()));
        assert_eq!(claims.iat, Some(1234567800));
        assert_eq!(claims.exp, Some(1234567890));
        assert_eq!(claims.scope, Some(TokenScope::AccessToken));
        assert_eq!(claims.jti, Some("abc".to_string()));
        assert_eq!(claims.extra.get("role").unwrap().as_str(), Some("admin"));
    }

    #[test]
    fn test_with_extra_ignores_reserved_names() {
        let claims = Claims::new()
            .with_extra("scope", "access_token")
            .with_extra("exp", 0)
            .with_extra("role", "admin");

        assert_eq!(claims.extra.len(), 1);
        assert!(claims.extra.contains_key("role"));
    }

    #[test]
    fn test_without_reserved_extras() {
        let mut claims = Claims::for_subject("a@x.com").with_extra("role", "admin");
        for name in RESERVED_CLAIMS {
            claims
                .extra
                .insert(name.to_string(), serde_json::json!("shadow"));
        }

        let claims = claims.without_reserved_extras();

        assert_eq!(claims.extra.len(), 1);
        let payload = serde_json::to_string(&claims).unwrap();
        assert_eq!(payload.matches("\"sub\"").count(), 1);
        assert!(!payload.contains("shadow"));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new().with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        assert!(Claims::new().is_expired(0));
    }

    #[test]
    fn test_empty_subject_is_absent() {
        assert_eq!(Claims::for_subject("").subject(), None);
        assert_eq!(Claims::new().subject(), None);
        assert_eq!(Claims::for_subject("a@x.com").subject(), Some("a@x.com"));
    }

    #[test]
    fn test_wire_shape() {
        let claims = Claims::for_subject("a@x.com")
            .with_issued_at(10)
            .with_expiration(20)
            .with_scope(TokenScope::RefreshToken);

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sub": "a@x.com",
                "iat": 10,
                "exp": 20,
                "scope": "refresh_token"
            })
        );
    }
}
