use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Verified token payload. Only `id` is required; `exp` is enforced when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(deserialize_with = "subject_from_string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Claims expiring `expiry_hours` from now. Lifetimes past the representable
    /// date range are refused rather than wrapped.
    pub fn new(id: impl Into<String>, expiry_hours: u64) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            id: id.into(),
            exp: Some(exp.timestamp()),
            iat: Some(now.timestamp()),
        })
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Empty token")]
    EmptyToken,

    #[error("Token has no subject id")]
    MissingSubject,

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("Invalid JWT token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Sign claims with the shared HS256 secret
pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| TokenError::TokenGeneration(e.to_string()))
}

/// Verify a token against the shared secret and return its payload.
///
/// An empty token is a failure result, not a panic.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }
    if token.trim().is_empty() {
        return Err(TokenError::EmptyToken);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    if token_data.claims.id.is_empty() {
        return Err(TokenError::MissingSubject);
    }

    Ok(token_data.claims)
}

/// Take the credential out of an `Authorization` header value.
///
/// The value is split on whitespace and the second segment is the token, so
/// `"Bearer abc"` yields `Some("abc")` and a bare `"Bearer"` yields `None`.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().nth(1)
}

fn subject_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Text(String),
        Number(i64),
    }

    match Subject::deserialize(deserializer)? {
        Subject::Text(s) => Ok(s),
        Subject::Number(n) => Ok(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn round_trips_subject_id() {
        let token = generate_jwt(&Claims::new("u1", 1).unwrap(), SECRET).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.id, "u1");
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = generate_jwt(&Claims::new("u1", 1).unwrap(), SECRET).unwrap();
        assert!(verify_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn rejects_empty_and_garbage_tokens() {
        assert!(matches!(verify_jwt("", SECRET), Err(TokenError::EmptyToken)));
        assert!(matches!(verify_jwt("not.a.jwt", SECRET), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let claims = Claims {
            id: "u1".to_string(),
            exp: Some(Utc::now().timestamp() - 3600),
            iat: None,
        };
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(verify_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn accepts_token_without_exp_and_numeric_id() {
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        let token = encode(&Header::default(), &json!({ "id": 42 }), &key).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.id, "42");
    }

    #[test]
    fn rejects_payload_without_id() {
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        let token = encode(&Header::default(), &json!({ "sub": "u1" }), &key).unwrap();
        assert!(verify_jwt(&token, SECRET).is_err());

        let token = encode(&Header::default(), &json!({ "id": "" }), &key).unwrap();
        assert!(matches!(verify_jwt(&token, SECRET), Err(TokenError::MissingSubject)));
    }

    #[test]
    fn out_of_range_lifetime_is_refused() {
        assert!(matches!(
            Claims::new("u1", 1_000_000_000_000),
            Err(TokenError::InvalidExpiry(1_000_000_000_000))
        ));
        assert!(matches!(Claims::new("u1", u64::MAX), Err(TokenError::InvalidExpiry(u64::MAX))));
    }

    #[test]
    fn lifetime_lands_in_the_future() {
        let claims = Claims::new("u1", 24 * 365).unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(claims.exp, Some(iat + 24 * 365 * 3600));
    }

    #[test]
    fn extracts_second_header_segment() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Bearer   spaced"), Some("spaced"));
        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token(""), None);
    }
}
