use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorMessage, HttpError};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Mint an admin token. Tokens are provisioned out of band (there is no
/// login endpoint on this API) and carried by the browser in a cookie.
pub fn create_token(
    subject: &str,
    secret: &[u8],
    expires_in_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    if subject.is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    let now = Utc::now();
    let claims = TokenClaims {
        sub: subject.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(expires_in_seconds)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

/// Thin verify wrapper: signature and expiry check, returning the token
/// subject. Everything else about the token is opaque to this service.
pub fn decode_token<T: Into<String>>(token: T, secret: &[u8]) -> Result<String, HttpError> {
    let decoded = decode::<TokenClaims>(
        &token.into(),
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    );

    match decoded {
        Ok(token) => Ok(token.claims.sub),
        Err(_) => Err(HttpError::unauthorized(ErrorMessage::InvalidToken)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn test_roundtrip() {
        let token = create_token("admin@casavela.com", SECRET, 3600).unwrap();
        let subject = decode_token(token, SECRET).unwrap();
        assert_eq!(subject, "admin@casavela.com");
    }

    #[test]
    fn test_empty_subject_rejected() {
        assert!(create_token("", SECRET, 3600).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("admin@casavela.com", SECRET, 3600).unwrap();
        let result = decode_token(token, b"other-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_token("admin@casavela.com", SECRET, -120).unwrap();
        assert!(decode_token(token, SECRET).is_err());
    }
}
