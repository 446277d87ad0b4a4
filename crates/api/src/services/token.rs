//! Bearer-token issuance and verification.
//!
//! Tokens are HS256 JWTs whose only claim is the subject: the username the
//! token was issued for. No expiry is enforced; a token stays valid for the
//! lifetime of the signing secret, matching the issued-once-at-registration
//! model (logins return the stored token rather than rotating it).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mobile_shop_core::Username;

/// Errors that can occur when issuing or verifying a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token failed signature or structural verification.
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The token verified but its subject is not a valid username.
    #[error("token subject is not a valid username")]
    InvalidSubject,
}

/// JWT claims carried by a bearer token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The username the token was issued for.
    sub: String,
}

/// Signs and verifies bearer tokens with a process-wide secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        // No expiry claim is issued, so none is required or validated.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
        }
    }

    /// Issue a token embedding `username` as the subject.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Jwt` if signing fails.
    pub fn issue(&self, username: &Username) -> Result<String, TokenError> {
        let claims = Claims {
            sub: username.as_str().to_owned(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify a token and return the username it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Jwt` if the signature or structure is invalid,
    /// or `TokenError::InvalidSubject` if the embedded subject does not
    /// parse as a username.
    pub fn verify(&self, token: &str) -> Result<Username, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Username::parse(&data.claims.sub).map_err(|_| TokenError::InvalidSubject)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("test-signing-key-test-signing-key"))
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let tokens = service();
        let username = Username::parse("vasya").unwrap();

        let token = tokens.issue(&username).unwrap();
        assert!(!token.is_empty());

        let subject = tokens.verify(&token).unwrap();
        assert_eq!(subject, username);
    }

    #[test]
    fn test_issue_is_deterministic_for_same_subject() {
        let tokens = service();
        let username = Username::parse("vasya").unwrap();

        // No issued-at or expiry claims, so re-issuing yields the same token.
        let a = tokens.issue(&username).unwrap();
        let b = tokens.issue(&username).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let tokens = service();
        let username = Username::parse("vasya").unwrap();

        let mut token = tokens.issue(&username).unwrap();
        token.push('x');
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let username = Username::parse("vasya").unwrap();
        let token = service().issue(&username).unwrap();

        let other = TokenService::new(&SecretString::from("another-signing-key-another-key!"));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(service().verify("not-a-jwt").is_err());
    }
}
