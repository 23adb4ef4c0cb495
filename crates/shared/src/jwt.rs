//! JWT bearer token verification using RS256.
//!
//! Tokens are issued by the identity service; this backend only
//! verifies them. Claims carry the role tag and the subscription plan
//! code so entitlement evaluation does not need a database round trip.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Role tag of the user (e.g. "ADMIN", "STAFF")
    pub user_type: String,
    /// Subscription plan code of the user's company, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_code: Option<String>,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Verifies bearer tokens against the identity service's public key.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtVerifier {
    /// Creates a new verifier from an RSA public key in PEM format.
    pub fn new(public_key_pem: &str) -> Result<Self, JwtError> {
        Self::with_leeway(public_key_pem, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a new verifier with custom clock-skew leeway.
    pub fn with_leeway(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            leeway_secs,
        })
    }

    /// Creates a verifier for testing with an HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_secs: 0, // Strict for testing - no leeway
        }
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm());
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    fn algorithm(&self) -> Algorithm {
        // Tests sign with a symmetric secret; production keys are RSA
        #[cfg(test)]
        {
            Algorithm::HS256
        }
        #[cfg(not(test))]
        {
            Algorithm::RS256
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_expiring_in(secs: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "11111111-1111-1111-1111-111111111111".to_string(),
            exp: now + secs,
            iat: now,
            user_type: "STAFF".to_string(),
            plan_code: Some("PREMIUM".to_string()),
        }
    }

    #[test]
    fn test_validate_token_roundtrip() {
        let verifier = JwtVerifier::new_for_testing("secret");
        let token = sign(&claims_expiring_in(60), "secret");

        let claims = verifier.validate_token(&token).unwrap();
        assert_eq!(claims.user_type, "STAFF");
        assert_eq!(claims.plan_code.as_deref(), Some("PREMIUM"));
    }

    #[test]
    fn test_validate_token_missing_plan_code() {
        let verifier = JwtVerifier::new_for_testing("secret");
        let mut claims = claims_expiring_in(60);
        claims.plan_code = None;
        let token = sign(&claims, "secret");

        let claims = verifier.validate_token(&token).unwrap();
        assert!(claims.plan_code.is_none());
    }

    #[test]
    fn test_validate_token_expired() {
        let verifier = JwtVerifier::new_for_testing("secret");
        let token = sign(&claims_expiring_in(-60), "secret");

        match verifier.validate_token(&token) {
            Err(JwtError::TokenExpired) => {}
            other => panic!("Expected TokenExpired, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let verifier = JwtVerifier::new_for_testing("secret");
        let token = sign(&claims_expiring_in(60), "other-secret");

        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_validate_token_garbage() {
        let verifier = JwtVerifier::new_for_testing("secret");
        assert!(verifier.validate_token("not-a-token").is_err());
    }

    #[test]
    fn test_invalid_public_key_rejected() {
        assert!(JwtVerifier::new("not a pem").is_err());
    }
}
