//! JWT session claims for authentication and authorization.
//!
//! A successful login is turned into a self-contained, HS256-signed claim
//! set. Nothing is persisted server-side; tampering breaks the signature and
//! expired claims are rejected on decode.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::database::models::{User, UserRole};
use crate::errors::{ServiceError, ServiceResult};

/// JWT claims carried by every authenticated request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Normalized email address
    pub email: String,
    /// Role at issuance time
    pub role: UserRole,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT utility for creating and validating session tokens.
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    session_ttl: Duration,
}

impl JwtUtils {
    /// Creates a new JwtUtils instance from the configured signing secret.
    pub fn new(jwt_secret: &str, session_ttl_days: i64) -> ServiceResult<Self> {
        if jwt_secret.is_empty() {
            return Err(ServiceError::configuration("JWT secret must not be empty"));
        }

        let encoding_key = EncodingKey::from_secret(jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Ok(JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            session_ttl: Duration::days(session_ttl_days),
        })
    }

    /// Issues a signed session token for an authenticated user.
    pub fn generate_token(&self, user: &User) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + self.session_ttl;

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {e}")))
    }

    /// Validates signature and expiry, returning the decoded claims.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::InvalidCredentials)
    }

    /// Session lifetime in seconds, reported to clients alongside the token.
    pub fn expires_in_seconds(&self) -> u64 {
        self.session_ttl.num_seconds() as u64
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    /// Check if token has expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        now > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: "user-1".to_string(),
            email: "student@example.com".to_string(),
            password_hash: None,
            role: UserRole::Instructor,
            email_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_roundtrip_preserves_claims() {
        let jwt = JwtUtils::new("test-secret", 30).unwrap();
        let token = jwt.generate_token(&test_user()).unwrap();

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.email, "student@example.com");
        assert_eq!(claims.role, UserRole::Instructor);
        assert!(!claims.is_expired());
        assert!(!claims.is_admin());
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = JwtUtils::new("test-secret", 30).unwrap();

        let now = Utc::now();
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "student@example.com".to_string(),
            role: UserRole::User,
            exp: (now - chrono::Duration::hours(1)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(jwt.validate_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let jwt = JwtUtils::new("test-secret", 30).unwrap();
        let other = JwtUtils::new("different-secret", 30).unwrap();

        let token = other.generate_token(&test_user()).unwrap();
        assert!(jwt.validate_token(&token).is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            JwtUtils::new("", 30),
            Err(ServiceError::Configuration { .. })
        ));
    }
}
