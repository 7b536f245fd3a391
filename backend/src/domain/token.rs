//! Signed, time-bounded identity tokens.
//!
//! Tokens are HMAC-SHA256 JWTs signed with a single process-wide secret
//! loaded once at startup. Verification pins exactly that algorithm, so a
//! token signed any other way is rejected outright. There is no revocation:
//! rotating the secret invalidates every outstanding token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, Role, User, UserId};

/// Default token lifetime.
pub const DEFAULT_TOKEN_VALIDITY_DAYS: i64 = 7;

/// Process-wide signing secret, zeroized on drop.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenSecret(<redacted>)")
    }
}

/// Verification and issuance failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token's expiry instant has passed.
    #[error("token expired")]
    Expired,
    /// Signature, structure, or algorithm did not validate.
    #[error("invalid token")]
    Invalid,
    /// Encoding failed at issuance.
    #[error("token signing failed: {message}")]
    Signing {
        /// Reason reported by the signing backend.
        message: String,
    },
}

/// Decoded claim set of a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    /// Authenticated user identifier.
    pub subject: UserId,
    /// Email captured at issuance.
    pub email: EmailAddress,
    /// Role captured at issuance.
    pub role: Role,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Wire form of the claim set; second-granularity expiry per the JWT spec.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    email: String,
    role: Role,
    exp: i64,
}

/// Issues and verifies identity tokens with a fixed secret and algorithm.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl TokenService {
    /// Create a service signing with `secret` and the given lifetime.
    pub fn new(secret: &TokenSecret, validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validity,
        }
    }

    /// Create a service with the default seven-day lifetime.
    pub fn with_default_validity(secret: &TokenSecret) -> Self {
        Self::new(secret, Duration::days(DEFAULT_TOKEN_VALIDITY_DAYS))
    }

    /// Issue a token for `user`, expiring `validity` from now.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as of an explicit instant; lets tests pin expiry.
    pub fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = WireClaims {
            sub: user.id.to_string(),
            email: user.email.as_str().to_owned(),
            role: user.role,
            exp: (issued_at + self.validity).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|error| {
            TokenError::Signing {
                message: error.to_string(),
            }
        })
    }

    /// Verify a token and return its claim set.
    ///
    /// Fails with [`TokenError::Expired`] once the expiry instant has
    /// passed (no leeway) and [`TokenError::Invalid`] for every other
    /// defect, including tokens signed with a different algorithm or secret.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<WireClaims>(token, &self.decoding, &validation).map_err(|error| {
            match error.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;
        let subject = UserId::parse(&data.claims.sub).map_err(|_| TokenError::Invalid)?;
        let email = EmailAddress::new(&data.claims.email).map_err(|_| TokenError::Invalid)?;
        let expires_at =
            DateTime::from_timestamp(data.claims.exp, 0).ok_or(TokenError::Invalid)?;
        Ok(Claims {
            subject,
            email,
            role: data.claims.role,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::user::FullName;

    #[fixture]
    fn user() -> User {
        User {
            id: UserId::random(),
            email: EmailAddress::new("medic@example.com").expect("valid email"),
            full_name: FullName::new("Field Medic").expect("valid name"),
            role: Role::Personnel,
            created_at: Utc::now(),
        }
    }

    fn service() -> TokenService {
        TokenService::with_default_validity(&TokenSecret::new(*b"unit-test-secret"))
    }

    #[rstest]
    fn fresh_tokens_round_trip_their_claims(user: User) {
        let service = service();
        let issued_at = Utc::now();
        let token = service.issue_at(&user, issued_at).expect("issuance");
        let claims = service.verify(&token).expect("verification");

        assert_eq!(claims.subject, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, user.role);
        assert_eq!(
            claims.expires_at.timestamp(),
            (issued_at + Duration::days(DEFAULT_TOKEN_VALIDITY_DAYS)).timestamp()
        );
    }

    #[rstest]
    fn expired_tokens_fail_with_expired(user: User) {
        let service = service();
        let token = service
            .issue_at(&user, Utc::now() - Duration::days(DEFAULT_TOKEN_VALIDITY_DAYS + 1))
            .expect("issuance");
        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[rstest]
    fn foreign_secrets_fail_with_invalid(user: User) {
        let issuer = service();
        let verifier =
            TokenService::with_default_validity(&TokenSecret::new(*b"a-different-secret"));
        let token = issuer.issue(&user).expect("issuance");
        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-token")]
    #[case("aaaa.bbbb.cccc")]
    fn garbage_tokens_fail_with_invalid(#[case] token: &str) {
        assert_eq!(service().verify(token), Err(TokenError::Invalid));
    }

    #[rstest]
    fn tampered_payloads_fail_with_invalid(user: User) {
        let service = service();
        let token = service.issue(&user).expect("issuance");
        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        parts[1] = parts[1].chars().rev().collect();
        assert_eq!(service.verify(&parts.join(".")), Err(TokenError::Invalid));
    }

    #[test]
    fn secret_debug_output_is_redacted() {
        let secret = TokenSecret::new(*b"unit-test-secret");
        assert_eq!(format!("{secret:?}"), "TokenSecret(<redacted>)");
    }
}
