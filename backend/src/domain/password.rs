//! Password policy and one-way credential hashing.
//!
//! Plaintext passwords live only inside [`Password`], which zeroizes its
//! buffer on drop and redacts itself from debug output. Only the salted
//! Argon2id digest is ever persisted.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;
/// Maximum accepted password length.
pub const PASSWORD_MAX: usize = 128;

/// The fixed punctuation set that satisfies the symbol requirement.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Strength-policy violations reported by [`Password::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Fewer than [`PASSWORD_MIN`] characters.
    TooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// More than [`PASSWORD_MAX`] characters.
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// No uppercase letter present.
    MissingUppercase,
    /// No lowercase letter present.
    MissingLowercase,
    /// No decimal digit present.
    MissingDigit,
    /// No symbol from the accepted punctuation set present.
    MissingSymbol,
}

impl fmt::Display for PasswordPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => {
                write!(f, "password must be at least {min} characters long")
            }
            Self::TooLong { max } => {
                write!(f, "password must be at most {max} characters long")
            }
            Self::MissingUppercase => {
                write!(f, "password must contain at least one uppercase letter")
            }
            Self::MissingLowercase => {
                write!(f, "password must contain at least one lowercase letter")
            }
            Self::MissingDigit => write!(f, "password must contain at least one digit"),
            Self::MissingSymbol => write!(
                f,
                "password must contain at least one of {PASSWORD_SYMBOLS}"
            ),
        }
    }
}

impl std::error::Error for PasswordPolicyError {}

/// A plaintext password that already satisfied the strength policy.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate `raw` against the strength policy and take ownership of it.
    ///
    /// # Examples
    /// ```
    /// use lifeline_backend::domain::Password;
    ///
    /// assert!(Password::new("Abcdefg1!").is_ok());
    /// assert!(Password::new("abc").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw.into());
        let length = raw.chars().count();
        if length < PASSWORD_MIN {
            return Err(PasswordPolicyError::TooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(PasswordPolicyError::TooLong { max: PASSWORD_MAX });
        }
        if !raw.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !raw.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
            return Err(PasswordPolicyError::MissingSymbol);
        }
        Ok(Self(raw))
    }

    /// The plaintext, for hashing only.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Salted one-way digest in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an already-computed PHC digest string.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC digest string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Hashing failures; only produced at registration, never at verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("credential hashing failed: {message}")]
pub struct HashingError {
    /// Reason reported by the hashing backend.
    pub message: String,
}

/// Argon2id credential hasher.
///
/// Verification is constant time with respect to the digest structure and
/// fails closed: a malformed digest verifies as `false`, never as an error a
/// caller could mistake for success.
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialHasher;

impl CredentialHasher {
    /// Hash a policy-checked password with a fresh random salt.
    pub fn hash(&self, password: &Password) -> Result<PasswordDigest, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_str().as_bytes(), &salt)
            .map(|hash| PasswordDigest(hash.to_string()))
            .map_err(|error| HashingError {
                message: error.to_string(),
            })
    }

    /// Recompute and compare a candidate against a stored digest.
    pub fn verify(&self, candidate: &str, digest: &PasswordDigest) -> bool {
        let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("abc", PasswordPolicyError::TooShort { min: PASSWORD_MIN })]
    #[case("abcdefgh", PasswordPolicyError::MissingUppercase)]
    #[case("ABCDEFGH", PasswordPolicyError::MissingLowercase)]
    #[case("Abcdefgh", PasswordPolicyError::MissingDigit)]
    #[case("Abcdefg1", PasswordPolicyError::MissingSymbol)]
    fn weak_passwords_are_rejected(#[case] raw: &str, #[case] expected: PasswordPolicyError) {
        assert_eq!(Password::new(raw).expect_err("weak password"), expected);
    }

    #[test]
    fn overlong_passwords_are_rejected() {
        let raw = format!("Aa1!{}", "x".repeat(PASSWORD_MAX));
        assert_eq!(
            Password::new(raw).expect_err("overlong password"),
            PasswordPolicyError::TooLong { max: PASSWORD_MAX }
        );
    }

    #[rstest]
    #[case("Abcdefg1!")]
    #[case("Tr0ub4dor&3x")]
    fn policy_accepts_strong_passwords(#[case] raw: &str) {
        assert!(Password::new(raw).is_ok());
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = CredentialHasher;
        let password = Password::new("Abcdefg1!").expect("strong password");
        let digest = hasher.hash(&password).expect("hashing succeeds");
        assert!(hasher.verify("Abcdefg1!", &digest));
        assert!(!hasher.verify("Abcdefg1?", &digest));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = CredentialHasher;
        let password = Password::new("Abcdefg1!").expect("strong password");
        let first = hasher.hash(&password).expect("hashing succeeds");
        let second = hasher.hash(&password).expect("hashing succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-phc-digest")]
    #[case("$argon2id$truncated")]
    fn malformed_digests_fail_closed(#[case] digest: &str) {
        let hasher = CredentialHasher;
        assert!(!hasher.verify("Abcdefg1!", &PasswordDigest::new(digest)));
    }

    #[test]
    fn debug_output_redacts_the_plaintext() {
        let password = Password::new("Abcdefg1!").expect("strong password");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }
}
