//! User identity model.
//!
//! Accounts are created once at registration and never updated or deleted by
//! this service. The public [`User`] never carries credential material; the
//! persisted [`StoredUser`] pairs it with the password digest.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::password::PasswordDigest;

/// Validation errors for user identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Email did not match the accepted shape.
    InvalidEmail,
    /// Email exceeded the storage bound.
    EmailTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// Full name was blank once whitespace was normalized.
    EmptyFullName,
    /// Full name exceeded the storage bound.
    FullNameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// Role string named neither `personnel` nor `admin`.
    UnknownRole {
        /// The rejected input.
        value: String,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmailTooLong { max } => {
                write!(f, "email must be at most {max} characters")
            }
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::FullNameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::UnknownRole { value } => {
                write!(f, "unknown role {value:?}; expected personnel or admin")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier backed by a 128-bit random UUID.
///
/// Identifier generation must stay collision-resistant; a sequential counter
/// would leak registration order and collide across processes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its canonical string form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum accepted email length.
pub const EMAIL_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Input is lower-cased before matching, so the pattern only needs the
        // lower-case alphabet.
        let pattern = r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Case-normalized email address.
///
/// ## Invariants
/// - Trimmed and lower-cased on construction.
/// - Matches the accepted address shape and fits in [`EMAIL_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`], normalizing case.
    ///
    /// # Examples
    /// ```
    /// use lifeline_backend::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Jane.Doe@Example.COM ").unwrap();
    /// assert_eq!(email.as_str(), "jane.doe@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalized) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    /// Normalized address string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum accepted full-name length.
pub const FULL_NAME_MAX: usize = 200;

/// Human-readable name, whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`], collapsing internal whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = raw.as_ref().split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        if normalized.chars().count() > FULL_NAME_MAX {
            return Err(UserValidationError::FullNameTooLong { max: FULL_NAME_MAX });
        }
        Ok(Self(normalized))
    }

    /// Normalized name string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Caller role; fixed at registration and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Field personnel: may log incidents and see only their own.
    Personnel,
    /// Administrator: unscoped read access and admin provisioning rights.
    Admin,
}

impl Role {
    /// Whether the role grants administrative visibility.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personnel => f.write_str("personnel"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personnel" => Ok(Self::Personnel),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Public user record; never carries credential material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable opaque identifier.
    pub id: UserId,
    /// Unique, case-normalized email address.
    pub email: EmailAddress,
    /// Whitespace-normalized display name.
    pub full_name: FullName,
    /// Caller role, immutable once set.
    pub role: Role,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Persisted form of a user: the public record plus its password digest.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUser {
    /// The hash-free public record.
    pub user: User,
    /// Salted one-way digest of the registration password.
    pub password_hash: PasswordDigest,
}
