//! Role-based access decisions.
//!
//! Pure functions over (caller claims, requested operation, target record).
//! Role dispatch is a tagged variant, not a type hierarchy: a single match
//! computes the visibility scope or verdict.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::Error;
use crate::domain::incident::Incident;
use crate::domain::token::Claims;
use crate::domain::user::{Role, User, UserId};

/// Visibility scope applied to incident listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncidentScope {
    /// Unscoped: every record is visible.
    All,
    /// Only records authored by the given personnel.
    OwnedBy(UserId),
}

/// Who may overwrite an incident's transfer fields.
///
/// The permissive default mirrors the observed behaviour of the system this
/// service replaces: any on-duty responder can mark a handoff. Deployments
/// that want authorship enforced opt into [`Self::AuthorOrAdmin`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferUpdateAccess {
    /// Any authenticated caller may update any incident's transfer fields.
    #[default]
    AnyAuthenticated,
    /// Only the authoring personnel or an administrator may update.
    AuthorOrAdmin,
}

/// Parse failure for [`TransferUpdateAccess`] configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transfer update access mode {value:?}; expected any-authenticated or author-or-admin")]
pub struct UnknownAccessMode {
    /// The rejected input.
    pub value: String,
}

impl FromStr for TransferUpdateAccess {
    type Err = UnknownAccessMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any-authenticated" => Ok(Self::AnyAuthenticated),
            "author-or-admin" => Ok(Self::AuthorOrAdmin),
            other => Err(UnknownAccessMode {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TransferUpdateAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyAuthenticated => f.write_str("any-authenticated"),
            Self::AuthorOrAdmin => f.write_str("author-or-admin"),
        }
    }
}

/// The access-control rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    transfer_update: TransferUpdateAccess,
}

impl AccessPolicy {
    /// Build a policy with the given transfer-update mode.
    pub fn new(transfer_update: TransferUpdateAccess) -> Self {
        Self { transfer_update }
    }

    /// Authorize creating an account with `requested` role.
    ///
    /// Personnel accounts are open to anonymous registration. Admin accounts
    /// require `requester` to be a resolved user whose role is admin; a
    /// missing requester covers both the anonymous case and a token whose
    /// subject no longer exists.
    pub fn authorize_registration(
        &self,
        requested: Role,
        requester: Option<&User>,
    ) -> Result<(), Error> {
        match requested {
            Role::Personnel => Ok(()),
            Role::Admin => match requester {
                Some(user) if user.role.is_admin() => Ok(()),
                Some(_) => Err(Error::forbidden(
                    "only administrators can create admin accounts",
                )),
                None => Err(Error::forbidden(
                    "admin accounts can only be created by existing administrators",
                )),
            },
        }
    }

    /// Compute the listing scope for a caller.
    pub fn list_scope(&self, claims: &Claims) -> IncidentScope {
        match claims.role {
            Role::Admin => IncidentScope::All,
            Role::Personnel => IncidentScope::OwnedBy(claims.subject.clone()),
        }
    }

    /// Authorize overwriting `incident`'s transfer fields.
    pub fn authorize_transfer_update(
        &self,
        claims: &Claims,
        incident: &Incident,
    ) -> Result<(), Error> {
        match self.transfer_update {
            TransferUpdateAccess::AnyAuthenticated => Ok(()),
            TransferUpdateAccess::AuthorOrAdmin => {
                if claims.role.is_admin() || incident.personnel_id == claims.subject {
                    Ok(())
                } else {
                    Err(Error::forbidden(
                        "only the authoring personnel or an administrator can update transfer fields",
                    ))
                }
            }
        }
    }
}
