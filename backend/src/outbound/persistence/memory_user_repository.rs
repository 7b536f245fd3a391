//! In-memory user collection with a unique email index.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{EmailAddress, StoredUser, UserId};

/// Keyed in-memory `users` collection.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    records: RwLock<HashMap<UserId, StoredUser>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, record: &StoredUser) -> Result<(), UserRepositoryError> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // The uniqueness check and the write happen under one lock, so two
        // concurrent registrations cannot both claim an email.
        if records
            .values()
            .any(|existing| existing.user.email == record.user.email)
        {
            return Err(UserRepositoryError::duplicate_email(
                record.user.email.as_str(),
            ));
        }
        records.insert(record.user.id.clone(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<StoredUser>, UserRepositoryError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .values()
            .find(|record| record.user.email == *email)
            .cloned())
    }
}
