//! In-memory hospital reference collection.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::hospital::Hospital;
use crate::domain::ports::{HospitalRepository, HospitalRepositoryError};

/// Read-mostly in-memory `hospitals` collection.
#[derive(Debug, Default)]
pub struct MemoryHospitalRepository {
    records: RwLock<Vec<Hospital>>,
}

#[async_trait]
impl HospitalRepository for MemoryHospitalRepository {
    async fn count(&self) -> Result<usize, HospitalRepositoryError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.len())
    }

    async fn insert_many(&self, hospitals: &[Hospital]) -> Result<(), HospitalRepositoryError> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        records.extend_from_slice(hospitals);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Hospital>, HospitalRepositoryError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital(id: &str) -> Hospital {
        Hospital {
            id: id.to_owned(),
            name: format!("{id} General"),
            address: "1 Test Road".to_owned(),
            lga: "Ikeja".to_owned(),
            available_beds: 5,
            expertise: vec!["Emergency".to_owned()],
            phone: "01-000-0000".to_owned(),
            latitude: 6.59,
            longitude: 3.34,
        }
    }

    #[tokio::test]
    async fn seeded_hospitals_are_listed_in_insertion_order() {
        let repo = MemoryHospitalRepository::default();
        assert_eq!(repo.count().await.expect("count"), 0);

        repo.insert_many(&[hospital("hosp-1"), hospital("hosp-2")])
            .await
            .expect("insert succeeds");

        assert_eq!(repo.count().await.expect("count"), 2);
        let listed = repo.list().await.expect("list succeeds");
        let ids: Vec<&str> = listed.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["hosp-1", "hosp-2"]);
    }
}
