use crate::model::{generate_id, Estimate, EstimateAllocation, Id, Party, Release};
use crate::store::traits::{AllocationStore, EstimateStore, PartyStore, ReleaseStore};
use anyhow::{bail, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory store backing the HTTP layer. Each call takes one lock and is
/// atomic on its own; there is no transaction spanning multiple calls.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Parties keyed by code.
    parties: RwLock<HashMap<Id, Party>>,
    /// Releases keyed by release number.
    releases: RwLock<HashMap<Id, Release>>,
    /// Estimates keyed by (estimate number, revision).
    estimates: RwLock<HashMap<(Id, i32), Estimate>>,
    /// Allocations keyed by their server-assigned id.
    allocations: RwLock<HashMap<Id, EstimateAllocation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocation records currently held. Test support.
    pub async fn allocation_count(&self) -> usize {
        self.allocations.read().await.len()
    }
}

#[async_trait::async_trait]
impl PartyStore for MemoryStore {
    async fn save_or_update(&self, party: Party) -> Result<Party> {
        let mut parties = self.parties.write().await;
        match parties.get_mut(&party.code) {
            Some(existing) => {
                existing.merge_from(party);
                Ok(existing.clone())
            }
            None => {
                parties.insert(party.code.clone(), party.clone());
                Ok(party)
            }
        }
    }

    async fn get_party(&self, code: &Id) -> Result<Option<Party>> {
        Ok(self.parties.read().await.get(code).cloned())
    }
}

#[async_trait::async_trait]
impl ReleaseStore for MemoryStore {
    async fn release_exists(&self, release_number: &Id) -> Result<bool> {
        Ok(self.releases.read().await.contains_key(release_number))
    }

    async fn find_release(&self, release_number: &Id) -> Result<Option<Release>> {
        Ok(self.releases.read().await.get(release_number).cloned())
    }

    async fn list_releases(&self) -> Result<Vec<Release>> {
        Ok(self.releases.read().await.values().cloned().collect())
    }

    async fn save_release(&self, release: Release) -> Result<()> {
        self.releases
            .write()
            .await
            .insert(release.release_number.clone(), release);
        Ok(())
    }

    async fn update_release(&self, release: Release) -> Result<()> {
        let mut releases = self.releases.write().await;
        if !releases.contains_key(&release.release_number) {
            bail!("no release '{}' to update", release.release_number);
        }
        releases.insert(release.release_number.clone(), release);
        Ok(())
    }
}

#[async_trait::async_trait]
impl EstimateStore for MemoryStore {
    async fn estimate_exists(&self, estimate_number: &Id) -> Result<bool> {
        Ok(self
            .estimates
            .read()
            .await
            .keys()
            .any(|(number, _)| number == estimate_number))
    }

    async fn find_estimate(
        &self,
        estimate_number: &Id,
        revision: Option<i32>,
    ) -> Result<Option<Estimate>> {
        let estimates = self.estimates.read().await;
        match revision {
            Some(revision) => {
                Ok(estimates.get(&(estimate_number.clone(), revision)).cloned())
            }
            None => Ok(estimates
                .iter()
                .filter(|((number, _), _)| number == estimate_number)
                .max_by_key(|((_, revision), _)| *revision)
                .map(|(_, estimate)| estimate.clone())),
        }
    }

    async fn save_estimate(&self, estimate: Estimate) -> Result<()> {
        self.estimates
            .write()
            .await
            .insert((estimate.estimate_number.clone(), estimate.revision), estimate);
        Ok(())
    }
}

#[async_trait::async_trait]
impl AllocationStore for MemoryStore {
    async fn save_allocation(&self, allocation: EstimateAllocation) -> Result<EstimateAllocation> {
        let mut stored = allocation;
        let id = stored.id.clone().unwrap_or_else(generate_id);
        stored.id = Some(id.clone());
        self.allocations.write().await.insert(id, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(code: &str, name: Option<&str>) -> Party {
        Party {
            code: code.to_string(),
            name: name.map(str::to_string),
            city: None,
            country: None,
        }
    }

    #[tokio::test]
    async fn test_save_or_update_returns_canonical_record() {
        let store = MemoryStore::new();

        let first = store
            .save_or_update(party("DEHAMCMRA", Some("Hamburg Depot")))
            .await
            .unwrap();
        assert_eq!(first.name, Some("Hamburg Depot".to_string()));

        // A later bare reference keeps the stored name.
        let second = store.save_or_update(party("DEHAMCMRA", None)).await.unwrap();
        assert_eq!(second.name, Some("Hamburg Depot".to_string()));

        assert_eq!(store.parties.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_release_requires_existing_record() {
        let store = MemoryStore::new();
        let release: Release =
            serde_json::from_str(r#"{"releaseNumber": "RHAMG000000"}"#).unwrap();

        assert!(store.update_release(release.clone()).await.is_err());

        store.save_release(release.clone()).await.unwrap();
        assert!(store.update_release(release).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_estimate_defaults_to_current_revision() {
        let store = MemoryStore::new();
        for revision in [0, 2, 1] {
            let estimate: Estimate = serde_json::from_str(&format!(
                r#"{{"estimateNumber": "DEHAMCE1856373", "revision": {}}}"#,
                revision
            ))
            .unwrap();
            store.save_estimate(estimate).await.unwrap();
        }

        let number = "DEHAMCE1856373".to_string();
        let current = store.find_estimate(&number, None).await.unwrap().unwrap();
        assert_eq!(current.revision, 2);

        let pinned = store.find_estimate(&number, Some(1)).await.unwrap().unwrap();
        assert_eq!(pinned.revision, 1);

        assert!(store
            .find_estimate(&number, Some(9))
            .await
            .unwrap()
            .is_none());
        assert!(store.estimate_exists(&number).await.unwrap());
        assert!(!store.estimate_exists(&"UNKNOWN".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_allocation_assigns_id() {
        let store = MemoryStore::new();
        let allocation: EstimateAllocation =
            serde_json::from_str(r#"{"estimateNumber": "DEHAMCE1856373"}"#).unwrap();

        let stored = store.save_allocation(allocation).await.unwrap();
        assert!(stored.id.is_some());
        assert_eq!(store.allocation_count().await, 1);
    }
}
