use crate::model::{Estimate, EstimateAllocation, Id, Party, Release};
use anyhow::Result;

#[async_trait::async_trait]
pub trait PartyStore: Send + Sync {
    /// Insert the party or fold it into the stored record with the same code,
    /// returning the canonical stored copy.
    async fn save_or_update(&self, party: Party) -> Result<Party>;
    async fn get_party(&self, code: &Id) -> Result<Option<Party>>;
}

#[async_trait::async_trait]
pub trait ReleaseStore: Send + Sync {
    async fn release_exists(&self, release_number: &Id) -> Result<bool>;
    async fn find_release(&self, release_number: &Id) -> Result<Option<Release>>;
    async fn list_releases(&self) -> Result<Vec<Release>>;
    async fn save_release(&self, release: Release) -> Result<()>;
    /// Replace an existing release. Fails if no record matches its number.
    async fn update_release(&self, release: Release) -> Result<()>;
}

#[async_trait::async_trait]
pub trait EstimateStore: Send + Sync {
    /// Whether any revision exists under the given estimate number.
    async fn estimate_exists(&self, estimate_number: &Id) -> Result<bool>;
    /// Fetch a specific revision, or the current (highest) revision when none
    /// is given.
    async fn find_estimate(
        &self,
        estimate_number: &Id,
        revision: Option<i32>,
    ) -> Result<Option<Estimate>>;
    async fn save_estimate(&self, estimate: Estimate) -> Result<()>;
}

#[async_trait::async_trait]
pub trait AllocationStore: Send + Sync {
    /// Persist the allocation as its own record, assigning an id when the
    /// incoming record has none. Returns the stored copy.
    async fn save_allocation(&self, allocation: EstimateAllocation) -> Result<EstimateAllocation>;
}

pub trait Store: PartyStore + ReleaseStore + EstimateStore + AllocationStore + Send + Sync {}
impl<T: PartyStore + ReleaseStore + EstimateStore + AllocationStore + Send + Sync> Store for T {}
