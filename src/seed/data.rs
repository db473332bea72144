use crate::model::{Party, Release, ReleaseDetail};
use crate::store::traits::Store;
use anyhow::Result;

/// Load demonstration data: a Hamburg depot, a lessee, and one release
/// referencing both, so a freshly booted server has something to return.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    let depot = store
        .save_or_update(Party {
            code: "DEHAMCMRA".to_string(),
            name: Some("Hamburg Container Repair".to_string()),
            city: Some("Hamburg".to_string()),
            country: Some("DE".to_string()),
        })
        .await?;

    let customer = store
        .save_or_update(Party {
            code: "SGSINONEA".to_string(),
            name: Some("Ocean Network Express".to_string()),
            city: Some("Singapore".to_string()),
            country: Some("SG".to_string()),
        })
        .await?;

    store
        .save_release(Release {
            release_number: "RHAMG000000".to_string(),
            comments: Some("Demonstration release".to_string()),
            depot: Some(depot),
            recipient: None,
            details: vec![ReleaseDetail {
                customer: Some(customer),
                contract: Some("CNT-2026-0001".to_string()),
                equipment: Some("22G1".to_string()),
                quantity: Some(5),
            }],
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, PartyStore, ReleaseStore};

    #[tokio::test]
    async fn test_seed_data_loads_into_empty_store() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();

        let number = "RHAMG000000".to_string();
        let release = store.find_release(&number).await.unwrap().unwrap();
        assert_eq!(release.depot.as_ref().unwrap().code, "DEHAMCMRA");

        let depot_code = "DEHAMCMRA".to_string();
        assert!(store.get_party(&depot_code).await.unwrap().is_some());
    }
}
