use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::api::handlers::AppState;
use crate::model::Release;
use crate::store::traits::Store;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSearchQuery {
    /// The release number to filter to (e.g. "RHAMG000000").
    pub release_number: Option<String>,
}

/// GET /api/v2/release — find releases for the given criteria.
pub async fn index<S: Store>(
    State(store): State<AppState<S>>,
    Query(query): Query<ReleaseSearchQuery>,
) -> ApiResult<Json<Vec<Release>>> {
    log::info!("Received Release Search");
    if let Some(release_number) = &query.release_number {
        log::info!("{}", release_number);
    }

    let mut releases = Vec::new();
    if let Some(release_number) = query.release_number {
        if let Some(release) = store.find_release(&release_number).await? {
            releases.push(release);
        }
    } else {
        releases = store.list_releases().await?;
    }

    if releases.is_empty() {
        log::info!("\tRelease Search - 404 - Not Found");
        return Err(ApiError::NotFound);
    }

    log::info!("\tRelease Search - 200 - Found Releases");
    Ok(Json(releases))
}

/// POST /api/v2/release — create a release for the given criteria.
pub async fn create<S: Store>(
    State(store): State<AppState<S>>,
    Json(mut release): Json<Release>,
) -> ApiResult<StatusCode> {
    log::info!("Received Release Create");
    if let Ok(body) = serde_json::to_string(&release) {
        log::info!("{}", body);
    }

    release.validate().map_err(ApiError::Validation)?;

    if store.release_exists(&release.release_number).await? {
        return Err(ApiError::Validation(
            "Redelivery already exists; please update instead.".to_string(),
        ));
    }

    save_parties(&*store, &mut release).await?;

    store.save_release(release).await?;

    Ok(StatusCode::OK)
}

/// PUT /api/v2/release/{releaseNumber} — update an existing release.
pub async fn update<S: Store>(
    State(store): State<AppState<S>>,
    Path(release_number): Path<String>,
    Json(mut release): Json<Release>,
) -> ApiResult<StatusCode> {
    log::info!("Received Release Update");
    if let Ok(body) = serde_json::to_string(&release) {
        log::info!("{}", body);
    }

    release.validate().map_err(ApiError::Validation)?;

    // A failed update must not upsert parties or write anything.
    if !store.release_exists(&release_number).await? {
        return Err(ApiError::Validation("Release does not exist.".to_string()));
    }

    save_parties(&*store, &mut release).await?;

    store.update_release(release).await?;

    Ok(StatusCode::OK)
}

/// Replace every embedded party reference with the canonical stored record.
/// Party upserts are independent of the parent write; there is no rollback.
async fn save_parties<S: Store>(store: &S, release: &mut Release) -> ApiResult<()> {
    for detail in &mut release.details {
        if let Some(customer) = detail.customer.take() {
            detail.customer = Some(store.save_or_update(customer).await?);
        }
    }

    if let Some(depot) = release.depot.take() {
        release.depot = Some(store.save_or_update(depot).await?);
    }

    if let Some(recipient) = release.recipient.take() {
        release.recipient = Some(store.save_or_update(recipient).await?);
    }

    Ok(())
}
