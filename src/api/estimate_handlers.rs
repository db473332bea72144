use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::api::handlers::AppState;
use crate::model::{
    CallerIdentity, Estimate, EstimateAllocation, EstimateCustomerApproval, PreliminaryDecision,
    RECOMMENDATION_REPAIR, ROLE_CUSTOMER, ROLE_INSURANCE, ROLE_OWNER,
};
use crate::store::traits::Store;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSearchQuery {
    /// The estimate number (e.g. "DEHAMCE1856373").
    pub estimate_number: Option<String>,
    /// Unit number of the shipping container at estimate creation time.
    pub unit_number: Option<String>,
    /// Identifier of the depot (e.g. "DEHAMCMRA").
    pub depot: Option<String>,
    /// Identifier of the lessee (e.g. "SGSINONEA").
    pub lessee: Option<String>,
    pub revision: Option<i32>,
    /// ISO equipment code of the shipping container (e.g. "22G1").
    pub equipment_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateShowQuery {
    /// Identifier of the depot the estimate belongs to.
    pub depot: String,
    /// Revision to show; the current revision is returned when not specified.
    pub revision: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateApproveQuery {
    /// Identifier of the depot the estimate belongs to.
    pub depot: String,
}

/// GET /api/v2/estimate — search estimates. Declared but not supported by
/// this server.
pub async fn index<S: Store>(
    State(_store): State<AppState<S>>,
    Query(_query): Query<EstimateSearchQuery>,
) -> ApiResult<Json<Vec<Estimate>>> {
    Err(ApiError::NotImplemented)
}

/// POST /api/v2/estimate — create an estimate revision.
pub async fn create<S: Store>(
    State(store): State<AppState<S>>,
    Json(mut estimate): Json<Estimate>,
) -> ApiResult<Json<EstimateAllocation>> {
    log::info!("Received Estimate Create");
    if let Ok(body) = serde_json::to_string(&estimate) {
        log::info!("{}", body);
    }

    estimate.validate().map_err(ApiError::Validation)?;

    save_parties(&*store, &mut estimate).await?;

    store.save_estimate(estimate.clone()).await?;

    // Generate an example allocation for demo purposes
    let allocation = EstimateAllocation {
        id: None,
        estimate_number: estimate.estimate_number.clone(),
        revision: estimate.revision,
        depot: estimate.depot.clone(),
        total: estimate.total,
        owner_total: estimate.party_total(ROLE_OWNER),
        insurance_total: estimate.party_total(ROLE_INSURANCE),
        customer_total: estimate.party_total(ROLE_CUSTOMER),
        ctl: false, // assume not a CTL for demo purposes
        comments: estimate.comments.clone(),
        preliminary_decision: Some(PreliminaryDecision {
            recommendation: RECOMMENDATION_REPAIR.to_string(),
            reason: None,
        }),
    };

    log::info!("Responding with example Estimate Allocation");
    if let Ok(body) = serde_json::to_string(&allocation) {
        log::info!("{}", body);
    }

    Ok(Json(allocation))
}

/// GET /api/v2/estimate/{estimateNumber} — fetch an estimate revision.
/// Declared but not supported by this server.
pub async fn show<S: Store>(
    State(_store): State<AppState<S>>,
    Path(_estimate_number): Path<String>,
    Query(_query): Query<EstimateShowQuery>,
) -> ApiResult<Json<Estimate>> {
    Err(ApiError::NotImplemented)
}

/// PUT /api/v2/estimate/{estimateNumber} — customer approve an estimate
/// without revising it. Declared but not supported by this server.
pub async fn customer_approve<S: Store>(
    State(_store): State<AppState<S>>,
    Path(_estimate_number): Path<String>,
    Query(_query): Query<EstimateApproveQuery>,
    Json(_approval): Json<EstimateCustomerApproval>,
) -> ApiResult<Json<EstimateAllocation>> {
    Err(ApiError::NotImplemented)
}

/// PATCH /api/v2/estimate/{estimateNumber} — patch totals onto an estimate
/// whose creation was deferred to manual processing.
pub async fn allocate<S: Store>(
    State(store): State<AppState<S>>,
    Path(estimate_number): Path<String>,
    caller: CallerIdentity,
    Json(mut allocation): Json<EstimateAllocation>,
) -> ApiResult<StatusCode> {
    log::info!("Received Estimate Totals Allocation");
    if let Ok(body) = serde_json::to_string(&allocation) {
        log::info!("{}", body);
    }

    allocation.validate().map_err(ApiError::Validation)?;

    // The validation identity may allocate ahead of the estimate itself;
    // everyone else needs the estimate to exist.
    if !caller.is_validation_user() && !store.estimate_exists(&estimate_number).await? {
        return Err(ApiError::Validation(
            "Estimate does not exist to allocate.".to_string(),
        ));
    }

    if let Some(depot) = allocation.depot.take() {
        allocation.depot = Some(store.save_or_update(depot).await?);
    }

    store.save_allocation(allocation).await?;

    log::info!("Responding with OK");
    Ok(StatusCode::OK)
}

/// Replace every embedded party reference with the canonical stored record,
/// including the embedded allocation's depot when present.
async fn save_parties<S: Store>(store: &S, estimate: &mut Estimate) -> ApiResult<()> {
    if let Some(depot) = estimate.depot.take() {
        estimate.depot = Some(store.save_or_update(depot).await?);
    }

    if let Some(requester) = estimate.requester.take() {
        estimate.requester = Some(store.save_or_update(requester).await?);
    }

    if let Some(owner) = estimate.owner.take() {
        estimate.owner = Some(store.save_or_update(owner).await?);
    }

    if let Some(customer) = estimate.customer.take() {
        estimate.customer = Some(store.save_or_update(customer).await?);
    }

    if let Some(allocation) = &mut estimate.allocation {
        if let Some(depot) = allocation.depot.take() {
            allocation.depot = Some(store.save_or_update(depot).await?);
        }
    }

    Ok(())
}
