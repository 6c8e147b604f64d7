//! Price-comparator dataset handlers.

use axum::{extract::State, Extension, Json};
use phonecat_core::{ComparatorProduct, FacetCounts, FilterSelection};
use phonecat_engine::{
    apply_filters, extract_facets_counted, normalize_all, normalize_page, update_facets,
};
use phonecat_ingest::read_comparator_listings;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{run_blocking, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct PageRequest {
    pub start: usize,
}

/// Body of `/filter-primini-update`: the current selection, optionally with
/// the previous selection and the facets computed under it so only the
/// changed facets are recounted.
#[derive(Debug, Deserialize)]
pub(super) struct UpdateRequest {
    #[serde(flatten)]
    pub filters: FilterSelection,
    #[serde(rename = "previousFilters")]
    pub previous_filters: Option<FilterSelection>,
    #[serde(rename = "previousFacets")]
    pub previous_facets: Option<FacetCounts>,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateResponse {
    filtered_data: Vec<ComparatorProduct>,
    newfilters: FacetCounts,
}

/// One page of normalized comparator products.
pub(super) async fn read_primini(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PageRequest>,
) -> Result<Json<ApiResponse<Vec<ComparatorProduct>>>, ApiError> {
    let products = run_blocking(&req_id.0, move || {
        let rows = read_comparator_listings(&state.comparator_data_dir)?;
        Ok(normalize_page(&rows, body.start, &state.lexicon).into_items())
    })
    .await?;

    Ok(Json(ApiResponse::new(products, req_id.0)))
}

/// Counted facets over every normalized comparator product.
pub(super) async fn filter_primini_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<FacetCounts>>, ApiError> {
    let facets = run_blocking(&req_id.0, move || {
        let rows = read_comparator_listings(&state.comparator_data_dir)?;
        let products = normalize_all(&rows, &state.lexicon).into_items();
        Ok(extract_facets_counted(&products))
    })
    .await?;

    Ok(Json(ApiResponse::new(facets, req_id.0)))
}

pub(super) async fn filter_primini_update(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<ApiResponse<UpdateResponse>>, ApiError> {
    let response = run_blocking(&req_id.0, move || {
        let rows = read_comparator_listings(&state.comparator_data_dir)?;
        let products = normalize_all(&rows, &state.lexicon).into_items();
        let filtered_data = apply_filters(&products, &body.filters);

        let newfilters = match (&body.previous_filters, &body.previous_facets) {
            (Some(previous), Some(snapshot)) => {
                update_facets(&filtered_data, &body.filters, previous, snapshot)
            }
            _ => extract_facets_counted(&filtered_data),
        };

        Ok(UpdateResponse {
            filtered_data,
            newfilters,
        })
    })
    .await?;

    Ok(Json(ApiResponse::new(response, req_id.0)))
}
