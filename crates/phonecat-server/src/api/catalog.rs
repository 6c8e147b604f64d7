//! Shop-scrape dataset handlers: consolidated products and their facets.

use axum::{extract::State, Extension, Json};
use phonecat_core::{FacetValues, FilterSelection, Product};
use phonecat_engine::{aggregate, extract_facets_full, filter_listings};
use phonecat_ingest::read_shop_listings;

use crate::middleware::RequestId;

use super::{run_blocking, ApiError, ApiResponse, AppState};

/// First 180 consolidated products of the whole dataset.
pub(super) async fn read_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let products = run_blocking(&req_id.0, move || {
        let rows = read_shop_listings(&state.shop_data_dir)?;
        Ok(aggregate(&rows).into_items())
    })
    .await?;

    Ok(Json(ApiResponse::new(products, req_id.0)))
}

/// Full-table facet values over every listing.
pub(super) async fn filter_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<FacetValues>>, ApiError> {
    let facets = run_blocking(&req_id.0, move || {
        let rows = read_shop_listings(&state.shop_data_dir)?;
        Ok(extract_facets_full(&rows))
    })
    .await?;

    Ok(Json(ApiResponse::new(facets, req_id.0)))
}

/// Filters listings by `selection`, then consolidates the survivors.
pub(super) async fn filter_update(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(selection): Json<FilterSelection>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let products = run_blocking(&req_id.0, move || {
        let rows = read_shop_listings(&state.shop_data_dir)?;
        let matching = filter_listings(&rows, &selection);
        tracing::debug!(rows = rows.len(), matching = matching.len(), "filtered shop listings");
        Ok(aggregate(&matching).into_items())
    })
    .await?;

    Ok(Json(ApiResponse::new(products, req_id.0)))
}
