//! JSON API over the product store.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, CatalogPage, SortOption};
use crate::error::{Result, ServerError};
use crate::export::{serialize_structured, OutputFormat};
use crate::product::Product;
use crate::state::AppState;
use crate::store::{ResourceQuery, ResourceStore};

/// Query string shared by listing and export.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Free-text search over name, category and brand.
    pub q: Option<String>,
    /// One of the dashboard sort values (`name-asc`, `price-desc`, ...).
    pub sort: Option<String>,
    /// Filter expression, e.g. `brand=Nike, price<100`.
    pub filter: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Export only: json, yaml or csv.
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<Product>,
    /// Matches before `offset` and `limit` are applied.
    pub total: usize,
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn parse_sort(raw: Option<&str>) -> Result<Option<SortOption>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => SortOption::parse(value)
            .map(Some)
            .ok_or_else(|| ServerError::bad_request(format!("unknown sort option '{value}'"))),
    }
}

/// Runs filter, search and sort for `params`.
fn browse(state: &AppState, params: &ListParams) -> Result<CatalogPage> {
    let sort = parse_sort(params.sort.as_deref())?;
    let query = params
        .filter
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .map(|f| ResourceQuery::new().filter(f));
    let items = state.store.list(query.as_ref())?;
    Ok(catalog::browse(
        &items,
        params.q.as_deref().unwrap_or_default(),
        sort,
    ))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let page = browse(&state, &params)?;
    let total = page.items.len();
    let offset = params.offset.unwrap_or(0);
    let items: Vec<Product> = page
        .items
        .into_iter()
        .skip(offset)
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();

    Ok(Json(ListResponse {
        items,
        total,
        offset,
        limit: params.limit,
    }))
}

pub async fn get(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = state.store.parse_id(&id)?;
    Ok(Json(state.store.resolve(&id)?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.store.create(body)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Product>> {
    let id = state.store.parse_id(&id)?;
    Ok(Json(state.store.update(&id, body)?))
}

pub async fn delete(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = state.store.parse_id(&id)?;
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Downloads the (searched, sorted) catalog as JSON, YAML or CSV.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let format: OutputFormat = params.format.as_deref().unwrap_or("json").parse()?;
    let page = browse(&state, &params)?;
    let body = serialize_structured(&page.items, format)?;

    tracing::info!(format = %format, count = page.items.len(), "catalog exported");
    let disposition = format!("attachment; filename=\"products.{}\"", format.extension());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
