//! JSON API handlers.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::catalog::query::{self, DEFAULT_API_LIMIT, DEFAULT_API_OFFSET};
use crate::error::{ApiResult, AppError};
use crate::state::AppState;
use crate::store::Row;

use super::helpers::{first_param, parse_cid};

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/drugs", get(list_drugs))
        .route("/api/drug/{cid}", get(get_drug))
}

/// List parameters. Kept as raw strings so malformed numbers fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ApiListParams {
    pub class: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ApiListParams {
    /// Read from raw query pairs; a repeated parameter keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            class: first_param(pairs, "class"),
            limit: first_param(pairs, "limit"),
            offset: first_param(pairs, "offset"),
        }
    }

    /// Requested page size, or the default when absent or not an integer.
    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_API_LIMIT)
    }

    /// Requested offset, or the default when absent or not an integer.
    pub fn offset(&self) -> i64 {
        parse_or(self.offset.as_deref(), DEFAULT_API_OFFSET)
    }
}

/// Parse a count, falling back to `default` when it is not an integer.
/// A run of digits too large for `i64` saturates instead of falling back.
fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    let Some(text) = raw.map(str::trim) else {
        return default;
    };
    match text.parse() {
        Ok(value) => value,
        Err(_) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => i64::MAX,
        Err(_) => default,
    }
}

/// `/api/drugs` response body.
#[derive(Debug, Serialize)]
pub struct DrugListResponse {
    pub count: usize,
    pub results: Vec<Row>,
}

async fn list_drugs(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<DrugListResponse>> {
    let params = ApiListParams::from_pairs(&pairs);
    let statement = query::build_api_query(params.class.as_deref(), params.limit(), params.offset());
    let results = state.gateway().execute(&statement).await?;

    Ok(Json(DrugListResponse {
        count: results.len(),
        results,
    }))
}

async fn get_drug(
    State(state): State<AppState>,
    Path(raw_cid): Path<String>,
) -> ApiResult<Json<Row>> {
    let cid = parse_cid(&raw_cid).ok_or(AppError::NotFound)?;
    let row = state
        .gateway()
        .execute_one(&query::raw_compound_by_cid(cid))
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(row))
}
