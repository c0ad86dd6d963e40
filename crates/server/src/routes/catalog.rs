//! Catalog page handlers: home summary, filtered listing and compound detail.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::catalog::query;
use crate::catalog::{Drugs, TOP_N, build_listing_query, renderable_columns, top_n};
use crate::error::AppResult;
use crate::models::{ClassCount, Compound, Synonym, from_row, from_rows};
use crate::state::AppState;
use crate::store::Row;

use super::helpers::{first_param, page_context, parse_cid, render_page};

/// Create the catalog page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/drugs", get(listing))
        .route("/drug/{cid}", get(detail))
}

/// Listing query parameters.
#[derive(Debug, Default)]
pub struct ListingParams {
    /// Exact drug class to filter on.
    pub class: Option<String>,
    /// Free-text search term.
    pub q: Option<String>,
}

impl ListingParams {
    /// Read from raw query pairs; a repeated parameter keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            class: first_param(pairs, "class"),
            q: first_param(pairs, "q"),
        }
    }
}

fn display_rows(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().map(renderable_columns).collect()
}

/// Home page: class counts, top-10 lists and the descriptor table.
async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let gateway = state.gateway();

    let classes: Vec<ClassCount> =
        from_rows(gateway.execute(&query::class_counts()).await?).map_err(anyhow::Error::from)?;
    let top_literature =
        display_rows(gateway.execute(&query::top_by(Drugs::LiteratureCount, TOP_N as u64)).await?);
    let top_patents =
        display_rows(gateway.execute(&query::top_by(Drugs::PatentCount, TOP_N as u64)).await?);
    let descriptors = display_rows(gateway.execute(&query::descriptor_table()).await?);

    let mut context = page_context("");
    context.insert("classes", &classes);
    context.insert("top_literature", &top_literature);
    context.insert("top_patents", &top_patents);
    context.insert("lipinski_data", &descriptors);

    render_page(&state, "index.html", &context)
}

/// Filtered listing with derived top-10 views.
///
/// `/drugs?class=Benzodiazepine`, `/drugs?q=gaba`
async fn listing(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let params = ListingParams::from_pairs(&pairs);
    let search_query = params.q.as_deref().unwrap_or_default().trim();
    let selected_class = params.class.as_deref().filter(|c| !c.trim().is_empty());

    let statement = build_listing_query(selected_class, Some(search_query));
    let rows = state.gateway().execute(&statement).await?;

    let top_literature = display_rows(top_n(&rows, &Drugs::LiteratureCount.name(), TOP_N));
    let top_patents = display_rows(top_n(&rows, &Drugs::PatentCount.name(), TOP_N));
    let drugs = display_rows(rows);

    tracing::debug!(
        class = ?selected_class,
        q = %search_query,
        rows = drugs.len(),
        "listing fetched"
    );

    let mut context = page_context(search_query);
    context.insert("drugs", &drugs);
    context.insert("result_count", &drugs.len());
    context.insert("selected_class", &selected_class);
    context.insert("top_literature", &top_literature);
    context.insert("top_patents", &top_patents);

    render_page(&state, "drugs.html", &context)
}

/// Single compound with its synonyms, or the not-found page.
async fn detail(State(state): State<AppState>, Path(raw_cid): Path<String>) -> AppResult<Response> {
    let Some(cid) = parse_cid(&raw_cid) else {
        return not_found_page(&state);
    };

    let Some(row) = state.gateway().execute_one(&query::compound_by_cid(cid)).await? else {
        return not_found_page(&state);
    };
    let compound: Compound = from_row(row).map_err(anyhow::Error::from)?;

    let synonyms: Vec<Synonym> = match compound.synonym_key() {
        Some(key) => from_rows(state.gateway().execute(&query::synonyms_for(key)).await?)
            .map_err(anyhow::Error::from)?,
        None => Vec::new(),
    };

    let mut context = page_context("");
    context.insert("drug", &Some(&compound));
    context.insert("synonyms", &synonyms);

    Ok(render_page(&state, "drug_detail.html", &context)?.into_response())
}

fn not_found_page(state: &AppState) -> AppResult<Response> {
    let mut context = page_context("");
    context.insert("drug", &Option::<Compound>::None);
    context.insert("synonyms", &Vec::<Synonym>::new());

    let html = render_page(state, "drug_detail.html", &context)?;
    Ok((StatusCode::NOT_FOUND, html).into_response())
}
