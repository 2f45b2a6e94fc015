use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::deps::CrateInfo;
use crate::error::ApiError;
use crate::state::AppState;
use devlens_index::{format_cell, TableBrowser};
use devlens_trace::ExceptionAnalyzer;
use devlens_types::{ExceptionReport, GroupedTrace, RowPage, SourceExtract, TableDescriptor};

/// The dashboard router. One route per dashboard section; every error body
/// is structured JSON produced by [`ApiError`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/source", get(source))
        .route("/tables", get(list_tables))
        .route("/tables/:table", get(show_table))
        .route("/exceptions", post(analyze_exception))
        .route("/crates", get(list_crates))
        .route("/crates/:name", get(show_crate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "devlens",
        "version": env!("CARGO_PKG_VERSION"),
        "sections": {
            "source": "/source?file=<path>&line=<n>",
            "tables": "/tables",
            "exceptions": "POST /exceptions",
            "crates": "/crates",
        },
        "project_root": state.gateway.project_root(),
    }))
}

#[derive(Debug, Deserialize)]
struct SourceQuery {
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    line: Option<i64>,
}

/// `GET /source?file=&line=` maps the gateway's policy failures onto
/// statuses: 400 malformed, 404 missing/empty, 403 outside the allow-list,
/// 500 on read failure.
async fn source(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<SourceExtract>, ApiError> {
    // Absent parameters funnel into the gateway's own invalid-input rule
    // so the policy order stays in one place.
    let file = query.file.unwrap_or_default();
    let line = query.line.unwrap_or(0);

    let extract = state.gateway.extract(&file, line)?;
    Ok(Json(extract))
}

#[derive(Debug, Serialize)]
struct TableListing {
    tables: Vec<TableDescriptor>,
}

async fn list_tables(State(state): State<AppState>) -> Result<Json<TableListing>, ApiError> {
    let db = require_db(&state)?;
    let db = db.lock().expect("db lock poisoned");

    let mut tables = Vec::new();
    for name in state.catalog.table_names(&db)? {
        if let Some(desc) = state.catalog.descriptor(&db, &name)? {
            tables.push(desc);
        }
    }

    Ok(Json(TableListing { tables }))
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: Option<i64>,
    #[serde(default)]
    per_page: Option<i64>,
}

/// Raw page plus display-formatted cells, so consumers get both the values
/// (nulls as JSON null) and the grid rendering (nulls as the marker).
#[derive(Debug, Serialize)]
struct TablePage {
    #[serde(flatten)]
    page: RowPage,
    formatted: Vec<Vec<String>>,
}

async fn show_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TablePage>, ApiError> {
    let db = require_db(&state)?;
    let db = db.lock().expect("db lock poisoned");

    let browser = TableBrowser::new(&db, &state.catalog);
    let page = browser.fetch_page(&table, query.page.unwrap_or(1), query.per_page.unwrap_or(0))?;

    let formatted = page
        .rows
        .iter()
        .map(|row| row.iter().map(format_cell).collect())
        .collect();

    Ok(Json(TablePage { page, formatted }))
}

#[derive(Debug, Serialize)]
struct ExceptionAnalysis {
    class_name: String,
    message: String,
    trace: GroupedTrace,
    /// Extract for the first application frame, when one can be shown.
    source: Option<SourceExtract>,
}

/// `POST /exceptions` returns the full analysis of one caught exception in
/// a single response. Always 200 for a well-formed report; "no source
/// available" is a normal state, not an error.
async fn analyze_exception(
    State(state): State<AppState>,
    Json(report): Json<ExceptionReport>,
) -> Json<ExceptionAnalysis> {
    let analyzer = ExceptionAnalyzer::new(report, (*state.categorizer).clone());
    let source = analyzer.default_extract(&state.gateway);

    Json(ExceptionAnalysis {
        class_name: analyzer.class_name().to_string(),
        message: analyzer.message().to_string(),
        trace: analyzer.grouped_trace().clone(),
        source,
    })
}

#[derive(Debug, Serialize)]
struct CrateListing {
    total: usize,
    crates: Vec<CrateInfo>,
}

async fn list_crates(State(state): State<AppState>) -> Json<CrateListing> {
    Json(CrateListing {
        total: state.manifest.len(),
        crates: state.manifest.packages().to_vec(),
    })
}

async fn show_crate(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CrateInfo>, ApiError> {
    state
        .manifest
        .find(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Crate not found: {}", name)))
}

fn require_db(state: &AppState) -> Result<&std::sync::Arc<std::sync::Mutex<devlens_index::Database>>, ApiError> {
    state
        .db
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("No database configured".to_string()))
}
