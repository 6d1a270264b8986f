use crate::catalog;
use crate::chart;
use crate::dispatch;
use crate::error::ApiError;
use crate::provider::DataProvider;
use crate::table::Table;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

pub type SharedProvider = Arc<dyn DataProvider>;

pub fn router(provider: SharedProvider) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/visualize", post(visualize))
        .route("/get_columns", get(get_columns))
        .with_state(provider)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

#[derive(Serialize, Debug)]
struct SearchResponse {
    data: String,
    columns: Vec<String>,
}

// The whole form lands in one bag: the named operation decides which of the
// remaining fields mean anything.
async fn search(
    State(provider): State<SharedProvider>,
    Form(mut form): Form<BTreeMap<String, String>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let name = required(&mut form, "function_name")?;
    let table = dispatch::run(provider.as_ref(), &name, form).await?;
    let columns = table.columns().to_vec();
    let data = table.to_transport()?;
    Ok(Json(SearchResponse { data, columns }))
}

#[derive(Serialize, Debug)]
struct VisualizeResponse {
    graph_json: String,
}

async fn visualize(
    Form(mut form): Form<BTreeMap<String, String>>,
) -> Result<Json<VisualizeResponse>, ApiError> {
    let payload = required(&mut form, "data_json_str")?;
    let viz_type = required(&mut form, "viz_type")?;
    let x_axis = required(&mut form, "x_axis")?;
    let y_axis = required(&mut form, "y_axis")?;
    let color_by = form.remove("color_by").unwrap_or_default();

    let table = Table::from_transport(&payload)?;
    let graph_json = chart::build(&table, &viz_type, &x_axis, &y_axis, color_by.trim())?;
    Ok(Json(VisualizeResponse { graph_json }))
}

#[derive(Deserialize, Debug)]
struct ColumnsQuery {
    data_type: Option<String>,
}

#[derive(Serialize, Debug)]
struct ColumnsResponse {
    columns: Vec<String>,
}

// Best effort: the page can live without column suggestions, so every
// failure degrades to an empty list rather than an error status.
async fn get_columns(
    State(provider): State<SharedProvider>,
    Query(query): Query<ColumnsQuery>,
) -> Json<ColumnsResponse> {
    let name = query.data_type.unwrap_or_default();
    let columns = match catalog::find(&name) {
        None => {
            debug!("No column catalog for {name:?}");
            Vec::new()
        }
        Some(descriptor) => match provider.list_columns(descriptor.dataset).await {
            Ok(columns) => columns,
            Err(err) => {
                warn!("Column listing for {name} failed: {err}");
                Vec::new()
            }
        },
    };
    Json(ColumnsResponse { columns })
}

fn required(form: &mut BTreeMap<String, String>, field: &str) -> Result<String, ApiError> {
    match form.remove(field) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ApiError::MissingRequiredParameter {
            field: field.to_string(),
        }),
    }
}
