use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use handlebars::Handlebars;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::chart::ChartSpec;
use crate::config::DashboardConfig;
use crate::controller::{compute_year_disabled, output_for};
use crate::dataset::Dataset;
use crate::error::DashboardError;
use crate::graph::{GraphOptions, create_graph};
use crate::layout::{DashboardOutput, ROW_STYLE};
use crate::selection::{ReportType, Selection, Year};

const DASHBOARD_TEMPLATE: &str = "dashboard";
const OUTPUT_TEMPLATE: &str = "output";

/// Shared, read-only state of the server
pub struct AppState {
    dataset: Dataset,
    templates: Handlebars<'static>,
    graph: GraphOptions,
    title: String,
}

impl AppState {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Result<Self, DashboardError> {
        let mut templates = Handlebars::new();
        templates.register_template_string(
            DASHBOARD_TEMPLATE,
            include_str!("./static/dashboard.html"),
        )?;
        templates.register_template_string(OUTPUT_TEMPLATE, include_str!("./static/output.html"))?;

        Ok(Self {
            dataset,
            templates,
            graph: config.figure.into(),
            title: config.title.clone(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Raw dropdown values as sent by the page
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub report_type: Option<String>,
    pub year: Option<String>,
}

impl SelectionQuery {
    pub fn selection(&self) -> Selection {
        Selection::from_raw(self.report_type.as_deref(), self.year.as_deref())
    }
}

#[derive(Serialize)]
struct YearInputState {
    disabled: bool,
}

#[derive(Serialize)]
struct FigureView<'a> {
    title: &'a str,
    kind: &'a str,
    empty: bool,
    svg: Option<String>,
}

#[derive(Serialize)]
struct RowView<'a> {
    style: &'static str,
    charts: Vec<FigureView<'a>>,
}

/// Loads the dataset, then serves the dashboard until the process ends
///
/// # Errors
/// * A dataset that cannot be fetched or parsed aborts startup
/// * The listener address cannot be bound
pub async fn run(config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = config.source.clone();
    info!("Fetching dataset from {}", source);
    let dataset = tokio::task::spawn_blocking(move || Dataset::load(&source)).await??;

    let state = Arc::new(AppState::new(dataset, &config)?);
    let app = router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes of the dashboard
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/year-disabled", get(year_disabled))
        .route("/api/output", get(output_fragment))
        .route("/api/charts", get(chart_specs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

async fn serve_dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, DashboardError> {
    let report_types: Vec<&str> = ReportType::ALL.iter().map(|r| r.label()).collect();
    let years: Vec<i32> = Year::all().map(Year::get).collect();

    let page = state.templates.render(
        DASHBOARD_TEMPLATE,
        &serde_json::json!({
            "title": state.title,
            "report_types": report_types,
            "years": years,
            "figure_width": state.graph.width,
            "figure_height": state.graph.height,
        }),
    )?;
    Ok(Html(page))
}

async fn year_disabled(Query(query): Query<SelectionQuery>) -> Json<YearInputState> {
    let selection = query.selection();
    Json(YearInputState {
        disabled: compute_year_disabled(selection.report_type),
    })
}

async fn chart_specs(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<DashboardOutput> {
    Json(output_for(&state.dataset, &query.selection()))
}

async fn output_fragment(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, DashboardError> {
    let output = output_for(&state.dataset, &query.selection());
    if output.is_empty() {
        return Ok(Html(String::new()));
    }

    let rows: Vec<RowView<'_>> = output
        .rows
        .iter()
        .map(|row| RowView {
            style: ROW_STYLE,
            charts: row
                .charts
                .iter()
                .map(|chart| figure_view(chart, &state.graph))
                .collect(),
        })
        .collect();

    let fragment = state
        .templates
        .render(OUTPUT_TEMPLATE, &serde_json::json!({ "rows": rows }))?;
    Ok(Html(fragment))
}

/// Draws one chart, falling back to a titled placeholder if plotters fails
fn figure_view<'a>(chart: &'a ChartSpec, options: &GraphOptions) -> FigureView<'a> {
    let svg = match create_graph(chart, options) {
        Ok(svg) => Some(svg),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    FigureView {
        title: &chart.title,
        kind: chart.kind.name(),
        empty: chart.is_empty(),
        svg,
    }
}
