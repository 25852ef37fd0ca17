use axum::{
    extract::Query,
    http::StatusCode,
    response::{ IntoResponse, Response },
    routing::get,
    Json, Router,
};
use serde::{ Deserialize, Serialize };
use std::net::SocketAddr;
use tracing::{ info, warn };
use tracing_subscriber::{ fmt, prelude::*, EnvFilter };
use orbitals::{
    generate, radial_profile, Hybrid, HybridKind, Orbital, OrbitalError, PipelineConfig, Point,
    ProfileConfig, ProfilePoint, QuantumNumbers, Strategy, DEFAULT_THRESHOLD,
};

#[derive(Deserialize)]
struct SampleQuery {
    n: Option<u32>,
    l: Option<u32>,
    m: Option<i32>,
    strategy: Option<String>,
    step: Option<f64>,
    max: Option<f64>,
    threshold: Option<f64>,
}

#[derive(Deserialize)]
struct HybridQuery {
    kind: Option<String>,
    index: Option<usize>,
    strategy: Option<String>,
    step: Option<f64>,
    max: Option<f64>,
    threshold: Option<f64>,
}

#[derive(Deserialize)]
struct RadialQuery {
    n: Option<u32>,
    l: Option<u32>,
    m: Option<i32>,
    max: Option<f64>,
    step: Option<f64>,
}

#[derive(Serialize)]
struct SampleResponse {
    label: String,
    n: Option<u32>,
    l: Option<u32>,
    m: Option<i32>,
    strategy: &'static str,
    threshold: f64,
    count: usize,
    points: Vec<Point>,
}

#[derive(Serialize)]
struct RadialResponse {
    label: String,
    n: u32,
    l: u32,
    m: i32,
    profile: Vec<ProfilePoint>,
}

#[derive(Serialize)]
struct OrbitalInfo {
    label: String,
    n: u32,
    l: u32,
    m: i32,
}

struct ApiError(StatusCode, String);

impl From<OrbitalError> for ApiError {
    fn from(err: OrbitalError) -> Self {
        let status = if err.is_request_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        ApiError(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.0, "{}", self.1);
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

fn pipeline_config(
    strategy: Option<&str>,
    step: Option<f64>,
    max: Option<f64>,
    threshold: Option<f64>,
) -> PipelineConfig {
    PipelineConfig {
        strategy: Strategy::from_query(strategy).with_bounds(step, max),
        threshold: threshold.unwrap_or(DEFAULT_THRESHOLD),
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, OrbitalError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(ApiError::from)
}

async fn orbitals() -> impl IntoResponse {
    let table: Vec<OrbitalInfo> = QuantumNumbers::supported()
        .into_iter()
        .map(|qn| OrbitalInfo { label: qn.label(), n: qn.n(), l: qn.l(), m: qn.m_l() })
        .collect();
    Json(table)
}

async fn samples(Query(q): Query<SampleQuery>) -> Result<Json<SampleResponse>, ApiError> {
    let qn = QuantumNumbers::new(q.n.unwrap_or(2), q.l.unwrap_or(1), q.m.unwrap_or(0))?;
    let orbital = Orbital::resolve(qn)?;
    let config = pipeline_config(q.strategy.as_deref(), q.step, q.max, q.threshold);
    let points = run_blocking(move || generate(&orbital, &config)).await?;
    info!(orbital = %qn, points = points.len(), "served samples");
    Ok(Json(SampleResponse {
        label: qn.label(),
        n: Some(qn.n()),
        l: Some(qn.l()),
        m: Some(qn.m_l()),
        strategy: config.strategy.name(),
        threshold: config.threshold,
        count: points.len(),
        points,
    }))
}

async fn hybrid(Query(q): Query<HybridQuery>) -> Result<Json<SampleResponse>, ApiError> {
    let kind = HybridKind::from_query(q.kind.as_deref())?;
    let hybrid: Hybrid = kind.orbital(q.index.unwrap_or(0))?;
    let label = format!("{}_{}", kind, hybrid.index);
    let config = pipeline_config(q.strategy.as_deref(), q.step, q.max, q.threshold);
    let points = run_blocking(move || generate(&hybrid, &config)).await?;
    info!(hybrid = %label, points = points.len(), "served samples");
    Ok(Json(SampleResponse {
        label,
        n: None,
        l: None,
        m: None,
        strategy: config.strategy.name(),
        threshold: config.threshold,
        count: points.len(),
        points,
    }))
}

async fn radial(Query(q): Query<RadialQuery>) -> Result<Json<RadialResponse>, ApiError> {
    let qn = QuantumNumbers::new(q.n.unwrap_or(1), q.l.unwrap_or(0), q.m.unwrap_or(0))?;
    let orbital = Orbital::resolve(qn)?;
    let defaults = ProfileConfig::default();
    let config = ProfileConfig {
        max_radius: q.max.unwrap_or(defaults.max_radius),
        step: q.step.unwrap_or(defaults.step),
        ..defaults
    };
    let profile = run_blocking(move || radial_profile(&orbital, &config)).await?;
    Ok(Json(RadialResponse {
        label: qn.label(),
        n: qn.n(),
        l: qn.l(),
        m: qn.m_l(),
        profile,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let app = Router::new()
        .route("/orbitals", get(orbitals))
        .route("/samples", get(samples))
        .route("/hybrid", get(hybrid))
        .route("/radial", get(radial));
    let addr: SocketAddr = std::env::var("ORBITALS_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("Serving on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
