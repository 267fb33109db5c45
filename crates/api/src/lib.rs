//! Fuel Cost Estimation API Server
//!
//! REST API for trip fuel-cost estimation, saved cars and trip history.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod auth;
pub mod config;
pub mod error;
pub mod rate_limit;
pub mod recorder;
mod routes;
pub mod workflow;

#[cfg(test)]
mod test_support;

use config::{LoggingSettings, Settings};
use data_validator::Validator;
use identity::{StaticTokenVerifier, TokenVerifier};
use inference_engine::{ConsumptionEstimator, EstimatorStatus};
use recorder::TripHistoryRecorder;
use storage::{load_seed_file, SqliteRepository};
use workflow::FuelCostWorkflow;

/// Application state shared across handlers. Immutable after startup.
pub struct AppState {
    pub repository: Arc<SqliteRepository>,
    pub workflow: FuelCostWorkflow,
    pub verifier: Arc<dyn TokenVerifier>,
    pub validator: Validator,
    /// Prometheus render handle, when a recorder was installed
    pub metrics: Option<PrometheusHandle>,
    pub version: String,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire the workflow onto a repository and a loaded estimator
    pub fn new(
        repository: Arc<SqliteRepository>,
        estimator: Arc<ConsumptionEstimator>,
        verifier: Arc<dyn TokenVerifier>,
        validator: Validator,
    ) -> Self {
        let workflow = FuelCostWorkflow::new(
            repository.clone(),
            repository.clone(),
            TripHistoryRecorder::new(repository.clone()),
            estimator,
        );
        Self {
            repository,
            workflow,
            verifier,
            validator,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub database: ComponentHealth,
    pub estimator: EstimatorStatus,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home::root))
        .route("/api/v1/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/user", get(routes::home::current_user))
        .route("/home", get(routes::home::home))
        .route("/cars/search", get(routes::cars::search_cars))
        .route("/fuels", get(routes::cars::list_fuels))
        .route(
            "/users-car",
            get(routes::cars::list_user_cars).post(routes::cars::save_user_car),
        )
        .route("/calculate-cost", post(routes::trips::calculate_cost))
        .route("/history", get(routes::history::list_history))
        .route("/history/:id", get(routes::history::get_history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler. Degraded when the estimator is unavailable; the
/// other endpoints keep serving either way.
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let database = match state.repository.ping().await {
        Ok(()) => ComponentHealth {
            status: "ok".to_string(),
            error: None,
        },
        Err(e) => ComponentHealth {
            status: "error".to_string(),
            error: Some(e.to_string()),
        },
    };
    let estimator = state.workflow.estimator().status();

    let status = if database.error.is_some() {
        "unhealthy"
    } else if !estimator.available {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            database,
            estimator,
        },
    })
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging. `RUST_LOG` overrides the configured level.
pub fn init_logging(settings: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Build state from settings: open the database, apply the seed, load the
/// estimator.
pub async fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let repository = Arc::new(SqliteRepository::connect(&settings.database.url).await?);

    if let Some(path) = &settings.seed.path {
        let seed = load_seed_file(path)?;
        let (vehicles, fuels) = repository.seed(&seed).await?;
        info!("Seeded {} vehicles and {} fuel grades", vehicles, fuels);
    }

    let model = &settings.model;
    let estimator = if model.required {
        ConsumptionEstimator::load(&model.scaler_path, &model.model_path)?
    } else {
        ConsumptionEstimator::load_or_unavailable(&model.scaler_path, &model.model_path)
    };

    let verifier = StaticTokenVerifier::new(
        settings
            .auth
            .tokens
            .iter()
            .map(|t| (t.token.as_str(), t.user_id.clone())),
    );

    Ok(AppState::new(
        repository,
        Arc::new(estimator),
        Arc::new(verifier),
        Validator::new(settings.validation.clone()),
    ))
}

/// Run the server
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let mut state = build_state(&settings).await?;

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!("Prometheus recorder not installed: {}", e),
    }

    let mut app = create_router(Arc::new(state));
    if let Some(config) = rate_limit::create_governor_config(&settings.rate_limit) {
        app = app.layer(GovernorLayer { config });
    }

    info!("Starting API server on {}", settings.server.addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{linear_estimator, seeded_repository};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    async fn app_with(estimator: ConsumptionEstimator) -> Router {
        let repository = Arc::new(seeded_repository().await);
        let verifier = StaticTokenVerifier::new([(TOKEN, "user-1"), ("other-token", "user-2")]);
        let state = AppState::new(
            repository,
            Arc::new(estimator),
            Arc::new(verifier),
            Validator::default(),
        );
        create_router(Arc::new(state))
    }

    async fn app() -> Router {
        app_with(linear_estimator()).await
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    fn trip_body(car: Value) -> Value {
        let mut body = json!({
            "from": "Jakarta",
            "destination": "Bandung",
            "distance": 172.9,
            "tolls": false,
        });
        if let (Some(target), Some(extra)) = (body.as_object_mut(), car.as_object()) {
            target.extend(extra.clone());
        }
        body
    }

    fn new_car(car_id: i64, save: bool) -> Value {
        json!({ "newCar": { "carId": car_id, "fuelId": 1, "saveCar": save } })
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let app = app().await;

        let (status, body) = send(&app, get("/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Fuel cost API is running");

        let (status, body) = send(&app, get("/api/v1/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["components"]["database"]["status"], "ok");
        assert_eq!(body["components"]["estimator"]["available"], true);
    }

    #[tokio::test]
    async fn test_requires_bearer_token() {
        let app = app().await;

        let (status, body) = send(&app, get("/user", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");

        let (status, _) = send(&app, get("/user", Some("wrong"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, get("/user", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["userId"], "user-1");
    }

    #[tokio::test]
    async fn test_calculate_cost_then_history() {
        let app = app().await;

        let (status, body) = send(
            &app,
            post_json("/calculate-cost", TOKEN, trip_body(new_car(1, false))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cost calculated successfully");

        let data = &body["data"];
        let rate = data["consumptionRate"].as_f64().unwrap();
        let fuel_needed = data["fuelNeeded"].as_f64().unwrap();
        assert!(rate > 0.0);
        assert!(close(fuel_needed, 172.9 / rate));
        assert!(close(data["fuelCost"].as_f64().unwrap(), fuel_needed * 10_000.0));
        assert_eq!(data["totalCost"], data["fuelCost"]);
        assert_eq!(data["carName"], "Toyota Supra MK4");
        assert_eq!(data["fuelType"], "Pertalite");
        assert_eq!(data["cylinder"], "6 Cylinder");
        assert_eq!(data["power"], "320 hp");

        let id = data["id"].as_i64().unwrap();
        let (status, detail) = send(&app, get(&format!("/history/{}", id), Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["data"]["fuelNeeded"], data["fuelNeeded"]);
        assert_eq!(detail["data"]["from"], "Jakarta");

        let (status, list) = send(&app, get("/history", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["data"].as_array().unwrap().len(), 1);
        assert_eq!(list["data"][0]["cost"], data["totalCost"]);

        let (status, _) = send(&app, get(&format!("/history/{}", id), Some("other-token"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_vehicle_is_not_found_and_not_recorded() {
        let app = app().await;

        let (status, body) = send(
            &app,
            post_json("/calculate-cost", TOKEN, trip_body(new_car(99, false))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (_, list) = send(&app, get("/history", Some(TOKEN))).await;
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_model_only_affects_estimation() {
        let app = app_with(ConsumptionEstimator::unavailable("scaler missing")).await;

        for _ in 0..2 {
            let (status, body) = send(
                &app,
                post_json("/calculate-cost", TOKEN, trip_body(new_car(1, false))),
            )
            .await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body["error"], "model_unavailable");
        }

        let (status, body) = send(&app, get("/fuels", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["fuelType"], "Pertalite");

        let (status, body) = send(&app, get("/api/v1/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = app().await;

        let mut body = trip_body(new_car(1, false));
        body["distance"] = json!(0);
        let (status, response) = send(&app, post_json("/calculate-cost", TOKEN, body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "invalid_request");

        let mut body = trip_body(new_car(1, false));
        body["tollCost"] = json!(12_000);
        let (status, _) = send(&app, post_json("/calculate-cost", TOKEN, body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, post_json("/calculate-cost", TOKEN, trip_body(json!({})))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, get("/history?size=1000", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_saved_cars_and_home() {
        let app = app().await;

        let (status, body) = send(
            &app,
            post_json("/users-car", TOKEN, json!({ "carId": 1, "fuelId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["customName"], "Toyota Supra MK4");
        let car_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            post_json("/calculate-cost", TOKEN, trip_body(json!({ "userCarId": car_id }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            post_json("/calculate-cost", "other-token", trip_body(json!({ "userCarId": car_id }))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, cars) = send(&app, get("/users-car", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cars["data"].as_array().unwrap().len(), 1);

        let (status, home) = send(&app, get("/home", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(home["data"]["stats"]["tripCount"], 1);
        assert_eq!(home["data"]["stats"]["distanceTraveled"], 172.9);
        assert_eq!(home["data"]["cars"].as_array().unwrap().len(), 1);
        assert_eq!(home["data"]["history"][0]["carName"], "Toyota Supra MK4");
    }

    #[tokio::test]
    async fn test_search_cars() {
        let app = app().await;

        let (status, body) = send(&app, get("/cars/search?q=supra", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["carName"], "Toyota Supra MK4");

        let (status, body) = send(&app, get("/cars/search?q=civic&page=0&size=5", Some(TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }
}
