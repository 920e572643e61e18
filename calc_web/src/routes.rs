//! HTTP routes.
//!
//! ```text
//! GET  /health
//! GET  /api/pages              site map as JSON (optional ?kind=)
//! GET  /api/pages/{*path}      one page by path
//! GET  /sitemap.xml
//! GET  /api/units/{quantity}   unit table for a converter page
//! POST /api/convert            one-shot conversion
//! POST /api/convert/sync       one edit on a two-field converter
//! POST /api/px-em              one edit on the pixel/em converter
//! POST /api/calculate          any calculator (tagged by "calculator")
//! POST /api/algebra/solve      model-backed algebra solver
//! ```

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use calc_core::algebra::{AlgebraInput, AlgebraOutput, AlgebraSolver};
use calc_core::calculations::conversion::{self, ConversionInput, ConversionOutput};
use calc_core::pixel_em::{PxEmEdit, PxEmState};
use calc_core::sync::{ConversionPair, PairEdit};
use calc_core::{evaluate, sitemap, CalcError, CalculatorOutput, CalculatorRequest, Quantity, SiteConfig, UnitTable};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::{ApiError, ApiJson};

/// Shared, read-only server state
pub struct AppState {
    pub config: SiteConfig,
    pub solver: AlgebraSolver,
}

type SharedState = Arc<AppState>;
type ApiResult<T> = Result<T, ApiError>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pages", get(list_pages))
        .route("/api/pages/{*path}", get(get_page))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/api/units/{quantity}", get(list_units))
        .route("/api/convert", post(convert))
        .route("/api/convert/sync", post(convert_sync))
        .route("/api/px-em", post(px_em))
        .route("/api/calculate", post(calculate))
        .route("/api/algebra/solve", post(solve_algebra))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    pub kind: Option<sitemap::PageKind>,
}

async fn list_pages(Query(query): Query<PagesQuery>) -> Json<Vec<&'static sitemap::Page>> {
    match query.kind {
        Some(kind) => Json(sitemap::pages_of(kind).collect()),
        None => Json(sitemap::pages().iter().collect()),
    }
}

async fn get_page(Path(path): Path<String>) -> ApiResult<Json<&'static sitemap::Page>> {
    let path = format!("/{}", path);
    sitemap::find(&path)
        .map(Json)
        .ok_or_else(|| ApiError::from(CalcError::not_found(format!("page '{}'", path))))
}

async fn sitemap_xml(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        sitemap::sitemap_xml(&state.config.site.base_url),
    )
}

async fn list_units(Path(quantity): Path<String>) -> ApiResult<Json<&'static UnitTable>> {
    let quantity: Quantity = quantity.parse()?;
    Ok(Json(quantity.table()))
}

async fn convert(ApiJson(input): ApiJson<ConversionInput>) -> ApiResult<Json<ConversionOutput>> {
    Ok(Json(conversion::calculate(&input)?))
}

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub quantity: Quantity,
    pub pair: ConversionPair,
    pub edit: PairEdit,
}

async fn convert_sync(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<SyncRequest>,
) -> ApiResult<Json<ConversionPair>> {
    let table = req.quantity.table();
    let next = req.pair.apply(&req.edit, table, state.config.display.decimals)?;
    debug!(quantity = %req.quantity, edit = ?req.edit, "converter pair updated");
    Ok(Json(next))
}

#[derive(Debug, Deserialize)]
pub struct PxEmRequest {
    #[serde(default)]
    pub state: Option<PxEmState>,
    pub edit: PxEmEdit,
}

async fn px_em(State(state): State<SharedState>, ApiJson(req): ApiJson<PxEmRequest>) -> Json<PxEmState> {
    let current = req.state.unwrap_or_else(|| {
        let base = state.config.display.default_base_size;
        PxEmState { pixels: base, ems: 1.0, base_size: base }
    });
    Json(current.apply(&req.edit, state.config.display.px_em_decimals))
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub result: CalculatorOutput,
    pub summary: String,
}

async fn calculate(ApiJson(request): ApiJson<CalculatorRequest>) -> ApiResult<Json<CalculateResponse>> {
    debug!(calculator = request.calc_type(), "calculate");
    let result = evaluate(&request)?;
    let summary = result.summary();
    Ok(Json(CalculateResponse { result, summary }))
}

async fn solve_algebra(
    State(state): State<SharedState>,
    ApiJson(input): ApiJson<AlgebraInput>,
) -> ApiResult<Json<AlgebraOutput>> {
    Ok(Json(state.solver.solve(&input).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use calc_core::algebra::ModelBackend;
    use calc_core::CalcResult;
    use serde_json::Value;
    use tower::ServiceExt;

    struct FixedBackend(Result<&'static str, &'static str>);

    #[async_trait]
    impl ModelBackend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _prompt: &str) -> CalcResult<String> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(reason) => Err(CalcError::upstream("fixed", reason)),
            }
        }
    }

    fn app(backend: FixedBackend) -> Router {
        router(Arc::new(AppState {
            config: SiteConfig::default(),
            solver: AlgebraSolver::new(Arc::new(backend)),
        }))
    }

    fn test_app() -> Router {
        app(FixedBackend(Ok("Answer: x = 4")))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_pages_and_sitemap() {
        let (status, body) = send(test_app(), "GET", "/api/pages", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), sitemap::pages().len());

        let response = test_app()
            .oneshot(Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
    }

    #[tokio::test]
    async fn test_pages_by_kind_and_path() {
        let (status, body) = send(test_app(), "GET", "/api/pages?kind=legal", None).await;
        assert_eq!(status, StatusCode::OK);
        let legal = body.as_array().unwrap();
        assert_eq!(legal.len(), 4);
        assert!(legal.iter().all(|p| p["kind"] == "legal"));

        let (status, body) = send(test_app(), "GET", "/api/pages/bmi-calculator", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["calculator"], "bmi");

        let (status, body) = send(test_app(), "GET", "/api/pages/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_units() {
        let (status, body) = send(test_app(), "GET", "/api/units/speed", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quantity"], "speed");

        let (status, body) = send(test_app(), "GET", "/api/units/volume", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_convert() {
        let req = json!({ "quantity": "mass", "value": 2.0, "from_unit": "kg", "to_unit": "g" });
        let (status, body) = send(test_app(), "POST", "/api/convert", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display_value"], 2000.0);

        let req = json!({ "quantity": "mass", "value": 2.0, "from_unit": "kg", "to_unit": "cubit" });
        let (status, body) = send(test_app(), "POST", "/api/convert", Some(req)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "UNKNOWN_UNIT");
    }

    #[tokio::test]
    async fn test_convert_sync() {
        let req = json!({
            "quantity": "speed",
            "pair": { "from_unit": "kmh", "to_unit": "mps", "source": 0.0, "target": 0.0 },
            "edit": { "field": "source", "value": "36" }
        });
        let (status, body) = send(test_app(), "POST", "/api/convert/sync", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["target"], 10.0);
        assert_eq!(body["last_edited"], "source");
    }

    #[tokio::test]
    async fn test_px_em_default_state() {
        let req = json!({ "edit": { "field": "pixels", "value": "24" } });
        let (status, body) = send(test_app(), "POST", "/api/px-em", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ems"], 1.5);
        assert_eq!(body["base_size"], 16.0);
    }

    #[tokio::test]
    async fn test_calculate() {
        let req = json!({ "calculator": "fuel_cost", "distance": 400, "efficiency": 15, "fuel_price": 100 });
        let (status, body) = send(test_app(), "POST", "/api/calculate", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["calculator"], "fuel_cost");
        assert_eq!(body["summary"], "Fuel needed: 26.67, total cost: 2666.67");
    }

    #[tokio::test]
    async fn test_calculate_validation_error() {
        let req = json!({ "calculator": "modulo", "dividend": 10, "divisor": 0 });
        let (status, body) = send(test_app(), "POST", "/api/calculate", Some(req)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["details"]["field"], "divisor");
    }

    #[tokio::test]
    async fn test_mistyped_body_field_is_json_error() {
        let req = json!({ "calculator": "modulo", "dividend": "abc", "divisor": 2 });
        let (status, body) = send(test_app(), "POST", "/api/calculate", Some(req)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["details"]["field"], "body");
        assert!(body["message"].as_str().unwrap().contains("invalid type"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/convert")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"quantity\": "))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "SERIALIZATION_ERROR");
    }

    #[tokio::test]
    async fn test_algebra() {
        let req = json!({ "problem": "2x + 3 = 11" });
        let (status, body) = send(test_app(), "POST", "/api/algebra/solve", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["solution"], "Answer: x = 4");
    }

    #[tokio::test]
    async fn test_algebra_upstream_failure() {
        let req = json!({ "problem": "2x + 3 = 11" });
        let app = app(FixedBackend(Err("503 Service Unavailable")));
        let (status, body) = send(app, "POST", "/api/algebra/solve", Some(req)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "UPSTREAM_FAILURE");
    }
}
