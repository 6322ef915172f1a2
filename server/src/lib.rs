use anyhow::Result;
use axum::{extract::{Query, State}, http::{HeaderMap, HeaderValue, StatusCode}, routing::{get, post}, Json, Router};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use suggest_core::rates::{CartRequest, CartResponse, RatesPage, RatesQuery};
use suggest_core::{parse_limit, Catalog, DatasetPaths};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Raw `q` and `limit` values. Read from the pair list rather than a typed struct so a
/// repeated key takes its first value instead of rejecting the request.
#[derive(Debug, Default)]
pub struct SuggestParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

impl SuggestParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub records: usize,
    pub field: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    /// Current snapshot. Readers clone the Arc and drop the lock before scanning.
    pub catalog: Arc<RwLock<Arc<Catalog>>>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.catalog.read().clone()
    }
}

pub fn build_app(data_path: impl Into<PathBuf>) -> Result<Router> {
    let data_path = data_path.into();
    // Load dataset at startup; a failure here keeps the server from starting
    let catalog = Catalog::from_path(&DatasetPaths::new(&data_path))?;
    let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
    Ok(build_app_with_catalog(catalog, data_path, admin_token))
}

/// Router over an already-built catalog. `data_path` is only read again by `/admin/reload`.
pub fn build_app_with_catalog(catalog: Catalog, data_path: impl Into<PathBuf>, admin_token: Option<String>) -> Router {
    let app_state = AppState {
        data_path: data_path.into(),
        catalog: Arc::new(RwLock::new(Arc::new(catalog))),
        admin_token,
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/suggest", get(suggest_handler))
        .route("/api/rates", get(rates_handler))
        .route("/api/cart", post(cart_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

// CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn suggest_handler(State(state): State<AppState>, Query(pairs): Query<Vec<(String, String)>>) -> Json<Vec<String>> {
    let params = SuggestParams::from_pairs(pairs);
    let q = params.q.unwrap_or_default();
    let limit = parse_limit(params.limit.as_deref());
    let catalog = state.snapshot();
    let results = catalog.suggest(&q, limit);
    tracing::debug!(q = %q, limit, hits = results.len(), "suggest");
    Json(results)
}

// --- Rates and cart live in an external service (stubs) ---
async fn rates_handler(Query(query): Query<RatesQuery>) -> Result<Json<RatesPage>, (StatusCode, String)> {
    tracing::debug!(?query, "rates requested");
    Err((StatusCode::NOT_IMPLEMENTED, "Rates listing is served externally".into()))
}

async fn cart_handler(Json(req): Json<CartRequest>) -> Result<Json<CartResponse>, (StatusCode, String)> {
    tracing::debug!(rate_id = req.rate_id, "cart add requested");
    Err((StatusCode::NOT_IMPLEMENTED, "Cart is served externally".into()))
}

// --- Admin ---
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let paths = DatasetPaths::new(&state.data_path);
    // Build the new snapshot outside the lock; the swap itself is a pointer replace
    let fresh = tokio::task::spawn_blocking(move || Catalog::from_path(&paths))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            tracing::warn!(error = %format!("{e:#}"), "reload failed, keeping current dataset");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("reload failed: {e:#}"))
        })?;
    let resp = ReloadResponse { records: fresh.len(), field: fresh.field().map(str::to_string) };
    *state.catalog.write() = Arc::new(fresh);
    tracing::info!(records = resp.records, field = ?resp.field, "dataset reloaded");
    Ok(Json(resp))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
