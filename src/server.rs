use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_ASSET_MAX_AGE_SECONDS: u64 = 3_600;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const PORT_BOUNDS: (u64, u64) = (1, 65_535);
const ASSET_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Variant order is severity order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            _ => None,
        }
    }

    fn for_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Warn
        } else if status.is_client_error() {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

#[derive(Clone, Debug)]
struct ServerConfig {
    port: u16,
    dist_dir: PathBuf,
    asset_max_age_seconds: u64,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = parse_u64_with_bounds(env_value("PORT"), u64::from(DEFAULT_PORT), PORT_BOUNDS);
        let asset_max_age_seconds = parse_u64_with_bounds(
            env_value("ASSET_MAX_AGE_SECONDS"),
            DEFAULT_ASSET_MAX_AGE_SECONDS,
            ASSET_MAX_AGE_SECONDS_BOUNDS,
        );
        let dist_dir = parse_non_empty_string(env_value("DIST_DIR"))
            .unwrap_or_else(|| DEFAULT_DIST_DIR.to_string());

        Self {
            port: u16::try_from(port).unwrap_or(DEFAULT_PORT),
            dist_dir: PathBuf::from(dist_dir),
            asset_max_age_seconds,
            log_level: parse_log_level(env_value("LOG_LEVEL"), DEFAULT_LOG_LEVEL),
        }
    }

    fn index_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<ServerConfig>,
}

#[derive(Serialize)]
struct LogLine<'a> {
    ts: u64,
    level: LogLevel,
    event: &'a str,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthPayload {
    ok: bool,
    version: &'static str,
    dist_dir: String,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);

    if !config.index_path().is_file() {
        log_event(
            &config,
            LogLevel::Warn,
            "dist_missing",
            serde_json::json!({ "distDir": config.dist_dir.display().to_string() }),
        );
    }

    let state = AppState {
        config: Arc::new(config),
    };
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &state.config,
        LogLevel::Info,
        "server_listening",
        serde_json::json!({ "address": bind_address }),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_event(
        &state.config,
        LogLevel::Info,
        "server_stopped",
        serde_json::json!({}),
    );
    Ok(())
}

fn router(state: AppState) -> Router {
    let static_service = ServeDir::new(&state.config.dist_dir)
        .fallback(ServeFile::new(state.config.index_path()));

    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state.clone(), track_request))
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn healthz(State(state): State<AppState>) -> Json<HealthPayload> {
    Json(HealthPayload {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        dist_dir: state.config.dist_dir.display().to_string(),
    })
}

async fn track_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = request_id_from(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();

    let headers = response.headers_mut();
    if let Ok(request_id_header) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    if status.is_success() && !headers.contains_key(header::CACHE_CONTROL) {
        let is_html = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/html"));
        headers.insert(
            header::CACHE_CONTROL,
            cache_policy(&path, is_html, state.config.asset_max_age_seconds),
        );
    }

    log_event(
        &state.config,
        LogLevel::for_status(status),
        "request_completed",
        serde_json::json!({
            "requestId": request_id,
            "method": method.as_str(),
            "path": path,
            "status": status.as_u16(),
            "durationMs": started.elapsed().as_millis() as u64,
        }),
    );

    response
}

/// The index document must always revalidate so a new build is picked up;
/// hashed trunk assets may be cached for the configured age.
fn cache_policy(path: &str, is_html: bool, max_age_seconds: u64) -> HeaderValue {
    let file_name = path.rsplit('/').next().unwrap_or_default();
    if is_html || file_name.is_empty() || !file_name.contains('.') {
        return HeaderValue::from_static("no-cache");
    }

    format!("public, max-age={max_age_seconds}")
        .parse()
        .unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    parse_non_empty_string(value)
        .and_then(|value| LogLevel::parse(&value))
        .unwrap_or(default)
}

fn since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// Reuses a caller-supplied id so proxies can correlate lines; otherwise
/// mints `req-<unix millis>-<sequence>`.
fn request_id_from(headers: &HeaderMap) -> String {
    if let Some(supplied) = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return supplied.to_string();
    }

    let sequence = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{sequence}", since_epoch().as_millis())
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let fields = match fields {
        serde_json::Value::Object(fields) => fields,
        _ => serde_json::Map::new(),
    };
    let line = LogLine {
        ts: since_epoch().as_secs(),
        level,
        event,
        fields,
    };
    if let Ok(line) = serde_json::to_string(&line) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::response::IntoResponse;
    use tower::ServiceExt;

    fn state_for(dist_dir: PathBuf) -> AppState {
        AppState {
            config: Arc::new(ServerConfig {
                port: DEFAULT_PORT,
                dist_dir,
                asset_max_age_seconds: 60,
                log_level: DEFAULT_LOG_LEVEL,
            }),
        }
    }

    fn test_state() -> AppState {
        state_for(PathBuf::from("/tmp/portfolio-test-dist"))
    }

    async fn get(app: Router, uri: &str, request_id: Option<&str>) -> Response {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(request_id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, request_id);
        }
        let request = builder.body(Body::empty()).expect("request builds");
        app.oneshot(request).await.expect("router is infallible")
    }

    fn header_str<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|value| value.to_str().ok())
    }

    #[test]
    fn bounded_values_fall_back_to_default() {
        assert_eq!(parse_u64_with_bounds(Some("9000".to_string()), 8080, PORT_BOUNDS), 9000);
        assert_eq!(parse_u64_with_bounds(Some(" 443 ".to_string()), 8080, PORT_BOUNDS), 443);
        assert_eq!(parse_u64_with_bounds(Some("0".to_string()), 8080, PORT_BOUNDS), 8080);
        assert_eq!(parse_u64_with_bounds(Some("70000".to_string()), 8080, PORT_BOUNDS), 8080);
        assert_eq!(parse_u64_with_bounds(Some("abc".to_string()), 8080, PORT_BOUNDS), 8080);
        assert_eq!(parse_u64_with_bounds(None, 8080, PORT_BOUNDS), 8080);
    }

    #[test]
    fn log_level_parsing_is_case_insensitive() {
        assert_eq!(parse_log_level(Some("DEBUG".to_string()), LogLevel::Info), LogLevel::Debug);
        assert_eq!(parse_log_level(Some("verbose".to_string()), LogLevel::Info), LogLevel::Info);
        assert_eq!(parse_log_level(Some("   ".to_string()), LogLevel::Debug), LogLevel::Debug);
        assert_eq!(parse_log_level(Some("Warn".to_string()), LogLevel::Info), LogLevel::Warn);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn request_status_picks_log_level() {
        assert_eq!(LogLevel::for_status(StatusCode::OK), LogLevel::Debug);
        assert_eq!(LogLevel::for_status(StatusCode::NOT_MODIFIED), LogLevel::Debug);
        assert_eq!(LogLevel::for_status(StatusCode::NOT_FOUND), LogLevel::Info);
        assert_eq!(LogLevel::for_status(StatusCode::BAD_GATEWAY), LogLevel::Warn);
    }

    #[test]
    fn log_line_flattens_fields_after_the_envelope() {
        let line = LogLine {
            ts: 12,
            level: LogLevel::Warn,
            event: "dist_missing",
            fields: serde_json::json!({ "distDir": "dist" })
                .as_object()
                .cloned()
                .unwrap_or_default(),
        };
        let value = serde_json::to_value(&line).expect("log line serializes");
        assert_eq!(
            value,
            serde_json::json!({ "ts": 12, "level": "warn", "event": "dist_missing", "distDir": "dist" })
        );
    }

    #[test]
    fn supplied_request_id_is_propagated() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id_from(&headers), "abc-123");

        let generated = request_id_from(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
        assert_ne!(generated, request_id_from(&HeaderMap::new()));
    }

    #[test]
    fn documents_are_never_cached_but_assets_are() {
        assert_eq!(cache_policy("/", false, 60), "no-cache");
        assert_eq!(cache_policy("/index.html", true, 60), "no-cache");
        assert_eq!(cache_policy("/projects", false, 60), "no-cache");
        assert_eq!(cache_policy("/stale-build.js", true, 60), "no-cache");
        assert_eq!(
            cache_policy("/mascot-portfolio-3f2a_bg.wasm", false, 60),
            "public, max-age=60"
        );
        assert_eq!(cache_policy("/styles.css", false, 0), "public, max-age=0");
    }

    #[test]
    fn index_lives_in_dist_dir() {
        let state = test_state();
        assert_eq!(
            state.config.index_path(),
            PathBuf::from("/tmp/portfolio-test-dist/index.html")
        );
    }

    #[tokio::test]
    async fn healthz_reports_version_and_dist_dir() {
        let Json(payload) = healthz(State(test_state())).await;
        assert!(payload.ok);
        assert_eq!(payload.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(payload.dist_dir, "/tmp/portfolio-test-dist");

        let response = Json(payload).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_the_index_document() {
        let dist = tempfile::tempdir().expect("temp dist dir");
        std::fs::write(dist.path().join("index.html"), "<div id=\"app\"></div>")
            .expect("write index");
        std::fs::write(dist.path().join("app.js"), "console.log(1);").expect("write asset");
        let app = router(state_for(dist.path().to_path_buf()));

        let root = get(app.clone(), "/", Some("trace-7")).await;
        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(header_str(&root, REQUEST_ID_HEADER), Some("trace-7"));
        assert_eq!(header_str(&root, "cache-control"), Some("no-cache"));

        let deep = get(app.clone(), "/projects/orbit", None).await;
        assert_eq!(deep.status(), StatusCode::OK);
        assert!(header_str(&deep, REQUEST_ID_HEADER).is_some_and(|id| id.starts_with("req-")));
        assert_eq!(header_str(&deep, "cache-control"), Some("no-cache"));
        let body = to_bytes(deep.into_body(), usize::MAX).await.expect("body");
        assert_eq!(&body[..], b"<div id=\"app\"></div>");

        let asset = get(app.clone(), "/app.js", None).await;
        assert_eq!(asset.status(), StatusCode::OK);
        assert_eq!(header_str(&asset, "cache-control"), Some("public, max-age=60"));

        let missing_asset = get(app, "/missing.wasm", None).await;
        assert_eq!(missing_asset.status(), StatusCode::OK);
        assert_eq!(header_str(&missing_asset, "cache-control"), Some("no-cache"));
    }

    #[tokio::test]
    async fn missing_dist_dir_answers_not_found_without_caching() {
        let app = router(state_for(PathBuf::from("/nonexistent/mascot-portfolio-dist")));

        let response = get(app.clone(), "/about", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(header_str(&response, "cache-control"), None);
        assert!(header_str(&response, REQUEST_ID_HEADER).is_some());

        let health = get(app, "/healthz", None).await;
        assert_eq!(health.status(), StatusCode::OK);
    }
}
