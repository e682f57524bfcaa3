use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    cmp::Ordering,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};
use url::Url;

use crate::{
    content::{self, Post, Project},
    route::Route,
    site,
};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_CONTENT_REQUEST_TIMEOUT_MS: u64 = 6_000;
const DEFAULT_CONTENT_CONNECT_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_CONTENT_RESPONSE_MAX_BYTES: usize = 2 * 1024 * 1024;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const CONTENT_REQUEST_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 120_000);
const CONTENT_CONNECT_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 30_000);
const CONTENT_RESPONSE_MAX_BYTES_BOUNDS: (usize, usize) = (1_024, 10 * 1024 * 1024);

const CONTENT_CACHE_CONTROL: &str = "public, max-age=60";
const CONTENT_API_PREFIX: &str = "rest/v1/";
const USER_AGENT: &str = "folio-content/1.0";
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

#[derive(Clone)]
struct ServerConfig {
    port: u16,
    static_dir: PathBuf,
    content_api_url: Option<Url>,
    content_api_key: Option<String>,
    request_timeout: Duration,
    connect_timeout: Duration,
    response_max_bytes: usize,
    site_url: String,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let static_dir = parse_env_non_empty_string("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let content_api_url = parse_env_http_url("CONTENT_API_URL").map(normalize_base_url);
        let content_api_key = parse_env_non_empty_string("CONTENT_API_KEY");
        let request_timeout_ms = parse_env_u64_with_bounds(
            "CONTENT_REQUEST_TIMEOUT_MS",
            DEFAULT_CONTENT_REQUEST_TIMEOUT_MS,
            CONTENT_REQUEST_TIMEOUT_MS_BOUNDS,
        );
        let connect_timeout_ms = parse_env_u64_with_bounds(
            "CONTENT_CONNECT_TIMEOUT_MS",
            DEFAULT_CONTENT_CONNECT_TIMEOUT_MS,
            CONTENT_CONNECT_TIMEOUT_MS_BOUNDS,
        );
        let response_max_bytes = parse_env_usize_with_bounds(
            "CONTENT_RESPONSE_MAX_BYTES",
            DEFAULT_CONTENT_RESPONSE_MAX_BYTES,
            CONTENT_RESPONSE_MAX_BYTES_BOUNDS,
        );
        let site_url = parse_env_http_url("SITE_URL")
            .map(|url| url.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| site::DEFAULT_SITE_URL.to_string());
        let log_level = parse_log_level("LOG_LEVEL", DEFAULT_LOG_LEVEL);

        Self {
            port,
            static_dir,
            content_api_url,
            content_api_key,
            request_timeout: Duration::from_millis(request_timeout_ms),
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            response_max_bytes,
            site_url,
            log_level,
        }
    }
}

#[derive(Debug, Error)]
enum ContentError {
    #[error("content source is not configured")]
    NotConfigured,
    #[error("invalid content url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("content request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("content source responded with status {0}")]
    Status(u16),
    #[error("content response exceeded {0} bytes")]
    TooLarge(usize),
    #[error("content response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ContentError {
    fn error_class(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Request(error) if error.is_timeout() => "timeout",
            Self::Request(_) => "network",
            Self::Status(_) => "upstream_status",
            Self::TooLarge(_) => "too_large",
            Self::Decode(_) => "decode",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Request(error) if error.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::NotConfigured => "content source unavailable",
            _ => "failed to load content",
        }
    }
}

#[derive(Clone)]
struct ContentSource {
    client: reqwest::Client,
    base_url: Option<Url>,
    api_key: Option<String>,
    response_max_bytes: usize,
}

impl ContentSource {
    fn from_config(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.content_api_url.clone(),
            api_key: config.content_api_key.clone(),
            response_max_bytes: config.response_max_bytes,
        })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, ContentError> {
        let base_url = self.base_url.as_ref().ok_or(ContentError::NotConfigured)?;
        let url = table_url(base_url, table, params)?;

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(api_key) = self.api_key.as_deref() {
            request = request
                .header("apikey", api_key)
                .header(AUTHORIZATION, format!("Bearer {api_key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }

        let body = read_limited_body(response, self.response_max_bytes).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, ContentError> {
        self.select("posts", &[("select", "*"), ("order", "created_at.desc")])
            .await
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let filter = format!("eq.{slug}");
        let rows = self
            .select("posts", &[("select", "*"), ("slug", &filter), ("limit", "1")])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ContentError> {
        self.select("projects", &[("select", "*"), ("order", "created_at.desc")])
            .await
    }

    async fn sitemap_posts(&self) -> Result<Vec<SitemapPost>, ContentError> {
        self.select(
            "posts",
            &[("select", "slug,created_at"), ("order", "created_at.desc")],
        )
        .await
    }
}

#[derive(Clone, Deserialize)]
struct SitemapPost {
    slug: String,
    created_at: String,
}

#[derive(Clone)]
pub struct AppState {
    content: ContentSource,
    config: ServerConfig,
}

#[derive(Serialize)]
struct ErrorPayload {
    ok: bool,
    error: String,
}

impl ErrorPayload {
    fn new(message: &str) -> Self {
        Self {
            ok: false,
            error: message.to_string(),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let content = ContentSource::from_config(&config)?;
    let bind_address = format!("0.0.0.0:{}", config.port);

    log_event(
        &config,
        LogLevel::Info,
        "server_start",
        serde_json::json!({
            "port": config.port,
            "static_dir": config.static_dir.display().to_string(),
            "content_source": config
                .content_api_url
                .as_ref()
                .and_then(|url| url.host_str())
                .unwrap_or("unconfigured"),
        }),
    );

    let state = AppState { content, config };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let static_service = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/posts", get(get_posts))
        .route("/api/posts/{slug}", get(get_post))
        .route("/api/projects", get(get_projects))
        .route("/sitemap.xml", get(get_sitemap))
        .route("/healthz", get(get_health))
        .fallback_service(static_service)
        .with_state(state)
}

async fn get_posts(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let request = RequestLog::start(&state.config, &method, &uri, &headers);
    let result = state.content.list_posts().await;
    content_response(&state.config, &request, result)
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let request = RequestLog::start(&state.config, &method, &uri, &headers);

    match state.content.post_by_slug(&slug).await {
        Ok(Some(post)) => content_response(&state.config, &request, Ok(post)),
        Ok(None) => {
            request.complete(&state.config, StatusCode::NOT_FOUND);
            json_response(
                StatusCode::NOT_FOUND,
                ErrorPayload::new("post not found"),
                cache_control("no-store"),
                &request.id,
            )
        }
        Err(error) => content_response::<Post>(&state.config, &request, Err(error)),
    }
}

async fn get_projects(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let request = RequestLog::start(&state.config, &method, &uri, &headers);
    let result = state.content.list_projects().await;
    content_response(&state.config, &request, result)
}

async fn get_sitemap(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let request = RequestLog::start(&state.config, &method, &uri, &headers);

    let posts = match state.content.sitemap_posts().await {
        Ok(posts) => posts,
        Err(error) => {
            request.failed(&state.config, &error);
            Vec::new()
        }
    };

    let body = render_sitemap(&state.config.site_url, &posts, &today_iso());
    request.complete(&state.config, StatusCode::OK);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/xml; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, cache_control(CONTENT_CACHE_CONTROL));
    response_with_request_id(StatusCode::OK, headers, body, &request.id)
}

async fn get_health(headers: HeaderMap) -> impl IntoResponse {
    let request_id = resolve_request_id(&headers);
    response_with_request_id(
        StatusCode::OK,
        HeaderMap::new(),
        Json(serde_json::json!({ "ok": true })),
        &request_id,
    )
}

struct RequestLog {
    id: String,
    path: String,
    started_at: Instant,
}

impl RequestLog {
    fn start(config: &ServerConfig, method: &Method, uri: &Uri, headers: &HeaderMap) -> Self {
        let request = Self {
            id: resolve_request_id(headers),
            path: uri.path().to_string(),
            started_at: Instant::now(),
        };

        log_event(
            config,
            LogLevel::Info,
            "content_request_start",
            serde_json::json!({
                "request_id": request.id.as_str(),
                "method": method.as_str(),
                "path": request.path.as_str(),
            }),
        );

        request
    }

    fn complete(&self, config: &ServerConfig, status: StatusCode) {
        log_event(
            config,
            LogLevel::Info,
            "content_request_complete",
            serde_json::json!({
                "request_id": self.id.as_str(),
                "path": self.path.as_str(),
                "status": status.as_u16(),
                "duration_ms": self.started_at.elapsed().as_millis(),
            }),
        );
    }

    fn failed(&self, config: &ServerConfig, error: &ContentError) {
        log_event(
            config,
            LogLevel::Warn,
            "content_request_failed",
            serde_json::json!({
                "request_id": self.id.as_str(),
                "path": self.path.as_str(),
                "error_class": error.error_class(),
                "message": error.to_string(),
                "duration_ms": self.started_at.elapsed().as_millis(),
            }),
        );
    }
}

fn content_response<T: Serialize>(
    config: &ServerConfig,
    request: &RequestLog,
    result: Result<T, ContentError>,
) -> axum::response::Response {
    match result {
        Ok(payload) => {
            request.complete(config, StatusCode::OK);
            json_response(
                StatusCode::OK,
                payload,
                cache_control(CONTENT_CACHE_CONTROL),
                &request.id,
            )
        }
        Err(error) => {
            request.failed(config, &error);
            let status = error.status_code();
            request.complete(config, status);
            json_response(
                status,
                ErrorPayload::new(error.public_message()),
                cache_control("no-store"),
                &request.id,
            )
        }
    }
}

fn json_response(
    status: StatusCode,
    payload: impl Serialize,
    cache_control: HeaderValue,
    request_id: &str,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, cache_control);
    headers.insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));
    response_with_request_id(status, headers, Json(payload), request_id)
}

fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn table_url(base_url: &Url, table: &str, params: &[(&str, &str)]) -> Result<Url, url::ParseError> {
    let mut url = base_url.join(&format!("{CONTENT_API_PREFIX}{table}"))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter().copied());
    }
    Ok(url)
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    url
}

fn render_sitemap(site_url: &str, posts: &[SitemapPost], today: &str) -> String {
    let site_url = site_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (route, change_frequency, priority) in site::static_pages() {
        push_sitemap_url(&mut xml, site_url, &route.path(), today, change_frequency, priority);
    }

    for post in posts {
        let last_modified = content::iso_date(&post.created_at).unwrap_or_else(|| today.to_string());
        let path = Route::Post(post.slug.clone()).path();
        push_sitemap_url(&mut xml, site_url, &path, &last_modified, "monthly", "0.8");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_sitemap_url(
    xml: &mut String,
    site_url: &str,
    path: &str,
    last_modified: &str,
    change_frequency: &str,
    priority: &str,
) {
    let location = if path == "/" {
        site_url.to_string()
    } else {
        format!("{site_url}{path}")
    };

    xml.push_str(&format!(
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{change_frequency}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n",
        escape_xml(&location),
        escape_xml(last_modified),
    ));
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn today_iso() -> String {
    chrono::DateTime::from_timestamp(now_unix_seconds() as i64, 0)
        .map(|now| now.date_naive().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "1970-01-01".to_string())
}

fn parse_env_u64_with_bounds(name: &str, default: u64, bounds: (u64, u64)) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_usize_with_bounds(name: &str, default: usize, bounds: (usize, usize)) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env_http_url(name: &str) -> Option<Url> {
    let value = parse_env_non_empty_string(name)?;
    let parsed = Url::parse(&value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

fn parse_log_level(name: &str, default: LogLevel) -> LogLevel {
    match parse_env_non_empty_string(name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn response_with_request_id(
    status: StatusCode,
    mut headers: HeaderMap,
    payload: impl IntoResponse,
    request_id: &str,
) -> axum::response::Response {
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, payload).into_response()
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}

async fn read_limited_body(
    response: reqwest::Response,
    max_response_bytes: usize,
) -> Result<Vec<u8>, ContentError> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::with_capacity(8192);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;

        if body.len() + chunk.len() > max_response_bytes {
            return Err(ContentError::TooLarge(max_response_bytes));
        }

        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
