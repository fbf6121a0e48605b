// ============================================================================
// API CLIENT - HTTP ONLY (stateless)
// ============================================================================
// No business logic here, just requests. The reporter is identified by the
// `laporan_token` cookie, so every request is sent with credentials.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::models::{
    AdminLogin, AdminSession, Category, City, CreatedReport, NewReport, Notification, Province,
    Report, ReportFilters,
};
use crate::utils::constants::BACKEND_URL;

/// Failure of a remote call, categorized so callers can match on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The backend refused the reporter's credentials (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Calls the "my reports" view depends on.
#[async_trait(?Send)]
pub trait ReportApi {
    /// `GET /laporan/mine`
    async fn list_my_reports(&self) -> ApiResult<Vec<Report>>;
    /// `PATCH /laporan/{id}/found`. Safe to retry.
    async fn mark_found(&self, id: i64) -> ApiResult<()>;
    /// `DELETE /laporan/{id}`. Safe to retry.
    async fn delete_report(&self, id: i64) -> ApiResult<()>;
}

/// Query string of `GET /laporan`.
pub fn list_query(filters: &ReportFilters, limit: u32) -> String {
    let mut params: Vec<String> = Vec::new();
    if let Some(status) = filters.status {
        params.push(format!("status={}", status.label()));
    }
    if let Some(id) = filters.category_id {
        params.push(format!("id_kategori={}", id));
    }
    if let Some(id) = filters.province_id {
        params.push(format!("id_provinsi={}", id));
    }
    if let Some(id) = filters.city_id {
        params.push(format!("id_kota={}", id));
    }
    params.push(format!("limit={}", limit));
    params.join("&")
}

async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// A 200 with `success: false` is still a refused login.
fn accept_admin_session(session: AdminSession) -> ApiResult<AdminSession> {
    if session.success {
        Ok(session)
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Maps a non-success response onto `ApiError`.
async fn check(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    let message = match response.text().await {
        Ok(text) if !text.is_empty() => text,
        _ => response.status_text(),
    };
    Err(ApiError::Http { status, message })
}

/// HTTP client for the Temu Cepat backend (stateless)
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(BACKEND_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Single exit point for requests.
    async fn dispatch(&self, request: Request) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(response).await
    }

    /// Attaches the reporter cookie.
    fn with_credentials(builder: RequestBuilder) -> RequestBuilder {
        builder.credentials(RequestCredentials::Include)
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request = Self::with_credentials(builder)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        parse(self.send(builder).await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let request = Self::with_credentials(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        parse(self.dispatch(request).await?).await
    }

    /// Submit a new report. The backend answers with the reporter cookie.
    pub async fn create_report(&self, report: &NewReport) -> ApiResult<CreatedReport> {
        log::info!("📝 Sending new report: {}", report.title);
        self.post_json("/laporan", report).await
    }

    pub async fn get_report(&self, id: i64) -> ApiResult<Report> {
        self.send_json(Request::get(&self.url(&format!("/laporan/{}", id))))
            .await
    }

    /// Public listing with optional filters.
    pub async fn list_reports(&self, filters: &ReportFilters, limit: u32) -> ApiResult<Vec<Report>> {
        let url = format!("{}?{}", self.url("/laporan"), list_query(filters, limit));
        let reports: Vec<Report> = self.send_json(Request::get(&url)).await?;
        log::info!("📋 {} reports listed", reports.len());
        Ok(reports)
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.send_json(Request::get(&self.url("/kategori"))).await
    }

    pub async fn list_notifications(&self, unread_only: bool) -> ApiResult<Vec<Notification>> {
        let url = format!("{}?unread_only={}", self.url("/notifikasi"), unread_only);
        self.send_json(Request::get(&url)).await
    }

    pub async fn mark_notification_read(&self, id: i64) -> ApiResult<()> {
        self.send(Request::patch(&self.url(&format!("/notifikasi/{}/read", id))))
            .await
            .map(|_| ())
    }

    pub async fn list_provinces(&self) -> ApiResult<Vec<Province>> {
        self.send_json(Request::get(&self.url("/wilayah/provinsi"))).await
    }

    pub async fn list_cities(&self, province_id: i64) -> ApiResult<Vec<City>> {
        self.send_json(Request::get(&self.url(&format!("/wilayah/kota/{}", province_id))))
            .await
    }

    /// Wrong username or password comes back as `ApiError::Unauthorized`.
    pub async fn admin_login(&self, credentials: &AdminLogin) -> ApiResult<AdminSession> {
        log::info!("🔑 Admin login: {}", credentials.username);
        accept_admin_session(self.post_json("/admin/login", credentials).await?)
    }

    /// Clears the HttpOnly reporter cookie server-side.
    pub async fn logout(&self) -> ApiResult<()> {
        self.send(Request::post(&self.url("/laporan/logout")))
            .await
            .map(|_| ())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ReportApi for ApiClient {
    async fn list_my_reports(&self) -> ApiResult<Vec<Report>> {
        let reports: Vec<Report> = self
            .send_json(Request::get(&self.url("/laporan/mine")))
            .await?;
        log::info!("✅ {} own reports fetched", reports.len());
        Ok(reports)
    }

    async fn mark_found(&self, id: i64) -> ApiResult<()> {
        log::info!("📤 Marking report {} as found", id);
        self.send(Request::patch(&self.url(&format!("/laporan/{}/found", id))))
            .await
            .map(|_| ())
    }

    async fn delete_report(&self, id: i64) -> ApiResult<()> {
        log::info!("📤 Deleting report {}", id);
        self.send(Request::delete(&self.url(&format!("/laporan/{}?admin=true", id))))
            .await
            .map(|_| ())
    }
}
