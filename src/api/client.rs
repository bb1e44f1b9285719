use chrono::Utc;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::api::cache::{CacheKey, SearchCache};
use crate::api::{mock, status, ApiError, BackendStatus, ClientConfig, Sourced};
use crate::models::{
    ApiEnvelope, AppInfo, ChatRequest, ChatResponse, CompareRequest, CompareResponse,
    FeedbackRequest, FeedbackResponse, FilteredSearchRequest, FilteredSearchResponse,
    HealthStatus, InquiryRequest, InquiryResponse, LocationSearchRequest, LocationSearchResponse,
    MarketInsightsRequest, MarketInsightsResponse, Property, PropertyDetailsRequest,
    PropertyDetailsResponse, RecommendationsRequest, RecommendationsResponse, SearchQuery,
    SearchResponse, SiteVisitRequest, SiteVisitResponse, StatsSnapshot,
};

/// Single entry point for every remote operation.
///
/// Operations with a meaningful offline substitute (app info, health,
/// search, listings, single property, stats) resolve to [`Sourced`] and
/// never fail; everything else propagates [`ApiError`] to the caller.
/// Each request is attempted exactly once. Dropping a returned future
/// aborts the in-flight request.
pub struct ApiClient {
    http: Client,
    base_url: String,
    cache: SearchCache,
}

impl ApiClient {
    /// Build a client from defaults plus environment overrides.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::from_env())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: SearchCache::new(config.cache_ttl, config.cache_capacity),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- fallback-eligible operations ----

    /// Application info from the root endpoint.
    pub async fn app_info(&self) -> Sourced<ApiEnvelope<AppInfo>> {
        match self.fetch_app_info().await {
            Ok(envelope) => Sourced::Remote(envelope),
            Err(reason) => {
                warn!(error = %reason, "backend unavailable, substituting sample app info");
                Sourced::Fallback {
                    data: mock::app_info_response(),
                    reason,
                }
            }
        }
    }

    /// Health payload from `/health`.
    pub async fn health(&self) -> Sourced<ApiEnvelope<HealthStatus>> {
        match self.fetch_health().await {
            Ok(envelope) => Sourced::Remote(envelope),
            Err(reason) => {
                warn!(error = %reason, "backend unavailable, substituting sample health data");
                Sourced::Fallback {
                    data: mock::health_response(),
                    reason,
                }
            }
        }
    }

    /// Free-text search. Identical requests within the cache TTL are served
    /// locally; only remote results are cached, so sample data can never be
    /// replayed after the backend recovers.
    pub async fn search(&self, request: &SearchQuery) -> Sourced<ApiEnvelope<SearchResponse>> {
        let key = CacheKey::for_search(&request.query, request.limit, request.search_type);
        if let Some(cached) = self.cache.get(&key) {
            debug!(query = %request.query, "search served from cache");
            return Sourced::Remote(cached);
        }

        match self.fetch_search(request).await {
            Ok(envelope) => {
                self.cache.put(key, envelope.clone());
                Sourced::Remote(envelope)
            }
            Err(reason) => {
                warn!(error = %reason, query = %request.query,
                      "backend unavailable, substituting sample search results");
                Sourced::Fallback {
                    data: mock::search_response(request),
                    reason,
                }
            }
        }
    }

    /// Bulk listing with a result limit.
    pub async fn all_properties(&self, limit: usize) -> Sourced<ApiEnvelope<Vec<Property>>> {
        match self.fetch_all_properties(limit).await {
            Ok(envelope) => Sourced::Remote(envelope),
            Err(reason) => {
                warn!(error = %reason, "backend unavailable, substituting sample listings");
                Sourced::Fallback {
                    data: mock::listing_response(limit),
                    reason,
                }
            }
        }
    }

    /// Single listing by id.
    pub async fn property(&self, property_id: &str) -> Sourced<ApiEnvelope<Property>> {
        match self.fetch_property(property_id).await {
            Ok(envelope) => Sourced::Remote(envelope),
            Err(reason) => {
                warn!(error = %reason, property_id, "backend unavailable, substituting sample property");
                Sourced::Fallback {
                    data: mock::property_response(property_id),
                    reason,
                }
            }
        }
    }

    /// Aggregate statistics.
    pub async fn stats(&self) -> Sourced<ApiEnvelope<StatsSnapshot>> {
        match self.fetch_stats().await {
            Ok(envelope) => Sourced::Remote(envelope),
            Err(reason) => {
                warn!(error = %reason, "backend unavailable, substituting sample stats");
                Sourced::Fallback {
                    data: mock::stats_response(),
                    reason,
                }
            }
        }
    }

    /// Legacy structured search. Falls back to the sample catalog filtered
    /// by the structured fields rather than the query text.
    pub async fn filtered_search(
        &self,
        request: &FilteredSearchRequest,
    ) -> Sourced<FilteredSearchResponse> {
        match self.fetch_filtered_search(request).await {
            Ok(response) => Sourced::Remote(response),
            Err(reason) => {
                warn!(error = %reason, "backend unavailable, substituting sample search results");
                let properties = mock::filtered_search_properties(request);
                let total_results = properties.len();
                Sourced::Fallback {
                    data: FilteredSearchResponse {
                        query: request.query.clone(),
                        properties,
                        total_results,
                        ai_summary: "Showing sample properties while the backend is unavailable."
                            .to_string(),
                    },
                    reason,
                }
            }
        }
    }

    // ---- operations with no offline substitute ----

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.post_json("/api/v1/chat", request).await
    }

    pub async fn property_details(
        &self,
        request: &PropertyDetailsRequest,
    ) -> Result<PropertyDetailsResponse, ApiError> {
        let path = format!("/api/v1/property/{}/details", request.property_id);
        self.post_json(&path, request).await
    }

    pub async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, ApiError> {
        self.post_json("/api/v1/compare", request).await
    }

    pub async fn recommendations(
        &self,
        request: &RecommendationsRequest,
    ) -> Result<RecommendationsResponse, ApiError> {
        self.post_json("/api/v1/recommendations", request).await
    }

    pub async fn submit_inquiry(
        &self,
        request: &InquiryRequest,
    ) -> Result<InquiryResponse, ApiError> {
        self.post_json("/api/v1/contact/inquiry", request).await
    }

    pub async fn schedule_site_visit(
        &self,
        request: &SiteVisitRequest,
    ) -> Result<SiteVisitResponse, ApiError> {
        self.post_json("/api/v1/contact/site-visit", request).await
    }

    pub async fn market_insights(
        &self,
        request: &MarketInsightsRequest,
    ) -> Result<MarketInsightsResponse, ApiError> {
        self.post_json("/api/v1/market/insights", request).await
    }

    pub async fn search_locations(
        &self,
        request: &LocationSearchRequest,
    ) -> Result<LocationSearchResponse, ApiError> {
        self.post_json("/api/v1/locations/search", request).await
    }

    pub async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        self.post_json("/api/v1/feedback", request).await
    }

    pub async fn contact_history(
        &self,
        user_email: &str,
        limit: usize,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/api/v1/contact/history", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("user_email", user_email), ("limit", &limit.to_string())])
            .send()
            .await?;
        Self::ok_json(response).await
    }

    pub async fn property_contact(&self, property_id: &str) -> Result<serde_json::Value, ApiError> {
        self.get_json(&format!("/api/v1/contact/property/{property_id}"))
            .await
    }

    /// One-shot online/offline probe with a 5 second deadline.
    pub async fn check_status(&self) -> BackendStatus {
        status::check_backend_status(&self.http, &self.base_url).await
    }

    // ---- request plumbing ----

    async fn fetch_app_info(&self) -> Result<ApiEnvelope<AppInfo>, ApiError> {
        let raw: RawEnvelope<AppInfo> = self.get_json("/").await?;
        raw.into_envelope()
    }

    async fn fetch_health(&self) -> Result<ApiEnvelope<HealthStatus>, ApiError> {
        let health: HealthStatus = self.get_json("/health").await?;
        Ok(ApiEnvelope::success(health))
    }

    async fn fetch_search(
        &self,
        request: &SearchQuery,
    ) -> Result<ApiEnvelope<SearchResponse>, ApiError> {
        let body: SearchResponse = self.post_json("/api/v1/search", request).await?;
        let mut envelope = ApiEnvelope::success(body);
        if !envelope.data.platform.is_empty() {
            envelope.platform = envelope.data.platform.clone();
        }
        if !envelope.data.data_source.is_empty() {
            envelope.data_source = Some(envelope.data.data_source.clone());
        }
        envelope.total = Some(envelope.data.total);
        Ok(envelope)
    }

    async fn fetch_all_properties(
        &self,
        limit: usize,
    ) -> Result<ApiEnvelope<Vec<Property>>, ApiError> {
        let body: ListingBody = self
            .get_json(&format!("/api/v1/properties?limit={limit}"))
            .await?;
        let mut envelope = ApiEnvelope::success(body.properties);
        envelope.data_source = body.data_source;
        envelope.total = body.total;
        Ok(envelope)
    }

    async fn fetch_property(&self, property_id: &str) -> Result<ApiEnvelope<Property>, ApiError> {
        let body: PropertyBody = self
            .get_json(&format!("/api/v1/properties/{property_id}"))
            .await?;
        let property = body.property.or(body.data).ok_or_else(|| {
            ApiError::Decode(<serde_json::Error as serde::de::Error>::custom(
                "response carried no property payload",
            ))
        })?;
        let mut envelope = ApiEnvelope::success(property);
        envelope.data_source = body.data_source;
        Ok(envelope)
    }

    async fn fetch_stats(&self) -> Result<ApiEnvelope<StatsSnapshot>, ApiError> {
        let stats: StatsSnapshot = self.get_json("/api/v1/stats").await?;
        let mut envelope = ApiEnvelope::success(stats);
        if !envelope.data.platform.is_empty() {
            envelope.platform = envelope.data.platform.clone();
        }
        if !envelope.data.data_source.is_empty() {
            envelope.data_source = Some(envelope.data.data_source.clone());
        }
        Ok(envelope)
    }

    async fn fetch_filtered_search(
        &self,
        request: &FilteredSearchRequest,
    ) -> Result<FilteredSearchResponse, ApiError> {
        let body = serde_json::json!({
            "query": request.query,
            "limit": request.size.unwrap_or(10),
        });
        let response: SearchResponse = self.post_json("/api/v1/search", &body).await?;
        Ok(FilteredSearchResponse {
            query: request.query.clone(),
            properties: response.results,
            total_results: response.total,
            ai_summary: "Search completed against live platform data.".to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.get(&url).send().await?;
        Self::ok_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;
        Self::ok_json(response).await
    }

    async fn ok_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::classify_status_error(response).await);
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Collapse a non-success response into one descriptive message:
    /// JSON `detail`/`message` field, else the status line. A 5xx gets an
    /// extra structured diagnostic without changing the returned message.
    async fn classify_status_error(response: Response) -> ApiError {
        let status = response.status();
        let url = response.url().clone();
        let reason = status.canonical_reason().unwrap_or("Unknown");

        let message = match response.text().await {
            Ok(body) => extract_error_message(&body)
                .unwrap_or_else(|| format!("Server returned {}: {reason}", status.as_u16())),
            Err(_) => format!("Server error {}: {reason}", status.as_u16()),
        };

        if status.is_server_error() {
            error!(
                %url,
                status = status.as_u16(),
                occurred_at = %Utc::now(),
                "backend reported a server-side fault"
            );
        }

        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

/// Best-effort extraction of a human-readable message from an error body.
pub fn extract_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
        message: Option<String>,
    }
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.detail.or(parsed.message)
}

/// Wire shape of the bulk-listing body.
#[derive(Deserialize)]
struct ListingBody {
    #[serde(default)]
    properties: Vec<Property>,
    #[serde(default)]
    data_source: Option<String>,
    #[serde(default)]
    total: Option<usize>,
}

/// Wire shape of the single-property body; some deployments nest the
/// record under `property`, others under `data`.
#[derive(Deserialize)]
struct PropertyBody {
    #[serde(default)]
    property: Option<Property>,
    #[serde(default)]
    data: Option<Property>,
    #[serde(default)]
    data_source: Option<String>,
}

/// Wire shape of endpoints that already answer in envelope form.
#[derive(Deserialize)]
struct RawEnvelope<T> {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    data_source: Option<String>,
    #[serde(default)]
    total: Option<usize>,
}

impl<T> RawEnvelope<T> {
    fn into_envelope(self) -> Result<ApiEnvelope<T>, ApiError> {
        let data = self.data.ok_or_else(|| {
            ApiError::Decode(<serde_json::Error as serde::de::Error>::custom(
                "response carried no data payload",
            ))
        })?;
        let mut envelope = ApiEnvelope::success(data);
        if let Some(status) = self.status {
            envelope.status = status;
        }
        if let Some(platform) = self.platform {
            envelope.platform = platform;
        }
        envelope.data_source = self.data_source;
        envelope.total = self.total;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_detail_field() {
        let body = r#"{"detail": "index unavailable"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("index unavailable"));
    }

    #[test]
    fn error_message_falls_back_to_message_field() {
        let body = r#"{"message": "quota exceeded"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn non_json_error_body_yields_none() {
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(""), None);
    }

    #[test]
    fn app_info_envelope_deserializes() {
        let raw: RawEnvelope<AppInfo> = serde_json::from_str(
            r#"{"status": "success", "data": {"application_name": "Real Estate Co-Pilot",
                "version": "1.0.0", "status": "operational"}}"#,
        )
        .unwrap();
        let envelope = raw.into_envelope().unwrap();
        assert_eq!(envelope.data.application_name, "Real Estate Co-Pilot");
        assert_eq!(envelope.data.version, "1.0.0");
    }

    #[test]
    fn raw_envelope_without_data_is_a_decode_error() {
        let raw: RawEnvelope<AppInfo> =
            serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(matches!(raw.into_envelope(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn raw_envelope_carries_metadata_through() {
        let raw: RawEnvelope<serde_json::Value> = serde_json::from_str(
            r#"{"status": "success", "data": {"k": 1}, "platform": "google-cloud", "total": 7}"#,
        )
        .unwrap();
        let envelope = raw.into_envelope().unwrap();
        assert_eq!(envelope.status, "success");
        assert_eq!(envelope.platform, "google-cloud");
        assert_eq!(envelope.total, Some(7));
    }
}
