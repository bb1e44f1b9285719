use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Furnishing state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Furnishing {
    Furnished,
    SemiFurnished,
    Unfurnished,
}

impl Furnishing {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "furnished" => Some(Self::Furnished),
            "semi_furnished" => Some(Self::SemiFurnished),
            "unfurnished" => Some(Self::Unfurnished),
            _ => None,
        }
    }
}

/// Geographic coordinates of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Nested address details, preferred for display when the first-class
/// area/city fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDetails {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

/// A point of interest near a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    pub distance_km: f64,
    pub rating: f64,
}

/// Canonical listing record.
///
/// The backend still emits several legacy aliases (`property_id`,
/// `furnishing` vs `furnishing_type`, `elasticsearch_score`). Those are
/// resolved exactly once, during deserialization, via [`RawProperty`];
/// everything past the wire boundary sees only this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProperty")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Open-ended on the wire; unknown values are carried, not rejected.
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: Option<u32>,
    /// Floor area in square feet.
    pub area_sqft: Option<f64>,
    pub carpet_area_sqft: Option<f64>,
    pub price: Option<f64>,
    pub price_per_sqft: Option<f64>,
    pub currency: String,
    pub furnishing: Option<Furnishing>,
    /// Locality or zone name.
    pub area: String,
    pub city: String,
    pub state: String,
    pub country: Option<String>,
    pub amenities: Vec<String>,
    pub platform_name: String,
    pub platform_description: String,
    pub platform_focus: String,
    pub special_features: Vec<String>,
    pub target_audience: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub geo_location: Option<GeoPoint>,
    pub location: Option<LocationDetails>,
    pub nearby_places: Vec<NearbyPlace>,
    pub image_urls: Vec<String>,
    pub ai_summary: Option<String>,
    /// Search relevance, folded from `elasticsearch_score` when the
    /// canonical field is missing.
    pub relevance_score: Option<f64>,
    pub investment_score: Option<f64>,
}

/// Wire shape of a listing, aliases and all. Converted to [`Property`]
/// immediately after deserialization and never used elsewhere.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawProperty {
    pub id: Option<String>,
    pub property_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area_sqft: Option<f64>,
    pub carpet_area_sqft: Option<f64>,
    pub price: Option<f64>,
    pub price_per_sqft: Option<f64>,
    pub currency: Option<String>,
    pub furnishing_type: Option<String>,
    pub furnishing: Option<String>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub amenities: Vec<String>,
    pub platform_name: Option<String>,
    pub platform_description: Option<String>,
    pub platform_focus: Option<String>,
    pub special_features: Vec<String>,
    pub target_audience: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub geo_location: Option<GeoPoint>,
    pub geo_location_details: Option<LocationDetails>,
    pub nearby_amenities: Vec<NearbyPlace>,
    pub image_urls: Vec<String>,
    pub ai_summary: Option<String>,
    pub relevance_score: Option<f64>,
    pub elasticsearch_score: Option<f64>,
    pub investment_score: Option<f64>,
}

impl From<RawProperty> for Property {
    fn from(raw: RawProperty) -> Self {
        Self {
            // `id` wins over the legacy `property_id` when both are present.
            id: raw.id.or(raw.property_id).unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            property_type: raw.property_type.unwrap_or_default(),
            bedrooms: raw.bedrooms.unwrap_or(0),
            bathrooms: raw.bathrooms,
            area_sqft: raw.area_sqft,
            carpet_area_sqft: raw.carpet_area_sqft,
            price: raw.price,
            price_per_sqft: raw.price_per_sqft,
            currency: raw.currency.unwrap_or_else(|| "INR".to_string()),
            furnishing: raw
                .furnishing_type
                .or(raw.furnishing)
                .as_deref()
                .and_then(Furnishing::parse),
            area: raw.area.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            state: raw.state.unwrap_or_default(),
            country: raw.country,
            amenities: raw.amenities,
            platform_name: raw.platform_name.unwrap_or_default(),
            platform_description: raw.platform_description.unwrap_or_default(),
            platform_focus: raw.platform_focus.unwrap_or_default(),
            special_features: raw.special_features,
            target_audience: raw.target_audience,
            contact_email: raw.contact_email,
            contact_phone: raw.contact_phone,
            geo_location: raw.geo_location,
            location: raw.geo_location_details,
            nearby_places: raw.nearby_amenities,
            image_urls: raw.image_urls,
            ai_summary: raw.ai_summary,
            relevance_score: raw.relevance_score.or(raw.elasticsearch_score),
            investment_score: raw.investment_score,
        }
    }
}

/// Server-side search strategy. The client treats all three identically
/// except for the value sent in the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Hybrid,
    Semantic,
    Keyword,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Semantic => "semantic",
            Self::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub limit: usize,
    pub search_type: SearchType,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: 10,
            search_type: SearchType::Hybrid,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }
}

/// Search response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub results: Vec<Property>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub search_type: String,
    #[serde(default)]
    pub data_source: String,
    /// AI-feature metadata echoed by the backend, opaque to the client.
    #[serde(default)]
    pub ai_features: Option<serde_json::Value>,
}

/// Legacy structured search with field-level filters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilteredSearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnishing: Option<Furnishing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

/// Legacy structured search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredSearchResponse {
    pub query: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub total_results: usize,
    #[serde(default)]
    pub ai_summary: String,
}

/// One turn of the assistant conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub user_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub message: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub intent: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InquiryRequest {
    pub property_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub inquiry_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InquiryResponse {
    pub inquiry_id: String,
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub estimated_response_time: String,
    #[serde(default)]
    pub contact_info: Option<BuilderContact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuilderContact {
    #[serde(default)]
    pub builder: String,
    #[serde(default)]
    pub builder_phone: String,
    #[serde(default)]
    pub builder_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteVisitRequest {
    pub property_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub group_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteVisitResponse {
    pub visit_id: String,
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub confirmed_date: String,
    #[serde(default)]
    pub confirmed_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest {
    pub property_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub comparison_summary: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsRequest {
    pub user_preferences: String,
    pub budget_min: f64,
    pub budget_max: f64,
    pub preferred_locations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle_preferences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<Property>,
    #[serde(default)]
    pub total_recommendations: usize,
    #[serde(default)]
    pub ai_explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub property_id: String,
    pub user_id: String,
    pub feedback_type: FeedbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Like,
    Dislike,
    Interested,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyDetailsRequest {
    pub property_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_amenities: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_market_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_ai_insights: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDetailsResponse {
    pub property: Property,
    #[serde(default)]
    pub similar_properties: Vec<Property>,
    #[serde(default)]
    pub market_analysis: Option<MarketAnalysis>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketAnalysis {
    #[serde(default)]
    pub average_price_per_sqft: f64,
    #[serde(default)]
    pub price_trend: Option<String>,
    #[serde(default)]
    pub price_change_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketInsightsRequest {
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketInsightsResponse {
    pub city: String,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub average_price_per_sqft: f64,
    #[serde(default)]
    pub price_trend: String,
    #[serde(default)]
    pub price_change_percentage: f64,
    #[serde(default)]
    pub total_listings: usize,
    #[serde(default)]
    pub hot_areas: Vec<String>,
    #[serde(default)]
    pub ai_insights: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationSearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSearchResponse {
    #[serde(default)]
    pub locations: Vec<LocationMatch>,
    #[serde(default)]
    pub total_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationMatch {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// A rental platform aggregated by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub name: String,
    pub description: String,
    pub focus: String,
    #[serde(default)]
    pub special_features: Vec<String>,
}

/// Application info served at the root endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppInfo {
    pub application_name: String,
    pub version: String,
    #[serde(default)]
    pub total_properties: usize,
    #[serde(default)]
    pub available_platforms: Vec<PlatformInfo>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub data_statistics: Option<DataStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStatistics {
    #[serde(default)]
    pub total_properties: usize,
    #[serde(default)]
    pub total_platforms: usize,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Aggregate statistics payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_properties: usize,
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub data_source: String,
    #[serde(default)]
    pub status: String,
}

/// Uniform envelope every operation resolves to, real or substituted.
/// Callers never branch on the payload's shape to tell the two apart.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub data: T,
    pub platform: String,
    pub timestamp: DateTime<Utc>,
    pub data_source: Option<String>,
    pub total: Option<usize>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
            platform: "google-cloud".to_string(),
            timestamp: Utc::now(),
            data_source: None,
            total: None,
        }
    }

    pub fn with_data_source(mut self, source: impl Into<String>) -> Self {
        self.data_source = Some(source.into());
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}
