//! Static fallback dataset used whenever the backend is unreachable.
//!
//! The three records are fully populated so every presentation surface can
//! render them without hitting a missing-field path. Search-style fallbacks
//! filter this set against the caller's query so the substitute data still
//! responds visibly to input.

use chrono::Utc;

use crate::models::{
    ApiEnvelope, AppInfo, DataStatistics, FilteredSearchRequest, Furnishing, GeoPoint,
    HealthStatus, LocationDetails, NearbyPlace, PlatformInfo, Property, SearchQuery,
    SearchResponse, StatsSnapshot,
};

/// The fixed sample listings.
pub fn sample_properties() -> Vec<Property> {
    vec![
        Property {
            id: "MOCK001".to_string(),
            name: "Serenity Heights 2BHK".to_string(),
            description: "Modern 2BHK flat with excellent connectivity and premium amenities"
                .to_string(),
            property_type: "apartment".to_string(),
            bedrooms: 2,
            bathrooms: Some(2),
            area_sqft: Some(1200.0),
            carpet_area_sqft: Some(1050.0),
            price: Some(4_500_000.0),
            price_per_sqft: Some(3750.0),
            currency: "INR".to_string(),
            furnishing: Some(Furnishing::SemiFurnished),
            area: "Koramangala".to_string(),
            city: "Bangalore".to_string(),
            state: "Karnataka".to_string(),
            country: Some("India".to_string()),
            amenities: vec![
                "parking".to_string(),
                "security".to_string(),
                "gym".to_string(),
                "swimming_pool".to_string(),
                "garden".to_string(),
                "lift".to_string(),
                "power_backup".to_string(),
                "water_supply".to_string(),
                "metro_station".to_string(),
            ],
            platform_name: "MagicBricks".to_string(),
            platform_description: "India's leading real estate platform".to_string(),
            platform_focus: "Residential and commercial properties".to_string(),
            special_features: vec![
                "AI-powered search".to_string(),
                "Virtual tours".to_string(),
                "Price trends".to_string(),
            ],
            target_audience: vec!["families".to_string(), "professionals".to_string()],
            contact_email: Some("contact@magicbricks.com".to_string()),
            contact_phone: Some("+91-9876543210".to_string()),
            geo_location: Some(GeoPoint {
                lat: 12.9716,
                lon: 77.5946,
            }),
            location: Some(LocationDetails {
                address: Some("123 Serenity Heights, Koramangala".to_string()),
                locality: Some("Koramangala".to_string()),
                city: Some("Bangalore".to_string()),
                state: Some("Karnataka".to_string()),
                pincode: Some("560034".to_string()),
            }),
            nearby_places: vec![
                NearbyPlace {
                    name: "Phoenix MarketCity".to_string(),
                    category: "Shopping Mall".to_string(),
                    distance_km: 1.2,
                    rating: 4.5,
                },
                NearbyPlace {
                    name: "Koramangala Metro Station".to_string(),
                    category: "Metro".to_string(),
                    distance_km: 0.8,
                    rating: 4.3,
                },
            ],
            image_urls: vec![
                "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800".to_string(),
            ],
            ai_summary: Some(
                "Excellent investment opportunity in prime Koramangala location with modern amenities"
                    .to_string(),
            ),
            relevance_score: Some(0.95),
            investment_score: Some(0.88),
        },
        Property {
            id: "MOCK002".to_string(),
            name: "Green Valley Villa".to_string(),
            description: "Spacious 3BHK villa with private garden and premium finishes".to_string(),
            property_type: "villa".to_string(),
            bedrooms: 3,
            bathrooms: Some(3),
            area_sqft: Some(2500.0),
            carpet_area_sqft: Some(2200.0),
            price: Some(8_500_000.0),
            price_per_sqft: Some(3400.0),
            currency: "INR".to_string(),
            furnishing: Some(Furnishing::Furnished),
            area: "Whitefield".to_string(),
            city: "Bangalore".to_string(),
            state: "Karnataka".to_string(),
            country: Some("India".to_string()),
            amenities: vec![
                "parking".to_string(),
                "security".to_string(),
                "gym".to_string(),
                "swimming_pool".to_string(),
                "garden".to_string(),
                "power_backup".to_string(),
                "water_supply".to_string(),
            ],
            platform_name: "99acres".to_string(),
            platform_description: "Premier real estate portal".to_string(),
            platform_focus: "All property types".to_string(),
            special_features: vec![
                "Detailed listings".to_string(),
                "Market insights".to_string(),
                "Agent network".to_string(),
            ],
            target_audience: vec!["families".to_string(), "professionals".to_string()],
            contact_email: Some("contact@99acres.com".to_string()),
            contact_phone: Some("+91-9876543211".to_string()),
            geo_location: Some(GeoPoint {
                lat: 12.9352,
                lon: 77.6245,
            }),
            location: Some(LocationDetails {
                address: Some("456 Green Valley, Whitefield".to_string()),
                locality: Some("Whitefield".to_string()),
                city: Some("Bangalore".to_string()),
                state: Some("Karnataka".to_string()),
                pincode: Some("560066".to_string()),
            }),
            nearby_places: vec![
                NearbyPlace {
                    name: "Phoenix MarketCity Whitefield".to_string(),
                    category: "Shopping Mall".to_string(),
                    distance_km: 2.1,
                    rating: 4.4,
                },
                NearbyPlace {
                    name: "ITPL Metro Station".to_string(),
                    category: "Metro".to_string(),
                    distance_km: 1.5,
                    rating: 4.2,
                },
            ],
            image_urls: vec![
                "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?w=800".to_string(),
            ],
            ai_summary: Some(
                "Premium villa in growing Whitefield area with excellent connectivity to IT hubs"
                    .to_string(),
            ),
            relevance_score: Some(0.92),
            investment_score: Some(0.85),
        },
        Property {
            id: "MOCK003".to_string(),
            name: "Urban Nest Studio".to_string(),
            description: "Compact studio apartment perfect for young professionals".to_string(),
            property_type: "apartment".to_string(),
            bedrooms: 1,
            bathrooms: Some(1),
            area_sqft: Some(600.0),
            carpet_area_sqft: Some(520.0),
            price: Some(2_800_000.0),
            price_per_sqft: Some(4667.0),
            currency: "INR".to_string(),
            furnishing: Some(Furnishing::Unfurnished),
            area: "Indiranagar".to_string(),
            city: "Bangalore".to_string(),
            state: "Karnataka".to_string(),
            country: Some("India".to_string()),
            amenities: vec![
                "parking".to_string(),
                "security".to_string(),
                "gym".to_string(),
                "garden".to_string(),
                "lift".to_string(),
                "power_backup".to_string(),
                "water_supply".to_string(),
                "metro_station".to_string(),
            ],
            platform_name: "Housing.com".to_string(),
            platform_description: "India's fastest growing real estate platform".to_string(),
            platform_focus: "Residential properties".to_string(),
            special_features: vec![
                "Verified listings".to_string(),
                "Price trends".to_string(),
                "Virtual tours".to_string(),
            ],
            target_audience: vec!["professionals".to_string(), "singles".to_string()],
            contact_email: Some("contact@housing.com".to_string()),
            contact_phone: Some("+91-9876543212".to_string()),
            geo_location: Some(GeoPoint {
                lat: 12.9141,
                lon: 77.6442,
            }),
            location: Some(LocationDetails {
                address: Some("789 Urban Nest, Indiranagar".to_string()),
                locality: Some("Indiranagar".to_string()),
                city: Some("Bangalore".to_string()),
                state: Some("Karnataka".to_string()),
                pincode: Some("560038".to_string()),
            }),
            nearby_places: vec![
                NearbyPlace {
                    name: "Indiranagar Metro Station".to_string(),
                    category: "Metro".to_string(),
                    distance_km: 0.5,
                    rating: 4.6,
                },
                NearbyPlace {
                    name: "100 Feet Road".to_string(),
                    category: "Commercial".to_string(),
                    distance_km: 0.3,
                    rating: 4.4,
                },
            ],
            image_urls: vec![
                "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800".to_string(),
            ],
            ai_summary: Some(
                "Affordable studio in prime Indiranagar location with excellent metro connectivity"
                    .to_string(),
            ),
            relevance_score: Some(0.88),
            investment_score: Some(0.82),
        },
    ]
}

/// Filter the sample set with a case-insensitive substring match over name,
/// description, type, city, and area, then truncate to `limit`. A query of
/// "all" (or empty) passes everything through.
pub fn filter_by_query(query: &str, limit: usize) -> Vec<Property> {
    let needle = query.trim().to_lowercase();
    let mut properties = sample_properties();
    if !needle.is_empty() && needle != "all" {
        properties.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.property_type.to_lowercase().contains(&needle)
                || p.city.to_lowercase().contains(&needle)
                || p.area.to_lowercase().contains(&needle)
        });
    }
    properties.truncate(limit);
    properties
}

/// Same-shape substitute for a failed search call.
pub fn search_response(request: &SearchQuery) -> ApiEnvelope<SearchResponse> {
    let results = filter_by_query(&request.query, request.limit);
    let total = results.len();
    ApiEnvelope::success(SearchResponse {
        query: request.query.clone(),
        results,
        total,
        platform: "google-cloud".to_string(),
        search_type: request.search_type.to_string(),
        data_source: "mock_data".to_string(),
        ai_features: None,
    })
    .with_data_source("mock_data")
    .with_total(total)
}

/// Substitute for the legacy filtered search, honoring the structured
/// filters the caller supplied.
pub fn filtered_search_properties(request: &FilteredSearchRequest) -> Vec<Property> {
    let mut properties = sample_properties();
    if let Some(property_type) = request.property_type.as_deref() {
        if property_type != "all" {
            properties.retain(|p| p.property_type == property_type);
        }
    }
    if let Some(bedrooms) = request.bedrooms {
        properties.retain(|p| p.bedrooms == bedrooms);
    }
    if let Some(min) = request.price_min {
        properties.retain(|p| p.price.map_or(false, |price| price >= min));
    }
    if let Some(max) = request.price_max {
        properties.retain(|p| p.price.map_or(false, |price| price <= max));
    }
    properties.truncate(request.size.unwrap_or(10));
    properties
}

/// Substitute for a failed bulk listing call.
pub fn listing_response(limit: usize) -> ApiEnvelope<Vec<Property>> {
    let mut properties = sample_properties();
    properties.truncate(limit);
    let total = properties.len();
    ApiEnvelope::success(properties)
        .with_data_source("mock_data")
        .with_total(total)
}

/// Substitute for a failed single-property lookup. Unknown ids resolve to
/// the first sample so detail views always have something to render.
pub fn property_response(property_id: &str) -> ApiEnvelope<Property> {
    let mut properties = sample_properties();
    let position = properties.iter().position(|p| p.id == property_id);
    let property = properties.swap_remove(position.unwrap_or(0));
    ApiEnvelope::success(property).with_data_source("mock_data")
}

fn sample_platforms() -> Vec<PlatformInfo> {
    vec![
        PlatformInfo {
            name: "MagicBricks".to_string(),
            description: "India's leading real estate platform".to_string(),
            focus: "Residential and commercial properties".to_string(),
            special_features: vec![
                "AI-powered search".to_string(),
                "Virtual tours".to_string(),
                "Price trends".to_string(),
            ],
        },
        PlatformInfo {
            name: "99acres".to_string(),
            description: "Premier real estate portal".to_string(),
            focus: "All property types".to_string(),
            special_features: vec![
                "Detailed listings".to_string(),
                "Market insights".to_string(),
                "Agent network".to_string(),
            ],
        },
    ]
}

/// Substitute for a failed app-info call.
pub fn app_info_response() -> ApiEnvelope<AppInfo> {
    ApiEnvelope::success(AppInfo {
        application_name: "Real Estate Co-Pilot".to_string(),
        version: "1.0.0".to_string(),
        total_properties: sample_properties().len(),
        available_platforms: sample_platforms(),
        status: "operational".to_string(),
    })
    .with_data_source("mock_data")
}

/// Substitute for a failed health check.
pub fn health_response() -> ApiEnvelope<HealthStatus> {
    ApiEnvelope::success(HealthStatus {
        status: "healthy".to_string(),
        data_statistics: Some(DataStatistics {
            total_properties: sample_properties().len(),
            total_platforms: sample_platforms().len(),
            last_updated: Some(Utc::now()),
        }),
    })
    .with_data_source("mock_data")
}

/// Substitute for a failed stats call.
pub fn stats_response() -> ApiEnvelope<StatsSnapshot> {
    ApiEnvelope::success(StatsSnapshot {
        total_properties: sample_properties().len(),
        property_types: vec![
            "apartment".to_string(),
            "studio".to_string(),
            "pg".to_string(),
            "house".to_string(),
            "villa".to_string(),
            "commercial".to_string(),
        ],
        platforms: vec![
            "MagicBricks".to_string(),
            "99acres".to_string(),
            "Housing.com".to_string(),
        ],
        cities: vec![
            "Mumbai".to_string(),
            "Delhi".to_string(),
            "Bangalore".to_string(),
            "Pune".to_string(),
            "Chennai".to_string(),
            "Hyderabad".to_string(),
        ],
        platform: "google-cloud".to_string(),
        data_source: "mock_data".to_string(),
        status: "success".to_string(),
    })
    .with_data_source("mock_data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_fully_populated() {
        for p in sample_properties() {
            assert!(!p.id.is_empty());
            assert!(p.price.is_some());
            assert!(p.area_sqft.is_some());
            assert!(p.furnishing.is_some());
            assert!(p.location.is_some());
            assert!(p.ai_summary.is_some());
            assert!(p.relevance_score.is_some());
            assert!(p.investment_score.is_some());
            assert!(!p.nearby_places.is_empty());
            assert!(!p.image_urls.is_empty());
        }
    }

    #[test]
    fn query_filter_matches_area_case_insensitively() {
        let hits = filter_by_query("KORAMANGALA", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "MOCK001");
    }

    #[test]
    fn query_filter_passes_everything_for_all() {
        assert_eq!(filter_by_query("all", 10).len(), 3);
        assert_eq!(filter_by_query("", 10).len(), 3);
    }

    #[test]
    fn query_filter_respects_limit() {
        assert_eq!(filter_by_query("bangalore", 2).len(), 2);
    }

    #[test]
    fn search_fallback_reports_filtered_total() {
        let request = SearchQuery::new("villa");
        let envelope = search_response(&request);
        assert_eq!(envelope.data.total, envelope.data.results.len());
        assert_eq!(envelope.data.data_source, "mock_data");
        assert_eq!(envelope.data_source.as_deref(), Some("mock_data"));
    }

    #[test]
    fn filtered_search_applies_structured_filters() {
        let request = FilteredSearchRequest {
            query: String::new(),
            bedrooms: Some(3),
            ..Default::default()
        };
        let hits = filtered_search_properties(&request);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "MOCK002");

        let request = FilteredSearchRequest {
            query: String::new(),
            price_max: Some(3_000_000.0),
            ..Default::default()
        };
        let hits = filtered_search_properties(&request);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "MOCK003");
    }

    #[test]
    fn unknown_property_id_falls_back_to_first_sample() {
        let envelope = property_response("nope");
        assert_eq!(envelope.data.id, "MOCK001");
        let envelope = property_response("MOCK003");
        assert_eq!(envelope.data.id, "MOCK003");
    }
}
