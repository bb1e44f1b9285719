//! Display formatting for listing fields.
//!
//! Every helper degrades to a readable placeholder on missing or invalid
//! input; a half-populated record must still render.

use chrono::Utc;

use crate::models::Property;

/// Render a price for display. INR amounts use lakh/crore notation above
/// one lakh and Indian digit grouping below; other currencies get a
/// currency-code prefix. Missing or non-finite values yield a placeholder.
pub fn format_price(price: Option<f64>, currency: &str) -> String {
    let price = match price {
        Some(p) if p.is_finite() => p,
        _ => return "Price not available".to_string(),
    };

    if currency == "INR" {
        if price >= 10_000_000.0 {
            return format!("₹{:.2} Cr", price / 10_000_000.0);
        }
        if price >= 100_000.0 {
            return format!("₹{:.2} L", price / 100_000.0);
        }
        return format!("₹{}", group_indian(price.round() as u64));
    }

    format!("{currency} {}", group_thousands(price.round() as u64))
}

/// Render a floor area in square feet, or a placeholder.
pub fn format_area(area_sqft: Option<f64>) -> String {
    match area_sqft {
        Some(a) if a.is_finite() => format!("{} sq ft", group_thousands(a.round() as u64)),
        _ => "Area not available".to_string(),
    }
}

/// Human-readable location line, preferring the first-class area/city
/// fields and falling back to the nested location details.
pub fn display_location(property: &Property) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !property.area.is_empty() {
        parts.push(&property.area);
    }
    if !property.city.is_empty() {
        parts.push(&property.city);
    }
    if parts.is_empty() {
        if let Some(location) = &property.location {
            for field in [&location.locality, &location.city, &location.state] {
                if let Some(value) = field {
                    if !value.is_empty() {
                        parts.push(value);
                    }
                }
            }
        }
    }
    if parts.is_empty() {
        return "Location not specified".to_string();
    }
    parts.join(", ")
}

/// Fresh identifier for a chat session.
pub fn generate_session_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let suffix = RandomState::new().build_hasher().finish();
    format!("session_{}_{:09x}", Utc::now().timestamp_millis(), suffix & 0xfff_ffff_ff)
}

/// Western grouping: 1,234,567.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Indian grouping: last three digits, then pairs (12,34,567).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_chars: Vec<char> = head.chars().collect();
    let mut i = head_chars.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(head_chars[start..i].iter().collect::<String>());
        i = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationDetails, RawProperty};

    #[test]
    fn missing_price_yields_placeholder() {
        assert_eq!(format_price(None, "INR"), "Price not available");
        assert_eq!(format_price(Some(f64::NAN), "INR"), "Price not available");
    }

    #[test]
    fn inr_lakh_and_crore_notation() {
        assert_eq!(format_price(Some(4_500_000.0), "INR"), "₹45.00 L");
        assert_eq!(format_price(Some(100_000_000.0), "INR"), "₹10.00 Cr");
        assert_eq!(format_price(Some(10_000_000.0), "INR"), "₹1.00 Cr");
    }

    #[test]
    fn small_inr_amounts_use_indian_grouping() {
        assert_eq!(format_price(Some(45_000.0), "INR"), "₹45,000");
        assert_eq!(format_price(Some(999.0), "INR"), "₹999");
    }

    #[test]
    fn other_currencies_get_code_prefix() {
        assert_eq!(format_price(Some(4_500.0), "USD"), "USD 4,500");
    }

    #[test]
    fn area_formatting() {
        assert_eq!(format_area(None), "Area not available");
        assert_eq!(format_area(Some(f64::NAN)), "Area not available");
        assert_eq!(format_area(Some(1200.0)), "1,200 sq ft");
        assert_eq!(format_area(Some(600.0)), "600 sq ft");
    }

    #[test]
    fn indian_grouping_pairs_above_thousands() {
        assert_eq!(group_indian(1_234_567), "12,34,567");
        assert_eq!(group_indian(45_000), "45,000");
        assert_eq!(group_indian(100), "100");
    }

    #[test]
    fn location_prefers_first_class_fields() {
        let p = crate::models::Property::from(RawProperty {
            id: Some("A".to_string()),
            area: Some("Koramangala".to_string()),
            city: Some("Bangalore".to_string()),
            ..Default::default()
        });
        assert_eq!(display_location(&p), "Koramangala, Bangalore");
    }

    #[test]
    fn location_falls_back_to_nested_details() {
        let p = crate::models::Property::from(RawProperty {
            id: Some("A".to_string()),
            geo_location_details: Some(LocationDetails {
                locality: Some("Baner".to_string()),
                city: Some("Pune".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(display_location(&p), "Baner, Pune");
    }

    #[test]
    fn empty_record_gets_placeholder_location() {
        let p = crate::models::Property::from(RawProperty {
            id: Some("A".to_string()),
            ..Default::default()
        });
        assert_eq!(display_location(&p), "Location not specified");
    }

    #[test]
    fn session_ids_are_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert!(a.starts_with("session_"));
        assert_ne!(a, b);
    }
}
