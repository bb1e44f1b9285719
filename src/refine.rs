//! Client-side post-processing of search results.
//!
//! The backend's ranking is taken as a starting point only: results are
//! deduplicated, re-filtered against the original query text, and reordered
//! by relevance score. The retained count supersedes the server-reported
//! total everywhere it is shown.

use std::collections::HashSet;

use crate::models::Property;

/// Domain abbreviations treated as equivalent during token matching.
const SYNONYMS: &[(&str, &str)] = &[
    ("bhk", "bedroom"),
    ("bedroom", "bhk"),
    ("pg", "paying guest"),
    ("paying guest", "pg"),
    ("apt", "apartment"),
    ("apartment", "apt"),
    ("flat", "apartment"),
    ("apartment", "flat"),
];

/// Refined result list with its authoritative total.
#[derive(Debug, Clone)]
pub struct RefinedResults {
    pub properties: Vec<Property>,
    /// Count after local filtering, not the server's raw total.
    pub total: usize,
}

/// Deduplicate, re-filter against `query`, and rank by relevance score.
pub fn refine(properties: Vec<Property>, query: &str) -> RefinedResults {
    let mut seen = HashSet::new();
    let mut unique: Vec<Property> = properties
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();

    let needle = query.trim().to_lowercase();
    let terms: Vec<&str> = needle.split_whitespace().collect();
    if !terms.is_empty() {
        unique.retain(|p| matches_query(p, &needle, &terms));
    }

    // Stable sort keeps the server's relative order among ties.
    unique.sort_by(|a, b| {
        let score_a = a.relevance_score.unwrap_or(0.0);
        let score_b = b.relevance_score.unwrap_or(0.0);
        score_b.total_cmp(&score_a)
    });

    let total = unique.len();
    RefinedResults {
        properties: unique,
        total,
    }
}

/// Retained when the full query appears verbatim in the blob, or when every
/// token (or one of its synonym variants) appears as a substring.
fn matches_query(property: &Property, full_query: &str, terms: &[&str]) -> bool {
    let blob = searchable_blob(property);
    if blob.contains(full_query) {
        return true;
    }
    terms
        .iter()
        .all(|term| variants(term).iter().any(|v| blob.contains(v.as_str())))
}

/// Case-folded concatenation of every field worth matching against.
fn searchable_blob(property: &Property) -> String {
    let mut parts: Vec<&str> = vec![
        &property.name,
        &property.description,
        &property.property_type,
        &property.city,
        &property.area,
        &property.platform_name,
    ];
    parts.extend(property.amenities.iter().map(String::as_str));
    parts.extend(property.target_audience.iter().map(String::as_str));
    parts.extend(property.special_features.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

fn variants(term: &str) -> Vec<String> {
    let mut out = vec![term.to_string()];
    for (from, to) in SYNONYMS {
        if term.contains(from) {
            let replaced = term.replace(from, to);
            if !out.contains(&replaced) {
                out.push(replaced);
            }
        }
    }
    out
}
