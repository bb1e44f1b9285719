use estate_copilot::api::{ApiClient, ClientConfig};
use estate_copilot::format::{display_location, format_area, format_price};
use estate_copilot::models::SearchQuery;
use estate_copilot::refine;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let query: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = if query.is_empty() {
        "2bhk bangalore".to_string()
    } else {
        query
    };

    info!("🏠 Estate Co-Pilot");
    info!("==================");

    let client = ApiClient::with_config(ClientConfig::from_env())?;

    let status = client.check_status().await;
    if status.is_online {
        info!("Backend online at {}", client.base_url());
    } else {
        warn!(
            "Backend offline ({}); sample data will be shown",
            status.error.as_deref().unwrap_or("unknown cause")
        );
    }

    info!("Searching for \"{}\"...", query);
    let outcome = client
        .search(&SearchQuery::new(query.clone()).with_limit(50))
        .await;
    if outcome.is_fallback() {
        warn!("Showing sample listings, not live results");
    }

    let results = refine::refine(outcome.into_data().data.results, &query);
    info!("\n✅ {} matching properties\n", results.total);

    for (i, property) in results.properties.iter().enumerate() {
        println!(
            "{}. {} ({})",
            i + 1,
            property.name,
            format_price(property.price, &property.currency)
        );
        println!(
            "   {} BHK · {} · {}",
            property.bedrooms,
            format_area(property.area_sqft),
            display_location(property)
        );
        if let Some(summary) = &property.ai_summary {
            println!("   {}", summary);
        }
        println!("   ID: {}", property.id);
        println!();
    }

    Ok(())
}
