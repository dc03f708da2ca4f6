#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub(crate) struct TechNewsItem {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) source: String,
    pub(crate) summary: String,
}

#[derive(Debug, serde::Deserialize)]
struct TechNewsFeed {
    items: Vec<TechNewsItem>,
}

/// Tech news for the dashboard. Uses the live feed at `feed_url` when one is
/// configured, otherwise the built-in curated list.
pub(crate) async fn list_tech_news(
    client: &reqwest::Client,
    feed_url: Option<&str>,
) -> Result<Vec<TechNewsItem>, crate::error::SourceUnavailable> {
    let Some(feed_url) = feed_url else {
        return Ok(curated_tech_news());
    };

    let feed: TechNewsFeed = crate::http::get_json(client, feed_url.to_string()).await?;
    let num_received = feed.items.len();

    let mut seen = std::collections::HashSet::with_capacity(num_received);
    let items: Vec<TechNewsItem> = feed
        .items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    tracing::info!(
        num_items = items.len(),
        num_duplicates_removed = num_received - items.len(),
        "Got tech news feed"
    );

    Ok(items)
}

fn curated_tech_news() -> Vec<TechNewsItem> {
    vec![
        TechNewsItem {
            id: "technews-1".to_string(),
            title: "New AI chip revolutionizes computing".to_string(),
            url: "https://example.com/ai-chip-news".to_string(),
            source: "TechCrunch".to_string(),
            summary: "A quick rundown on the latest AI hardware breakthrough.".to_string(),
        },
        TechNewsItem {
            id: "technews-2".to_string(),
            title: "5 Cloud trends to watch in 2025".to_string(),
            url: "https://example.com/cloud-trends".to_string(),
            source: "The Verge".to_string(),
            summary: "A deep dive into the future of cloud computing.".to_string(),
        },
    ]
}
