/// Item as returned by `item/{id}.json`. Everything is optional since the
/// endpoint serves every item type, and deleted items come back with most
/// fields missing.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub(crate) struct RawItem {
    id: Option<u64>,
    title: Option<String>,
    url: Option<String>,
    by: Option<String>,
    score: Option<u64>,
    descendants: Option<u64>,
    time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Story {
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) url: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) score: u64,
    pub(crate) comment_count: u64,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub(crate) created_at: chrono::DateTime<chrono::Utc>,
}

fn serialize_iso_millis<S>(
    time: &chrono::DateTime<chrono::Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&time.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

impl RawItem {
    /// Returns `None` when the item has no title or no usable creation time,
    /// i.e. it should be treated as if it did not exist.
    fn into_story(self, requested_id: u64) -> Option<Story> {
        let title = self.title?;
        let created_at = chrono::DateTime::from_timestamp_millis(self.time?.checked_mul(1000)?)?;

        Some(Story {
            id: self.id.unwrap_or(requested_id),
            title,
            url: self.url.filter(|url| !url.is_empty()),
            author: self.by.filter(|by| !by.is_empty()),
            score: self.score.unwrap_or(0),
            comment_count: self.descendants.unwrap_or(0),
            created_at,
        })
    }
}

/// The full ranked list of top story ids, rank 0 first.
pub(crate) async fn list_top_story_ids(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<u64>, crate::error::SourceUnavailable> {
    let ids: Vec<u64> =
        crate::http::get_json(client, format!("{base_url}/topstories.json")).await?;

    tracing::info!(num_ids = ids.len(), "Got top story ids");

    Ok(ids)
}

/// `Ok(None)` means the item does not exist (null or empty body, or missing
/// title/time).
pub(crate) async fn fetch_item(
    client: &reqwest::Client,
    base_url: &str,
    id: u64,
) -> Result<Option<Story>, crate::error::SourceUnavailable> {
    let item: Option<RawItem> =
        crate::http::get_optional_json(client, format!("{base_url}/item/{id}.json")).await?;

    Ok(item.and_then(|item| item.into_story(id)))
}

/// Fetches the first `limit` top stories in rank order.
///
/// Items are requested one at a time so the output keeps upstream rank order.
/// Absent items are skipped and not replaced, so the result can be shorter
/// than `limit`. Any request failure aborts the whole batch.
pub(crate) async fn fetch_top_stories(
    client: &reqwest::Client,
    base_url: &str,
    limit: usize,
) -> Result<Vec<Story>, crate::error::SourceUnavailable> {
    if limit == 0 {
        tracing::info!("Story limit is 0, nothing to fetch");
        return Ok(Vec::new());
    }

    let ids = list_top_story_ids(client, base_url).await?;
    let num_to_fetch = limit.min(ids.len());

    let mut stories: Vec<Story> = Vec::with_capacity(num_to_fetch);
    let mut requested = std::collections::HashSet::with_capacity(num_to_fetch);

    for (rank, id) in ids.into_iter().take(num_to_fetch).enumerate() {
        if !requested.insert(id) {
            tracing::warn!(id, rank, "Duplicate story id in top stories, skipping");
            continue;
        }

        match fetch_item(client, base_url, id).await? {
            Some(story) if stories.iter().any(|s| s.id == story.id) => {
                tracing::warn!(id, rank, story_id = story.id, "Story already fetched, skipping");
            }
            Some(story) => {
                tracing::debug!(id, rank, title = story.title, "Got story");
                stories.push(story);
            }
            None => tracing::warn!(id, rank, "Story absent upstream, skipping"),
        }
    }

    tracing::info!(
        num_requested = num_to_fetch,
        num_stories = stories.len(),
        "Fetched top stories"
    );

    Ok(stories)
}
