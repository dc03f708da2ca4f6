const ENGAGEMENT_TITLE_CHARS: usize = 20;
const UNKNOWN_SOURCE: &str = "Unknown";

/// Everything the dashboard page renders, in one payload.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Dashboard {
    pub(crate) hacker_news_stories: Vec<crate::hn_api::Story>,
    pub(crate) tech_news_items: Vec<crate::tech_news::TechNewsItem>,
    pub(crate) stats: Stats,
    pub(crate) source_distribution: Vec<SourceCount>,
    pub(crate) engagement: Vec<EngagementPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Stats {
    pub(crate) total_stories: usize,
    pub(crate) total_comments: u64,
    pub(crate) average_score: u64,
    pub(crate) total_tech_news: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct SourceCount {
    pub(crate) source: String,
    pub(crate) count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct EngagementPoint {
    pub(crate) title: String,
    pub(crate) comments: u64,
    pub(crate) score: u64,
}

impl Dashboard {
    /// Statistics, source distribution and engagement cover all the data,
    /// `search` only narrows the two item lists.
    pub(crate) fn build(
        stories: Vec<crate::hn_api::Story>,
        tech_news: Vec<crate::tech_news::TechNewsItem>,
        search: Option<&str>,
    ) -> Self {
        let stats = Stats::new(&stories, &tech_news);
        let source_distribution = source_distribution(&tech_news);
        let engagement = stories.iter().map(EngagementPoint::from).collect();

        let (hacker_news_stories, tech_news_items) = match search.map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                (
                    stories
                        .into_iter()
                        .filter(|story| story_matches(story, &term))
                        .collect(),
                    tech_news
                        .into_iter()
                        .filter(|item| tech_news_matches(item, &term))
                        .collect(),
                )
            }
            _ => (stories, tech_news),
        };

        Self {
            hacker_news_stories,
            tech_news_items,
            stats,
            source_distribution,
            engagement,
        }
    }
}

impl Stats {
    fn new(
        stories: &[crate::hn_api::Story],
        tech_news: &[crate::tech_news::TechNewsItem],
    ) -> Self {
        let total_stories = stories.len();
        // Scores come from upstream, keep the sum out of u64 range trouble.
        let total_score: u128 = stories.iter().map(|s| u128::from(s.score)).sum();

        // Rounded half up, same as the page's Math.round.
        let average_score = match total_stories as u128 {
            0 => 0,
            n => u64::try_from((total_score + n / 2) / n).unwrap_or(u64::MAX),
        };

        Self {
            total_stories,
            total_comments: stories
                .iter()
                .fold(0u64, |total, s| total.saturating_add(s.comment_count)),
            average_score,
            total_tech_news: tech_news.len(),
        }
    }
}

impl From<&crate::hn_api::Story> for EngagementPoint {
    fn from(story: &crate::hn_api::Story) -> Self {
        let title = if story.title.chars().count() > ENGAGEMENT_TITLE_CHARS {
            let short: String = story.title.chars().take(ENGAGEMENT_TITLE_CHARS).collect();
            format!("{short}...")
        } else {
            story.title.clone()
        };

        Self {
            title,
            comments: story.comment_count,
            score: story.score,
        }
    }
}

/// Item count per source, in order of first appearance.
fn source_distribution(items: &[crate::tech_news::TechNewsItem]) -> Vec<SourceCount> {
    let mut counts: Vec<SourceCount> = Vec::new();

    for item in items {
        let source = if item.source.is_empty() {
            UNKNOWN_SOURCE
        } else {
            item.source.as_str()
        };

        match counts.iter_mut().find(|c| c.source == source) {
            Some(count) => count.count += 1,
            None => counts.push(SourceCount {
                source: source.to_string(),
                count: 1,
            }),
        }
    }

    counts
}

// `term` is already lowercased.
fn story_matches(story: &crate::hn_api::Story, term: &str) -> bool {
    story.title.to_lowercase().contains(term)
        || story
            .author
            .as_ref()
            .is_some_and(|author| author.to_lowercase().contains(term))
}

fn tech_news_matches(item: &crate::tech_news::TechNewsItem, term: &str) -> bool {
    item.title.to_lowercase().contains(term) || item.source.to_lowercase().contains(term)
}
