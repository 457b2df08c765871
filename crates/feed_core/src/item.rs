use serde::Deserialize;

/// Fixed retrieval page size; the feed has no pagination.
pub const PAGE_SIZE: u32 = 20;

/// A scored piece of content as delivered by the backend.
///
/// Scores are nominally in `[0, 10]`; out-of-range values are tolerated and
/// only degrade display derivations. The feedback counters are an optimistic
/// local mirror, the backend stays authoritative.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub source: String,
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source_url: String,
    /// ISO-8601 timestamp, kept as delivered; parsed only for display.
    pub published_date: String,
    pub cognitive_utility_score: f64,
    pub knowledge_density_score: f64,
    pub credibility_score: f64,
    /// Lower is better; displayed inverted as focus = 10 - distraction.
    pub distraction_score: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub evidence_links: Vec<String>,
    #[serde(default)]
    pub helpful_votes: u32,
    #[serde(default)]
    pub unhelpful_votes: u32,
    #[serde(default)]
    pub expand_count: u32,
}

/// Lightweight signal recorded against a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Helpful,
    Unhelpful,
    Expand,
}

impl FeedbackAction {
    /// Wire name of the action, as the backend expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackAction::Helpful => "helpful",
            FeedbackAction::Unhelpful => "unhelpful",
            FeedbackAction::Expand => "expand",
        }
    }
}

/// Retrieval parameters derived from the current filter controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedQuery {
    pub limit: u32,
    pub min_score: f64,
    pub serendipity: bool,
    pub diversity: bool,
}
