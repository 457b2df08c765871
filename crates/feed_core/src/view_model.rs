use chrono::DateTime;

use crate::item::ContentItem;
use crate::state::FilterControls;

/// Number of tags shown on a card.
pub const MAX_CARD_TAGS: usize = 5;
/// Character cap for the summary fallback derived from the body.
pub const SUMMARY_FALLBACK_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedViewModel {
    pub loading: bool,
    pub controls: FilterControls,
    pub cards: Vec<CardView>,
    pub upload: Option<UploadView>,
    pub dirty: bool,
}

/// Presentation-ready projection of one content item.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub source: String,
    pub published_label: String,
    pub summary_text: String,
    /// Full body, shown when the card is expanded.
    pub content: String,
    pub tags: Vec<String>,
    pub evidence_links: Vec<String>,
    pub source_url: Option<String>,
    pub utility_score: f64,
    pub utility_bar_percent: f64,
    pub knowledge_score: f64,
    pub knowledge_tone: ScoreTone,
    pub credibility_score: f64,
    pub credibility_tone: ScoreTone,
    pub focus_score: f64,
    pub focus_tone: ScoreTone,
    pub helpful_votes: u32,
    pub unhelpful_votes: u32,
    pub expand_count: u32,
}

/// Display bucket for a 0-10 score: strong >= 8, moderate >= 6, weak below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadView {
    pub title: String,
    pub content: String,
    pub source: String,
    pub submitting: bool,
    pub error: Option<String>,
}

pub fn score_tone(score: f64) -> ScoreTone {
    if score >= 8.0 {
        ScoreTone::Strong
    } else if score >= 6.0 {
        ScoreTone::Moderate
    } else {
        ScoreTone::Weak
    }
}

/// Width of the cognitive-utility bar as a percentage.
///
/// Clamped to `[10, 100]` so malformed scores still render a valid bar.
pub fn utility_bar_percent(score: f64) -> f64 {
    ((score / 10.0) * 100.0).clamp(10.0, 100.0)
}

pub(crate) fn card_view(item: &ContentItem) -> CardView {
    let focus_score = (10.0 - item.distraction_score).clamp(0.0, 10.0);
    CardView {
        id: item.id.clone(),
        title: item.title.clone(),
        source: item.source.clone(),
        published_label: published_label(&item.published_date),
        summary_text: summary_text(item),
        content: item.content.clone(),
        tags: item.tags.iter().take(MAX_CARD_TAGS).cloned().collect(),
        evidence_links: item.evidence_links.clone(),
        source_url: if item.source_url.is_empty() {
            None
        } else {
            Some(item.source_url.clone())
        },
        utility_score: item.cognitive_utility_score,
        utility_bar_percent: utility_bar_percent(item.cognitive_utility_score),
        knowledge_score: item.knowledge_density_score,
        knowledge_tone: score_tone(item.knowledge_density_score),
        credibility_score: item.credibility_score,
        credibility_tone: score_tone(item.credibility_score),
        focus_score,
        focus_tone: score_tone(focus_score),
        helpful_votes: item.helpful_votes,
        unhelpful_votes: item.unhelpful_votes,
        expand_count: item.expand_count,
    }
}

/// The item summary, or a snippet of the body when the summary is absent.
fn summary_text(item: &ContentItem) -> String {
    let summary = item.summary.trim();
    if !summary.is_empty() {
        return summary.to_string();
    }
    let mut snippet: String = item.content.chars().take(SUMMARY_FALLBACK_CHARS).collect();
    snippet.push_str("...");
    snippet
}

/// `published_date` as a short date label; unparsable input passes through.
fn published_label(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{card_view, score_tone, utility_bar_percent, ScoreTone, SUMMARY_FALLBACK_CHARS};
    use crate::item::ContentItem;

    fn item() -> ContentItem {
        ContentItem {
            id: "item-1".to_string(),
            title: "Title".to_string(),
            source: "Source".to_string(),
            content: "body text".to_string(),
            summary: String::new(),
            source_url: String::new(),
            published_date: "2025-03-14T09:26:53+00:00".to_string(),
            cognitive_utility_score: 7.5,
            knowledge_density_score: 8.0,
            credibility_score: 6.0,
            distraction_score: 3.0,
            tags: Vec::new(),
            evidence_links: Vec::new(),
            helpful_votes: 0,
            unhelpful_votes: 0,
            expand_count: 0,
        }
    }

    #[test]
    fn tone_thresholds() {
        assert_eq!(score_tone(8.0), ScoreTone::Strong);
        assert_eq!(score_tone(6.0), ScoreTone::Moderate);
        assert_eq!(score_tone(5.9), ScoreTone::Weak);
    }

    #[test]
    fn bar_width_has_floor_and_ceiling() {
        assert_eq!(utility_bar_percent(0.0), 10.0);
        assert_eq!(utility_bar_percent(5.0), 50.0);
        assert_eq!(utility_bar_percent(10.0), 100.0);
        // Out-of-range scores degrade to a valid width instead of breaking.
        assert_eq!(utility_bar_percent(25.0), 100.0);
        assert_eq!(utility_bar_percent(-3.0), 10.0);
    }

    #[test]
    fn focus_is_inverted_distraction() {
        let card = card_view(&item());
        assert_eq!(card.focus_score, 7.0);
        assert_eq!(card.focus_tone, ScoreTone::Moderate);

        let mut distracting = item();
        distracting.distraction_score = 14.0;
        assert_eq!(card_view(&distracting).focus_score, 0.0);
    }

    #[test]
    fn summary_falls_back_to_content_snippet() {
        let mut long = item();
        long.content = "x".repeat(SUMMARY_FALLBACK_CHARS + 50);
        let card = card_view(&long);
        assert_eq!(card.summary_text.chars().count(), SUMMARY_FALLBACK_CHARS + 3);
        assert!(card.summary_text.ends_with("..."));

        let mut with_summary = item();
        with_summary.summary = "  a real summary  ".to_string();
        assert_eq!(card_view(&with_summary).summary_text, "a real summary");
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let mut multibyte = item();
        multibyte.content = "é".repeat(SUMMARY_FALLBACK_CHARS + 10);
        let card = card_view(&multibyte);
        assert_eq!(card.summary_text.chars().count(), SUMMARY_FALLBACK_CHARS + 3);
    }

    #[test]
    fn tags_are_capped() {
        let mut tagged = item();
        tagged.tags = (0..8).map(|n| format!("tag-{n}")).collect();
        assert_eq!(card_view(&tagged).tags.len(), 5);
    }

    #[test]
    fn published_label_formats_or_passes_through() {
        let card = card_view(&item());
        assert_eq!(card.published_label, "2025-03-14");

        let mut odd = item();
        odd.published_date = "sometime last week".to_string();
        assert_eq!(card_view(&odd).published_label, "sometime last week");
    }
}
