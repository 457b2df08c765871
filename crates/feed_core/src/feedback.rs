use crate::item::{ContentItem, FeedbackAction};

/// Pure feedback reducer: increments the matching item's counter by one.
///
/// Every item whose id does not match `content_id` comes back unchanged, so
/// renderers can rely on cheap equality checks. An id that matches nothing
/// leaves the whole list as it was. Scores, tags, and every other
/// non-counter field are never touched.
pub fn apply_feedback(
    items: Vec<ContentItem>,
    content_id: &str,
    action: FeedbackAction,
) -> Vec<ContentItem> {
    items
        .into_iter()
        .map(|mut item| {
            if item.id == content_id {
                match action {
                    FeedbackAction::Helpful => item.helpful_votes += 1,
                    FeedbackAction::Unhelpful => item.unhelpful_votes += 1,
                    FeedbackAction::Expand => item.expand_count += 1,
                }
            }
            item
        })
        .collect()
}
