use feed_core::{CardView, FeedViewModel, ScoreTone};

const BAR_WIDTH: usize = 10;

/// Renders the whole view as console text. Pure; printing is the caller's.
pub fn render(view: &FeedViewModel) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "serendipity {} | diversity {} | min score {}{}",
        toggle_label(view.controls.serendipity),
        toggle_label(view.controls.diversity),
        view.controls.min_score,
        if view.loading { " | loading..." } else { "" }
    ));

    if view.cards.is_empty() && !view.loading {
        lines.push("no content available yet; try \"add <title> | <content>\"".to_string());
    }

    for (number, card) in view.cards.iter().enumerate() {
        render_card(&mut lines, number + 1, card);
    }

    if let Some(upload) = &view.upload {
        if upload.submitting {
            lines.push("upload: analyzing...".to_string());
        } else if let Some(error) = &upload.error {
            lines.push(format!("upload failed: {error} (draft kept, submit again)"));
        }
    }

    lines.join("\n")
}

/// The full body of one card, for the expand command.
pub fn render_expanded(card: &CardView) -> String {
    let mut lines = vec![format!("=== {} ===", card.title), card.content.clone()];
    if !card.evidence_links.is_empty() {
        lines.push("evidence:".to_string());
        for link in &card.evidence_links {
            lines.push(format!("  {link}"));
        }
    }
    if let Some(source_url) = &card.source_url {
        lines.push(format!("original: {source_url}"));
    }
    lines.join("\n")
}

fn render_card(lines: &mut Vec<String>, number: usize, card: &CardView) {
    lines.push(format!(
        "[{number}] {} ({}, {})",
        card.title, card.source, card.published_label
    ));
    lines.push(format!(
        "    utility {:.1}/10 {}",
        card.utility_score,
        utility_bar(card.utility_bar_percent)
    ));
    lines.push(format!(
        "    knowledge {:.1}{} credibility {:.1}{} focus {:.1}{}",
        card.knowledge_score,
        tone_mark(card.knowledge_tone),
        card.credibility_score,
        tone_mark(card.credibility_tone),
        card.focus_score,
        tone_mark(card.focus_tone),
    ));
    lines.push(format!("    {}", card.summary_text));
    if !card.tags.is_empty() {
        lines.push(format!("    tags: {}", card.tags.join(", ")));
    }
    lines.push(format!(
        "    helpful {} | unhelpful {} | opened {}",
        card.helpful_votes, card.unhelpful_votes, card.expand_count
    ));
}

fn utility_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn toggle_label(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

fn tone_mark(tone: ScoreTone) -> &'static str {
    match tone {
        ScoreTone::Strong => "+",
        ScoreTone::Moderate => "~",
        ScoreTone::Weak => "!",
    }
}

#[cfg(test)]
mod tests {
    use super::{render, utility_bar};
    use feed_core::FeedViewModel;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(utility_bar(100.0), "[##########]");
        assert_eq!(utility_bar(50.0), "[#####-----]");
        assert_eq!(utility_bar(10.0), "[#---------]");
    }

    #[test]
    fn empty_idle_view_prompts_for_content() {
        let text = render(&FeedViewModel::default());
        assert!(text.contains("no content available yet"));
        assert!(text.contains("serendipity off"));
    }
}
