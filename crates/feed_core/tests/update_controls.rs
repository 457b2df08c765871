use std::sync::Once;

use feed_core::{update, ContentItem, ControlChange, Effect, FeedState, Msg, PAGE_SIZE};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

fn sample_item(id: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: format!("Title {id}"),
        source: "Example Journal".to_string(),
        content: "Body text.".to_string(),
        summary: String::new(),
        source_url: String::new(),
        published_date: "2025-06-01T08:00:00+00:00".to_string(),
        cognitive_utility_score: 7.0,
        knowledge_density_score: 6.5,
        credibility_score: 8.0,
        distraction_score: 2.0,
        tags: Vec::new(),
        evidence_links: Vec::new(),
        helpful_votes: 0,
        unhelpful_votes: 0,
        expand_count: 0,
    }
}

fn fetch_effect(effects: &[Effect]) -> (u64, feed_core::FeedQuery) {
    let fetches: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchFeed { generation, query } => Some((*generation, query.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(fetches.len(), 1, "expected exactly one fetch in {effects:?}");
    fetches.into_iter().next().unwrap()
}

#[test]
fn started_provisions_then_fetches_defaults() {
    init_logging();
    let (state, effects) = update(FeedState::new(), Msg::Started);

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::SetupDefaultSources);
    let (generation, query) = fetch_effect(&effects[1..]);
    assert_eq!(generation, 1);
    assert_eq!(query.limit, PAGE_SIZE);
    assert_eq!(query.min_score, 0.0);
    assert!(!query.serendipity);
    assert!(!query.diversity);
    assert!(state.view().loading);
}

#[test]
fn redundant_min_score_set_still_refetches() {
    init_logging();
    let state = FeedState::new();

    let (state, effects) = update(state, Msg::ControlChanged(ControlChange::MinScore(5.0)));
    let (first_generation, query) = fetch_effect(&effects);
    assert_eq!(query.min_score, 5.0);

    // Same value again: value identity is not diffed, a second request goes out.
    let (_state, effects) = update(state, Msg::ControlChanged(ControlChange::MinScore(5.0)));
    let (second_generation, query) = fetch_effect(&effects);
    assert_eq!(query.min_score, 5.0);
    assert_eq!(second_generation, first_generation + 1);
}

#[test]
fn refresh_refetches_without_changing_controls() {
    init_logging();
    let (state, _) = update(FeedState::new(), Msg::ControlChanged(ControlChange::Serendipity(true)));
    let controls_before = state.controls().clone();

    let (state, effects) = update(state, Msg::ControlChanged(ControlChange::Refresh));
    let (_, query) = fetch_effect(&effects);
    assert!(query.serendipity);
    assert_eq!(state.controls(), &controls_before);

    // Even a redundant refresh click refetches.
    let (_, effects) = update(state, Msg::ControlChanged(ControlChange::Refresh));
    fetch_effect(&effects);
}

#[test]
fn control_change_keeps_items_until_response_arrives() {
    init_logging();
    let (state, _) = update(FeedState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::FeedLoaded {
            generation: 1,
            items: vec![sample_item("a"), sample_item("b")],
        },
    );
    assert_eq!(state.view().cards.len(), 2);

    let (state, effects) = update(state, Msg::ControlChanged(ControlChange::Diversity(true)));
    let (generation, query) = fetch_effect(&effects);
    assert!(query.diversity);

    // No flash-to-empty: the stale-but-valid list stays up while loading.
    let view = state.view();
    assert!(view.loading);
    assert_eq!(view.cards.len(), 2);

    let (state, _) = update(
        state,
        Msg::FeedLoaded {
            generation,
            items: vec![sample_item("c")],
        },
    );
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].id, "c");
}

#[test]
fn failed_fetch_clears_loading_and_keeps_items() {
    init_logging();
    let (state, _) = update(FeedState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::FeedLoaded {
            generation: 1,
            items: vec![sample_item("a")],
        },
    );

    let (state, effects) = update(state, Msg::ControlChanged(ControlChange::Refresh));
    let (generation, _) = fetch_effect(&effects);
    let (state, effects) = update(state, Msg::FeedFailed { generation });

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].id, "a");
}

#[test]
fn stale_success_is_discarded() {
    init_logging();
    let (state, effects) = update(FeedState::new(), Msg::Started);
    let (first_generation, _) = fetch_effect(&effects[1..]);

    let (state, effects) = update(state, Msg::ControlChanged(ControlChange::MinScore(8.0)));
    let (second_generation, _) = fetch_effect(&effects);

    // The older request settles after the newer one was issued: ignored.
    let (state, _) = update(
        state,
        Msg::FeedLoaded {
            generation: first_generation,
            items: vec![sample_item("stale")],
        },
    );
    let view = state.view();
    assert!(view.loading);
    assert!(view.cards.is_empty());

    let (state, _) = update(
        state,
        Msg::FeedLoaded {
            generation: second_generation,
            items: vec![sample_item("fresh")],
        },
    );
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.cards[0].id, "fresh");
}

#[test]
fn stale_failure_is_discarded() {
    init_logging();
    let (state, effects) = update(FeedState::new(), Msg::Started);
    let (first_generation, _) = fetch_effect(&effects[1..]);
    let (state, effects) = update(state, Msg::ControlChanged(ControlChange::Refresh));
    let (second_generation, _) = fetch_effect(&effects);

    let (state, _) = update(state, Msg::FeedFailed { generation: first_generation });
    assert!(state.view().loading, "newest fetch is still outstanding");

    let (state, _) = update(state, Msg::FeedFailed { generation: second_generation });
    assert!(!state.view().loading);
}
