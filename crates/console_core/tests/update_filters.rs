use std::sync::Once;

use console_core::{
    update, AppState, Effect, FilterPatch, FilterState, Msg, SortKey, StatusFilter, ViewId,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(console_logging::initialize_for_tests);
}

fn mounted(restored: Option<FilterState>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Mounted { restored });
    state
}

fn edit(state: AppState, patch: FilterPatch) -> AppState {
    let (state, effects) = update(state, Msg::DraftEdited(patch));
    assert!(effects.is_empty());
    state
}

fn load_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Load(_)))
        .count()
}

#[test]
fn mount_seeds_draft_and_applied_and_starts_probe_and_list_load() {
    init_logging();
    let restored = FilterState {
        search_text: "ann".to_string(),
        ..FilterState::default()
    };
    let (state, effects) = update(
        AppState::new(),
        Msg::Mounted {
            restored: Some(restored.clone()),
        },
    );

    assert_eq!(state.filters().draft(), &restored);
    assert_eq!(state.filters().applied(), &restored);
    assert_eq!(effects[0], Effect::ResolveRole);
    match &effects[1] {
        Effect::Load(request) => {
            assert_eq!(request.view, ViewId::CandidateList);
            assert_eq!(request.query.get("q"), Some("ann"));
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn draft_edits_do_not_touch_applied_or_issue_loads() {
    init_logging();
    let state = mounted(None);
    let request_before = state.loads().latest_request(ViewId::CandidateList);

    let state = edit(
        state,
        FilterPatch {
            search_text: Some("john".to_string()),
            status: Some(StatusFilter::Hired),
            ..FilterPatch::default()
        },
    );

    assert_eq!(state.filters().draft().search_text, "john");
    assert_eq!(state.filters().applied(), &FilterState::default());
    assert_eq!(state.filters().persisted(), &FilterState::default());
    assert_eq!(
        state.loads().latest_request(ViewId::CandidateList),
        request_before
    );
}

#[test]
fn apply_replaces_applied_persists_and_reloads_once() {
    init_logging();
    let state = mounted(None);
    let state = edit(
        state,
        FilterPatch {
            search_text: Some("john".to_string()),
            min_years: Some("2".to_string()),
            ..FilterPatch::default()
        },
    );

    let (state, effects) = update(state, Msg::ApplyClicked);

    let draft = state.filters().draft().clone();
    assert_eq!(state.filters().applied(), &draft);
    assert_eq!(state.filters().persisted(), &draft);
    assert_eq!(effects.first(), Some(&Effect::PersistFilters(draft)));
    assert_eq!(load_count(&effects), 1);
}

#[test]
fn apply_with_non_numeric_years_is_rejected_without_side_effects() {
    init_logging();
    let state = mounted(None);
    let state = edit(
        state,
        FilterPatch {
            min_years: Some("two".to_string()),
            ..FilterPatch::default()
        },
    );

    let (mut state, effects) = update(state, Msg::ApplyClicked);

    assert!(effects.is_empty());
    assert_eq!(state.filters().applied(), &FilterState::default());
    assert!(state.view().notice.unwrap().contains("Min years"));
    assert!(state.consume_dirty());
}

#[test]
fn min_score_is_only_validated_when_gated() {
    init_logging();
    let state = mounted(None);
    let state = edit(
        state,
        FilterPatch {
            min_score: Some("999".to_string()),
            ..FilterPatch::default()
        },
    );
    let (state, effects) = update(state, Msg::ApplyClicked);
    assert_eq!(load_count(&effects), 1);

    let state = edit(
        state,
        FilterPatch {
            position_id: Some("7".to_string()),
            ..FilterPatch::default()
        },
    );
    let (state, effects) = update(state, Msg::ApplyClicked);
    assert!(effects.is_empty());
    assert_eq!(state.filters().applied().position_id, "");
}

#[test]
fn reset_restores_defaults_everywhere_and_is_idempotent() {
    init_logging();
    let state = mounted(Some(FilterState {
        search_text: "x".to_string(),
        position_id: "4".to_string(),
        sort: SortKey::ScoreAsc,
        ..FilterState::default()
    }));

    let (once, effects) = update(state, Msg::ResetClicked);
    assert_eq!(
        effects.first(),
        Some(&Effect::PersistFilters(FilterState::default()))
    );
    assert_eq!(once.filters().draft(), &FilterState::default());
    assert_eq!(once.filters().applied(), &FilterState::default());
    assert_eq!(once.filters().persisted(), &FilterState::default());

    let (twice, _) = update(once.clone(), Msg::ResetClicked);
    assert_eq!(twice.filters(), once.filters());
}

#[test]
fn persisted_mirror_reseeds_an_identical_applied_state() {
    init_logging();
    let state = mounted(None);
    let state = edit(
        state,
        FilterPatch {
            search_text: Some("kim".to_string()),
            status: Some(StatusFilter::InReview),
            min_score: Some("75".to_string()),
            position_id: Some("2".to_string()),
            sort: Some(SortKey::ScoreAsc),
            ..FilterPatch::default()
        },
    );
    let (state, _) = update(state, Msg::ApplyClicked);

    let reloaded = mounted(Some(state.filters().persisted().clone()));
    assert_eq!(reloaded.filters().applied(), state.filters().applied());
}

#[test]
fn unmount_discards_the_draft() {
    init_logging();
    let state = mounted(None);
    let state = edit(
        state,
        FilterPatch {
            search_text: Some("typed but not applied".to_string()),
            ..FilterPatch::default()
        },
    );

    let (state, _) = update(state, Msg::Unmounted);
    assert_eq!(state.filters().draft(), &FilterState::default());
    assert!(!state.is_mounted());
}

#[test]
fn empty_draft_edit_leaves_state_untouched() {
    let mut state = AppState::new();
    state.consume_dirty();
    let (mut next, effects) = update(state.clone(), Msg::DraftEdited(FilterPatch::default()));

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(state, next);
}
