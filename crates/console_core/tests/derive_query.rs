use console_core::{
    derive_query, derive_report_query, derive_top_candidates_query, FilterState, SortKey,
    StatusFilter,
};
use pretty_assertions::assert_eq;

fn pairs(filters: &FilterState) -> Vec<(&'static str, String)> {
    derive_query(filters).pairs().to_vec()
}

fn owned(expected: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
    expected
        .iter()
        .map(|(key, value)| (*key, (*value).to_string()))
        .collect()
}

fn scenario_a() -> FilterState {
    FilterState {
        search_text: "john".to_string(),
        status: StatusFilter::New,
        min_years: "2".to_string(),
        ..FilterState::default()
    }
}

#[test]
fn default_filters_emit_only_the_baseline() {
    assert_eq!(
        pairs(&FilterState::default()),
        owned(&[("limit", "50"), ("offset", "0"), ("sort", "upload_date_desc")])
    );
}

#[test]
fn ungated_filters_match_scenario_a() {
    assert_eq!(
        pairs(&scenario_a()),
        owned(&[
            ("limit", "50"),
            ("offset", "0"),
            ("sort", "upload_date_desc"),
            ("q", "john"),
            ("status", "NEW"),
            ("min_years", "2"),
        ])
    );
}

#[test]
fn gated_filters_match_scenario_b() {
    let filters = FilterState {
        position_id: "7".to_string(),
        min_score: "80".to_string(),
        sort: SortKey::ScoreDesc,
        ..scenario_a()
    };

    assert_eq!(
        pairs(&filters),
        owned(&[
            ("limit", "50"),
            ("offset", "0"),
            ("sort", "score_desc"),
            ("q", "john"),
            ("status", "NEW"),
            ("min_years", "2"),
            ("position_id", "7"),
            ("min_score", "80"),
        ])
    );
}

#[test]
fn score_fields_are_inert_without_a_position() {
    for sort in SortKey::VALUES {
        for position_id in ["", "   "] {
            let filters = FilterState {
                min_score: "90".to_string(),
                position_id: position_id.to_string(),
                sort,
                ..FilterState::default()
            };
            let query = derive_query(&filters);
            assert!(!query.contains("min_score"));
            assert!(!query.contains("position_id"));
            assert_eq!(query.get("sort"), Some("upload_date_desc"));
        }
    }
}

#[test]
fn gated_without_min_score_omits_it() {
    let filters = FilterState {
        position_id: " 3 ".to_string(),
        min_score: "  ".to_string(),
        ..FilterState::default()
    };
    let query = derive_query(&filters);
    assert_eq!(query.get("position_id"), Some("3"));
    assert!(!query.contains("min_score"));
}

#[test]
fn text_inputs_are_trimmed_and_blank_ones_dropped() {
    let filters = FilterState {
        search_text: "  ann  ".to_string(),
        min_years: "   ".to_string(),
        ..FilterState::default()
    };
    let query = derive_query(&filters);
    assert_eq!(query.get("q"), Some("ann"));
    assert!(!query.contains("min_years"));
    assert!(!query.contains("status"));
}

#[test]
fn derive_query_is_deterministic() {
    let filters = scenario_a();
    assert_eq!(derive_query(&filters), derive_query(&filters));
}

#[test]
fn report_query_has_no_pagination_or_sort() {
    let filters = FilterState {
        position_id: "7".to_string(),
        min_score: "80".to_string(),
        sort: SortKey::ScoreAsc,
        ..scenario_a()
    };
    let query = derive_report_query(&filters);
    assert!(!query.contains("limit"));
    assert!(!query.contains("offset"));
    assert!(!query.contains("sort"));
    assert_eq!(query.get("min_score"), Some("80"));

    let top = derive_top_candidates_query(&filters, 250);
    assert_eq!(top.get("n"), Some("100"));
}
