use crate::{FilterState, SortKey, StatusFilter};

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const DEFAULT_TOP_N: u32 = 10;
const MAX_TOP_N: u32 = 100;

/// Ordered query parameters; setting an existing key replaces it in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Candidate list query for the applied filters.
///
/// The baseline always pins pagination and the upload-date sort. Score
/// parameters and the user's sort choice only reach the query once a
/// position is selected.
pub fn derive_query(applied: &FilterState) -> QueryParams {
    let mut params = QueryParams::new();
    params.set("limit", DEFAULT_PAGE_LIMIT.to_string());
    params.set("offset", "0");
    params.set("sort", SortKey::UploadDateDesc.as_wire());
    push_filter_params(&mut params, applied, true);
    params
}

/// Filter parameters shared by the report endpoints (no pagination, no sort).
pub fn derive_report_query(applied: &FilterState) -> QueryParams {
    let mut params = QueryParams::new();
    push_filter_params(&mut params, applied, false);
    params
}

pub fn derive_top_candidates_query(applied: &FilterState, n: u32) -> QueryParams {
    let mut params = derive_report_query(applied);
    params.set("n", clamp_top_n(n).to_string());
    params
}

pub fn clamp_top_n(n: u32) -> u32 {
    n.clamp(1, MAX_TOP_N)
}

fn push_filter_params(params: &mut QueryParams, applied: &FilterState, with_sort: bool) {
    let search = applied.search_text.trim();
    if !search.is_empty() {
        params.set("q", search);
    }

    if applied.status != StatusFilter::All {
        params.set("status", applied.status.as_wire());
    }

    let min_years = applied.min_years.trim();
    if !min_years.is_empty() {
        params.set("min_years", min_years);
    }

    let position_id = applied.position_id.trim();
    if position_id.is_empty() {
        return;
    }
    params.set("position_id", position_id);

    let min_score = applied.min_score.trim();
    if !min_score.is_empty() {
        params.set("min_score", min_score);
    }
    if with_sort {
        params.set("sort", applied.sort.as_wire());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut params = QueryParams::new();
        params.set("limit", "50");
        params.set("sort", "upload_date_desc");
        params.set("limit", "10");

        assert_eq!(
            params.pairs(),
            &[("limit", "10".to_string()), ("sort", "upload_date_desc".to_string())]
        );
    }

    #[test]
    fn top_n_is_clamped() {
        assert_eq!(clamp_top_n(0), 1);
        assert_eq!(clamp_top_n(10), 10);
        assert_eq!(clamp_top_n(500), 100);
    }
}
