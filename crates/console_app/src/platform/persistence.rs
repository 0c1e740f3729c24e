use console_core::{FilterState, SortKey, StatusFilter};
use console_engine::KeyValueStore;
use console_logging::{console_error, console_info, console_warn};
use serde::{Deserialize, Serialize};

/// Storage key of the persisted filter record. Bump the suffix on
/// incompatible format changes.
pub(crate) const FILTERS_KEY: &str = "candidate_filters_v1";

/// On-disk filter record. Every field is optional so older or hand-edited
/// files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedFilters {
    q: String,
    status: String,
    min_years: String,
    min_score: String,
    position_id: String,
    sort: String,
}

impl From<&FilterState> for PersistedFilters {
    fn from(filters: &FilterState) -> Self {
        Self {
            q: filters.search_text.clone(),
            status: filters.status.as_wire().to_string(),
            min_years: filters.min_years.clone(),
            min_score: filters.min_score.clone(),
            position_id: filters.position_id.clone(),
            sort: filters.sort.as_wire().to_string(),
        }
    }
}

impl From<PersistedFilters> for FilterState {
    fn from(record: PersistedFilters) -> Self {
        Self {
            search_text: record.q,
            status: StatusFilter::from_wire(&record.status).unwrap_or_default(),
            min_years: record.min_years,
            min_score: record.min_score,
            position_id: record.position_id,
            sort: SortKey::from_wire(&record.sort).unwrap_or_default(),
        }
    }
}

/// Returns the last applied filters, or `None` when nothing usable is stored.
pub(crate) fn load_filters(store: &KeyValueStore) -> Option<FilterState> {
    let content = match store.read(FILTERS_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            console_warn!("Failed to read persisted filters: {}", err);
            return None;
        }
    };

    match ron::from_str::<PersistedFilters>(&content) {
        Ok(record) => {
            console_info!("Restored persisted filters from {:?}", store.dir());
            Some(record.into())
        }
        Err(err) => {
            console_warn!("Ignoring unreadable persisted filters: {}", err);
            None
        }
    }
}

pub(crate) fn save_filters(store: &KeyValueStore, filters: &FilterState) {
    let record = PersistedFilters::from(filters);
    let content = match ron::ser::to_string_pretty(&record, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            console_error!("Failed to serialize filters: {}", err);
            return;
        }
    };

    if let Err(err) = store.write(FILTERS_KEY, &content) {
        console_error!("Failed to persist filters to {:?}: {}", store.dir(), err);
    }
}
