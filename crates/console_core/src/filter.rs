use crate::validation::{validate_filters, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    New,
    InReview,
    Rejected,
    Hired,
}

impl StatusFilter {
    pub const VALUES: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::New,
        StatusFilter::InReview,
        StatusFilter::Rejected,
        StatusFilter::Hired,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            StatusFilter::All => "ALL",
            StatusFilter::New => "NEW",
            StatusFilter::InReview => "IN_REVIEW",
            StatusFilter::Rejected => "REJECTED",
            StatusFilter::Hired => "HIRED",
        }
    }

    /// Parses the wire name, ignoring case and surrounding whitespace.
    pub fn from_wire(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::VALUES
            .into_iter()
            .find(|value| value.as_wire().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortKey {
    #[default]
    UploadDateDesc,
    ScoreDesc,
    ScoreAsc,
}

impl SortKey {
    pub const VALUES: [SortKey; 3] = [SortKey::UploadDateDesc, SortKey::ScoreDesc, SortKey::ScoreAsc];

    pub fn as_wire(self) -> &'static str {
        match self {
            SortKey::UploadDateDesc => "upload_date_desc",
            SortKey::ScoreDesc => "score_desc",
            SortKey::ScoreAsc => "score_asc",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::VALUES
            .into_iter()
            .find(|value| value.as_wire().eq_ignore_ascii_case(raw))
    }
}

/// One filter snapshot. Numeric inputs are kept as typed; empty means absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_text: String,
    pub status: StatusFilter,
    pub min_years: String,
    pub min_score: String,
    pub position_id: String,
    pub sort: SortKey,
}

impl FilterState {
    /// Score filters and score sorting only take effect once a position is chosen.
    pub fn is_position_gated(&self) -> bool {
        !self.position_id.trim().is_empty()
    }

    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search_text) = patch.search_text {
            self.search_text = search_text;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(min_years) = patch.min_years {
            self.min_years = min_years;
        }
        if let Some(min_score) = patch.min_score {
            self.min_score = min_score;
        }
        if let Some(position_id) = patch.position_id {
            self.position_id = position_id;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }
}

/// Partial draft update; `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub search_text: Option<String>,
    pub status: Option<StatusFilter>,
    pub min_years: Option<String>,
    pub min_score: Option<String>,
    pub position_id: Option<String>,
    pub sort: Option<SortKey>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        *self == FilterPatch::default()
    }
}

/// Draft, applied and persisted filter slots.
///
/// Copies only ever flow draft -> applied -> persisted (`apply`) or
/// defaults -> all three (`reset`). Nothing else writes `applied`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterTiers {
    draft: FilterState,
    applied: FilterState,
    persisted: FilterState,
}

impl FilterTiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every slot from the record read back from durable storage.
    pub fn seeded(restored: FilterState) -> Self {
        Self {
            draft: restored.clone(),
            applied: restored.clone(),
            persisted: restored,
        }
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    pub fn persisted(&self) -> &FilterState {
        &self.persisted
    }

    pub fn edit_draft(&mut self, patch: FilterPatch) {
        self.draft.merge(patch);
    }

    /// Commits the draft. A draft that fails validation changes nothing.
    pub fn apply(&mut self) -> Result<&FilterState, ValidationError> {
        validate_filters(&self.draft)?;
        self.applied = self.draft.clone();
        self.persisted = self.applied.clone();
        Ok(&self.applied)
    }

    pub fn reset(&mut self) -> &FilterState {
        self.draft = FilterState::default();
        self.applied = FilterState::default();
        self.persisted = FilterState::default();
        &self.applied
    }

    /// Throws away uncommitted input.
    pub fn discard_draft(&mut self) {
        self.draft = self.applied.clone();
    }
}
