//! Wire shapes of the HR/manager endpoints.
//!
//! The server mixes snake_case and camelCase between endpoints, so most
//! fields accept both spellings.
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CandidateListItem {
    #[serde(default, alias = "id", alias = "candidateId")]
    pub candidate_id: Option<u64>,
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "yearsOfExperience")]
    pub years_of_experience: Option<u32>,
    #[serde(default, alias = "uploadDate", deserialize_with = "lenient_string")]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CandidateListResponse {
    #[serde(default)]
    pub items: Vec<CandidateListItem>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TopCandidatesResponse {
    #[serde(default)]
    pub items: Vec<CandidateListItem>,
    #[serde(default)]
    pub n: Option<u32>,
    #[serde(default, alias = "totalMatched")]
    pub total_matched: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PipelineStatsResponse {
    /// Status counts in the order the server lists them.
    #[serde(default, deserialize_with = "ordered_counts")]
    pub counts: Vec<(String, u64)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CandidateFields {
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default, alias = "yearsOfExperience")]
    pub years_of_experience: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CandidateCard {
    #[serde(default, alias = "id", alias = "candidateId")]
    pub candidate_id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "uploadDate", deserialize_with = "lenient_string")]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub fields: CandidateFields,
    /// Present only when the card was requested for a position.
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub validation: CardValidation,
}

/// Server-side flags for contact data the card still lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CardValidation {
    #[serde(default, alias = "emailRequiredMissing")]
    pub email_required_missing: bool,
    #[serde(default, alias = "phoneRequiredMissing")]
    pub phone_required_missing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidateRequest {
    pub full_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub skills: Option<String>,
    pub years_of_experience: Option<u32>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub required_skills: Option<String>,
    #[serde(default)]
    pub skills_weight: Option<u32>,
    #[serde(default)]
    pub experience_weight: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRequest {
    pub name: String,
    pub required_skills: String,
    pub skills_weight: u32,
    pub experience_weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default, alias = "candidateId")]
    pub candidate_id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Accepts a string, a number, or null. Timestamps arrive either way.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Collects a status-to-count object in document order. Null reads as empty.
fn ordered_counts<'de, D>(deserializer: D) -> Result<Vec<(String, u64)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountsVisitor;

    impl<'de> Visitor<'de> for CountsVisitor {
        type Value = Vec<(String, u64)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of status to count")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut counts = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, u64>()? {
                counts.push(entry);
            }
            Ok(counts)
        }
    }

    deserializer.deserialize_option(CountsVisitor)
}
