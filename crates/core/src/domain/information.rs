use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoCategory {
    General,
    Admission,
    EntranceExam,
    StudentLife,
}

impl InfoCategory {
    /// Value stored in the `categorie` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Admission => "ADMISSION",
            Self::EntranceExam => "CONCOURS",
            Self::StudentLife => "VIE_ESTUDIANTINE",
        }
    }
}

impl std::str::FromStr for InfoCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "GENERAL" => Ok(Self::General),
            "ADMISSION" => Ok(Self::Admission),
            "CONCOURS" => Ok(Self::EntranceExam),
            "VIE_ESTUDIANTINE" => Ok(Self::StudentLife),
            other => Err(DomainError::InvariantViolation(format!(
                "unknown information category `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationEntry {
    pub category: InfoCategory,
    pub topic: Option<String>,
    pub content: String,
}

/// Lookup key produced by message classification. Without a topic any entry
/// of the category qualifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InformationQuery {
    pub category: InfoCategory,
    pub topic: Option<&'static str>,
}

impl InformationQuery {
    pub fn matches(&self, entry: &InformationEntry) -> bool {
        entry.category == self.category
            && self.topic.map_or(true, |topic| entry.topic.as_deref() == Some(topic))
    }
}
