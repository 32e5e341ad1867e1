use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Program codes offered by the school, in the order they are announced to users.
pub const KNOWN_PROGRAM_CODES: [&str; 6] = ["GI", "GC", "GE", "GMP", "GT", "GIND"];

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramCode(pub String);

impl ProgramCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a user-supplied code.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.eq_ignore_ascii_case(candidate.trim())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub code: ProgramCode,
    pub name: String,
    pub department: String,
    pub duration_years: u32,
    pub description: String,
    pub seats: u32,
    pub department_head: String,
    pub annual_fee: Decimal,
}

impl Program {
    /// Substring containment on lower-cased text, not fuzzy matching.
    pub fn name_contains(&self, fragment: &str) -> bool {
        let fragment = fragment.trim().to_lowercase();
        !fragment.is_empty() && self.name.to_lowercase().contains(&fragment)
    }

    pub fn summary(&self) -> ProgramSummary {
        ProgramSummary { code: self.code.clone(), name: self.name.clone(), seats: self.seats }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub code: ProgramCode,
    pub name: String,
    pub seats: u32,
}
