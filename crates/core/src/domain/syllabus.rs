use serde::{Deserialize, Serialize};

use crate::domain::program::ProgramCode;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusLink {
    pub program_code: ProgramCode,
    pub program_name: String,
    pub url: String,
}
