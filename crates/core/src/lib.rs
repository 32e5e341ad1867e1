pub mod admission;
pub mod classify;
pub mod config;
pub mod domain;
pub mod errors;

pub use admission::{parse_rank, AdmissionOutlook};
pub use classify::{classify_message, TopicRule, DEFAULT_QUERY, TOPIC_RULES};
pub use domain::information::{InfoCategory, InformationEntry, InformationQuery};
pub use domain::program::{Program, ProgramCode, ProgramSummary, KNOWN_PROGRAM_CODES};
pub use domain::syllabus::SyllabusLink;
pub use errors::{ApplicationError, DomainError, InterfaceError};
