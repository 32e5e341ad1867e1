mod admission;
mod general_info;
mod listing;
mod program_info;
mod static_reply;
mod syllabus;

pub use admission::AdmissionChancesHandler;
pub use general_info::GeneralInfoHandler;
pub use listing::ProgramListingHandler;
pub use program_info::ProgramInfoHandler;
pub use static_reply::{FallbackHandler, StaticReplyHandler};
pub use syllabus::SyllabusHandler;

pub const PROGRAM_INFO_ACTION: &str = "action_info_filiere";
pub const SYLLABUS_ACTION: &str = "action_demande_syllabus";
pub const GENERAL_INFO_ACTION: &str = "action_info_generale";
pub const ADMISSION_CHANCES_ACTION: &str = "action_chances_admission";
pub const PROGRAM_LISTING_ACTION: &str = "action_liste_filieres";
pub const FALLBACK_ACTION: &str = "action_default_fallback";

/// Slot remembering the program discussed last.
pub const PROGRAM_SLOT: &str = "filiere";
