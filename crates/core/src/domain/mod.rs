pub mod information;
pub mod program;
pub mod syllabus;
