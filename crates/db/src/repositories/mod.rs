use async_trait::async_trait;
use thiserror::Error;

use ounibot_core::domain::information::{InformationEntry, InformationQuery};
use ounibot_core::domain::program::{Program, ProgramSummary};
use ounibot_core::domain::syllabus::SyllabusLink;

pub mod catalog;
pub mod memory;

pub use catalog::{SqlCatalogSession, SqlCatalogStore};
pub use memory::{InMemoryCatalogSession, InMemoryCatalogStore};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read-only access to the school catalog. Every call to `open` hands out one
/// scoped session; dropping the session releases the underlying connection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn open(&self) -> Result<Box<dyn CatalogSession>, RepositoryError>;
}

#[async_trait]
pub trait CatalogSession: Send {
    /// Exact, case-insensitive code match.
    async fn find_program_by_code(&mut self, code: &str)
        -> Result<Option<Program>, RepositoryError>;

    /// First program, by ascending code, whose lower-cased name contains the
    /// lower-cased fragment.
    async fn find_program_by_name(
        &mut self,
        fragment: &str,
    ) -> Result<Option<Program>, RepositoryError>;

    async fn find_syllabus(&mut self, code: &str) -> Result<Option<SyllabusLink>, RepositoryError>;

    async fn find_information(
        &mut self,
        query: &InformationQuery,
    ) -> Result<Option<InformationEntry>, RepositoryError>;

    /// All programs ordered by ascending code.
    async fn list_programs(&mut self) -> Result<Vec<ProgramSummary>, RepositoryError>;
}
