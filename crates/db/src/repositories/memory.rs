use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ounibot_core::domain::information::{InformationEntry, InformationQuery};
use ounibot_core::domain::program::{Program, ProgramSummary};
use ounibot_core::domain::syllabus::SyllabusLink;

use super::{CatalogSession, CatalogStore, RepositoryError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum FailureMode {
    #[default]
    None,
    Open,
    Query,
}

#[derive(Clone, Default)]
struct CatalogData {
    programs: Vec<Program>,
    syllabi: HashMap<String, String>,
    information: Vec<InformationEntry>,
}

#[derive(Default)]
struct SessionCounters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// Catalog fake with the same lookup semantics as the SQL store. It counts
/// opened and closed sessions and can simulate storage failures.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    data: Arc<CatalogData>,
    counters: Arc<SessionCounters>,
    failure: FailureMode,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: Program) -> Self {
        let data = Arc::make_mut(&mut self.data);
        data.programs.retain(|existing| !existing.code.matches(program.code.as_str()));
        data.programs.push(program);
        data.programs.sort_by(|left, right| left.code.0.cmp(&right.code.0));
        self
    }

    pub fn with_syllabus(mut self, code: &str, url: &str) -> Self {
        Arc::make_mut(&mut self.data)
            .syllabi
            .insert(code.to_ascii_uppercase(), url.to_string());
        self
    }

    pub fn with_information(mut self, entry: InformationEntry) -> Self {
        Arc::make_mut(&mut self.data).information.push(entry);
        self
    }

    /// Every `open` fails, as when the database file cannot be reached.
    pub fn unavailable(mut self) -> Self {
        self.failure = FailureMode::Open;
        self
    }

    /// Sessions open but every query fails.
    pub fn failing_queries(mut self) -> Self {
        self.failure = FailureMode::Query;
        self
    }

    pub fn sessions_opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn open(&self) -> Result<Box<dyn CatalogSession>, RepositoryError> {
        if self.failure == FailureMode::Open {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryCatalogSession {
            data: Arc::clone(&self.data),
            counters: Arc::clone(&self.counters),
            failing: self.failure == FailureMode::Query,
        }))
    }
}

pub struct InMemoryCatalogSession {
    data: Arc<CatalogData>,
    counters: Arc<SessionCounters>,
    failing: bool,
}

impl InMemoryCatalogSession {
    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing {
            return Err(RepositoryError::Database(sqlx::Error::Protocol(
                "simulated catalog query failure".to_string(),
            )));
        }
        Ok(())
    }
}

impl Drop for InMemoryCatalogSession {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl CatalogSession for InMemoryCatalogSession {
    async fn find_program_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<Program>, RepositoryError> {
        self.check()?;
        Ok(self.data.programs.iter().find(|program| program.code.matches(code)).cloned())
    }

    async fn find_program_by_name(
        &mut self,
        fragment: &str,
    ) -> Result<Option<Program>, RepositoryError> {
        self.check()?;
        Ok(self.data.programs.iter().find(|program| program.name_contains(fragment)).cloned())
    }

    async fn find_syllabus(&mut self, code: &str) -> Result<Option<SyllabusLink>, RepositoryError> {
        self.check()?;
        let Some(program) = self.data.programs.iter().find(|program| program.code.matches(code))
        else {
            return Ok(None);
        };

        Ok(self.data.syllabi.get(&program.code.0.to_ascii_uppercase()).map(|url| SyllabusLink {
            program_code: program.code.clone(),
            program_name: program.name.clone(),
            url: url.clone(),
        }))
    }

    async fn find_information(
        &mut self,
        query: &InformationQuery,
    ) -> Result<Option<InformationEntry>, RepositoryError> {
        self.check()?;
        Ok(self.data.information.iter().find(|entry| query.matches(entry)).cloned())
    }

    async fn list_programs(&mut self) -> Result<Vec<ProgramSummary>, RepositoryError> {
        self.check()?;
        Ok(self.data.programs.iter().map(Program::summary).collect())
    }
}
