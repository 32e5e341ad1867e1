use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

pub const SEED_PROGRAM_CODES: [&str; 6] = ["GC", "GE", "GI", "GIND", "GMP", "GT"];

/// Programs seeded without a syllabus link.
pub const SEED_PROGRAMS_WITHOUT_SYLLABUS: [&str; 1] = ["GT"];

pub const SEED_INFORMATION_TOPICS: [(&str, &str); 6] = [
    ("GENERAL", "Présentation ENSPD"),
    ("GENERAL", "Contact"),
    ("ADMISSION", "Conditions d'admission"),
    ("CONCOURS", "Concours d'entrée"),
    ("VIE_ESTUDIANTINE", "Bourses"),
    ("VIE_ESTUDIANTINE", "Logement"),
];

/// Deterministic catalog used by the `seed` command and integration tests.
pub struct CatalogSeedDataset;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub programs: usize,
    pub syllabi: usize,
    pub information_entries: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

impl CatalogSeedDataset {
    pub const SQL: &'static str = include_str!("../../../config/fixtures/catalog_seed.sql");

    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;
        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        Ok(SeedResult {
            programs: SEED_PROGRAM_CODES.len(),
            syllabi: SEED_PROGRAM_CODES.len() - SEED_PROGRAMS_WITHOUT_SYLLABUS.len(),
            information_entries: SEED_INFORMATION_TOPICS.len(),
        })
    }

    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        let codes: Vec<String> = sqlx::query_scalar("SELECT code FROM filieres ORDER BY code")
            .fetch_all(pool)
            .await?;
        checks.push((
            "programs",
            SEED_PROGRAM_CODES.iter().all(|code| codes.iter().any(|found| found == code)),
        ));

        let syllabus_codes: Vec<String> =
            sqlx::query_scalar("SELECT filiere_code FROM syllabus ORDER BY filiere_code")
                .fetch_all(pool)
                .await?;
        let expected_syllabi = SEED_PROGRAM_CODES
            .iter()
            .filter(|code| !SEED_PROGRAMS_WITHOUT_SYLLABUS.contains(code))
            .all(|code| syllabus_codes.iter().any(|found| found == code));
        checks.push(("syllabi", expected_syllabi));

        let mut topics_present = true;
        for (category, topic) in SEED_INFORMATION_TOPICS {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM informations_enspd WHERE categorie = ? AND titre = ?",
            )
            .bind(category)
            .bind(topic)
            .fetch_one(pool)
            .await?;
            topics_present &= count > 0;
        }
        checks.push(("information_topics", topics_present));

        let all_present = checks.iter().all(|(_, passed)| *passed);
        Ok(VerificationResult { all_present, checks })
    }
}
