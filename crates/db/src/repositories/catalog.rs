use rust_decimal::Decimal;
use sqlx::pool::PoolConnection;
use sqlx::{Row, Sqlite};
use tracing::debug;

use ounibot_core::domain::information::{InfoCategory, InformationEntry, InformationQuery};
use ounibot_core::domain::program::{Program, ProgramCode, ProgramSummary};
use ounibot_core::domain::syllabus::SyllabusLink;

use super::{CatalogSession, CatalogStore, RepositoryError};
use crate::DbPool;

const PROGRAM_COLUMNS: &str = "code, nom, departement, duree_annees, description,
                               nombre_places, chef_departement, frais_annuels";

pub struct SqlCatalogStore {
    pool: DbPool,
}

impl SqlCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for SqlCatalogStore {
    async fn open(&self) -> Result<Box<dyn CatalogSession>, RepositoryError> {
        let conn = self.pool.acquire().await?;
        debug!(event_name = "catalog.session.opened", "catalog session acquired");
        Ok(Box::new(SqlCatalogSession { conn }))
    }
}

/// Holds one pooled connection; it goes back to the pool when the session drops.
pub struct SqlCatalogSession {
    conn: PoolConnection<Sqlite>,
}

fn decode_err(error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Decode(error.to_string())
}

fn non_negative_u32(column: &str, value: i64) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|_| {
        RepositoryError::Decode(format!("column `{column}` holds out-of-range value {value}"))
    })
}

fn row_to_program(row: &sqlx::sqlite::SqliteRow) -> Result<Program, RepositoryError> {
    let code: String = row.try_get("code").map_err(decode_err)?;
    let name: String = row.try_get("nom").map_err(decode_err)?;
    let department: String = row.try_get("departement").map_err(decode_err)?;
    let duration_years: i64 = row.try_get("duree_annees").map_err(decode_err)?;
    let description: String = row.try_get("description").map_err(decode_err)?;
    let seats: i64 = row.try_get("nombre_places").map_err(decode_err)?;
    let department_head: String = row.try_get("chef_departement").map_err(decode_err)?;
    let annual_fee: i64 = row.try_get("frais_annuels").map_err(decode_err)?;

    if annual_fee < 0 {
        return Err(RepositoryError::Decode(format!(
            "program `{code}` has negative annual fee {annual_fee}"
        )));
    }

    Ok(Program {
        code: ProgramCode(code),
        name,
        department,
        duration_years: non_negative_u32("duree_annees", duration_years)?,
        description,
        seats: non_negative_u32("nombre_places", seats)?,
        department_head,
        annual_fee: Decimal::from(annual_fee),
    })
}

fn row_to_information(row: &sqlx::sqlite::SqliteRow) -> Result<InformationEntry, RepositoryError> {
    let category: String = row.try_get("categorie").map_err(decode_err)?;
    let topic: Option<String> = row.try_get("titre").map_err(decode_err)?;
    let content: String = row.try_get("contenu").map_err(decode_err)?;

    Ok(InformationEntry {
        category: category.parse::<InfoCategory>().map_err(decode_err)?,
        topic,
        content,
    })
}

#[async_trait::async_trait]
impl CatalogSession for SqlCatalogSession {
    async fn find_program_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<Program>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM filieres WHERE LOWER(code) = LOWER(?)"
        ))
        .bind(code.trim())
        .fetch_optional(&mut *self.conn)
        .await?;

        row.as_ref().map(row_to_program).transpose()
    }

    async fn find_program_by_name(
        &mut self,
        fragment: &str,
    ) -> Result<Option<Program>, RepositoryError> {
        // SQLite's LOWER() only folds ASCII, so containment is checked here to
        // match accented names such as "Génie Électrique".
        let rows = sqlx::query(&format!("SELECT {PROGRAM_COLUMNS} FROM filieres ORDER BY code"))
            .fetch_all(&mut *self.conn)
            .await?;

        for row in &rows {
            let program = row_to_program(row)?;
            if program.name_contains(fragment) {
                return Ok(Some(program));
            }
        }
        Ok(None)
    }

    async fn find_syllabus(&mut self, code: &str) -> Result<Option<SyllabusLink>, RepositoryError> {
        let row = sqlx::query(
            "SELECT f.code, f.nom, s.url_syllabus
             FROM syllabus s
             JOIN filieres f ON s.filiere_code = f.code
             WHERE LOWER(s.filiere_code) = LOWER(?)",
        )
        .bind(code.trim())
        .fetch_optional(&mut *self.conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(SyllabusLink {
            program_code: ProgramCode(row.try_get("code").map_err(decode_err)?),
            program_name: row.try_get("nom").map_err(decode_err)?,
            url: row.try_get("url_syllabus").map_err(decode_err)?,
        }))
    }

    async fn find_information(
        &mut self,
        query: &InformationQuery,
    ) -> Result<Option<InformationEntry>, RepositoryError> {
        let row = match query.topic {
            Some(topic) => {
                sqlx::query(
                    "SELECT categorie, titre, contenu
                     FROM informations_enspd
                     WHERE categorie = ? AND titre = ?
                     ORDER BY id
                     LIMIT 1",
                )
                .bind(query.category.as_str())
                .bind(topic)
                .fetch_optional(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT categorie, titre, contenu
                     FROM informations_enspd
                     WHERE categorie = ?
                     ORDER BY id
                     LIMIT 1",
                )
                .bind(query.category.as_str())
                .fetch_optional(&mut *self.conn)
                .await?
            }
        };

        row.as_ref().map(row_to_information).transpose()
    }

    async fn list_programs(&mut self) -> Result<Vec<ProgramSummary>, RepositoryError> {
        let rows = sqlx::query("SELECT code, nom, nombre_places FROM filieres ORDER BY code")
            .fetch_all(&mut *self.conn)
            .await?;

        rows.iter()
            .map(|row| -> Result<ProgramSummary, RepositoryError> {
                let seats: i64 = row.try_get("nombre_places").map_err(decode_err)?;
                Ok(ProgramSummary {
                    code: ProgramCode(row.try_get("code").map_err(decode_err)?),
                    name: row.try_get("nom").map_err(decode_err)?,
                    seats: non_negative_u32("nombre_places", seats)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use ounibot_core::domain::information::{InfoCategory, InformationQuery};

    use super::SqlCatalogStore;
    use crate::repositories::CatalogStore;
    use crate::{connect_with_settings, migrations, DbPool};

    async fn setup() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        sqlx::query(
            "INSERT INTO filieres (code, nom, departement, duree_annees, description,
                                   nombre_places, chef_departement, frais_annuels)
             VALUES ('GT', 'Génie des Télécommunications', 'Télécoms', 5, 'Réseaux', 40, 'Dr. A', 350000),
                    ('AA', 'Programme GT avancé', 'Télécoms', 2, 'Spécialisation', 10, 'Dr. B', 500000),
                    ('GE', 'Génie Électrique', 'Électricité', 5, 'Énergie', 50, 'Dr. C', 300000)",
        )
        .execute(&pool)
        .await
        .expect("seed programs");

        sqlx::query(
            "INSERT INTO syllabus (filiere_code, url_syllabus)
             VALUES ('GE', 'https://enspd.example/syllabus/ge.pdf')",
        )
        .execute(&pool)
        .await
        .expect("seed syllabus");

        sqlx::query(
            "INSERT INTO informations_enspd (id, categorie, titre, contenu)
             VALUES (1, 'VIE_ESTUDIANTINE', 'Logement', 'Cité universitaire'),
                    (2, 'VIE_ESTUDIANTINE', 'Bourses', 'Bourses d''excellence'),
                    (3, 'ADMISSION', 'Dossier', 'Pièces à fournir')",
        )
        .execute(&pool)
        .await
        .expect("seed information");

        pool
    }

    #[tokio::test]
    async fn code_lookup_is_case_insensitive() {
        let store = SqlCatalogStore::new(setup().await);
        let mut session = store.open().await.expect("open");

        let program = session.find_program_by_code("gt").await.expect("query").expect("hit");

        assert_eq!(program.code.as_str(), "GT");
        assert_eq!(program.seats, 40);
        assert_eq!(program.annual_fee, Decimal::from(350_000));
    }

    #[tokio::test]
    async fn name_lookup_uses_unicode_substring_in_code_order() {
        let store = SqlCatalogStore::new(setup().await);
        let mut session = store.open().await.expect("open");

        let electrical =
            session.find_program_by_name("électrique").await.expect("query").expect("hit");
        assert_eq!(electrical.code.as_str(), "GE");

        let telecom = session.find_program_by_name("TÉLÉCOM").await.expect("query").expect("hit");
        assert_eq!(telecom.code.as_str(), "GT");

        // "gt" is not a substring of any GT program name, only of AA's.
        let advanced = session.find_program_by_name("gt").await.expect("query").expect("hit");
        assert_eq!(advanced.code.as_str(), "AA");
    }

    #[tokio::test]
    async fn syllabus_join_returns_program_name() {
        let store = SqlCatalogStore::new(setup().await);
        let mut session = store.open().await.expect("open");

        let link = session.find_syllabus("ge").await.expect("query").expect("hit");
        assert_eq!(link.program_code.as_str(), "GE");
        assert_eq!(link.program_name, "Génie Électrique");

        assert!(session.find_syllabus("GT").await.expect("query").is_none());
    }

    #[tokio::test]
    async fn information_lookup_filters_topic_only_when_present() {
        let store = SqlCatalogStore::new(setup().await);
        let mut session = store.open().await.expect("open");

        let grants = session
            .find_information(&InformationQuery {
                category: InfoCategory::StudentLife,
                topic: Some("Bourses"),
            })
            .await
            .expect("query")
            .expect("hit");
        assert_eq!(grants.content, "Bourses d'excellence");

        let any_admission = session
            .find_information(&InformationQuery { category: InfoCategory::Admission, topic: None })
            .await
            .expect("query")
            .expect("hit");
        assert_eq!(any_admission.topic.as_deref(), Some("Dossier"));

        let missing = session
            .find_information(&InformationQuery {
                category: InfoCategory::General,
                topic: Some("Contact"),
            })
            .await
            .expect("query");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn listing_is_ordered_by_code() {
        let store = SqlCatalogStore::new(setup().await);
        let mut session = store.open().await.expect("open");

        let codes: Vec<String> = session
            .list_programs()
            .await
            .expect("list")
            .into_iter()
            .map(|program| program.code.0)
            .collect();

        assert_eq!(codes, vec!["AA", "GE", "GT"]);
    }

    #[tokio::test]
    async fn dropping_a_session_returns_the_connection() {
        let store = SqlCatalogStore::new(setup().await);

        // One pooled connection: a leaked session would make the next open time out.
        for _ in 0..3 {
            let mut session = store.open().await.expect("single-connection pool must be free");
            session.list_programs().await.expect("list");
        }
    }

    #[tokio::test]
    async fn query_against_missing_schema_is_a_database_error() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        let store = SqlCatalogStore::new(pool);
        let mut session = store.open().await.expect("open");

        let error = session.list_programs().await.expect_err("no tables yet");
        assert!(error.to_string().contains("database error"));
    }
}
