//! Embedded PostgreSQL databases for integration tests.
//!
//! One cluster is shared per test binary. Each test gets its own database,
//! cloned from a template that already carries the embedded migrations, so
//! suites never see each other's rows.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use enrollment::domain::ports::EnrollmentRepositoryError;
use enrollment::outbound::persistence::MIGRATIONS;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "enrollment_template";
const PROVISION_RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Shared cluster for this test binary, started on first use.
///
/// The password is pinned so a data directory left by an earlier run still
/// accepts connections.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "enrollment_embedded_test");
        }
    }

    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= PROVISION_RETRIES => return Err(format!("{error:?}")),
            Err(_) => {
                std::thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, EnrollmentRepositoryError> {
    let hash = hash_directory(migrations_dir())
        .map_err(|err| EnrollmentRepositoryError::query(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Run every pending embedded migration against `url`.
pub fn migrate_schema(url: &str) -> Result<(), EnrollmentRepositoryError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| EnrollmentRepositoryError::connection(format!("{err:?}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| EnrollmentRepositoryError::query(format!("migration: {err:?}")))?;
    Ok(())
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, EnrollmentRepositoryError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| EnrollmentRepositoryError::query(format!("template check: {err:?}")))?;

    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| EnrollmentRepositoryError::query(format!("create template: {err:?}")))?;
        let url = cluster.connection().database_url(&template_name);
        migrate_schema(&url)?;
    }

    Ok(template_name)
}

fn provision_attempt(
    cluster: &ClusterHandle,
    attempt: usize,
) -> Result<TemporaryDatabase, EnrollmentRepositoryError> {
    let template_name = ensure_template_database(cluster).map_err(|error| {
        EnrollmentRepositoryError::query(format!(
            "template: attempt {attempt}/{PROVISION_RETRIES}: {error}"
        ))
    })?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|error| {
            EnrollmentRepositoryError::query(format!(
                "clone template: attempt {attempt}/{PROVISION_RETRIES}: {error:?}"
            ))
        })
}

/// Fresh migrated database cloned from the template; dropped with the handle.
pub fn provision_template_database(
    cluster: &ClusterHandle,
) -> Result<TemporaryDatabase, EnrollmentRepositoryError> {
    let mut last_error = None;
    for attempt in 1..=PROVISION_RETRIES {
        match provision_attempt(cluster, attempt) {
            Ok(database) => return Ok(database),
            Err(error) => last_error = Some(error),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(RETRY_DELAY);
        }
    }

    Err(last_error.unwrap_or_else(|| {
        EnrollmentRepositoryError::query("clone template: exhausted retries")
    }))
}
