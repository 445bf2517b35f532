//! Integration tests for `DieselEnrollmentRepository`.
//!
//! Each test runs against its own embedded PostgreSQL database cloned from a
//! migrated template, so the real schema, sequence and unique constraint are
//! exercised.

use chrono::{SubsecRound, Utc};
use diesel::pg::PgConnection;
use diesel::{Connection, RunQueryDsl};
use enrollment::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use enrollment::domain::{EnrollmentId, EnrollmentRequest, NewEnrollment};
use enrollment::outbound::persistence::{
    DbPool, DieselEnrollmentRepository, PoolConfig, apply_migrations,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    repository: DieselEnrollmentRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster).map_err(|err| err.to_string())?;
    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselEnrollmentRepository::new(pool),
        database_url,
        _database: temp_db,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_enrollment(name: &str, email: &str, course: &str) -> NewEnrollment {
    let validated = EnrollmentRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        course: course.to_owned(),
    }
    .validate()
    .expect("valid enrollment");
    // Postgres keeps microseconds.
    NewEnrollment::from_validated(validated, Utc::now().trunc_subsecs(6))
}

fn drop_enrollments_table(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| err.to_string())?;
    diesel::sql_query("DROP TABLE IF EXISTS enrollments")
        .execute(&mut conn)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

#[rstest]
fn insert_returns_generated_ids_and_rows_read_back(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_returns_generated_ids_and_rows_read_back skipped");
        return;
    };
    let repository = context.repository.clone();
    let first = new_enrollment("Ana Silva", "ana@ex.com", "Data Science");
    let second = new_enrollment("Bruno Costa", "bruno@ex.com", "Mathematics");

    let (stored_first, stored_second) = context.runtime.block_on(async {
        let a = repository.insert(&first).await.expect("insert first");
        let b = repository.insert(&second).await.expect("insert second");
        (a, b)
    });

    assert!(stored_second.id > stored_first.id, "ids must increase");
    assert_eq!(stored_first.name, first.name);
    assert_eq!(stored_first.email, first.email);
    assert_eq!(stored_first.course, first.course);
    assert_eq!(stored_first.created_at, first.created_at);

    let found = context
        .runtime
        .block_on(async { repository.find_by_id(stored_first.id).await })
        .expect("find by id")
        .expect("stored enrollment exists");
    assert_eq!(found, stored_first);

    let all = context
        .runtime
        .block_on(async { repository.find_all().await })
        .expect("find all");
    let ids: Vec<EnrollmentId> = all.iter().map(|enrollment| enrollment.id).collect();
    assert_eq!(ids, vec![stored_first.id, stored_second.id]);
}

#[rstest]
fn lookups_by_email_match_exactly(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: lookups_by_email_match_exactly skipped");
        return;
    };
    let repository = context.repository.clone();
    let stored = context
        .runtime
        .block_on(async {
            repository
                .insert(&new_enrollment("Ana Silva", "ana@ex.com", "Data Science"))
                .await
        })
        .expect("insert");

    context.runtime.block_on(async {
        let found = repository
            .find_by_email("ana@ex.com")
            .await
            .expect("find by email");
        assert_eq!(found, Some(stored.clone()));
        assert!(
            repository
                .exists_by_email("ana@ex.com")
                .await
                .expect("exists")
        );

        for other in ["ANA@EX.COM", "nobody@ex.com"] {
            assert_eq!(
                repository.find_by_email(other).await.expect("find other"),
                None,
                "{other} must not match"
            );
            assert!(!repository.exists_by_email(other).await.expect("exists other"));
        }
    });
}

#[rstest]
fn unknown_id_is_none(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_id_is_none skipped");
        return;
    };
    let repository = context.repository.clone();
    let missing = context
        .runtime
        .block_on(async { repository.find_by_id(EnrollmentId::new(9_999)).await })
        .expect("lookup succeeds");
    assert!(missing.is_none());
}

#[rstest]
fn second_insert_of_same_email_is_duplicate(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: second_insert_of_same_email_is_duplicate skipped");
        return;
    };
    let repository = context.repository.clone();

    let error = context.runtime.block_on(async {
        repository
            .insert(&new_enrollment("Ana Silva", "ana@ex.com", "Data Science"))
            .await
            .expect("first insert");
        repository
            .insert(&new_enrollment("Ana Souza", "ana@ex.com", "Physics"))
            .await
            .expect_err("second insert must fail")
    });

    assert_eq!(error, EnrollmentRepositoryError::duplicate_email("ana@ex.com"));
    let all = context
        .runtime
        .block_on(async { repository.find_all().await })
        .expect("find all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name.as_ref(), "Ana Silva");
}

#[rstest]
fn concurrent_inserts_of_same_email_store_one_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_inserts_of_same_email_store_one_row skipped");
        return;
    };
    let left_repo = context.repository.clone();
    let right_repo = context.repository.clone();
    let left = new_enrollment("Ana Silva", "race@ex.com", "Data Science");
    let right = new_enrollment("Ana Souza", "race@ex.com", "Physics");

    let (left_result, right_result) = context
        .runtime
        .block_on(async { tokio::join!(left_repo.insert(&left), right_repo.insert(&right)) });

    let outcomes = [left_result, right_result];
    assert_eq!(outcomes.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|result| matches!(
        result,
        Err(EnrollmentRepositoryError::DuplicateEmail { email }) if email == "race@ex.com"
    )));
}

#[rstest]
fn migrations_are_idempotent(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_are_idempotent skipped");
        return;
    };
    context
        .runtime
        .block_on(apply_migrations(context.database_url.as_str()))
        .expect("re-applying migrations is a no-op");
}

#[rstest]
fn missing_table_surfaces_query_error(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_table_surfaces_query_error skipped");
        return;
    };
    drop_enrollments_table(context.database_url.as_str()).expect("drop enrollments table");

    let repository = context.repository.clone();
    let error = context
        .runtime
        .block_on(async { repository.exists_by_email("ana@ex.com").await })
        .expect_err("query against a dropped table fails");
    assert!(
        matches!(error, EnrollmentRepositoryError::Query { .. }),
        "unexpected error: {error:?}"
    );
}
