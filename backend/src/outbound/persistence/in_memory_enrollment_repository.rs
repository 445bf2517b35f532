//! In-process `EnrollmentRepository` used when no database is configured.
//!
//! State lives behind one mutex. Uniqueness check and insert happen under the
//! same guard, so concurrent inserts for one email cannot both succeed.
//! Nothing survives a restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{Enrollment, EnrollmentId, NewEnrollment};

#[derive(Debug)]
struct Store {
    next_id: i64,
    rows: Vec<Enrollment>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl Store {
    fn by_email(&self, email: &str) -> Option<&Enrollment> {
        self.rows.iter().find(|row| row.email.as_ref() == email)
    }
}

/// Memory-backed enrollment gateway with a monotonically increasing id.
///
/// # Examples
/// ```
/// use enrollment::outbound::persistence::InMemoryEnrollmentRepository;
///
/// let repository = InMemoryEnrollmentRepository::new();
/// # let _ = repository;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEnrollmentRepository {
    store: Mutex<Store>,
}

impl InMemoryEnrollmentRepository {
    /// Create an empty repository whose first identifier is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, EnrollmentRepositoryError> {
        self.store
            .lock()
            .map_err(|_| EnrollmentRepositoryError::query("in-memory enrollment store poisoned"))
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn insert(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut store = self.lock()?;
        if store.by_email(enrollment.email.as_ref()).is_some() {
            return Err(EnrollmentRepositoryError::duplicate_email(
                enrollment.email.as_ref(),
            ));
        }

        let id = EnrollmentId::new(store.next_id);
        store.next_id += 1;
        let stored = enrollment.clone().with_id(id);
        store.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        Ok(self.lock()?.rows.clone())
    }

    async fn find_by_id(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self.lock()?.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self.lock()?.by_email(email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, EnrollmentRepositoryError> {
        Ok(self.lock()?.by_email(email).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::EnrollmentRequest;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn new_enrollment(email: &str) -> NewEnrollment {
        let validated = EnrollmentRequest {
            name: "Ana Silva".to_owned(),
            email: email.to_owned(),
            course: "Data Science".to_owned(),
        }
        .validate()
        .expect("valid request");
        NewEnrollment::from_validated(validated, Utc::now())
    }

    #[fixture]
    fn repository() -> InMemoryEnrollmentRepository {
        InMemoryEnrollmentRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn assigns_increasing_ids(repository: InMemoryEnrollmentRepository) {
        let first = repository
            .insert(&new_enrollment("a@ex.com"))
            .await
            .expect("first insert");
        let second = repository
            .insert(&new_enrollment("b@ex.com"))
            .await
            .expect("second insert");

        assert_eq!(first.id, EnrollmentId::new(1));
        assert_eq!(second.id, EnrollmentId::new(2));
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_a_second_row_for_an_email(repository: InMemoryEnrollmentRepository) {
        repository
            .insert(&new_enrollment("ana@ex.com"))
            .await
            .expect("first insert");

        let error = repository
            .insert(&new_enrollment("ana@ex.com"))
            .await
            .expect_err("duplicate email");

        assert_eq!(error, EnrollmentRepositoryError::duplicate_email("ana@ex.com"));
        assert_eq!(repository.find_all().await.expect("listing").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn email_matching_is_exact(repository: InMemoryEnrollmentRepository) {
        repository
            .insert(&new_enrollment("ana@ex.com"))
            .await
            .expect("insert");

        assert!(repository.exists_by_email("ana@ex.com").await.expect("lookup"));
        assert!(!repository.exists_by_email("ANA@ex.com").await.expect("lookup"));
        assert!(
            repository
                .find_by_email("ana@ex.co")
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_miss_without_error(repository: InMemoryEnrollmentRepository) {
        assert!(
            repository
                .find_by_id(EnrollmentId::new(42))
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(repository.find_all().await.expect("listing").is_empty());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_for_one_email_admit_one() {
        let repository = Arc::new(InMemoryEnrollmentRepository::new());
        let attempts = (0..8).map(|_| {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move { repository.insert(&new_enrollment("ana@ex.com")).await })
        });

        let mut successes = 0;
        for attempt in attempts.collect::<Vec<_>>() {
            if attempt.await.expect("task completes").is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.find_all().await.expect("listing").len(), 1);
    }
}
