use std::sync::Arc;

use models::{Course, CourseInput, CoursePatch};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::course::repository::CourseRepository;
use crate::errors::ServiceError;

/// CRUD over the full course collection.
///
/// Every call loads a fresh snapshot from the repository; mutations write the
/// whole snapshot back. Mutations inside one process are serialized so two
/// concurrent requests cannot drop each other's change. Other processes
/// writing the same files are not coordinated with.
pub struct CourseService<R: CourseRepository> {
    repo: Arc<R>,
    write_lock: Mutex<()>,
}

/// `max(existing ids) + 1`, or 1 for an empty collection.
pub fn next_id(courses: &[Course]) -> Result<u64, ServiceError> {
    match courses.iter().map(|c| c.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| ServiceError::Write("course id space exhausted".into())),
    }
}

impl<R: CourseRepository> CourseService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, write_lock: Mutex::new(()) } }

    pub async fn find_all(&self) -> Result<Vec<Course>, ServiceError> {
        self.repo.load().await
    }

    /// `Ok(None)` when no course carries `id`.
    pub async fn find_course_by_id(&self, id: u64) -> Result<Option<Course>, ServiceError> {
        let courses = self.repo.load().await?;
        Ok(courses.into_iter().find(|c| c.id == id))
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CourseInput) -> Result<Course, ServiceError> {
        input.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut courses = self.repo.load().await?;
        let course = input.into_course(next_id(&courses)?);
        courses.push(course.clone());
        self.repo.save(&courses).await?;
        info!(id = course.id, total = courses.len(), event = "course_created", "created course");
        Ok(course)
    }

    /// Shallow-merge `patch` into the course. `Ok(None)` when the id is unknown.
    #[instrument(skip(self, patch))]
    pub async fn update_course(&self, id: u64, patch: CoursePatch) -> Result<Option<Course>, ServiceError> {
        patch.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut courses = self.repo.load().await?;
        let Some(course) = courses.iter_mut().find(|c| c.id == id) else {
            warn!(id, event = "course_update_missing", "no course to update");
            return Ok(None);
        };
        patch.apply_to(course);
        let updated = course.clone();
        self.repo.save(&courses).await?;
        info!(id, event = "course_updated", "updated course");
        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    pub async fn delete_course(&self, id: u64) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut courses = self.repo.load().await?;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        if courses.len() == before {
            warn!(id, event = "course_delete_missing", "no course to delete");
            return Err(ServiceError::delete_not_found());
        }
        self.repo.save(&courses).await?;
        info!(id, total = courses.len(), event = "course_deleted", "deleted course");
        Ok(())
    }
}
