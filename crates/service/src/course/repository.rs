use async_trait::async_trait;
use models::Course;

use crate::errors::ServiceError;

/// Whole-collection storage for courses.
/// `save` replaces everything previously stored, derived data included.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Course>, ServiceError>;
    async fn save(&self, courses: &[Course]) -> Result<(), ServiceError>;
}
