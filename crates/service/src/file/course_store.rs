use std::path::{Path, PathBuf};

use async_trait::async_trait;
use configs::StorageConfig;
use models::{
    projection::{LessonsDocument, ModulesDocument},
    Course,
};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::course::repository::CourseRepository;
use crate::errors::ServiceError;
use crate::storage::json_file;

/// File store for the course collection.
///
/// The primary file holds the full array of courses. Two projection files
/// (modules, lessons) are derived from the same snapshot on every write and
/// are never read back as a source of truth.
#[derive(Clone, Debug)]
pub struct CourseStore {
    data_dir: PathBuf,
    courses_path: PathBuf,
    modules_path: PathBuf,
    lessons_path: PathBuf,
}

impl CourseStore {
    pub fn new(cfg: &StorageConfig) -> Self {
        Self {
            data_dir: cfg.data_dir.clone(),
            courses_path: cfg.courses_path(),
            modules_path: cfg.modules_path(),
            lessons_path: cfg.lessons_path(),
        }
    }

    pub fn courses_path(&self) -> &Path { &self.courses_path }
    pub fn modules_path(&self) -> &Path { &self.modules_path }
    pub fn lessons_path(&self) -> &Path { &self.lessons_path }

    /// Create the data directory and seed an empty collection if the primary file is missing.
    /// Existing files are left untouched.
    pub async fn init(&self) -> Result<(), ServiceError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| ServiceError::Write(format!("{}: {e}", self.data_dir.display())))?;
        let exists = fs::try_exists(&self.courses_path)
            .await
            .map_err(|e| ServiceError::Read(format!("{}: {e}", self.courses_path.display())))?;
        if !exists {
            warn!(path = %self.courses_path.display(), "course file missing; seeding empty collection");
            self.persist(&[]).await?;
        }
        Ok(())
    }

    pub async fn read_courses(&self) -> Result<Vec<Course>, ServiceError> {
        let courses: Vec<Course> = json_file::read_array(&self.courses_path).await?;
        debug!(count = courses.len(), "courses loaded");
        Ok(courses)
    }

    pub async fn write_courses(&self, courses: &[Course]) -> Result<(), ServiceError> {
        json_file::write_atomic(&self.courses_path, &json_file::to_pretty(courses)?).await
    }

    pub async fn write_modules(&self, courses: &[Course]) -> Result<(), ServiceError> {
        let doc = ModulesDocument::from_courses(courses);
        json_file::write_atomic(&self.modules_path, &json_file::to_pretty(&doc)?).await
    }

    pub async fn write_lessons(&self, courses: &[Course]) -> Result<(), ServiceError> {
        let doc = LessonsDocument::from_courses(courses);
        json_file::write_atomic(&self.lessons_path, &json_file::to_pretty(&doc)?).await
    }

    pub async fn read_modules(&self) -> Result<ModulesDocument, ServiceError> {
        json_file::read_document(&self.modules_path).await
    }

    pub async fn read_lessons(&self) -> Result<LessonsDocument, ServiceError> {
        json_file::read_document(&self.lessons_path).await
    }

    /// Write the collection and both projections from one snapshot.
    ///
    /// All three documents are staged next to their targets before any target
    /// is replaced; a failure while staging leaves the live files untouched.
    /// Renames then run in order courses, modules, lessons.
    pub async fn persist(&self, courses: &[Course]) -> Result<(), ServiceError> {
        let documents = [
            (&self.courses_path, json_file::to_pretty(courses)?),
            (&self.modules_path, json_file::to_pretty(&ModulesDocument::from_courses(courses))?),
            (&self.lessons_path, json_file::to_pretty(&LessonsDocument::from_courses(courses))?),
        ];

        let mut staged = Vec::with_capacity(documents.len());
        for (target, bytes) in &documents {
            match json_file::stage(target, bytes).await {
                Ok(tmp) => staged.push(tmp),
                Err(e) => {
                    json_file::discard(&staged).await;
                    return Err(e);
                }
            }
        }

        for (i, ((target, _), tmp)) in documents.iter().zip(&staged).enumerate() {
            if let Err(e) = json_file::commit(tmp, target).await {
                json_file::discard(&staged[i..]).await;
                return Err(e);
            }
        }

        info!(count = courses.len(), event = "courses_persisted", "course collection and projections written");
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn load(&self) -> Result<Vec<Course>, ServiceError> { self.read_courses().await }
    async fn save(&self, courses: &[Course]) -> Result<(), ServiceError> { self.persist(courses).await }
}
