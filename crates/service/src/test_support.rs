#![cfg(test)]
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use configs::StorageConfig;
use models::{Content, ContentType, Course, Lesson, Module};
use tokio::sync::Mutex;

use crate::course::repository::CourseRepository;
use crate::errors::ServiceError;
use crate::file::course_store::CourseStore;

/// Fresh initialized store in its own temp directory; caller removes the dir.
pub async fn temp_store(tag: &str) -> Result<(CourseStore, PathBuf), ServiceError> {
    let dir = std::env::temp_dir().join(format!("course_store_{tag}_{}", uuid::Uuid::new_v4()));
    let store = CourseStore::new(&StorageConfig::in_dir(&dir));
    store.init().await?;
    Ok((store, dir))
}

pub fn sample_course(id: u64) -> Course {
    Course {
        id,
        title: format!("Course {id}"),
        description: format!("Description {id}"),
        modules: vec![Module {
            title: "Getting Started".into(),
            lessons: vec![Lesson {
                title: "Basics".into(),
                description: Some("An overview of the basics".into()),
                topics: vec!["Variables".into()],
                content: vec![Content { kind: ContentType::Video, data: "https://example.com/video.mp4".into() }],
            }],
        }],
    }
}

/// In-memory repository that counts saves and can be told to fail them.
#[derive(Default)]
pub struct MemoryRepo {
    pub courses: Mutex<Vec<Course>>,
    pub saves: AtomicUsize,
    pub fail_saves: std::sync::atomic::AtomicBool,
}

impl MemoryRepo {
    pub fn with(courses: Vec<Course>) -> Self {
        Self { courses: Mutex::new(courses), ..Self::default() }
    }

    pub fn save_count(&self) -> usize { self.saves.load(Ordering::SeqCst) }
}

#[async_trait]
impl CourseRepository for MemoryRepo {
    async fn load(&self) -> Result<Vec<Course>, ServiceError> {
        Ok(self.courses.lock().await.clone())
    }

    async fn save(&self, courses: &[Course]) -> Result<(), ServiceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ServiceError::Write("disk full".into()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.courses.lock().await = courses.to_vec();
        Ok(())
    }
}
