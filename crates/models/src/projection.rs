//! Denormalized documents derived from the course collection.
//!
//! Modules and lessons have no identity of their own; the ids used here are
//! positional (`{courseId}-{module}` and `{courseId}-{module}-{lesson}`, 1-based)
//! and only exist in these documents. They are rebuilt from scratch on every write.

use serde::{Deserialize, Serialize};

use crate::course::Course;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub module_id: String,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub lesson_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub topics: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModulesDocument {
    pub modules: Vec<ModuleSummary>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LessonsDocument {
    pub lessons: Vec<LessonSummary>,
}

impl ModulesDocument {
    pub fn from_courses(courses: &[Course]) -> Self {
        let modules = courses
            .iter()
            .flat_map(|course| {
                course.modules.iter().enumerate().map(move |(m, module)| ModuleSummary {
                    module_id: format!("{}-{}", course.id, m + 1),
                    title: module.title.clone(),
                })
            })
            .collect();
        Self { modules }
    }
}

impl LessonsDocument {
    pub fn from_courses(courses: &[Course]) -> Self {
        let mut lessons = Vec::new();
        for course in courses {
            for (m, module) in course.modules.iter().enumerate() {
                for (l, lesson) in module.lessons.iter().enumerate() {
                    lessons.push(LessonSummary {
                        lesson_id: format!("{}-{}-{}", course.id, m + 1, l + 1),
                        title: lesson.title.clone(),
                        description: lesson.description.clone(),
                        topics: lesson.topics.clone(),
                    });
                }
            }
        }
        Self { lessons }
    }
}
