use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Top-level persisted entity. `id` is assigned by the service and never changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Module {
    pub title: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lesson {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub content: Vec<Content>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Video,
    Audio,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Text, ContentType::Video, ContentType::Audio];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// A single piece of lesson material; `data` is either inline text or a URI.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub data: String,
}

/// Create payload: a course without its id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub modules: Vec<Module>,
}

impl CourseInput {
    /// Validate a raw JSON payload and convert it into a typed input.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ModelError> {
        crate::validation::validate_course_input(&value)?;
        serde_json::from_value(value).map_err(|e| ModelError::validation(e.to_string()))
    }

    /// Re-run the schema check on an already typed input.
    pub fn validate(&self) -> Result<(), ModelError> {
        let value = serde_json::to_value(self).map_err(|e| ModelError::validation(e.to_string()))?;
        crate::validation::validate_course_input(&value)
    }

    pub fn into_course(self, id: u64) -> Course {
        Course { id, title: self.title, description: self.description, modules: self.modules }
    }
}

/// Update payload: every field optional. Unknown keys, `id` included, are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoursePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<Module>>,
}

impl CoursePatch {
    pub fn from_json(value: serde_json::Value) -> Result<Self, ModelError> {
        crate::validation::validate_course_patch(&value)?;
        serde_json::from_value(value).map_err(|e| ModelError::validation(e.to_string()))
    }

    /// Re-run the schema check on an already typed patch.
    pub fn validate(&self) -> Result<(), ModelError> {
        let value = serde_json::to_value(self).map_err(|e| ModelError::validation(e.to_string()))?;
        crate::validation::validate_course_patch(&value)
    }

    /// Shallow merge: provided fields replace the existing ones wholesale.
    pub fn apply_to(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(modules) = self.modules {
            course.modules = modules;
        }
    }
}
