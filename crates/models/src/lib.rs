//! Course catalog data model.
//!
//! - `course`: persisted entities plus the create/update payloads.
//! - `validation`: schema check applied to raw create payloads.
//! - `projection`: denormalized module/lesson documents derived from courses.

pub mod course;
pub mod errors;
pub mod projection;
pub mod validation;

pub use course::{Content, ContentType, Course, CourseInput, CoursePatch, Lesson, Module};
