//! Service layer for the course catalog.
//! - `file::course_store`: JSON-file persistence of courses and their projections.
//! - `course`: repository seam and the CRUD service on top of it.
//! - Errors are surfaced as `ServiceError`; the HTTP layer picks status codes.

pub mod course;
pub mod errors;
pub mod file;
pub mod runtime;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use course::{repository::CourseRepository, service::CourseService};
pub use file::course_store::CourseStore;
