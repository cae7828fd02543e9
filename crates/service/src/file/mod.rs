//! File-backed implementations of the service's storage seams.

pub mod course_store;
