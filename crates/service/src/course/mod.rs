//! Course module: repository seam plus the CRUD service built on it.

pub mod repository;
pub mod service;
