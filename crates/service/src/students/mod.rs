//! Student records: three-layer layout (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::StudentService;

/// Service over a type-erased repository, for callers that pick the backend at runtime.
pub type DynStudentService = StudentService<dyn repository::StudentRepository>;
