//! Service layer for student records.
//! - Owns the operation semantics (validation first, not-found rules, transactions).
//! - Talks to storage only through `StudentRepository`.
//! - Independent of the web framework; the server crate maps results to HTTP.

pub mod errors;
pub mod students;
#[cfg(test)]
pub mod test_support;

pub use students::StudentService;
