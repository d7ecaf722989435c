//! Persistence model for student records: the SeaORM entity, request input
//! shapes with their validation rules, and connection helpers.

pub mod errors;
pub mod db;
pub mod student;
pub mod validation;

#[cfg(test)]
mod tests;
