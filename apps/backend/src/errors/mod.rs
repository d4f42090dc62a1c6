//! Storage-agnostic error types shared by repositories and services.

pub mod domain;

pub use domain::DomainError;
