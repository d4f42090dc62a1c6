//! Infrastructure layer: database bootstrap, state assembly, storage error mapping.

pub mod db;
pub mod db_errors;
pub mod state;
