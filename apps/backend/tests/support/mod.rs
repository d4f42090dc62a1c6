#![allow(dead_code)]

pub mod app_builder;
pub mod factory;

pub use app_builder::{create_test_app, test_state, test_tokens};
pub use factory::{bearer, seed_customer, seed_user, SeededUser};
