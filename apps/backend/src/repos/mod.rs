//! Repository functions for the domain layer (generic over `ConnectionTrait`).

pub mod customers;
pub mod users;
