//! Domains module containing business logic organized by bounded contexts.

pub mod resources;
pub mod tools;
