//! HTTP handlers for the generic resource CRUD.

pub mod resource;

pub use resource::*;
