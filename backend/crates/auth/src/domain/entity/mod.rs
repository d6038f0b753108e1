//! Entities

pub mod person;
