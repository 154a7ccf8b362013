//! API models for request and response payloads

pub mod biohack;
pub mod journal;
pub mod motivation;
pub mod motivation_biohack;
pub mod user;
