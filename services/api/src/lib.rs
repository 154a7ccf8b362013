//! Biohacking Journal API
//!
//! A CRUD backend for a personal biohacking journal: users record attempts
//! at behavior-change techniques, tag them with motivations, and log journal
//! entries with ratings.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
