//! Repositories for database operations
//!
//! One repository per aggregate. The single-key repositories share a uniform
//! method set (get_all, find_by_id, create, update, delete, exists); the
//! motivation-biohack repository is keyed by the (motivation_id, biohack_id)
//! pair instead of a surrogate id.

pub mod biohack;
pub mod journal;
pub mod motivation;
pub mod motivation_biohack;
pub mod user;

pub use biohack::BiohackRepository;
pub use journal::JournalRepository;
pub use motivation::MotivationRepository;
pub use motivation_biohack::MotivationBiohackRepository;
pub use user::UserRepository;
