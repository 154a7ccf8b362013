//! Application state shared across handlers

use sqlx::PgPool;

use crate::repositories::{
    BiohackRepository, JournalRepository, MotivationBiohackRepository, MotivationRepository,
    UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub motivation_repository: MotivationRepository,
    pub biohack_repository: BiohackRepository,
    pub journal_repository: JournalRepository,
    pub motivation_biohack_repository: MotivationBiohackRepository,
}

impl AppState {
    /// Build the application state from a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            user_repository: UserRepository::new(pool.clone()),
            motivation_repository: MotivationRepository::new(pool.clone()),
            biohack_repository: BiohackRepository::new(pool.clone()),
            journal_repository: JournalRepository::new(pool.clone()),
            motivation_biohack_repository: MotivationBiohackRepository::new(pool.clone()),
            db_pool: pool,
        }
    }
}
