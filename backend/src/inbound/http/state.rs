//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the badge use-case port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::StatsShieldQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Badge use-case.
    pub shields: Arc<dyn StatsShieldQuery>,
}

impl HttpState {
    /// Bundle the badge use-case for handlers.
    #[must_use]
    pub fn new(shields: Arc<dyn StatsShieldQuery>) -> Self {
        Self { shields }
    }
}
