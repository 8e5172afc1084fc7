use std::sync::Arc;

use crate::document::profile::CapacityProfile;
use crate::models::office::Office;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// A4 capacity profile with the configured layout overrides applied.
    pub profile: Arc<CapacityProfile>,
    pub office: Arc<Office>,
}

impl AppState {
    pub fn new(office: Office, profile: CapacityProfile) -> Self {
        Self {
            profile: Arc::new(profile),
            office: Arc::new(office),
        }
    }
}
