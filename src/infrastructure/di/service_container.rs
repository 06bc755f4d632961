//! Service container for dependency injection
//!
//! Wires settings and I/O boundaries into services.

use std::sync::Arc;

use crate::application::services::{RouteService, SessionService};
use crate::config::Settings;
use crate::infrastructure::traits::{Clock, Prompter, StdinPrompter, SystemClock};

/// Container holding settings and the boundaries services are built from.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Time source for transition delays
    pub clock: Arc<dyn Clock>,

    /// Source of interactive input
    pub prompter: Arc<dyn Prompter>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(SystemClock::default()),
            Arc::new(StdinPrompter),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        clock: Arc<dyn Clock>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            clock,
            prompter,
        }
    }

    /// Fresh session using the configured transition delay.
    pub fn session_service(&self) -> SessionService {
        SessionService::new(self.clock.clone(), self.settings.transition_delay())
    }

    pub fn route_service(&self) -> RouteService {
        RouteService::new()
    }
}
