//! Service container for dependency injection
//!
//! Wires tree sources up with settings and I/O implementations.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::application::services::{FileSystemSource, PopulationSource, SourceKind, TreeSource};
use crate::config::Settings;
use crate::domain::{ColorSource, RandomColors, TreeArena};
use crate::infrastructure::traits::{HttpClient, RealHttpClient};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding settings and the I/O implementations sources need.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// HTTP abstraction for remote datasets
    pub http: Arc<dyn HttpClient>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let timeout = Duration::from_secs(settings.population.timeout_secs);
        let http = RealHttpClient::new(timeout)
            .map_err(|e| InfraError::io("build HTTP client", e))?;
        Ok(Self::with_deps(settings, Arc::new(http)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, http: Arc<dyn HttpClient>) -> Self {
        Self {
            settings: Arc::new(settings),
            http,
        }
    }

    pub fn source(&self, kind: &SourceKind) -> Box<dyn TreeSource> {
        match kind {
            SourceKind::FileSystem(path) => Box::new(FileSystemSource::new(path)),
            SourceKind::Population => Box::new(PopulationSource::new(
                self.settings.population.clone(),
                Arc::clone(&self.http),
            )),
        }
    }

    /// Color source honoring the configured seed.
    pub fn colors(&self) -> Box<dyn ColorSource> {
        Box::new(RandomColors::with_seed(self.settings.colors.seed))
    }

    /// Builds the tree for `kind`.
    pub fn load_tree(&self, kind: &SourceKind) -> InfraResult<TreeArena> {
        let source = self.source(kind);
        info!("loading tree from {}", source.describe());
        Ok(source.load(self.colors())?)
    }
}
