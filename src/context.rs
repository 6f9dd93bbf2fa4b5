//! Application context — long-lived shared state, built once at
//! startup and passed by reference.
//!
//! Holding the gateway handle and the model cache in one explicit
//! object (instead of globals) lets tests substitute doubles without
//! touching process state.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::llm::{self, CompletionGateway};
use crate::nlp::ModelCache;
use crate::pipeline::Classifier;
use crate::templates::TemplateCatalog;

/// Shared application state.
pub struct AppContext {
    pub classifier: Arc<Classifier>,
    pub models: Arc<ModelCache>,
    pub catalog: Arc<TemplateCatalog>,
}

impl AppContext {
    /// Build the production context: Groq gateway, pre-warmed model
    /// cache, built-in template catalog.
    pub fn initialize(config: &Config) -> Result<Self, Error> {
        let gateway = llm::create_gateway(&config.llm)?;
        Self::with_gateway(gateway)
    }

    /// Build the context around an arbitrary gateway (tests pass a
    /// stub here).
    ///
    /// The model cache is pre-warmed so the request path never races
    /// on first-use construction, and a runtime missing a supported
    /// language's model fails at startup instead of mid-request.
    pub fn with_gateway(gateway: Arc<dyn CompletionGateway>) -> Result<Self, Error> {
        let models = Arc::new(ModelCache::new());
        models.prewarm()?;

        let catalog = Arc::new(TemplateCatalog::builtin());
        let classifier = Arc::new(Classifier::new(
            gateway,
            Arc::clone(&models),
            Arc::clone(&catalog),
        ));

        Ok(Self {
            classifier,
            models,
            catalog,
        })
    }
}
