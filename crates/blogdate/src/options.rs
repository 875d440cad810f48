// ABOUTME: Engine configuration options and the fluent EngineBuilder.
// ABOUTME: The registry is injected here; there is no hidden global configuration state.

use crate::engine::Engine;
use crate::registry::{load_builtin_registry, SiteRegistry};

/// Configuration options for the extraction engine.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Run the structured-metadata probes when the per-site selector path
    /// yields nothing. Off for the primary scrape path; repair workflows
    /// turn it on.
    pub structured_fallback: bool,
}

/// Builder for constructing [`Engine`] instances.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    registry: Option<SiteRegistry>,
    opts: Options,
}

impl EngineBuilder {
    /// Create a new EngineBuilder with default options.
    pub fn new() -> Self {
        Self {
            registry: None,
            opts: Options::default(),
        }
    }

    /// Use a custom selector registry instead of the builtin table.
    pub fn registry(mut self, registry: SiteRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Enable or disable the structured-metadata fallback pass.
    pub fn structured_fallback(mut self, enabled: bool) -> Self {
        self.opts.structured_fallback = enabled;
        self
    }

    /// Build the Engine with the configured options.
    pub fn build(self) -> Engine {
        let registry = self.registry.unwrap_or_else(load_builtin_registry);
        Engine::new(registry, self.opts)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
