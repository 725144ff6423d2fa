//! Plugin registry.

use std::sync::Arc;

/// A component a plugin contributes to a named view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginView {
    /// View the component is rendered in, e.g. `response.section`.
    pub view: String,
    /// Component identifier understood by the host.
    pub component: String,
}

/// A client plugin.
pub trait ClientPlugin: Send + Sync {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Components contributed to views.
    fn views(&self) -> Vec<PluginView> {
        Vec::new()
    }
}

/// Holds the enabled plugins of a client instance.
#[derive(Clone, Default)]
pub struct PluginManager {
    plugins: Vec<Arc<dyn ClientPlugin>>,
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|plugin| plugin.name()))
            .finish()
    }
}

impl PluginManager {
    /// Enables the plugins of `available` named in `enabled`.
    ///
    /// Names without a matching plugin are logged and skipped. Plugins keep
    /// the order of `enabled`.
    #[must_use]
    pub fn new(available: &[Arc<dyn ClientPlugin>], enabled: &[String]) -> Self {
        let mut plugins = Vec::with_capacity(enabled.len());
        for name in enabled {
            match available.iter().find(|plugin| plugin.name() == name.as_str()) {
                Some(plugin) => plugins.push(Arc::clone(plugin)),
                None => tracing::warn!(plugin = %name, "configured plugin is not available"),
            }
        }
        Self { plugins }
    }

    /// Names of the enabled plugins.
    #[must_use]
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Components contributed to `view`, in plugin order.
    #[must_use]
    pub fn view_components(&self, view: &str) -> Vec<String> {
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.views())
            .filter(|contribution| contribution.view == view)
            .map(|contribution| contribution.component)
            .collect()
    }
}
