//! Client-side routing.
//!
//! All router flavors share one table of named routes. Flavors only differ
//! in how a resolved path is exposed: as a path, behind a `#`, or not at
//! all (memory routing for the modal).

use std::collections::BTreeMap;

use parking_lot::RwLock;

/// Error type for navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// No route with that name exists.
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// A parameter of the route pattern was not supplied.
    #[error("route {route} requires parameter {param}")]
    MissingParam {
        /// Route name.
        route: String,
        /// Missing parameter.
        param: String,
    },
}

/// A named route and its path pattern.
///
/// Pattern segments starting with `:` are parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDefinition {
    /// Route name.
    pub name: &'static str,
    /// Path pattern.
    pub pattern: &'static str,
}

/// The route table shared by every router flavor.
pub const ROUTES: &[RouteDefinition] = &[
    RouteDefinition {
        name: "sidebar-layout",
        pattern: "/",
    },
    RouteDefinition {
        name: "workspace",
        pattern: "/workspace/:workspace",
    },
    RouteDefinition {
        name: "settings",
        pattern: "/workspace/:workspace/settings",
    },
    RouteDefinition {
        name: "document",
        pattern: "/workspace/:workspace/document/:document",
    },
    RouteDefinition {
        name: "request",
        pattern: "/workspace/:workspace/document/:document/path/:path/method/:method",
    },
    RouteDefinition {
        name: "example",
        pattern: "/workspace/:workspace/document/:document/path/:path/method/:method/example/:example",
    },
];

/// How navigation is reflected in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Path-based URLs (`/workspace/...`).
    Web,
    /// Fragment-based URLs (`#/workspace/...`).
    Hash,
    /// In-memory only; used by the modal.
    Memory,
}

/// A navigation request: a route name plus parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteLocation {
    /// Route name.
    pub name: String,
    /// Path parameters, unencoded.
    pub params: BTreeMap<String, String>,
    /// Query parameters, unencoded.
    pub query: BTreeMap<String, String>,
}

impl RouteLocation {
    /// A location for `name` without parameters.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

/// A location resolved against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// The requested location.
    pub location: RouteLocation,
    /// Encoded path including the query string.
    pub full_path: String,
    /// What the host should display, `None` for memory routing.
    pub href: Option<String>,
}

/// Entries kept in the navigation history; older ones are dropped.
pub const HISTORY_LIMIT: usize = 100;

/// Named-route router.
#[derive(Debug)]
pub struct Router {
    mode: HistoryMode,
    routes: &'static [RouteDefinition],
    history: RwLock<Vec<ResolvedRoute>>,
}

impl Router {
    /// A router for a given history mode over [`ROUTES`].
    #[must_use]
    pub const fn new(mode: HistoryMode) -> Self {
        Self {
            mode,
            routes: ROUTES,
            history: RwLock::new(Vec::new()),
        }
    }

    /// Path-based router for the full-page client.
    #[must_use]
    pub const fn web_history() -> Self {
        Self::new(HistoryMode::Web)
    }

    /// Hash-based router for hosts that cannot rewrite paths.
    #[must_use]
    pub const fn web_hash() -> Self {
        Self::new(HistoryMode::Hash)
    }

    /// In-memory router for the modal.
    #[must_use]
    pub const fn modal() -> Self {
        Self::new(HistoryMode::Memory)
    }

    /// The history mode.
    #[must_use]
    pub const fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// The route table.
    #[must_use]
    pub const fn routes(&self) -> &'static [RouteDefinition] {
        self.routes
    }

    /// Resolves a location without navigating.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown route names or missing parameters.
    pub fn resolve(&self, location: &RouteLocation) -> Result<ResolvedRoute, RouterError> {
        let route = self
            .routes
            .iter()
            .find(|route| route.name == location.name)
            .ok_or_else(|| RouterError::UnknownRoute(location.name.clone()))?;

        let mut segments = Vec::new();
        for segment in route.pattern.split('/').filter(|s| !s.is_empty()) {
            if let Some(param) = segment.strip_prefix(':') {
                let value = location
                    .params
                    .get(param)
                    .ok_or_else(|| RouterError::MissingParam {
                        route: route.name.to_string(),
                        param: param.to_string(),
                    })?;
                segments.push(urlencoding::encode(value).into_owned());
            } else {
                segments.push(segment.to_string());
            }
        }

        let mut full_path = format!("/{}", segments.join("/"));
        if !location.query.is_empty() {
            let query: Vec<String> = location
                .query
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
                })
                .collect();
            full_path.push('?');
            full_path.push_str(&query.join("&"));
        }

        let href = match self.mode {
            HistoryMode::Web => Some(full_path.clone()),
            HistoryMode::Hash => Some(format!("#{full_path}")),
            HistoryMode::Memory => None,
        };

        Ok(ResolvedRoute {
            location: location.clone(),
            full_path,
            href,
        })
    }

    /// Navigates to `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be resolved; the current
    /// route is left unchanged.
    ///
    /// At most [`HISTORY_LIMIT`] entries are kept.
    pub fn push(&self, location: RouteLocation) -> Result<ResolvedRoute, RouterError> {
        let resolved = self.resolve(&location)?;
        {
            let mut history = self.history.write();
            history.push(resolved.clone());
            if history.len() > HISTORY_LIMIT {
                let overflow = history.len() - HISTORY_LIMIT;
                history.drain(..overflow);
            }
        }
        tracing::debug!(route = %resolved.location.name, path = %resolved.full_path, "navigated");
        Ok(resolved)
    }

    /// Returns to the previous location, if any.
    pub fn back(&self) -> Option<ResolvedRoute> {
        let mut history = self.history.write();
        if history.len() < 2 {
            return None;
        }
        history.pop();
        history.last().cloned()
    }

    /// The current location.
    #[must_use]
    pub fn current(&self) -> Option<ResolvedRoute> {
        self.history.read().last().cloned()
    }

    /// Number of entries in the navigation history.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }

    /// Matches an encoded path (without query) back to a named location.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteLocation> {
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let actual: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        self.routes.iter().find_map(|route| {
            let pattern: Vec<&str> = route.pattern.split('/').filter(|s| !s.is_empty()).collect();
            if pattern.len() != actual.len() {
                return None;
            }
            let mut location = RouteLocation::named(route.name);
            for (expected, segment) in pattern.iter().zip(&actual) {
                if let Some(param) = expected.strip_prefix(':') {
                    let decoded = urlencoding::decode(segment).ok()?;
                    location.params.insert(param.to_string(), decoded.into_owned());
                } else if expected != segment {
                    return None;
                }
            }
            Some(location)
        })
    }
}
