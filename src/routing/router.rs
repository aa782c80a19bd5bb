//! Route registration, lookup and dispatch.
//!
//! # Responsibilities
//! - Collect routes per method in registration order
//! - Freeze them into an immutable, precompiled route table
//! - Normalize each request path and resolve it to a handler
//! - Invoke the handler, or produce the JSON 404
//!
//! # Design Decisions
//! - Immutable after `build()` (shared via `Arc`, no locks)
//! - Exact lookup first, then placeholder patterns in registration order
//! - First registered pattern wins; no specificity scoring
//! - Re-registering a (method, pattern) replaces the handler in place
//! - Handler failures are returned to the caller, not recovered here

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::routing::handler::{
    Handler, HandlerRef, HandlerRegistry, HandlerResult, LookupError, Output, Params,
};
use crate::routing::method::Method;
use crate::routing::normalize;
use crate::routing::pattern::{PatternError, RoutePattern};

/// Error freezing a route table.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("{method} {pattern}: no handler registered for `{reference}`")]
    UnresolvedHandler {
        method: Method,
        pattern: String,
        reference: String,
    },
    #[error("{method} {pattern}: `{reference}` is not of the form Controller@action")]
    MalformedReference {
        method: Method,
        pattern: String,
        reference: String,
    },
    /// Literal text is escaped, so compilation only fails when a pattern
    /// exceeds the regex size limit.
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

/// A handler failed while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("handler for {method} {pattern} failed on {path}: {source}")]
    Handler {
        method: Method,
        path: String,
        pattern: String,
        #[source]
        source: crate::routing::handler::BoxError,
    },
}

/// One incoming request, as far as routing is concerned.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Request method as received.
    pub method: axum::http::Method,
    /// Raw request-target, query string included.
    pub target: String,
    /// Path of the entry script, e.g. `/app/public/index.php`.
    pub script_name: String,
}

impl RequestDescriptor {
    pub fn new(method: axum::http::Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            script_name: String::new(),
        }
    }

    /// Set the entry script the application is mounted under.
    pub fn mounted_at(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    /// The canonical lookup path for this request.
    pub fn canonical_path(&self) -> String {
        normalize::canonical_path(&self.target, &self.script_name)
    }
}

/// Collects routes before the table is frozen.
pub struct RouterBuilder {
    routes: BTreeMap<Method, Vec<(String, HandlerRef)>>,
    registry: HandlerRegistry,
    strict: bool,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
            registry: HandlerRegistry::new(),
            strict: true,
        }
    }
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that named handler references resolve against.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// When false, unresolvable named references are kept and answer 404
    /// instead of failing `build()`.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Store `handler` under (method, pattern), replacing any previous one.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        handler: impl Into<HandlerRef>,
    ) -> &mut Self {
        let handler = handler.into();
        let routes = self.routes.entry(method).or_default();
        match routes.iter_mut().find(|(existing, _)| existing == pattern) {
            Some(entry) => entry.1 = handler,
            None => routes.push((pattern.to_string(), handler)),
        }
        self
    }

    /// Register the same handler for GET, POST, PUT and DELETE.
    pub fn register_any(&mut self, pattern: &str, handler: impl Into<HandlerRef>) -> &mut Self {
        let handler = handler.into();
        for method in Method::ALL {
            self.register(method, pattern, handler.clone());
        }
        self
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(Method::Get, pattern, HandlerRef::direct(handler))
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(Method::Post, pattern, HandlerRef::direct(handler))
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(Method::Put, pattern, HandlerRef::direct(handler))
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(Method::Delete, pattern, HandlerRef::direct(handler))
    }

    pub fn any<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync + 'static,
    {
        self.register_any(pattern, HandlerRef::direct(handler))
    }

    /// Compile every pattern and resolve every named handler.
    pub fn build(self) -> Result<Router, RouteError> {
        let mut tables = BTreeMap::new();

        for (method, routes) in self.routes {
            let mut table = MethodTable::default();
            for (pattern, handler) in routes {
                let compiled = RoutePattern::compile(&pattern)?;
                let slot = match self.registry.lookup(&handler) {
                    Ok(handler) => Slot::Ready(handler),
                    Err(err) if self.strict => return Err(route_error(method, pattern, err)),
                    Err(err) => {
                        tracing::warn!(
                            method = %method,
                            pattern = %pattern,
                            error = %err,
                            "Handler reference unresolved; route will answer 404"
                        );
                        Slot::Unresolved
                    }
                };
                table.exact.insert(pattern, table.entries.len());
                table.entries.push(Entry {
                    pattern: compiled,
                    description: handler.describe(),
                    slot,
                });
            }
            tables.insert(method, table);
        }

        let router = Router { tables };
        tracing::debug!(routes = router.len(), "Route table built");
        Ok(router)
    }
}

fn route_error(method: Method, pattern: String, err: LookupError) -> RouteError {
    match err {
        LookupError::Malformed(reference) => RouteError::MalformedReference {
            method,
            pattern,
            reference,
        },
        LookupError::Unknown(reference) => RouteError::UnresolvedHandler {
            method,
            pattern,
            reference,
        },
    }
}

enum Slot {
    Ready(Arc<dyn Handler>),
    Unresolved,
}

struct Entry {
    pattern: RoutePattern,
    description: String,
    slot: Slot,
}

#[derive(Default)]
struct MethodTable {
    entries: Vec<Entry>,
    exact: HashMap<String, usize>,
}

/// A route as listed by [`Router::routes`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RouteInfo {
    pub method: Method,
    pub pattern: String,
    pub handler: String,
}

/// Result of resolving a path against the table.
pub struct RouteMatch<'a> {
    pub method: Method,
    pub params: Params,
    entry: &'a Entry,
}

impl<'a> RouteMatch<'a> {
    /// The pattern that matched, as registered.
    pub fn pattern(&self) -> &'a str {
        self.entry.pattern.as_str()
    }

    /// Placeholder names of the matched pattern, aligned with `params`.
    pub fn param_names(&self) -> &'a [String] {
        self.entry.pattern.param_names()
    }

    /// The handler's description (`Controller@action` or `<closure>`).
    pub fn handler(&self) -> &'a str {
        &self.entry.description
    }

    /// False for lenient routes whose named handler never resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self.entry.slot, Slot::Ready(_))
    }
}

/// Immutable route table.
pub struct Router {
    tables: BTreeMap<Method, MethodTable>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Number of (method, pattern) routes.
    pub fn len(&self) -> usize {
        self.tables.values().map(|t| t.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every route, by method (GET, POST, PUT, DELETE) then registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.tables
            .iter()
            .flat_map(|(method, table)| {
                table.entries.iter().map(move |entry| RouteInfo {
                    method: *method,
                    pattern: entry.pattern.as_str().to_string(),
                    handler: entry.description.clone(),
                })
            })
            .collect()
    }

    /// Canonical lookup path for a request: path only, trailing slashes
    /// trimmed, mount prefix removed.
    ///
    /// Same result as [`RequestDescriptor::canonical_path`]; exposed here so
    /// `canonicalize` then [`Router::resolve`] reproduces what `dispatch`
    /// does. Normalization does not depend on the registered routes.
    pub fn canonicalize(&self, request: &RequestDescriptor) -> String {
        request.canonical_path()
    }

    /// Resolve a canonical path for a method.
    pub fn resolve(&self, method: Method, path: &str) -> Option<RouteMatch<'_>> {
        let table = self.tables.get(&method)?;

        if let Some(&idx) = table.exact.get(path) {
            return Some(RouteMatch {
                method,
                params: Params::default(),
                entry: &table.entries[idx],
            });
        }

        table
            .entries
            .iter()
            .filter(|entry| !entry.pattern.is_literal())
            .find_map(|entry| {
                entry.pattern.captures(path).map(|params| RouteMatch {
                    method,
                    params: Params::new(params),
                    entry,
                })
            })
    }

    /// Serve one request: resolve, invoke, and build the output.
    ///
    /// No match yields the JSON 404. A failing handler is returned as
    /// [`DispatchError::Handler`].
    pub fn dispatch(&self, request: &RequestDescriptor) -> Result<Output, DispatchError> {
        let path = self.canonicalize(request);

        tracing::debug!(
            method = %request.method,
            original = normalize::request_path(&request.target),
            processed = %path,
            "Dispatching request"
        );

        let Some(method) = Method::from_http(&request.method) else {
            tracing::warn!(method = %request.method, path = %path, "Unsupported method");
            return Ok(Output::not_found());
        };

        let Some(matched) = self.resolve(method, &path) else {
            tracing::warn!(method = %method, path = %path, "No route matched");
            return Ok(Output::not_found());
        };

        let handler = match &matched.entry.slot {
            Slot::Ready(handler) => handler,
            Slot::Unresolved => {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    handler = matched.handler(),
                    "Matched route has no resolvable handler"
                );
                return Ok(Output::not_found());
            }
        };

        let mut out = Output::new();
        match handler.call(&matched.params, &mut out) {
            Ok(Some(body)) => {
                out.write(&body);
            }
            Ok(None) => {}
            Err(source) => {
                return Err(DispatchError::Handler {
                    method,
                    path,
                    pattern: matched.pattern().to_string(),
                    source,
                });
            }
        }
        Ok(out)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router").field("routes", &self.routes()).finish()
    }
}
