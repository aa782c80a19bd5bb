//! Route handlers and named handler references.
//!
//! # Responsibilities
//! - Define the callable contract a route invokes
//! - Carry positional path parameters and the response under construction
//! - Resolve `Controller@action` references through an explicit registry
//!
//! # Design Decisions
//! - Handlers are synchronous and `Send + Sync`; the router is shared across tasks
//! - A handler may return a body or write its own output (status, headers, body)
//! - Handler errors are returned, never swallowed, so callers decide recovery
//! - Named references are resolved when the router is built, not per request

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};

/// Error type handlers report failures with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a handler returns: a body to emit, nothing, or a failure.
pub type HandlerResult = Result<Option<String>, BoxError>;

/// Path parameters captured from placeholders, in left-to-right order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<String>);

impl Params {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for Params {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Params {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Response under construction, handed to every handler.
#[derive(Debug, Clone)]
pub struct Output {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    pub fn set_content_type(&mut self, value: &'static str) -> &mut Self {
        self.set_header(header::CONTENT_TYPE, HeaderValue::from_static(value))
    }

    /// Redirect to `location` with 302 Found.
    pub fn redirect(&mut self, location: &str) -> Result<&mut Self, BoxError> {
        let value = HeaderValue::from_str(location)?;
        self.status = StatusCode::FOUND;
        self.headers.insert(header::LOCATION, value);
        Ok(self)
    }

    /// Append text to the body.
    pub fn write(&mut self, text: &str) -> &mut Self {
        self.body.push_str(text);
        self
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The JSON 404 emitted when no route matches.
    pub fn not_found() -> Self {
        let mut out = Self::new();
        out.set_status(StatusCode::NOT_FOUND)
            .set_content_type("application/json")
            .write(
                &serde_json::json!({
                    "status": "error",
                    "message": "Route not found.",
                })
                .to_string(),
            );
        out
    }

    pub fn into_parts(self) -> (StatusCode, HeaderMap, String) {
        (self.status, self.headers, self.body)
    }
}

/// A callable bound to a route.
pub trait Handler: Send + Sync {
    fn call(&self, params: &Params, out: &mut Output) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync,
{
    fn call(&self, params: &Params, out: &mut Output) -> HandlerResult {
        self(params, out)
    }
}

/// How a route names its handler at registration time.
#[derive(Clone)]
pub enum HandlerRef {
    /// An application callable.
    Direct(Arc<dyn Handler>),
    /// A `Controller@action` reference, looked up in a [`HandlerRegistry`].
    Named(String),
}

impl HandlerRef {
    pub fn direct<F>(handler: F) -> Self
    where
        F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync + 'static,
    {
        HandlerRef::Direct(Arc::new(handler))
    }

    /// Short description used by route listings and logs.
    pub fn describe(&self) -> String {
        match self {
            HandlerRef::Direct(_) => "<closure>".to_string(),
            HandlerRef::Named(reference) => reference.clone(),
        }
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Direct(_) => f.write_str("Direct(..)"),
            HandlerRef::Named(reference) => f.debug_tuple("Named").field(reference).finish(),
        }
    }
}

impl From<&str> for HandlerRef {
    fn from(reference: &str) -> Self {
        HandlerRef::Named(reference.to_string())
    }
}

impl From<String> for HandlerRef {
    fn from(reference: String) -> Self {
        HandlerRef::Named(reference)
    }
}

/// Why a named reference could not be turned into a handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("`{0}` is not of the form Controller@action")]
    Malformed(String),
    #[error("no handler registered for `{0}`")]
    Unknown(String),
}

/// Split `Controller@action` into its two non-empty halves.
pub fn parse_reference(reference: &str) -> Result<(&str, &str), LookupError> {
    match reference.split_once('@') {
        Some((controller, action)) if !controller.is_empty() && !action.is_empty() => {
            Ok((controller, action))
        }
        _ => Err(LookupError::Malformed(reference.to_string())),
    }
}

/// Explicit table of named actions, keyed by `Controller@action`.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    actions: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. A later insert under the same reference wins.
    pub fn insert<F>(&mut self, reference: &str, handler: F) -> Result<&mut Self, LookupError>
    where
        F: Fn(&Params, &mut Output) -> HandlerResult + Send + Sync + 'static,
    {
        parse_reference(reference)?;
        self.actions.insert(reference.to_string(), Arc::new(handler));
        Ok(self)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.actions.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Resolve a reference to its handler.
    pub fn resolve(&self, reference: &str) -> Result<Arc<dyn Handler>, LookupError> {
        parse_reference(reference)?;
        self.actions
            .get(reference)
            .cloned()
            .ok_or_else(|| LookupError::Unknown(reference.to_string()))
    }

    /// Resolve any handler reference; direct handlers pass through.
    pub fn lookup(&self, handler: &HandlerRef) -> Result<Arc<dyn Handler>, LookupError> {
        match handler {
            HandlerRef::Direct(handler) => Ok(handler.clone()),
            HandlerRef::Named(reference) => self.resolve(reference),
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.actions.keys().collect();
        names.sort();
        f.debug_struct("HandlerRegistry").field("actions", &names).finish()
    }
}
