//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     get/post/put/delete/any (pattern, handler)
//!     → RouterBuilder (per-method, insertion-ordered)
//!     → build(): compile patterns, resolve Controller@action references
//!     → Freeze as immutable Router
//!
//! Incoming Request (method, request-target, script name)
//!     → normalize.rs (strip query, trailing slash, mount prefix)
//!     → router.rs (exact lookup, then patterns in order)
//!     → handler.rs (invoke with positional params)
//!     → Output, or JSON 404
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod handler;
pub mod method;
pub mod normalize;
pub mod pattern;
pub mod router;

pub use handler::{BoxError, Handler, HandlerRef, HandlerRegistry, HandlerResult, Output, Params};
pub use method::Method;
pub use router::{DispatchError, RequestDescriptor, RouteError, RouteInfo, Router, RouterBuilder};
