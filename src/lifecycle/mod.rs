//! Process lifecycle: bring the router up, take it down cleanly.
//!
//! # Data Flow
//! ```text
//! startup::run
//!     AppConfig ─▶ app::build_router ─▶ [metrics exporter] ─▶ bind ─▶ HttpServer::run
//!
//! signals::spawn_signal_listener
//!     Ctrl+C / SIGTERM ─▶ Shutdown::trigger ─▶ axum graceful shutdown
//! ```
//!
//! # Design Decisions
//! - A bad route table aborts startup before the socket is bound
//! - One broadcast channel fans shutdown out to every subscriber
//! - In-flight requests finish; the request timeout bounds how long that takes

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
