//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route table lookup)
//!     → matcher.rs (match path pattern, extract parameters)
//!     → Return: RouteMatch { endpoint, params } or no match
//!
//! Route Compilation (at startup):
//!     (method, "/products/{id}", Endpoint)
//!     → PathPattern (literal and parameter segments)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Whole-path matching, never prefix matching
//! - Deterministic: first registered match wins
//! - A path known under another method is still "no match" (no 405)

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, PathPattern};
pub use router::{Endpoint, RouteMatch, RouteTable};
