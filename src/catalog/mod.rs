//! Product catalog subsystem.
//!
//! # Data Flow
//! ```text
//! Request body (bytes)
//!     → payload.rs (parse JSON, validate fields)
//!     → ProductRecord / ProductPatch (typed, already valid)
//!     → store.rs (allocate id, mutate under one write lock)
//!     → Product (id + record) returned to the HTTP layer
//!
//! Startup:
//!     seed file (JSON) or built-in seed
//!     → seed.rs (parse & validate every entry)
//!     → ProductStore
//! ```
//!
//! # Design Decisions
//! - Records are validated before they reach the store; the store never sees bad input
//! - The store is an owned value shared via Arc, never a process-wide static
//! - Insertion order is the listing order

pub mod model;
pub mod payload;
pub mod seed;
pub mod store;

pub use model::{Price, Product, ProductId, ProductRecord};
pub use payload::{PayloadError, ProductPatch};
pub use store::{ProductStore, StoreError};
