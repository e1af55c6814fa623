//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes keyed by (method, pattern)
//! - Look up the matching endpoint for a request
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over routes (the table is tiny)
//! - Explicit NoMatch rather than silent default

use std::fmt;

use axum::http::Method;

use crate::routing::matcher::{PathParams, PathPattern};

/// Operations the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListProducts,
    GetProduct,
    CreateProduct,
    ReplaceProduct,
    UpdateProduct,
    DeleteProduct,
}

impl Endpoint {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ListProducts => "list_products",
            Endpoint::GetProduct => "get_product",
            Endpoint::CreateProduct => "create_product",
            Endpoint::ReplaceProduct => "replace_product",
            Endpoint::UpdateProduct => "update_product",
            Endpoint::DeleteProduct => "delete_product",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    pattern: PathPattern,
    endpoint: Endpoint,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub endpoint: Endpoint,
    pub params: PathParams,
}

/// Ordered (method, pattern) → endpoint table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Earlier routes win on overlap.
    pub fn route(mut self, method: Method, pattern: &str, endpoint: Endpoint) -> Self {
        self.routes.push(Route {
            method,
            pattern: PathPattern::new(pattern),
            endpoint,
        });
        self
    }

    /// The product API.
    pub fn products() -> Self {
        Self::new()
            .route(Method::GET, "/products", Endpoint::ListProducts)
            .route(Method::POST, "/products", Endpoint::CreateProduct)
            .route(Method::GET, "/products/{id}", Endpoint::GetProduct)
            .route(Method::PUT, "/products/{id}", Endpoint::ReplaceProduct)
            .route(Method::PATCH, "/products/{id}", Endpoint::UpdateProduct)
            .route(Method::DELETE, "/products/{id}", Endpoint::DeleteProduct)
    }

    /// Find the endpoint for a request.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route.pattern.matches(path).map(|params| RouteMatch {
                    endpoint: route.endpoint,
                    params,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_routes() {
        let table = RouteTable::products();

        let cases = [
            (Method::GET, "/products", Endpoint::ListProducts),
            (Method::POST, "/products", Endpoint::CreateProduct),
            (Method::GET, "/products/7", Endpoint::GetProduct),
            (Method::PUT, "/products/7", Endpoint::ReplaceProduct),
            (Method::PATCH, "/products/7", Endpoint::UpdateProduct),
            (Method::DELETE, "/products/7", Endpoint::DeleteProduct),
        ];
        for (method, path, expected) in cases {
            let matched = table.resolve(&method, path).unwrap();
            assert_eq!(matched.endpoint, expected, "{} {}", method, path);
        }

        let matched = table.resolve(&Method::DELETE, "/products/7").unwrap();
        assert_eq!(matched.params.get("id"), Some("7"));
    }

    #[test]
    fn test_unknown_routes() {
        let table = RouteTable::products();
        assert!(table.resolve(&Method::GET, "/invalid_path").is_none());
        assert!(table.resolve(&Method::DELETE, "/products").is_none());
        assert!(table.resolve(&Method::PUT, "/products").is_none());
        assert!(table.resolve(&Method::POST, "/products/1").is_none());
        assert!(table.resolve(&Method::HEAD, "/products").is_none());
        assert!(table.resolve(&Method::GET, "/products/1/extra").is_none());
    }
}
