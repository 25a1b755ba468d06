//! In-memory books CRUD REST API.
//!
//! Layers: `domain` (Book / BookCollection), `application` (BookService),
//! `infra` (in-memory repository), `interface` (axum HTTP server).

pub mod application;
pub mod domain;
pub mod infra;
pub mod interface;
