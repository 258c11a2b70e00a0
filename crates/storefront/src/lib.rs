//! Wardrobe storefront library.
//!
//! The application layer of the storefront: the store and its reducers,
//! local persistence, the catalog client, async operations over mocked auth
//! and order providers, and the JSON API that exposes them. The binary and
//! the CLI are thin shells over this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
