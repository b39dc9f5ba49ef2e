//! Core library for the pim-sync reconciliation engine.
//!
//! This crate converges declared configuration for a remote
//! product-information-management service (categories, attribute
//! definitions, category-attribute links, webhooks, localization contexts)
//! against its live state over HTTP/JSON. The `reconcile` module exposes
//! the per-entity Create/Read/Update/Delete operations; `client` holds the
//! remote facade, `models` the wire codecs and `domain` the typed records.

pub mod client;
pub mod domain;
mod error_conversions;
pub mod models;
pub mod reconcile;
