//! Core types and trait definitions for the HyphaGraph client.
//!
//! This crate has no HTTP dependencies. It describes the
//! provenance-first data model (entities, sources, relations and their roles,
//! attributes, inferences) and validates write payloads before they leave the
//! client.

pub mod api;
pub mod attribute;
pub mod entity;
pub mod error;
pub mod inference;
pub mod relation;
pub mod source;
pub mod term;
pub mod text;
pub mod user;

pub use error::{Error, Result};
