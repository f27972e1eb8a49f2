//! Client-side filtering for HyphaGraph list views.
//!
//! A list view holds an in-memory collection, a set of [`FilterConfig`]s
//! describing which filters it offers, and a mutable [`FilterState`] holding
//! what the user picked. [`FilterEngine`] derives the filtered view and its
//! counts; [`active_filters`] derives the chips shown above the list.
//!
//! Everything here is pure and synchronous.

pub mod active;
pub mod config;
pub mod drawer;
pub mod engine;
pub mod presets;
pub mod value;

pub use active::{ActiveFilter, active_filters};
pub use config::{FilterConfig, FilterKind, FilterOption};
pub use drawer::FilterDrawer;
pub use engine::{FilterEngine, FilterResult, compute_filtered};
pub use value::{FilterState, FilterValue};

#[cfg(test)]
mod tests;
