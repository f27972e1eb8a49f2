//! HyphaGraph client: REST access plus the stateful pieces list and editor
//! views are built from.
//!
//! - [`ApiClient`] talks to the backend and implements
//!   [`hypha_core::api::GraphApi`].
//! - [`auth`] holds the explicit authentication context and route guard.
//! - [`debounce`] and [`scroll`] own their timer and observer handles and
//!   release them on drop.
//! - [`terms`] is the entity-term editor state.

pub mod auth;
pub mod client;
pub mod debounce;
pub mod error;
pub mod scroll;
pub mod terms;

pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, Result};
