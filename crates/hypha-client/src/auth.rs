//! Authentication context and route protection.
//!
//! The session is passed around explicitly as an [`AuthContext`] instead of
//! being read from ambient storage. A protected view asks [`guard`] what to
//! do with the context it was given.

use hypha_core::user::User;
use tracing::debug;

use crate::{ApiClient, ClientError, Result};

/// Where unauthenticated users are sent.
pub const LOGIN_ROUTE: &str = "/account";

/// Who is signed in, and whether that is still being determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
  pub user:    Option<User>,
  pub loading: bool,
}

impl AuthContext {
  /// The session is still being resolved.
  pub fn loading() -> Self { Self { user: None, loading: true } }

  pub fn signed_in(user: User) -> Self { Self { user: Some(user), loading: false } }

  pub fn signed_out() -> Self { Self { user: None, loading: false } }

  pub fn is_authenticated(&self) -> bool { self.user.is_some() }

  /// Resolve the context for `client`'s token. A missing, expired or
  /// rejected token yields a signed-out context; other failures propagate.
  pub async fn resolve(client: &ApiClient) -> Result<Self> {
    if client.token().is_none() {
      return Ok(Self::signed_out());
    }
    match client.me().await {
      Ok(user) => {
        debug!(user = %user.email, "session resolved");
        Ok(Self::signed_in(user))
      }
      Err(ClientError::Unauthorized) => Ok(Self::signed_out()),
      Err(e) => Err(e),
    }
  }
}

/// What a protected view should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
  /// Still loading: show a placeholder, not an error.
  Pending,
  Allow,
  /// Navigate to [`LOGIN_ROUTE`].
  RedirectToLogin,
}

pub fn guard(ctx: &AuthContext) -> RouteDecision {
  match (ctx.loading, &ctx.user) {
    (true, _) => RouteDecision::Pending,
    (false, Some(_)) => RouteDecision::Allow,
    (false, None) => RouteDecision::RedirectToLogin,
  }
}
