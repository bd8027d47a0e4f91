//! Session credentials consumed by the GraphQL gateway.
//!
//! The gateway never stores a token itself. It asks a [`Session`] on every
//! request whether a user is signed in and, if so, which bearer token to
//! send. How the token was obtained is the session owner's business.
//!
//! Token resolution for the CLI prefers explicit configuration (flag or
//! config file), then `JOBBOARD_TOKEN`. Empty values are ignored.

use std::sync::{PoisonError, RwLock};

use crate::api::Token;
use crate::environment;

/// Environment variable consulted when no token was configured explicitly.
pub const TOKEN_ENV: &str = "JOBBOARD_TOKEN";

/// Read-only view of the current user session.
pub trait Session: Send + Sync {
    /// Whether a user is currently signed in.
    fn is_logged_in(&self) -> bool;

    /// The bearer token for the signed-in user.
    ///
    /// Only meaningful when [`Session::is_logged_in`] returns `true`.
    fn access_token(&self) -> Token;

    /// The token to send with the next request, or `None` when signed out.
    ///
    /// The default combines the two accessors above. Sessions that change at
    /// runtime override it so the answer comes from a single read.
    fn current_token(&self) -> Option<Token> {
        if self.is_logged_in() {
            Some(self.access_token()).filter(|t| !t.is_empty())
        } else {
            None
        }
    }
}

/// A session with nobody signed in.
#[derive(Debug, Default, Clone, Copy)]
pub struct Anonymous;

impl Session for Anonymous {
    fn is_logged_in(&self) -> bool {
        false
    }

    fn access_token(&self) -> Token {
        Token::new("")
    }
}

/// A session backed by a fixed token. Empty tokens count as signed out.
#[derive(Debug, Clone)]
pub struct TokenSession(Token);

impl TokenSession {
    pub fn new(token: impl Into<Token>) -> Self {
        Self(token.into())
    }
}

impl Session for TokenSession {
    fn is_logged_in(&self) -> bool {
        !self.0.is_empty()
    }

    fn access_token(&self) -> Token {
        self.0.clone()
    }
}

/// A session whose token can change while clients hold on to it.
#[derive(Debug, Default)]
pub struct SessionStore {
    token: RwLock<Option<Token>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token. Empty tokens sign the user out.
    pub fn sign_in(&self, token: impl Into<Token>) {
        let token = Some(token.into()).filter(|t| !t.is_empty());
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn sign_out(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Session for SessionStore {
    fn is_logged_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn access_token(&self) -> Token {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| Token::new(""))
    }

    fn current_token(&self) -> Option<Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Resolve the access token from configuration or the environment.
///
/// Returns an empty string when neither source provides a value.
#[must_use]
pub fn resolve_access_token(configured: Option<&str>) -> String {
    configured
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .or_else(|| environment::non_empty_var(TOKEN_ENV))
        .unwrap_or_default()
}
