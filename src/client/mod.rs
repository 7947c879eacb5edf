//! Typed client for the account-suggestion API.
//!
//! Requests run as data-loading thunks: every named request dispatches
//! `Pending`, then either `Fulfilled` or `Rejected`, to a caller-supplied
//! [`Dispatch`] sink. Side effects of a successful request are dispatched
//! before the fulfilled action.

pub mod suggestions;
pub mod thunk;

use uuid::Uuid;

use crate::models::{Account, Suggestion};

pub use suggestions::{HttpSuggestionsApi, SuggestionsApi, dismiss_suggestion, fetch_suggestions};
pub use thunk::{LoadState, run_thunk};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientAction {
    /// `suggestions/fetch`
    SuggestionsFetch(LoadState<Vec<Suggestion>>),
    /// `suggestions/dismiss`
    SuggestionsDismiss {
        account_id: Uuid,
        state: LoadState<()>,
    },
    /// Merge fetched accounts into the local store.
    ImportAccounts(Vec<Account>),
    /// Ask for the viewer's relationships with these accounts.
    FetchRelationships(Vec<Uuid>),
}

/// Receives client actions in the order they happen.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: ClientAction);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    Transport(String),
    Status { status: u16, message: String },
    Decode(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Request failed: {msg}"),
            ClientError::Status { status, message } => write!(f, "HTTP {status}: {message}"),
            ClientError::Decode(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
