use serde::{Deserialize, Serialize};

use super::Account;

/// An account recommended to follow, with where the recommendation came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub source: String,
    pub account: Account,
}
