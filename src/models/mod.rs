mod account;
mod action_log;
mod featured_tag;
mod report;
mod suggestion;
mod user;

pub use account::Account;
pub use action_log::{ActionKind, ActionLog};
pub use featured_tag::{FeaturedTag, Tag};
pub use report::Report;
pub use suggestion::Suggestion;
pub use user::{Role, User};
