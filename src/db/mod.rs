pub mod accounts;
pub mod action_logs;
pub mod featured_tags;
pub mod reports;
pub mod suggestions;
pub mod tags;
pub mod users;
