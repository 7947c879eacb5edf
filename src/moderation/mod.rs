pub mod lifecycle;

pub use lifecycle::{ReportAction, ReportLifecycle};
