//! CLI commands for fleet

pub mod dispatch;
pub mod tag;
