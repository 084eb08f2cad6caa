//! Invite notification adapters.

mod edge_function;
mod logging;

pub use edge_function::{EdgeFunctionConfig, EdgeFunctionInviteNotifier};
pub use logging::LoggingInviteNotifier;
