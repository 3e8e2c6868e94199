//! CLI command handling

pub mod args;
pub mod conditions;
pub mod notify;
pub mod watch;

pub use args::*;
pub use conditions::*;
pub use notify::*;
pub use watch::*;
