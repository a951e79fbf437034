mod account_repo_memory;
mod account_repo_spy;

pub use account_repo_memory::*;
pub use account_repo_spy::*;
