//! In-process implementations of every port, for tests and the `memory`
//! backend selection.

mod cache_store_memory;
mod company_repo_memory;
mod job_repo_memory;
mod mailer_memory;
mod token_repo_memory;

pub use cache_store_memory::*;
pub use company_repo_memory::*;
pub use job_repo_memory::*;
pub use mailer_memory::*;
pub use token_repo_memory::*;
