// store

mod cache_store;

pub use cache_store::*;

// repo

mod company_repo;
mod job_repo;
mod token_repo;

pub use company_repo::*;
pub use job_repo::*;
pub use token_repo::*;

// outbound

mod mailer;

pub use mailer::*;
