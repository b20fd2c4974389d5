mod company_repo_mysql;
mod job_repo_mysql;
mod token_repo_mysql;
mod util;

pub use company_repo_mysql::*;
pub use job_repo_mysql::*;
pub use token_repo_mysql::*;
