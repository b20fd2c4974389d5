mod auth_service_impl;
mod cache;
mod company_service_impl;
mod envelope;
mod job_service_impl;
mod mailer_log;
mod token_manager;
mod validation;

pub use auth_service_impl::*;
pub use cache::*;
pub use company_service_impl::*;
pub use envelope::*;
pub use job_service_impl::*;
pub use mailer_log::*;
pub use token_manager::*;
pub use validation::*;
