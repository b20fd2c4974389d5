mod auth_service;
mod company_service;
mod error;
mod hasher;
mod job_service;
mod token_service;

pub use auth_service::*;
pub use company_service::*;
pub use error::*;
pub use hasher::*;
pub use job_service::*;
pub use token_service::*;
