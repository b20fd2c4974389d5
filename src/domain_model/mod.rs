mod company;
mod job;
mod page;
mod token;

pub use company::*;
pub use job::*;
pub use page::*;
pub use token::*;
