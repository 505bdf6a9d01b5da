pub mod criteria;
pub mod filter;
pub mod pager;
pub mod session;
