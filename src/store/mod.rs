pub mod applications;
pub mod client;
pub mod jobs;
