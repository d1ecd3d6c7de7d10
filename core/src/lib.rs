pub mod backup;
pub mod blocklist;
pub mod hosts;
pub mod paths;
pub mod workflow;

pub mod error;
