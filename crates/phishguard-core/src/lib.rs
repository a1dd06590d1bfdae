pub mod config;
pub mod logging;

pub mod lookup;
pub mod present;
pub mod query;
pub mod reputation;
pub mod session;
pub mod verdict;
