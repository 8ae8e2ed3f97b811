pub mod config;
pub mod destination;
pub mod fetch;
pub mod logging;
pub mod storage;
pub mod update;
