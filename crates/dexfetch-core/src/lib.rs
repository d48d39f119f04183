pub mod config;
pub mod logging;

pub mod checkpoint;
pub mod client;
pub mod normalize;
pub mod orchestrator;
pub mod record;
pub mod retry;
pub mod status;
