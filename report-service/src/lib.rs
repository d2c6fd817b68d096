pub mod config;
pub mod observability;
pub mod pipeline;
pub mod poller;
pub mod sinks;
pub mod sources;
pub mod transform;

pub use pipeline::Pipeline;
pub use poller::Poller;
