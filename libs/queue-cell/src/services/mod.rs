pub mod queue;
pub mod refresh;

pub use queue::QueueService;
pub use refresh::RefreshTask;
