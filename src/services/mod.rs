pub mod batch_processor;
pub mod retry;
pub mod targets;

pub use batch_processor::{BatchProcessor, BatchReport};
pub use retry::{RetryExhausted, RetryPolicy};
pub use targets::{resolve_targets, TargetError};
