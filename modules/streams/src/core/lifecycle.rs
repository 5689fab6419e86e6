//! Endpoint status and completion notification.

mod completion;
mod completion_callback;
mod completion_listeners;
mod result_callback;
mod stream_completion;
mod stream_status;

pub use completion::Completion;
pub use completion_callback::CompletionCallback;
pub(crate) use completion_listeners::CompletionListeners;
pub use result_callback::ResultCallback;
pub use stream_completion::StreamCompletion;
pub use stream_status::StreamStatus;
