/// Codec stages working on byte chunks.
pub mod codec;
/// Decorators, forwarders and switchers.
pub mod decorator;
/// Deterministic single-threaded event loop.
mod eventloop;
/// Canned producers and consumers.
pub mod factory;
/// Status and completion primitives.
pub mod lifecycle;
/// Stream operators.
pub mod operator;
/// Scheduled timer handle.
mod scheduled_task;
/// Opaque foreign error wrapper.
mod shared_error;
/// Endpoint contracts and base implementations.
pub mod stage;
/// Stream error definitions.
mod stream_error;
/// Argument validation helper.
mod validate_positive_argument;

pub use eventloop::Eventloop;
pub use scheduled_task::ScheduledTask;
pub use shared_error::SharedError;
pub use stream_error::StreamError;
pub use validate_positive_argument::validate_positive_argument;
