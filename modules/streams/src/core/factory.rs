//! Canned producers and consumers.

mod closing_sink;
mod closing_source;
mod concat_source;
mod iter_source;
mod list_action;
mod list_sink;
mod rotating_consumer;
mod stream_consumers;
mod stream_producers;
mod stream_to_list;

use closing_sink::ClosingSink;
use closing_source::ClosingSource;
use concat_source::ConcatSource;
use iter_source::IterSource;
pub use list_action::ListAction;
use list_sink::ListSink;
pub use rotating_consumer::RotatingConsumer;
pub use stream_consumers::StreamConsumers;
pub use stream_producers::StreamProducers;
pub use stream_to_list::StreamToList;
