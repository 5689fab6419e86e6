//! Structural composition: decorators, forwarders and switchers.

mod consumer_decorator;
mod consumer_switcher;
mod pass_through;
mod producer_decorator;
mod producer_switcher;
mod stream_forwarder;

pub use consumer_decorator::ConsumerDecorator;
pub use consumer_switcher::ConsumerSwitcher;
pub use pass_through::PassThrough;
pub use producer_decorator::ProducerDecorator;
pub use producer_switcher::ProducerSwitcher;
pub use stream_forwarder::StreamForwarder;
