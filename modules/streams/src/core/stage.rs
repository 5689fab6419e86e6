//! Producer/consumer contracts and their base endpoints.

mod data_receiver;
mod endpoint_identity;
mod inlet;
mod inlet_handler;
mod outlet;
mod outlet_handler;
mod produce_outcome;
mod stream_consumer;
mod stream_producer;
mod stream_transformer;
mod transformer_logic;

pub use data_receiver::DataReceiver;
pub(crate) use endpoint_identity::same_endpoint;
pub use inlet::Inlet;
pub use inlet_handler::InletHandler;
pub use outlet::Outlet;
pub use outlet_handler::OutletHandler;
pub use produce_outcome::ProduceOutcome;
pub use stream_consumer::{ConsumerRef, StreamConsumer};
pub use stream_producer::{ProducerRef, StreamProducer};
pub use stream_transformer::StreamTransformer;
pub use transformer_logic::TransformerLogic;
