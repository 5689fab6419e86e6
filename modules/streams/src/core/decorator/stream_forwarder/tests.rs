use alloc::vec;

use super::StreamForwarder;
use crate::core::{
  Eventloop,
  factory::{StreamConsumers, StreamProducers},
  lifecycle::StreamStatus,
  stage::{StreamConsumer, StreamProducer},
};

#[test]
fn source_bound_late_streams_into_the_waiting_consumer() {
  let eventloop = Eventloop::new();
  let forwarder = StreamForwarder::<u32>::new(&eventloop);
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  forwarder.producer().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.status(), StreamStatus::Ready);
  let source = StreamProducers::of_iter(&eventloop, vec![1_u32, 2, 3]);
  source.stream_to(forwarder.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![1, 2, 3]);
  assert_eq!(source.status(), StreamStatus::Closed);
}

#[test]
fn source_is_held_until_the_consumer_binds() {
  let eventloop = Eventloop::new();
  let forwarder = StreamForwarder::<u32>::new(&eventloop);
  let source = StreamProducers::of_iter(&eventloop, vec![1_u32, 2]);
  source.stream_to(forwarder.consumer());
  eventloop.run();
  assert_eq!(source.status(), StreamStatus::Suspended);
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  forwarder.producer().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![1, 2]);
}

#[test]
fn close_before_binding_is_replayed_onto_the_source() {
  let eventloop = Eventloop::new();
  let forwarder = StreamForwarder::<u32>::new(&eventloop);
  forwarder.producer().close();
  assert_eq!(forwarder.consumer().status(), StreamStatus::Closed);
  let source = StreamProducers::of_iter(&eventloop, vec![1_u32]);
  source.stream_to(forwarder.consumer());
  eventloop.run();
  assert_eq!(source.status(), StreamStatus::Closed);
}
