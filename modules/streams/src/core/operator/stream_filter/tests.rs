use alloc::vec;

use super::StreamFilter;
use crate::core::{
  Eventloop, StreamError,
  factory::{StreamConsumers, StreamProducers},
  lifecycle::StreamStatus,
  stage::StreamProducer,
};

#[test]
fn keeps_matching_items_in_order() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::of_iter(&eventloop, 1_u32..=10);
  let filter = StreamFilter::new(&eventloop, |item: &u32| item % 3 == 0);
  let sink = StreamConsumers::to_list_one_by_one::<u32>(&eventloop);
  source.stream_to(filter.input());
  filter.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![3, 6, 9]);
  assert_eq!(source.status(), StreamStatus::Closed);
}

#[test]
fn source_error_reaches_the_sink() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::closing_with_error::<u32>(&eventloop, StreamError::failed("boom"));
  let filter = StreamFilter::new(&eventloop, |_: &u32| true);
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  source.stream_to(filter.input());
  filter.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.status(), StreamStatus::ClosedWithError);
}
