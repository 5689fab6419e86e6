use alloc::{rc::Rc, vec};
use core::cell::Cell;

use super::ProducerDecorator;
use crate::core::{
  Eventloop,
  factory::{StreamConsumers, StreamProducers},
  lifecycle::StreamStatus,
  stage::{Outlet, StreamProducer, TransformerLogic},
};

struct CountingEnd {
  ends: Rc<Cell<usize>>,
}

impl TransformerLogic<u32, u32> for CountingEnd {
  fn on_data(&self, output: &Outlet<u32>, item: u32) {
    output.send(item * 10);
  }

  fn on_end_of_stream(&self, output: &Outlet<u32>) {
    self.ends.set(self.ends.get() + 1);
    output.send_end_of_stream();
  }
}

#[test]
fn pass_through_keeps_order() {
  let eventloop = Eventloop::new();
  let actual = StreamProducers::of_iter(&eventloop, vec![1_u32, 2, 3]);
  let decorator = ProducerDecorator::new(&eventloop, actual.clone());
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  decorator.producer().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![1, 2, 3]);
  assert_eq!(actual.status(), StreamStatus::Closed);
  assert_eq!(decorator.producer().status(), StreamStatus::Closed);
}

#[test]
fn decorate_replaces_the_actual_producer() {
  let eventloop = Eventloop::new();
  let idle = StreamProducers::idle::<u32>(&eventloop);
  let decorator = ProducerDecorator::new(&eventloop, idle.clone());
  let replacement = StreamProducers::of_iter(&eventloop, vec![7_u32]);
  decorator.decorate(replacement.clone());
  assert!(idle.downstream().is_none());
  assert!(decorator.actual().is_some_and(|actual| Rc::ptr_eq(&actual, &replacement)));
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  decorator.producer().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![7]);
  assert!(idle.status().is_active());
}

#[test]
fn custom_logic_intercepts_items_and_end_of_stream() {
  let eventloop = Eventloop::new();
  let ends = Rc::new(Cell::new(0));
  let actual = StreamProducers::of_iter(&eventloop, vec![1_u32, 2]);
  let decorator = ProducerDecorator::with_logic(&eventloop, actual, CountingEnd { ends: ends.clone() });
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  decorator.producer().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![10, 20]);
  assert_eq!(ends.get(), 1);
}
