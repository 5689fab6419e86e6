use alloc::{vec, vec::Vec};

use super::StreamReducer;
use crate::core::{
  Eventloop, StreamError,
  factory::{ListAction, StreamConsumers, StreamProducers},
  lifecycle::StreamStatus,
  operator::{Reducer, ReducerConfig, StreamReducers},
  stage::{Outlet, ProducerRef, StreamConsumer, StreamProducer},
};

#[derive(Debug, Clone, PartialEq)]
struct Visits {
  day:   u32,
  count: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Clicks {
  day:    u32,
  clicks: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct DailyTotal {
  day:    u32,
  visits: u32,
  clicks: u32,
}

struct VisitsIntoTotal;

impl Reducer<u32, Visits, DailyTotal, DailyTotal> for VisitsIntoTotal {
  fn on_first_item(&self, _output: &Outlet<DailyTotal>, key: &u32, item: Visits) -> DailyTotal {
    DailyTotal { day: *key, visits: item.count, clicks: 0 }
  }

  fn on_next_item(&self, _output: &Outlet<DailyTotal>, _key: &u32, item: Visits, accumulator: &mut DailyTotal) {
    accumulator.visits += item.count;
  }

  fn on_complete(&self, output: &Outlet<DailyTotal>, _key: u32, accumulator: DailyTotal) {
    output.send(accumulator);
  }
}

struct ClicksIntoTotal;

impl Reducer<u32, Clicks, DailyTotal, DailyTotal> for ClicksIntoTotal {
  fn on_first_item(&self, _output: &Outlet<DailyTotal>, key: &u32, item: Clicks) -> DailyTotal {
    DailyTotal { day: *key, visits: 0, clicks: item.clicks }
  }

  fn on_next_item(&self, _output: &Outlet<DailyTotal>, _key: &u32, item: Clicks, accumulator: &mut DailyTotal) {
    accumulator.clicks += item.clicks;
  }

  fn on_complete(&self, output: &Outlet<DailyTotal>, _key: u32, accumulator: DailyTotal) {
    output.send(accumulator);
  }
}

fn sources(eventloop: &Eventloop, inputs: Vec<Vec<u32>>) -> Vec<ProducerRef<u32>> {
  inputs.into_iter().map(|items| StreamProducers::of_iter(eventloop, items)).collect()
}

fn deduplicating(eventloop: &Eventloop, config: ReducerConfig) -> StreamReducer<u32, u32, u32> {
  StreamReducer::with_config(eventloop, config).expect("valid config")
}

#[test]
fn merges_sorted_inputs_keeping_each_key_once() {
  let eventloop = Eventloop::new();
  let reducer = deduplicating(&eventloop, ReducerConfig::new(1));
  let sources = sources(&eventloop, vec![vec![7], vec![3, 4, 6], vec![2, 3, 5], vec![1, 3], vec![1, 3]]);
  for source in &sources {
    source.stream_to(reducer.new_input(|item: &u32| *item, StreamReducers::merge_deduplicate::<u32, u32>()));
  }
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  reducer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![1, 2, 3, 4, 5, 6, 7]);
  assert_eq!(reducer.input_count(), 5);
  assert!(sources.iter().all(|source| source.status() == StreamStatus::Closed));
  assert_eq!(sink.status(), StreamStatus::Closed);
}

#[test]
fn merge_sort_keeps_every_item_under_backpressure() {
  let eventloop = Eventloop::new();
  let reducer = StreamReducer::<u32, u32, ()>::with_config(&eventloop, ReducerConfig::new(2)).expect("valid config");
  let sources = sources(&eventloop, vec![vec![1, 4, 4, 9], vec![2, 4, 8], vec![]]);
  for source in &sources {
    source.stream_to(reducer.new_input(|item: &u32| *item, StreamReducers::merge_sort::<u32, u32>()));
  }
  let sink = StreamConsumers::to_list_one_by_one::<u32>(&eventloop);
  reducer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![1, 2, 4, 4, 4, 8, 9]);
  assert!(sources.iter().all(|source| source.status() == StreamStatus::Closed));
}

#[test]
fn heterogeneous_inputs_share_one_accumulator_per_key() {
  let eventloop = Eventloop::new();
  let reducer = StreamReducer::<u32, DailyTotal, DailyTotal>::new(&eventloop);
  let visits = StreamProducers::of_iter(&eventloop, vec![
    Visits { day: 1, count: 10 },
    Visits { day: 1, count: 5 },
    Visits { day: 3, count: 7 },
  ]);
  let clicks = StreamProducers::of_iter(&eventloop, vec![Clicks { day: 1, clicks: 2 }, Clicks { day: 2, clicks: 4 }]);
  visits.stream_to(reducer.new_input(|item: &Visits| item.day, VisitsIntoTotal));
  clicks.stream_to(reducer.new_input(|item: &Clicks| item.day, ClicksIntoTotal));
  let sink = StreamConsumers::to_list::<DailyTotal>(&eventloop);
  reducer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![
    DailyTotal { day: 1, visits: 15, clicks: 2 },
    DailyTotal { day: 2, visits: 0, clicks: 4 },
    DailyTotal { day: 3, visits: 7, clicks: 0 },
  ]);
}

#[test]
fn failing_input_fails_output_and_siblings() {
  let eventloop = Eventloop::new();
  let reducer = deduplicating(&eventloop, ReducerConfig::new(1));
  let healthy = StreamProducers::of_iter(&eventloop, 1_u32..100);
  let failing = StreamProducers::closing_with_error::<u32>(&eventloop, StreamError::failed("disk"));
  healthy.stream_to(reducer.new_input(|item: &u32| *item, StreamReducers::merge_deduplicate::<u32, u32>()));
  failing.stream_to(reducer.new_input(|item: &u32| *item, StreamReducers::merge_deduplicate::<u32, u32>()));
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  reducer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.status(), StreamStatus::ClosedWithError);
  assert_eq!(sink.consumer().error(), Some(StreamError::failed("disk")));
  assert_eq!(healthy.status(), StreamStatus::ClosedWithError);
  assert_eq!(failing.status(), StreamStatus::ClosedWithError);
}

#[test]
fn downstream_failure_closes_every_input() {
  let eventloop = Eventloop::new();
  let reducer = deduplicating(&eventloop, ReducerConfig::new(4));
  let sources = sources(&eventloop, vec![(0..50).collect(), (25..75).collect()]);
  for source in &sources {
    source.stream_to(reducer.new_input(|item: &u32| *item, StreamReducers::merge_deduplicate::<u32, u32>()));
  }
  let sink = StreamConsumers::to_list_with(&eventloop, |item: &u32| {
    if *item == 30 { ListAction::Fail(StreamError::failed("full")) } else { ListAction::Continue }
  });
  reducer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list().last(), Some(&30));
  assert!(sources.iter().all(|source| source.status() == StreamStatus::ClosedWithError));
}

#[test]
fn output_without_inputs_ends_immediately() {
  let eventloop = Eventloop::new();
  let reducer = StreamReducer::<u32, u32, u32>::new(&eventloop);
  let sink = StreamConsumers::to_list::<u32>(&eventloop);
  reducer.output().stream_to(sink.consumer());
  eventloop.run();
  assert!(sink.list().is_empty());
  assert_eq!(sink.status(), StreamStatus::Closed);
}

#[test]
fn zero_buffer_is_rejected() {
  let eventloop = Eventloop::new();
  let result = StreamReducer::<u32, u32, u32>::with_config(&eventloop, ReducerConfig::new(0));
  assert!(matches!(result, Err(StreamError::InvalidArgument { name: "buffer_size", .. })));
}
