use alloc::{string::String, vec};

use super::StreamReducers;
use crate::core::{
  Eventloop,
  factory::{StreamConsumers, StreamProducers},
  operator::{ReducerToResult, StreamReducer},
  stage::StreamProducer,
};

struct Concatenate;

impl ReducerToResult<char, String, String, String> for Concatenate {
  fn create_accumulator(&self, key: &char) -> String {
    let mut accumulator = String::new();
    accumulator.push(*key);
    accumulator.push(':');
    accumulator
  }

  fn accumulate(&self, accumulator: &mut String, item: String) {
    accumulator.push_str(&item);
  }

  fn produce_result(&self, accumulator: String) -> String {
    accumulator
  }
}

fn first_char(item: &String) -> char {
  item.chars().next().unwrap_or_default()
}

#[test]
fn accumulator_emits_one_result_per_key() {
  let eventloop = Eventloop::new();
  let reducer = StreamReducer::<char, String, String>::new(&eventloop);
  let left = StreamProducers::of_iter(&eventloop, vec![String::from("a1"), String::from("b1")]);
  let right = StreamProducers::of_iter(&eventloop, vec![String::from("a2"), String::from("c1")]);
  left.stream_to(reducer.new_input(first_char, StreamReducers::to_accumulator(Concatenate)));
  right.stream_to(reducer.new_input(first_char, StreamReducers::to_accumulator(Concatenate)));
  let sink = StreamConsumers::to_list::<String>(&eventloop);
  reducer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![String::from("a:a1a2"), String::from("b:b1"), String::from("c:c1")]);
}
