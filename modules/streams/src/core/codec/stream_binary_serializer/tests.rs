use alloc::{string::String, vec};
use core::time::Duration;

use bytes::Bytes;

use super::StreamBinarySerializer;
use crate::core::{
  Eventloop, StreamError,
  codec::{I32Serializer, SerializerConfig, StreamBinaryDeserializer, Utf8Serializer},
  factory::{StreamConsumers, StreamProducers},
  lifecycle::StreamStatus,
  stage::{StreamConsumer, StreamProducer},
};

#[test]
fn flushes_once_the_buffer_fills() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::of_iter(&eventloop, vec![10_i32, 20, 30, 40]);
  let serializer =
    StreamBinarySerializer::new(&eventloop, I32Serializer, SerializerConfig::new(14, 14)).expect("valid config");
  let sink = StreamConsumers::to_list_randomly_suspending::<Bytes>(&eventloop, 5);
  source.stream_to(serializer.input());
  serializer.output().stream_to(sink.consumer());
  eventloop.run();
  let chunks = sink.list();
  assert_eq!(chunks.len(), 2);
  assert_eq!(chunks[0].len(), 15);
  assert_eq!(chunks[1].len(), 5);
  assert_eq!((chunks[0][0], chunks[0][4], chunks[0][9], chunks[0][14]), (4, 10, 20, 30));
  assert_eq!(chunks[1][4], 40);
}

#[test]
fn records_survive_a_round_trip_one_by_one() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::of_iter(&eventloop, vec![1_i32, 2, 3]);
  let serializer =
    StreamBinarySerializer::new(&eventloop, I32Serializer, SerializerConfig::new(1, SerializerConfig::MAX_MESSAGE_SIZE))
      .expect("valid config");
  let deserializer =
    StreamBinaryDeserializer::new(&eventloop, I32Serializer, SerializerConfig::new(12, 12)).expect("valid config");
  let sink = StreamConsumers::to_list_one_by_one::<i32>(&eventloop);
  source.stream_to(serializer.input());
  serializer.output().stream_to(deserializer.input());
  deserializer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![1, 2, 3]);
  assert_eq!(source.status(), StreamStatus::Closed);
}

#[test]
fn delayed_flush_emits_a_partial_buffer() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::concat(&eventloop, vec![
    StreamProducers::of_iter(&eventloop, vec![String::from("ab"), String::from("c")]),
    StreamProducers::idle::<String>(&eventloop),
  ]);
  let config = SerializerConfig::default().with_flush_delay(Duration::from_millis(10));
  let serializer = StreamBinarySerializer::new(&eventloop, Utf8Serializer, config).expect("valid config");
  let sink = StreamConsumers::to_list::<Bytes>(&eventloop);
  source.stream_to(serializer.input());
  serializer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.list(), vec![Bytes::from_static(&[2, b'a', b'b', 1, b'c'])]);
  assert_eq!(eventloop.current_time_millis(), 10);
  assert_eq!(sink.status(), StreamStatus::Ready);
}

#[test]
fn oversized_record_fails_the_stream() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::of_iter(&eventloop, vec![String::from("ok"), String::from("too long")]);
  let serializer =
    StreamBinarySerializer::new(&eventloop, Utf8Serializer, SerializerConfig::new(1024, 4)).expect("valid config");
  let sink = StreamConsumers::to_list::<Bytes>(&eventloop);
  source.stream_to(serializer.input());
  serializer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.consumer().error(), Some(StreamError::RecordTooLarge { size: 8, limit: 4 }));
  assert_eq!(source.status(), StreamStatus::ClosedWithError);
}

#[test]
fn failure_cancels_the_pending_flush() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::of_iter(&eventloop, vec![String::from("ok"), String::from("too long")]);
  let config = SerializerConfig::new(1024, 4).with_flush_delay(Duration::from_millis(100));
  let serializer = StreamBinarySerializer::new(&eventloop, Utf8Serializer, config).expect("valid config");
  let sink = StreamConsumers::to_list::<Bytes>(&eventloop);
  source.stream_to(serializer.input());
  serializer.output().stream_to(sink.consumer());
  eventloop.run();
  assert_eq!(sink.status(), StreamStatus::ClosedWithError);
  assert_eq!(eventloop.pending_timers(), 0);
  assert_eq!(eventloop.current_time_millis(), 0);
  assert!(sink.list().is_empty());
}

#[test]
fn downstream_close_cancels_the_pending_flush() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::concat(&eventloop, vec![
    StreamProducers::of_value(&eventloop, String::from("ab")),
    StreamProducers::idle::<String>(&eventloop),
  ]);
  let config = SerializerConfig::default().with_flush_delay(Duration::from_millis(50));
  let serializer = StreamBinarySerializer::new(&eventloop, Utf8Serializer, config).expect("valid config");
  let sink = StreamConsumers::to_list::<Bytes>(&eventloop);
  source.stream_to(serializer.input());
  serializer.output().stream_to(sink.consumer());
  eventloop.run_until_idle();
  assert_eq!(eventloop.pending_timers(), 1);
  sink.consumer().close_upstream();
  assert_eq!(eventloop.pending_timers(), 0);
  eventloop.run();
  assert_eq!(eventloop.current_time_millis(), 0);
  assert!(sink.list().is_empty());
  assert_eq!(serializer.output().status(), StreamStatus::Closed);
}
