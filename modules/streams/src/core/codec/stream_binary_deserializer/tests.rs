use alloc::{string::String, vec, vec::Vec};

use bytes::Bytes;

use super::StreamBinaryDeserializer;
use crate::core::{
  Eventloop, StreamError,
  codec::{I32Serializer, SerializerConfig, Utf8Serializer},
  factory::{StreamConsumers, StreamProducers, StreamToList},
  lifecycle::StreamStatus,
  stage::{StreamConsumer, StreamProducer},
};

fn decode_strings(eventloop: &Eventloop, chunks: Vec<Bytes>, config: SerializerConfig) -> StreamToList<String> {
  let source = StreamProducers::of_iter(eventloop, chunks);
  let deserializer = StreamBinaryDeserializer::new(eventloop, Utf8Serializer, config).expect("valid config");
  let sink = StreamConsumers::to_list::<String>(eventloop);
  source.stream_to(deserializer.input());
  deserializer.output().stream_to(sink.consumer());
  sink
}

#[test]
fn reassembles_records_split_across_chunks() {
  let eventloop = Eventloop::new();
  let chunks = vec![
    Bytes::from_static(&[3, b'f']),
    Bytes::from_static(&[b'o']),
    Bytes::from_static(&[b'o', 2, b'h', b'i', 0]),
  ];
  let sink = decode_strings(&eventloop, chunks, SerializerConfig::default());
  eventloop.run();
  assert_eq!(sink.list(), vec![String::from("foo"), String::from("hi"), String::new()]);
  assert_eq!(sink.status(), StreamStatus::Closed);
}

#[test]
fn input_ending_inside_a_record_is_truncated() {
  let eventloop = Eventloop::new();
  let sink = decode_strings(&eventloop, vec![Bytes::from_static(&[1, b'x', 5, b'y'])], SerializerConfig::default());
  eventloop.run();
  assert_eq!(sink.list(), vec![String::from("x")]);
  assert_eq!(sink.consumer().error(), Some(StreamError::TruncatedRecord { remaining: 2 }));
}

#[test]
fn length_above_the_limit_fails() {
  let eventloop = Eventloop::new();
  let sink = decode_strings(&eventloop, vec![Bytes::from_static(&[0x7F])], SerializerConfig::new(64, 16));
  eventloop.run();
  assert_eq!(sink.consumer().error(), Some(StreamError::RecordTooLarge { size: 127, limit: 16 }));
}

#[test]
fn undecodable_payload_is_malformed() {
  let eventloop = Eventloop::new();
  let source = StreamProducers::of_value(&eventloop, Bytes::from_static(&[2, 0, 1]));
  let deserializer =
    StreamBinaryDeserializer::new(&eventloop, I32Serializer, SerializerConfig::default()).expect("valid config");
  let sink = StreamConsumers::to_list::<i32>(&eventloop);
  source.stream_to(deserializer.input());
  deserializer.output().stream_to(sink.consumer());
  eventloop.run();
  assert!(matches!(sink.consumer().error(), Some(StreamError::MalformedRecord(_))));
  assert_eq!(source.status(), StreamStatus::ClosedWithError);
}
