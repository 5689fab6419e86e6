//! Byte chunk stages: re-chunking and length-prefixed record framing.

mod buffer_serializer;
mod byte_chunker_config;
mod i32_serializer;
mod serializer_config;
mod stream_binary_deserializer;
mod stream_binary_serializer;
mod stream_byte_chunker;
mod utf8_serializer;
mod varint;

pub use buffer_serializer::BufferSerializer;
pub use byte_chunker_config::ByteChunkerConfig;
pub use i32_serializer::I32Serializer;
pub use serializer_config::SerializerConfig;
pub use stream_binary_deserializer::StreamBinaryDeserializer;
pub use stream_binary_serializer::StreamBinarySerializer;
pub use stream_byte_chunker::StreamByteChunker;
pub use utf8_serializer::Utf8Serializer;
