//! Length-prefixed record decoder.

use alloc::rc::Rc;
use core::{cell::RefCell, marker::PhantomData};

use bytes::{Buf, Bytes, BytesMut};

use super::{BufferSerializer, SerializerConfig, varint::read_varint};
use crate::core::{
  Eventloop, StreamError,
  stage::{Inlet, Outlet, StreamProducer, StreamTransformer, TransformerLogic},
};

#[cfg(test)]
mod tests;

/// Decodes varint-length-prefixed records from arbitrarily split byte chunks.
///
/// Fails with [`StreamError::RecordTooLarge`] on a length above
/// [`SerializerConfig::max_message_size`], with [`StreamError::TruncatedRecord`] when the input ends
/// inside a record, and with [`StreamError::MalformedRecord`] when a payload does not decode.
pub struct StreamBinaryDeserializer<T> {
  transformer: StreamTransformer<Bytes, T>,
}

struct DeserializeLogic<T, S> {
  config:     SerializerConfig,
  serializer: S,
  buffer:     RefCell<BytesMut>,
  _item:      PhantomData<fn() -> T>,
}

impl<T: 'static> StreamBinaryDeserializer<T> {
  /// Creates a deserializer.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when the configuration is invalid.
  pub fn new<S>(eventloop: &Eventloop, serializer: S, config: SerializerConfig) -> Result<Self, StreamError>
  where
    S: BufferSerializer<T> + 'static, {
    config.validate()?;
    let logic = DeserializeLogic { config, serializer, buffer: RefCell::new(BytesMut::new()), _item: PhantomData };
    Ok(Self { transformer: StreamTransformer::new(eventloop, logic) })
  }

  /// Returns the consumer side.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<Bytes>> {
    self.transformer.input()
  }

  /// Returns the producer side.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<T>> {
    self.transformer.output()
  }
}

impl<T, S> DeserializeLogic<T, S>
where
  S: BufferSerializer<T>,
{
  fn next_record(&self) -> Result<Option<T>, StreamError> {
    let payload = {
      let mut buffer = self.buffer.borrow_mut();
      let Some((len, prefix)) = read_varint(&buffer)? else {
        return Ok(None);
      };
      if len > self.config.max_message_size() {
        return Err(StreamError::RecordTooLarge { size: len, limit: self.config.max_message_size() });
      }
      if buffer.len() < prefix + len {
        return Ok(None);
      }
      buffer.advance(prefix);
      buffer.split_to(len).freeze()
    };
    self.serializer.deserialize(payload).map(Some)
  }
}

impl<T, S> TransformerLogic<Bytes, T> for DeserializeLogic<T, S>
where
  T: 'static,
  S: BufferSerializer<T>,
{
  fn on_data(&self, output: &Outlet<T>, item: Bytes) {
    self.buffer.borrow_mut().extend_from_slice(&item);
    while output.status().is_active() {
      match self.next_record() {
        | Ok(Some(record)) => output.send(record),
        | Ok(None) => break,
        | Err(error) => {
          output.close_with_error(error);
          break;
        },
      }
    }
  }

  fn on_end_of_stream(&self, output: &Outlet<T>) {
    let remaining = self.buffer.borrow().len();
    if remaining > 0 {
      output.close_with_error(StreamError::TruncatedRecord { remaining });
      return;
    }
    output.send_end_of_stream();
  }
}
