//! Length-prefixed record encoder.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use bytes::{Bytes, BytesMut};

use super::{
  BufferSerializer, SerializerConfig,
  varint::{put_varint, varint_len},
};
use crate::core::{
  Eventloop, ScheduledTask, StreamError,
  lifecycle::CompletionCallback,
  stage::{Inlet, Outlet, StreamProducer, StreamTransformer, TransformerLogic},
};

#[cfg(test)]
mod tests;

/// Encodes items as varint-length-prefixed records packed into byte chunks.
///
/// A chunk is emitted once the buffered bytes reach [`SerializerConfig::buffer_size`], at
/// end-of-stream, and, with a flush delay configured, when the delay elapses after the first record
/// of a chunk was buffered. A record whose payload exceeds
/// [`SerializerConfig::max_message_size`] fails the stream with [`StreamError::RecordTooLarge`].
/// Once the output terminates, a pending flush timer is cancelled and buffered bytes are dropped.
pub struct StreamBinarySerializer<T> {
  transformer: StreamTransformer<T, Bytes>,
}

struct Framing {
  buffer: BytesMut,
  timer:  Option<ScheduledTask>,
}

struct SerializeLogic<S> {
  eventloop:  Eventloop,
  config:     SerializerConfig,
  serializer: S,
  framing:    Rc<RefCell<Framing>>,
  scratch:    RefCell<BytesMut>,
}

impl<T: 'static> StreamBinarySerializer<T> {
  /// Creates a serializer.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when the configuration is invalid.
  pub fn new<S>(eventloop: &Eventloop, serializer: S, config: SerializerConfig) -> Result<Self, StreamError>
  where
    S: BufferSerializer<T> + 'static, {
    config.validate()?;
    let framing = Rc::new(RefCell::new(Framing { buffer: BytesMut::new(), timer: None }));
    let logic = SerializeLogic {
      eventloop: eventloop.clone(),
      config,
      serializer,
      framing: framing.clone(),
      scratch: RefCell::new(BytesMut::new()),
    };
    let transformer = StreamTransformer::new(eventloop, logic);
    let framing = Rc::downgrade(&framing);
    transformer.output().add_completion_callback(CompletionCallback::new(move |_| {
      if let Some(framing) = framing.upgrade() {
        framing.borrow_mut().discard();
      }
    }));
    Ok(Self { transformer })
  }

  /// Returns the consumer side.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<T>> {
    self.transformer.input()
  }

  /// Returns the producer side.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<Bytes>> {
    self.transformer.output()
  }
}

impl Framing {
  fn take_chunk(&mut self) -> Option<Bytes> {
    if let Some(timer) = self.timer.take() {
      timer.cancel();
    }
    if self.buffer.is_empty() { None } else { Some(self.buffer.split().freeze()) }
  }

  fn discard(&mut self) {
    if let Some(timer) = self.timer.take() {
      tracing::trace!("cancelling serializer flush timer");
      timer.cancel();
    }
    self.buffer.clear();
  }
}

fn flush_on_timer(output: &Weak<Outlet<Bytes>>, framing: &RefCell<Framing>) {
  let Some(output) = output.upgrade().filter(|output| output.status().is_active()) else {
    return;
  };
  let chunk = {
    let mut framing = framing.borrow_mut();
    framing.timer = None;
    framing.take_chunk()
  };
  if let Some(chunk) = chunk {
    tracing::trace!(bytes = chunk.len(), "flushing serializer buffer after delay");
    output.send(chunk);
  }
}

impl<S> SerializeLogic<S> {
  fn arm_timer(&self, output: &Outlet<Bytes>) {
    let Some(delay) = self.config.flush_delay() else {
      return;
    };
    if self.framing.borrow().timer.is_some() {
      return;
    }
    let weak_output = output.shared().map_or_else(Weak::new, |output| Rc::downgrade(&output));
    let framing = Rc::downgrade(&self.framing);
    let timer = self.eventloop.schedule(delay, move || {
      if let Some(framing) = framing.upgrade() {
        flush_on_timer(&weak_output, &framing);
      }
    });
    self.framing.borrow_mut().timer = Some(timer);
  }
}

impl<T, S> TransformerLogic<T, Bytes> for SerializeLogic<S>
where
  T: 'static,
  S: BufferSerializer<T>,
{
  fn on_data(&self, output: &Outlet<Bytes>, item: T) {
    let payload = {
      let mut scratch = self.scratch.borrow_mut();
      self.serializer.serialize(&item, &mut scratch);
      scratch.split()
    };
    if payload.len() > self.config.max_message_size() {
      let limit = self.config.max_message_size();
      output.close_with_error(StreamError::RecordTooLarge { size: payload.len(), limit });
      return;
    }
    let chunk = {
      let mut framing = self.framing.borrow_mut();
      framing.buffer.reserve(varint_len(payload.len()) + payload.len());
      put_varint(&mut framing.buffer, payload.len());
      framing.buffer.extend_from_slice(&payload);
      if framing.buffer.len() >= self.config.buffer_size() { framing.take_chunk() } else { None }
    };
    match chunk {
      | Some(chunk) => output.send(chunk),
      | None => self.arm_timer(output),
    }
  }

  fn on_end_of_stream(&self, output: &Outlet<Bytes>) {
    let chunk = self.framing.borrow_mut().take_chunk();
    if let Some(chunk) = chunk {
      output.send(chunk);
    }
    output.send_end_of_stream();
  }
}
