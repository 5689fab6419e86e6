//! Byte re-chunking.

use alloc::rc::Rc;
use core::cell::RefCell;

use bytes::{Bytes, BytesMut};

use super::ByteChunkerConfig;
use crate::core::{
  Eventloop, StreamError,
  stage::{Inlet, Outlet, StreamProducer, StreamTransformer, TransformerLogic},
};


/// Re-chunks a byte stream so every chunk but the last lies within the configured bounds.
///
/// A chunk already within bounds passes through untouched when nothing is pending.
pub struct StreamByteChunker {
  transformer: StreamTransformer<Bytes, Bytes>,
}

struct ChunkLogic {
  config:  ByteChunkerConfig,
  pending: RefCell<BytesMut>,
}

impl StreamByteChunker {
  /// Creates a chunker.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when the bounds are invalid.
  pub fn new(eventloop: &Eventloop, config: ByteChunkerConfig) -> Result<Self, StreamError> {
    config.validate()?;
    let logic = ChunkLogic { config, pending: RefCell::new(BytesMut::new()) };
    Ok(Self { transformer: StreamTransformer::new(eventloop, logic) })
  }

  /// Returns the consumer side.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<Bytes>> {
    self.transformer.input()
  }

  /// Returns the producer side.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<Bytes>> {
    self.transformer.output()
  }
}

impl ChunkLogic {
  fn next_chunk(&self) -> Option<Bytes> {
    let mut pending = self.pending.borrow_mut();
    if pending.len() < self.config.min_chunk_size() {
      return None;
    }
    let size = pending.len().min(self.config.max_chunk_size());
    Some(pending.split_to(size).freeze())
  }
}

impl TransformerLogic<Bytes, Bytes> for ChunkLogic {
  fn on_data(&self, output: &Outlet<Bytes>, item: Bytes) {
    let fits = (self.config.min_chunk_size()..=self.config.max_chunk_size()).contains(&item.len());
    if fits && self.pending.borrow().is_empty() {
      output.send(item);
      return;
    }
    self.pending.borrow_mut().extend_from_slice(&item);
    while output.status().is_active() {
      match self.next_chunk() {
        | Some(chunk) => output.send(chunk),
        | None => break,
      }
    }
  }

  fn on_end_of_stream(&self, output: &Outlet<Bytes>) {
    let rest = self.pending.borrow_mut().split().freeze();
    if !rest.is_empty() {
      output.send(rest);
    }
    output.send_end_of_stream();
  }
}
