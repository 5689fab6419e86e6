//! Consumer splitting one stream into consecutive chunks.

use alloc::{
  boxed::Box,
  rc::{Rc, Weak},
};
use core::cell::{Cell, RefCell};

use crate::core::{
  Eventloop, StreamError,
  decorator::ConsumerSwitcher,
  lifecycle::{CompletionCallback, StreamCompletion},
  stage::{ConsumerRef, Inlet, Outlet, StreamConsumer, StreamProducer, StreamTransformer, TransformerLogic},
  validate_positive_argument,
};


type ChunkFactory<T> = Box<dyn FnMut(usize) -> ConsumerRef<T>>;

/// Outward consumer that hands every `chunk_size` items to a fresh chunk consumer.
///
/// The chunk factory receives the zero-based chunk index. A chunk is rotated out right before the
/// first item of the next chunk is forwarded and receives end-of-stream at that point. The
/// completion resolves with the number of chunks once the outward stream and every chunk
/// consumer completed, or with the first error.
pub struct RotatingConsumer<T> {
  transformer: StreamTransformer<T, T>,
  state:       Rc<RotationState<T>>,
}

struct RotationState<T> {
  this:         Weak<RotationState<T>>,
  switcher:     ConsumerSwitcher<T>,
  factory:      RefCell<ChunkFactory<T>>,
  chunks:       Cell<usize>,
  open_chunks:  Cell<usize>,
  outward_done: Cell<bool>,
  completion:   StreamCompletion<usize>,
}

struct Rotation<T> {
  state:      Rc<RotationState<T>>,
  chunk_size: usize,
  count:      Cell<usize>,
}

impl<T: 'static> RotatingConsumer<T> {
  /// Creates the consumer and opens the first chunk.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when `chunk_size` is zero.
  pub fn new<F>(eventloop: &Eventloop, chunk_size: usize, factory: F) -> Result<Self, StreamError>
  where
    F: FnMut(usize) -> ConsumerRef<T> + 'static, {
    let chunk_size = validate_positive_argument("chunk_size", chunk_size)?;
    let state = Rc::new_cyclic(|this| RotationState {
      this:         this.clone(),
      switcher:     ConsumerSwitcher::new(eventloop),
      factory:      RefCell::new(Box::new(factory)),
      chunks:       Cell::new(0),
      open_chunks:  Cell::new(0),
      outward_done: Cell::new(false),
      completion:   StreamCompletion::new(),
    });
    let transformer =
      StreamTransformer::new(eventloop, Rotation { state: state.clone(), chunk_size, count: Cell::new(0) });
    transformer.output().stream_to(state.switcher.consumer());
    state.rotate();
    let outward = state.clone();
    let on_outward = CompletionCallback::new(move |outcome| outward.on_outward_complete(outcome));
    transformer.input().add_completion_callback(on_outward);
    Ok(Self { transformer, state })
  }

  /// Returns the outward consumer.
  #[must_use]
  pub fn consumer(&self) -> Rc<Inlet<T>> {
    self.transformer.input()
  }

  /// Returns the number of chunks opened so far.
  #[must_use]
  pub fn chunks(&self) -> usize {
    self.state.chunks.get()
  }

  /// Returns the handle resolved with the final chunk count.
  #[must_use]
  pub fn completion(&self) -> StreamCompletion<usize> {
    self.state.completion.clone()
  }
}

impl<T: 'static> RotationState<T> {
  fn rotate(&self) {
    let index = self.chunks.get();
    let chunk = {
      let mut factory = self.factory.borrow_mut();
      (*factory)(index)
    };
    self.chunks.set(index + 1);
    self.open_chunks.set(self.open_chunks.get() + 1);
    if let Some(this) = self.this.upgrade() {
      chunk.add_completion_callback(CompletionCallback::new(move |outcome| this.on_chunk_complete(outcome)));
    }
    tracing::debug!(chunk = index, "rotating to a new chunk");
    self.switcher.switch_to(chunk);
  }

  fn on_chunk_complete(&self, outcome: Result<(), StreamError>) {
    self.open_chunks.set(self.open_chunks.get().saturating_sub(1));
    match outcome {
      | Ok(()) => self.try_finish(),
      | Err(error) => self.completion.complete(Err(error)),
    }
  }

  fn on_outward_complete(&self, outcome: Result<(), StreamError>) {
    match outcome {
      | Ok(()) => {
        self.outward_done.set(true);
        self.try_finish();
      },
      | Err(error) => self.completion.complete(Err(error)),
    }
  }

  fn try_finish(&self) {
    if self.outward_done.get() && self.open_chunks.get() == 0 {
      self.completion.complete(Ok(self.chunks.get()));
    }
  }
}

impl<T: 'static> TransformerLogic<T, T> for Rotation<T> {
  fn on_data(&self, output: &Outlet<T>, item: T) {
    let count = self.count.get();
    if count > 0 && count % self.chunk_size == 0 {
      self.state.rotate();
    }
    self.count.set(count + 1);
    output.send(item);
  }
}
