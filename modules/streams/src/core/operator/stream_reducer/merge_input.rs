use alloc::{
  collections::VecDeque,
  rc::{Rc, Weak},
};
use core::{
  cell::{Cell, RefCell},
  marker::PhantomData,
};

use super::{MergeSlot, ReducerCore};
use crate::core::{
  StreamError,
  lifecycle::StreamStatus,
  operator::Reducer,
  stage::{Inlet, InletHandler, Outlet, StreamConsumer},
};

/// One reducer input: a bounded buffer of keyed items in front of its inlet.
pub(crate) struct MergeInput<K, I, O, A, F, R> {
  core:    Weak<ReducerCore<K, O, A>>,
  inlet:   Rc<Inlet<I>>,
  key_fn:  F,
  reducer: R,
  buffer:  RefCell<VecDeque<(K, I)>>,
  ended:   Cell<bool>,
  _output: PhantomData<fn(A) -> O>,
}

impl<K, I, O, A, F, R> MergeInput<K, I, O, A, F, R>
where
  K: Ord + Clone + 'static,
  I: 'static,
  O: 'static,
  A: 'static,
  F: Fn(&I) -> K,
  R: Reducer<K, I, O, A>,
{
  pub(crate) fn new(core: Weak<ReducerCore<K, O, A>>, inlet: Rc<Inlet<I>>, key_fn: F, reducer: R) -> Self {
    Self {
      core,
      inlet,
      key_fn,
      reducer,
      buffer: RefCell::new(VecDeque::new()),
      ended: Cell::new(false),
      _output: PhantomData,
    }
  }

  fn take_head(&self, key: &K) -> Option<I> {
    let head = self.buffer.borrow_mut().pop_front();
    match head {
      | Some((head_key, item)) => {
        debug_assert!(head_key == *key, "reducer head out of sync with its input buffer");
        Some(item)
      },
      | None => {
        tracing::warn!(port = self.inlet.port(), "reducer input has no buffered head");
        None
      },
    }
  }
}

impl<K, I, O, A, F, R> MergeSlot<K, O, A> for MergeInput<K, I, O, A, F, R>
where
  K: Ord + Clone + 'static,
  I: 'static,
  O: 'static,
  A: 'static,
  F: Fn(&I) -> K,
  R: Reducer<K, I, O, A>,
{
  fn reduce_first(&self, output: &Outlet<O>, key: &K) -> Option<A> {
    let item = self.take_head(key)?;
    Some(self.reducer.on_first_item(output, key, item))
  }

  fn reduce_next(&self, output: &Outlet<O>, key: &K, accumulator: &mut A) {
    if let Some(item) = self.take_head(key) {
      self.reducer.on_next_item(output, key, item, accumulator);
    }
  }

  fn complete(&self, output: &Outlet<O>, key: K, accumulator: A) {
    self.reducer.on_complete(output, key, accumulator);
  }

  fn head(&self) -> Option<K> {
    self.buffer.borrow().front().map(|(key, _)| key.clone())
  }

  fn refill(&self) {
    let len = self.buffer.borrow().len();
    let resume_at = self.core.upgrade().map_or(0, |core| core.config().resume_threshold());
    if self.inlet.status() == StreamStatus::Suspended && len <= resume_at {
      self.inlet.resume_upstream();
    }
  }

  fn is_ended(&self) -> bool {
    self.ended.get()
  }

  fn close(&self) {
    self.inlet.close_upstream();
  }

  fn close_with_error(&self, error: StreamError) {
    self.inlet.close_upstream_with_error(error);
  }
}

impl<K, I, O, A, F, R> InletHandler<I> for MergeInput<K, I, O, A, F, R>
where
  K: Ord + Clone + 'static,
  I: 'static,
  O: 'static,
  A: 'static,
  F: Fn(&I) -> K,
  R: Reducer<K, I, O, A>,
{
  fn on_data(&self, inlet: &Inlet<I>, item: I) {
    let Some(core) = self.core.upgrade() else {
      return;
    };
    let key = (self.key_fn)(&item);
    let (was_empty, len) = {
      let mut buffer = self.buffer.borrow_mut();
      buffer.push_back((key.clone(), item));
      (buffer.len() == 1, buffer.len())
    };
    if len >= core.config().buffer_size() {
      inlet.suspend_upstream();
    }
    if was_empty {
      core.on_head(inlet.port(), key);
    }
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<I>) {
    self.ended.set(true);
    let drained = self.buffer.borrow().is_empty();
    if let Some(core) = self.core.upgrade().filter(|_| drained) {
      core.on_drained_end();
    }
  }

  fn on_error(&self, _inlet: &Inlet<I>, error: &StreamError) {
    if let Some(core) = self.core.upgrade() {
      core.on_input_error(error.clone());
    }
  }
}
