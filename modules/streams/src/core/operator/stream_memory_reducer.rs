//! Hash-grouping reducer for unsorted input.

use alloc::rc::{Rc, Weak};
use core::{
  cell::{Cell, RefCell},
  hash::Hash,
};

use hashbrown::{HashMap, hash_map::Entry};

use super::ReducerToResult;
use crate::core::{
  Eventloop, StreamError,
  stage::{Inlet, InletHandler, Outlet, OutletHandler, ProduceOutcome, StreamProducer},
};


/// Accumulates the whole input in memory, one accumulator per key, and emits one result per key
/// after end-of-stream.
///
/// Results come out in map order, which is unspecified. Emission runs through the output's produce
/// loop, so a suspended downstream pauses it.
pub struct StreamMemoryReducer<I, O> {
  input:  Rc<Inlet<I>>,
  output: Rc<Outlet<O>>,
}

struct MemoryCore<K, I, O, A, F, R> {
  input:   Weak<Inlet<I>>,
  output:  Weak<Outlet<O>>,
  key_fn:  F,
  reducer: R,
  table:   RefCell<HashMap<K, A>>,
  drain:   RefCell<Option<hashbrown::hash_map::IntoIter<K, A>>>,
  started: Cell<bool>,
}

impl<I: 'static, O: 'static> StreamMemoryReducer<I, O> {
  /// Creates the reducer.
  #[must_use]
  pub fn new<K, A, F, R>(eventloop: &Eventloop, key_fn: F, reducer: R) -> Self
  where
    K: Eq + Hash + 'static,
    A: 'static,
    F: Fn(&I) -> K + 'static,
    R: ReducerToResult<K, I, O, A> + 'static, {
    let input = Inlet::new(eventloop, 0);
    let output = Outlet::new(eventloop, 0);
    let core = Rc::new(MemoryCore {
      input: Rc::downgrade(&input),
      output: Rc::downgrade(&output),
      key_fn,
      reducer,
      table: RefCell::new(HashMap::new()),
      drain: RefCell::new(None),
      started: Cell::new(false),
    });
    input.set_handler(core.clone());
    output.set_handler(core);
    Self { input, output }
  }

  /// Returns the consumer side.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<I>> {
    self.input.clone()
  }

  /// Returns the producer side.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<O>> {
    self.output.clone()
  }
}

impl<K, I, O, A, F, R> InletHandler<I> for MemoryCore<K, I, O, A, F, R>
where
  K: Eq + Hash,
  I: 'static,
  O: 'static,
  F: Fn(&I) -> K,
  R: ReducerToResult<K, I, O, A>,
{
  fn on_data(&self, _inlet: &Inlet<I>, item: I) {
    let key = (self.key_fn)(&item);
    let mut table = self.table.borrow_mut();
    match table.entry(key) {
      | Entry::Occupied(mut entry) => self.reducer.accumulate(entry.get_mut(), item),
      | Entry::Vacant(entry) => {
        let mut accumulator = self.reducer.create_accumulator(entry.key());
        self.reducer.accumulate(&mut accumulator, item);
        entry.insert(accumulator);
      },
    }
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<I>) {
    let table = core::mem::take(&mut *self.table.borrow_mut());
    tracing::trace!(keys = table.len(), "memory reducer input ended");
    *self.drain.borrow_mut() = Some(table.into_iter());
    if let Some(output) = self.output.upgrade() {
      output.produce();
    }
  }

  fn on_error(&self, _inlet: &Inlet<I>, error: &StreamError) {
    self.table.borrow_mut().clear();
    if let Some(output) = self.output.upgrade() {
      output.close_with_error(error.clone());
    }
  }
}

impl<K, I, O, A, F, R> OutletHandler<O> for MemoryCore<K, I, O, A, F, R>
where
  K: Eq + Hash,
  I: 'static,
  O: 'static,
  F: Fn(&I) -> K,
  R: ReducerToResult<K, I, O, A>,
{
  fn on_started(&self, outlet: &Outlet<O>) {
    self.started.set(true);
    outlet.produce();
  }

  fn do_produce(&self, outlet: &Outlet<O>) -> Result<ProduceOutcome, StreamError> {
    if !self.started.get() {
      return Ok(ProduceOutcome::Yield);
    }
    let next = match self.drain.borrow_mut().as_mut() {
      | Some(drain) => drain.next(),
      | None => return Ok(ProduceOutcome::Yield),
    };
    match next {
      | Some((_, accumulator)) => {
        let result = self.reducer.produce_result(accumulator);
        outlet.send(result);
        Ok(ProduceOutcome::Continue)
      },
      | None => Ok(ProduceOutcome::Exhausted),
    }
  }

  fn on_resumed(&self, outlet: &Outlet<O>) {
    outlet.resume_produce();
  }

  fn on_closed(&self, _outlet: &Outlet<O>) {
    if let Some(input) = self.input.upgrade() {
      input.close_upstream();
    }
  }

  fn on_closed_with_error(&self, _outlet: &Outlet<O>, error: &StreamError) {
    if let Some(input) = self.input.upgrade() {
      input.close_upstream_with_error(error.clone());
    }
  }
}
