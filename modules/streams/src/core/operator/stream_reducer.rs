//! K-way merge reducer over key-sorted inputs.

mod merge_input;
mod merge_slot;

use alloc::{collections::BinaryHeap, rc::Rc, vec::Vec};
use core::{
  cell::{Cell, RefCell},
  cmp::Reverse,
};

use merge_input::MergeInput;
use merge_slot::MergeSlot;

use super::{Reducer, ReducerConfig};
use crate::core::{
  Eventloop, StreamError,
  stage::{Inlet, Outlet, OutletHandler, ProduceOutcome, StreamProducer},
};

#[cfg(test)]
mod tests;

/// Merges any number of inputs, each sorted ascending by key, into one key-ordered output.
///
/// Every input carries its own key function and [`Reducer`], so inputs may have different item
/// types as long as they agree on the key and accumulator types. Items with equal keys are folded
/// in input order (ties are broken by the index of the input), and a key is completed once no input
/// can still produce it. Unsorted inputs give unspecified results.
///
/// Each input buffers up to [`ReducerConfig::buffer_size`] items before its upstream is
/// suspended. Any input failure fails the output and every other input; closing the output closes
/// all inputs.
pub struct StreamReducer<K, O, A> {
  output: Rc<Outlet<O>>,
  core:   Rc<ReducerCore<K, O, A>>,
}

struct MergeState<K, A> {
  heads:    BinaryHeap<Reverse<(K, usize)>>,
  awaiting: usize,
  current:  Option<(K, A, usize)>,
  started:  bool,
}

pub(crate) struct ReducerCore<K, O, A> {
  eventloop: Eventloop,
  config:    ReducerConfig,
  output:    Rc<Outlet<O>>,
  slots:     RefCell<Vec<Rc<dyn MergeSlot<K, O, A>>>>,
  state:     RefCell<MergeState<K, A>>,
  stepping:  Cell<bool>,
}

impl<K, O, A> StreamReducer<K, O, A>
where
  K: Ord + Clone + 'static,
  O: 'static,
  A: 'static,
{
  /// Creates a reducer with the default configuration.
  #[must_use]
  pub fn new(eventloop: &Eventloop) -> Self {
    Self::build(eventloop, ReducerConfig::default())
  }

  /// Creates a reducer with `config`.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when the configuration is invalid.
  pub fn with_config(eventloop: &Eventloop, config: ReducerConfig) -> Result<Self, StreamError> {
    config.validate()?;
    Ok(Self::build(eventloop, config))
  }

  fn build(eventloop: &Eventloop, config: ReducerConfig) -> Self {
    let output = Outlet::new(eventloop, 0);
    let core = Rc::new(ReducerCore {
      eventloop: eventloop.clone(),
      config,
      output: output.clone(),
      slots: RefCell::new(Vec::new()),
      state: RefCell::new(MergeState { heads: BinaryHeap::new(), awaiting: 0, current: None, started: false }),
      stepping: Cell::new(false),
    });
    output.set_handler(core.clone());
    Self { output, core }
  }

  /// Adds an input keyed by `key_fn` whose items are folded by `reducer`.
  pub fn new_input<I, F, R>(&self, key_fn: F, reducer: R) -> Rc<Inlet<I>>
  where
    I: 'static,
    F: Fn(&I) -> K + 'static,
    R: Reducer<K, I, O, A> + 'static, {
    let index = self.core.slots.borrow().len();
    let inlet = Inlet::new(&self.core.eventloop, index);
    let slot = Rc::new(MergeInput::new(Rc::downgrade(&self.core), inlet.clone(), key_fn, reducer));
    inlet.set_handler(slot.clone());
    self.core.slots.borrow_mut().push(slot);
    self.core.state.borrow_mut().awaiting += 1;
    inlet
  }

  /// Returns the merged output.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<O>> {
    self.output.clone()
  }

  /// Returns the number of inputs added so far.
  #[must_use]
  pub fn input_count(&self) -> usize {
    self.core.slots.borrow().len()
  }
}

impl<K, O, A> ReducerCore<K, O, A>
where
  K: Ord + Clone + 'static,
  O: 'static,
  A: 'static,
{
  pub(crate) const fn config(&self) -> &ReducerConfig {
    &self.config
  }

  /// An input buffered `key` at its head after having nothing buffered.
  pub(crate) fn on_head(&self, index: usize, key: K) {
    {
      let mut state = self.state.borrow_mut();
      state.heads.push(Reverse((key, index)));
      state.awaiting = state.awaiting.saturating_sub(1);
    }
    self.pump();
  }

  /// An input ended with nothing buffered.
  pub(crate) fn on_drained_end(&self) {
    {
      let mut state = self.state.borrow_mut();
      state.awaiting = state.awaiting.saturating_sub(1);
    }
    self.pump();
  }

  pub(crate) fn on_input_error(&self, error: StreamError) {
    self.output.close_with_error(error);
  }

  fn pump(&self) {
    if !self.stepping.get() {
      self.output.produce();
    }
  }

  fn slot(&self, index: usize) -> Option<Rc<dyn MergeSlot<K, O, A>>> {
    self.slots.borrow().get(index).cloned()
  }

  fn slots(&self) -> Vec<Rc<dyn MergeSlot<K, O, A>>> {
    self.slots.borrow().clone()
  }

  fn complete(&self, output: &Outlet<O>, current: Option<(K, A, usize)>) {
    if let Some((key, accumulator, owner)) = current {
      if let Some(slot) = self.slot(owner) {
        slot.complete(output, key, accumulator);
      }
    }
  }

  fn step(&self, output: &Outlet<O>) -> ProduceOutcome {
    let next = {
      let mut state = self.state.borrow_mut();
      if !state.started || state.awaiting > 0 {
        return ProduceOutcome::Yield;
      }
      state.heads.pop()
    };
    let Some(Reverse((key, index))) = next else {
      let current = self.state.borrow_mut().current.take();
      self.complete(output, current);
      tracing::trace!(inputs = self.slots.borrow().len(), "all reducer inputs drained");
      return ProduceOutcome::Exhausted;
    };
    let Some(slot) = self.slot(index) else {
      return ProduceOutcome::Continue;
    };
    let current = self.state.borrow_mut().current.take();
    let current = match current {
      | Some((current_key, mut accumulator, _)) if current_key == key => {
        slot.reduce_next(output, &key, &mut accumulator);
        Some((key, accumulator, index))
      },
      | previous => {
        self.complete(output, previous);
        if !output.status().is_active() {
          return ProduceOutcome::Yield;
        }
        slot.reduce_first(output, &key).map(|accumulator| (key, accumulator, index))
      },
    };
    let head = slot.head();
    {
      let mut state = self.state.borrow_mut();
      state.current = current;
      match head {
        | Some(key) => state.heads.push(Reverse((key, index))),
        | None if !slot.is_ended() => state.awaiting += 1,
        | None => {},
      }
    }
    slot.refill();
    ProduceOutcome::Continue
  }
}

impl<K, O, A> OutletHandler<O> for ReducerCore<K, O, A>
where
  K: Ord + Clone + 'static,
  O: 'static,
  A: 'static,
{
  fn on_started(&self, outlet: &Outlet<O>) {
    self.state.borrow_mut().started = true;
    outlet.produce();
  }

  fn do_produce(&self, outlet: &Outlet<O>) -> Result<ProduceOutcome, StreamError> {
    self.stepping.set(true);
    let outcome = self.step(outlet);
    self.stepping.set(false);
    Ok(outcome)
  }

  fn on_resumed(&self, outlet: &Outlet<O>) {
    outlet.resume_produce();
  }

  fn on_closed(&self, _outlet: &Outlet<O>) {
    tracing::debug!("reducer output closed, closing inputs");
    for slot in self.slots() {
      slot.close();
    }
  }

  fn on_closed_with_error(&self, _outlet: &Outlet<O>, error: &StreamError) {
    for slot in self.slots() {
      slot.close_with_error(error.clone());
    }
  }
}
