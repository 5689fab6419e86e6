//! Sorted left-outer merge join.

use alloc::{
  boxed::Box,
  collections::VecDeque,
  rc::{Rc, Weak},
};
use core::{
  cell::{Cell, RefCell},
  cmp::Ordering,
};

use super::ValueJoiner;
use crate::core::{
  Eventloop, StreamError,
  lifecycle::StreamStatus,
  stage::{Inlet, InletHandler, Outlet, OutletHandler, ProduceOutcome, StreamConsumer, StreamProducer},
};


const BUFFER_SIZE: usize = 256;

/// Joins two inputs sorted ascending by key.
///
/// Every left item produces at most one row: [`ValueJoiner::inner_join`] against the current right
/// item with an equal key, or [`ValueJoiner::left_join`] when there is none. Right items are kept
/// while left items share their key and dropped once the left side moved past them; right-only keys
/// produce nothing. The output ends as soon as the left side is drained, which also closes the right
/// input. An error on any side fails the output and both inputs.
pub struct StreamJoin<K, L, R, V> {
  left:   Rc<Inlet<L>>,
  right:  Rc<Inlet<R>>,
  output: Rc<Outlet<V>>,
  core:   Rc<JoinCore<K, L, R, V>>,
}

struct JoinState<K, L, R> {
  left:        VecDeque<(K, L)>,
  right:       VecDeque<(K, R)>,
  left_ended:  bool,
  right_ended: bool,
}

struct JoinCore<K, L, R, V> {
  left:       Weak<Inlet<L>>,
  right:      Weak<Inlet<R>>,
  output:     Weak<Outlet<V>>,
  left_key:   Box<dyn Fn(&L) -> K>,
  right_key:  Box<dyn Fn(&R) -> K>,
  comparator: Box<dyn Fn(&K, &K) -> Ordering>,
  joiner:     Box<dyn ValueJoiner<K, L, R, V>>,
  state:      RefCell<JoinState<K, L, R>>,
  started:    Cell<bool>,
  stepping:   Cell<bool>,
}

struct LeftSide<K, L, R, V>(Weak<JoinCore<K, L, R, V>>);

struct RightSide<K, L, R, V>(Weak<JoinCore<K, L, R, V>>);

enum JoinStep<K, L> {
  Wait,
  Drained,
  Inner(K, L),
  LeftOnly(K, L),
  Skipped,
}

impl<K, L, R, V> StreamJoin<K, L, R, V>
where
  K: 'static,
  L: 'static,
  R: 'static,
  V: 'static,
{
  /// Creates a join ordering keys by [`Ord`].
  #[must_use]
  pub fn new<FL, FR, J>(eventloop: &Eventloop, left_key: FL, right_key: FR, joiner: J) -> Self
  where
    K: Ord,
    FL: Fn(&L) -> K + 'static,
    FR: Fn(&R) -> K + 'static,
    J: ValueJoiner<K, L, R, V> + 'static, {
    Self::with_comparator(eventloop, K::cmp, left_key, right_key, joiner)
  }

  /// Creates a join ordering keys by `comparator`.
  #[must_use]
  pub fn with_comparator<C, FL, FR, J>(
    eventloop: &Eventloop,
    comparator: C,
    left_key: FL,
    right_key: FR,
    joiner: J,
  ) -> Self
  where
    C: Fn(&K, &K) -> Ordering + 'static,
    FL: Fn(&L) -> K + 'static,
    FR: Fn(&R) -> K + 'static,
    J: ValueJoiner<K, L, R, V> + 'static, {
    let left = Inlet::new(eventloop, 0);
    let right = Inlet::new(eventloop, 1);
    let output = Outlet::new(eventloop, 0);
    let core = Rc::new(JoinCore {
      left:       Rc::downgrade(&left),
      right:      Rc::downgrade(&right),
      output:     Rc::downgrade(&output),
      left_key:   Box::new(left_key),
      right_key:  Box::new(right_key),
      comparator: Box::new(comparator),
      joiner:     Box::new(joiner),
      state:      RefCell::new(JoinState {
        left:        VecDeque::new(),
        right:       VecDeque::new(),
        left_ended:  false,
        right_ended: false,
      }),
      started:    Cell::new(false),
      stepping:   Cell::new(false),
    });
    left.set_handler(Rc::new(LeftSide(Rc::downgrade(&core))));
    right.set_handler(Rc::new(RightSide(Rc::downgrade(&core))));
    output.set_handler(core.clone());
    Self { left, right, output, core }
  }

  /// Returns the left input.
  #[must_use]
  pub fn left(&self) -> Rc<Inlet<L>> {
    self.left.clone()
  }

  /// Returns the right input.
  #[must_use]
  pub fn right(&self) -> Rc<Inlet<R>> {
    self.right.clone()
  }

  /// Returns the joined output.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<V>> {
    self.output.clone()
  }

  /// Returns the number of buffered left and right items.
  #[must_use]
  pub fn buffered(&self) -> (usize, usize) {
    let state = self.core.state.borrow();
    (state.left.len(), state.right.len())
  }
}

impl<K, L, R, V> JoinCore<K, L, R, V>
where
  K: 'static,
  L: 'static,
  R: 'static,
  V: 'static,
{
  fn pump(&self) {
    if self.stepping.get() {
      return;
    }
    if let Some(output) = self.output.upgrade() {
      output.produce();
    }
  }

  fn fail(&self, error: &StreamError) {
    if let Some(output) = self.output.upgrade() {
      output.close_with_error(error.clone());
    }
  }

  fn next_step(&self) -> JoinStep<K, L> {
    let mut state = self.state.borrow_mut();
    let ordering = match (state.left.front(), state.right.front()) {
      | (Some((left_key, _)), Some((right_key, _))) => Some((self.comparator)(left_key, right_key)),
      | (Some(_), None) if state.right_ended => None,
      | (Some(_), None) => return JoinStep::Wait,
      | (None, _) if state.left_ended => return JoinStep::Drained,
      | (None, _) => return JoinStep::Wait,
    };
    match ordering {
      | Some(Ordering::Greater) => {
        state.right.pop_front();
        JoinStep::Skipped
      },
      | Some(Ordering::Equal) => match state.left.pop_front() {
        | Some((key, item)) => JoinStep::Inner(key, item),
        | None => JoinStep::Wait,
      },
      | Some(Ordering::Less) | None => match state.left.pop_front() {
        | Some((key, item)) => JoinStep::LeftOnly(key, item),
        | None => JoinStep::Wait,
      },
    }
  }

  fn refill(&self) {
    let (left_len, right_len) = {
      let state = self.state.borrow();
      (state.left.len(), state.right.len())
    };
    if let Some(left) =
      self.left.upgrade().filter(|left| left.status() == StreamStatus::Suspended && left_len <= BUFFER_SIZE / 2)
    {
      left.resume_upstream();
    }
    if let Some(right) =
      self.right.upgrade().filter(|right| right.status() == StreamStatus::Suspended && right_len <= BUFFER_SIZE / 2)
    {
      right.resume_upstream();
    }
  }

  fn step(&self, output: &Outlet<V>) -> ProduceOutcome {
    if !self.started.get() {
      return ProduceOutcome::Yield;
    }
    let row = match self.next_step() {
      | JoinStep::Wait => return ProduceOutcome::Yield,
      | JoinStep::Drained => {
        if let Some(right) = self.right.upgrade() {
          right.close_upstream();
        }
        self.state.borrow_mut().right.clear();
        return ProduceOutcome::Exhausted;
      },
      | JoinStep::Skipped => None,
      | JoinStep::Inner(key, item) => {
        let state = self.state.borrow();
        match state.right.front() {
          | Some((_, right)) => self.joiner.inner_join(&key, item, right),
          | None => self.joiner.left_join(&key, item),
        }
      },
      | JoinStep::LeftOnly(key, item) => self.joiner.left_join(&key, item),
    };
    if let Some(row) = row {
      output.send(row);
    }
    self.refill();
    ProduceOutcome::Continue
  }
}

impl<K, L, R, V> InletHandler<L> for LeftSide<K, L, R, V>
where
  K: 'static,
  L: 'static,
  R: 'static,
  V: 'static,
{
  fn on_data(&self, inlet: &Inlet<L>, item: L) {
    let Some(core) = self.0.upgrade() else {
      return;
    };
    let key = (core.left_key)(&item);
    let buffered = {
      let mut state = core.state.borrow_mut();
      state.left.push_back((key, item));
      state.left.len()
    };
    if buffered >= BUFFER_SIZE {
      inlet.suspend_upstream();
    }
    core.pump();
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<L>) {
    if let Some(core) = self.0.upgrade() {
      core.state.borrow_mut().left_ended = true;
      core.pump();
    }
  }

  fn on_error(&self, _inlet: &Inlet<L>, error: &StreamError) {
    if let Some(core) = self.0.upgrade() {
      core.fail(error);
    }
  }
}

impl<K, L, R, V> InletHandler<R> for RightSide<K, L, R, V>
where
  K: 'static,
  L: 'static,
  R: 'static,
  V: 'static,
{
  fn on_data(&self, inlet: &Inlet<R>, item: R) {
    let Some(core) = self.0.upgrade() else {
      return;
    };
    let key = (core.right_key)(&item);
    let buffered = {
      let mut state = core.state.borrow_mut();
      state.right.push_back((key, item));
      state.right.len()
    };
    if buffered >= BUFFER_SIZE {
      inlet.suspend_upstream();
    }
    core.pump();
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<R>) {
    if let Some(core) = self.0.upgrade() {
      core.state.borrow_mut().right_ended = true;
      core.pump();
    }
  }

  fn on_error(&self, _inlet: &Inlet<R>, error: &StreamError) {
    if let Some(core) = self.0.upgrade() {
      core.fail(error);
    }
  }
}

impl<K, L, R, V> OutletHandler<V> for JoinCore<K, L, R, V>
where
  K: 'static,
  L: 'static,
  R: 'static,
  V: 'static,
{
  fn on_started(&self, outlet: &Outlet<V>) {
    self.started.set(true);
    outlet.produce();
  }

  fn do_produce(&self, outlet: &Outlet<V>) -> Result<ProduceOutcome, StreamError> {
    self.stepping.set(true);
    let outcome = self.step(outlet);
    self.stepping.set(false);
    Ok(outcome)
  }

  fn on_resumed(&self, outlet: &Outlet<V>) {
    outlet.resume_produce();
  }

  fn on_closed(&self, _outlet: &Outlet<V>) {
    tracing::debug!("join output closed, closing both inputs");
    if let Some(left) = self.left.upgrade() {
      left.close_upstream();
    }
    if let Some(right) = self.right.upgrade() {
      right.close_upstream();
    }
  }

  fn on_closed_with_error(&self, _outlet: &Outlet<V>, error: &StreamError) {
    if let Some(left) = self.left.upgrade() {
      left.close_upstream_with_error(error.clone());
    }
    if let Some(right) = self.right.upgrade() {
      right.close_upstream_with_error(error.clone());
    }
  }
}
