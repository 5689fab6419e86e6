//! Factory functions for canned consumers.

use alloc::rc::Rc;

use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::{ClosingSink, ListAction, RotatingConsumer, StreamToList};
use crate::core::{
  Eventloop, StreamError,
  stage::{ConsumerRef, Inlet},
};


/// Namespace for consumer constructors.
pub struct StreamConsumers;

impl StreamConsumers {
  /// Consumer that discards items and acknowledges end-of-stream.
  #[must_use]
  pub fn idle<T: 'static>(eventloop: &Eventloop) -> ConsumerRef<T> {
    Inlet::<T>::new(eventloop, 0)
  }

  /// Consumer that closes its upstream as soon as one is bound.
  #[must_use]
  pub fn closing<T: 'static>(eventloop: &Eventloop) -> ConsumerRef<T> {
    Inlet::<T>::with_handler(eventloop, 0, Rc::new(ClosingSink::closed()))
  }

  /// Consumer that closes its upstream with `error` as soon as one is bound.
  #[must_use]
  pub fn closing_with_error<T: 'static>(eventloop: &Eventloop, error: StreamError) -> ConsumerRef<T> {
    Inlet::<T>::with_handler(eventloop, 0, Rc::new(ClosingSink::with_error(error)))
  }

  /// Collects every item without applying backpressure.
  #[must_use]
  pub fn to_list<T: Clone + 'static>(eventloop: &Eventloop) -> StreamToList<T> {
    StreamToList::new(eventloop, |_| ListAction::Continue)
  }

  /// Collects items, suspending the upstream after each one until the next loop turn.
  #[must_use]
  pub fn to_list_one_by_one<T: Clone + 'static>(eventloop: &Eventloop) -> StreamToList<T> {
    StreamToList::new(eventloop, |_| ListAction::Suspend)
  }

  /// Collects items, suspending after roughly every other item as decided by a seeded generator.
  #[must_use]
  pub fn to_list_randomly_suspending<T: Clone + 'static>(eventloop: &Eventloop, seed: u64) -> StreamToList<T> {
    let mut rng = SmallRng::seed_from_u64(seed);
    StreamToList::new(eventloop, move |_| if rng.gen_bool(0.5) { ListAction::Suspend } else { ListAction::Continue })
  }

  /// Collects items and applies `action` to each one after storing it.
  #[must_use]
  pub fn to_list_with<T, F>(eventloop: &Eventloop, action: F) -> StreamToList<T>
  where
    T: Clone + 'static,
    F: FnMut(&T) -> ListAction + 'static, {
    StreamToList::new(eventloop, action)
  }

  /// Consumer that starts a new chunk consumer every `chunk_size` items.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when `chunk_size` is zero.
  pub fn rotating<T, F>(
    eventloop: &Eventloop,
    chunk_size: usize,
    factory: F,
  ) -> Result<RotatingConsumer<T>, StreamError>
  where
    T: 'static,
    F: FnMut(usize) -> ConsumerRef<T> + 'static, {
    RotatingConsumer::new(eventloop, chunk_size, factory)
  }
}
