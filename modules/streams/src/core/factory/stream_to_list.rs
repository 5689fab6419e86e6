//! Collecting consumer handle.

use alloc::{rc::Rc, vec::Vec};
use core::cell::RefCell;

use super::{ListAction, ListSink};
use crate::core::{
  Eventloop,
  lifecycle::{CompletionCallback, StreamCompletion, StreamStatus},
  stage::{Inlet, StreamConsumer},
};


/// Consumer that collects every item it receives.
///
/// The collected items stay readable through [`StreamToList::list`] after a failure, and
/// [`StreamToList::completion`] resolves with the full list once the stream ended normally.
pub struct StreamToList<T> {
  inlet:      Rc<Inlet<T>>,
  items:      Rc<RefCell<Vec<T>>>,
  completion: StreamCompletion<Vec<T>>,
}

impl<T: Clone + 'static> StreamToList<T> {
  pub(crate) fn new<F>(eventloop: &Eventloop, policy: F) -> Self
  where
    F: FnMut(&T) -> ListAction + 'static, {
    let items = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::new(ListSink::new(items.clone(), policy));
    let inlet = Inlet::<T>::with_handler(eventloop, 0, sink);
    let completion = StreamCompletion::new();
    let (collected, result) = (items.clone(), completion.clone());
    inlet.add_completion_callback(CompletionCallback::new(move |outcome| {
      result.complete(outcome.map(|()| collected.borrow().clone()));
    }));
    Self { inlet, items, completion }
  }

  /// Returns the consumer to bind a producer to.
  #[must_use]
  pub fn consumer(&self) -> Rc<Inlet<T>> {
    self.inlet.clone()
  }

  /// Returns a snapshot of the items received so far.
  #[must_use]
  pub fn list(&self) -> Vec<T> {
    self.items.borrow().clone()
  }

  /// Returns the handle resolved when the consumer terminates.
  #[must_use]
  pub fn completion(&self) -> StreamCompletion<Vec<T>> {
    self.completion.clone()
  }

  /// Returns the consumer status.
  #[must_use]
  pub fn status(&self) -> StreamStatus {
    self.inlet.status()
  }
}
