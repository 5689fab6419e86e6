//! Single-input reducer over runs of equal keys.

use alloc::rc::Rc;
use core::{cell::RefCell, marker::PhantomData};

use super::Reducer;
use crate::core::{
  Eventloop,
  stage::{Inlet, Outlet, StreamProducer, StreamTransformer, TransformerLogic},
};


/// Folds consecutive items sharing a key and completes the key when it changes.
///
/// The input is expected to be grouped by key; a key that reappears later starts a new group.
pub struct StreamReducerSimple<I, O> {
  transformer: StreamTransformer<I, O>,
}

struct RunLogic<K, I, A, F, R> {
  key_fn:  F,
  reducer: R,
  current: RefCell<Option<(K, A)>>,
  _input:  PhantomData<fn(I)>,
}

impl<I: 'static, O: 'static> StreamReducerSimple<I, O> {
  /// Creates the reducer.
  #[must_use]
  pub fn new<K, A, F, R>(eventloop: &Eventloop, key_fn: F, reducer: R) -> Self
  where
    K: PartialEq + 'static,
    A: 'static,
    F: Fn(&I) -> K + 'static,
    R: Reducer<K, I, O, A> + 'static, {
    let logic = RunLogic { key_fn, reducer, current: RefCell::new(None), _input: PhantomData };
    Self { transformer: StreamTransformer::new(eventloop, logic) }
  }

  /// Returns the consumer side.
  #[must_use]
  pub fn input(&self) -> Rc<Inlet<I>> {
    self.transformer.input()
  }

  /// Returns the producer side.
  #[must_use]
  pub fn output(&self) -> Rc<Outlet<O>> {
    self.transformer.output()
  }
}

impl<K, I, O, A, F, R> TransformerLogic<I, O> for RunLogic<K, I, A, F, R>
where
  K: PartialEq,
  O: 'static,
  F: Fn(&I) -> K,
  R: Reducer<K, I, O, A>,
{
  fn on_data(&self, output: &Outlet<O>, item: I) {
    let key = (self.key_fn)(&item);
    let current = self.current.borrow_mut().take();
    let next = match current {
      | Some((current_key, mut accumulator)) if current_key == key => {
        self.reducer.on_next_item(output, &key, item, &mut accumulator);
        (key, accumulator)
      },
      | previous => {
        if let Some((previous_key, accumulator)) = previous {
          self.reducer.on_complete(output, previous_key, accumulator);
        }
        if !output.status().is_active() {
          return;
        }
        let accumulator = self.reducer.on_first_item(output, &key, item);
        (key, accumulator)
      },
    };
    *self.current.borrow_mut() = Some(next);
  }

  fn on_end_of_stream(&self, output: &Outlet<O>) {
    let current = self.current.borrow_mut().take();
    if let Some((key, accumulator)) = current {
      self.reducer.on_complete(output, key, accumulator);
    }
    output.send_end_of_stream();
  }
}
