use alloc::{boxed::Box, rc::Rc, vec::Vec};
use core::cell::RefCell;

use super::ListAction;
use crate::core::stage::{Inlet, InletHandler, StreamConsumer};

type Policy<T> = Box<dyn FnMut(&T) -> ListAction>;

/// Stores every item and applies the per-item policy afterwards.
pub(crate) struct ListSink<T> {
  items:  Rc<RefCell<Vec<T>>>,
  policy: RefCell<Policy<T>>,
}

impl<T> ListSink<T> {
  pub(crate) fn new<F>(items: Rc<RefCell<Vec<T>>>, policy: F) -> Self
  where
    F: FnMut(&T) -> ListAction + 'static, {
    Self { items, policy: RefCell::new(Box::new(policy)) }
  }
}

impl<T: 'static> InletHandler<T> for ListSink<T> {
  fn on_data(&self, inlet: &Inlet<T>, item: T) {
    let action = {
      let mut policy = self.policy.borrow_mut();
      (*policy)(&item)
    };
    self.items.borrow_mut().push(item);
    match action {
      | ListAction::Continue => {},
      | ListAction::Suspend => {
        inlet.suspend_upstream();
        if let Some(shared) = inlet.shared() {
          inlet.eventloop().post(move || shared.resume_upstream());
        }
      },
      | ListAction::EndOfStream => inlet.on_end_of_stream(),
      | ListAction::Fail(error) => inlet.on_error(error),
    }
  }
}
