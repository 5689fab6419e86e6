use core::cell::RefCell;

use crate::core::{
  StreamError,
  stage::{Outlet, OutletHandler, ProduceOutcome},
};

/// Pushes the items of an iterator, stopping whenever the outlet is suspended.
pub(crate) struct IterSource<I> {
  items: RefCell<I>,
}

impl<I> IterSource<I> {
  pub(crate) const fn new(items: I) -> Self {
    Self { items: RefCell::new(items) }
  }
}

impl<T, I> OutletHandler<T> for IterSource<I>
where
  T: 'static,
  I: Iterator<Item = T>,
{
  fn on_started(&self, outlet: &Outlet<T>) {
    outlet.produce();
  }

  fn do_produce(&self, outlet: &Outlet<T>) -> Result<ProduceOutcome, StreamError> {
    let next = self.items.borrow_mut().next();
    match next {
      | Some(item) => {
        outlet.send(item);
        Ok(ProduceOutcome::Continue)
      },
      | None => Ok(ProduceOutcome::Exhausted),
    }
  }

  fn on_resumed(&self, outlet: &Outlet<T>) {
    outlet.resume_produce();
  }
}
