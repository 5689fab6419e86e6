//! Stateless one-input, one-output transformer.

use alloc::rc::{Rc, Weak};

use super::{Inlet, InletHandler, Outlet, OutletHandler, StreamProducer, TransformerLogic};
use crate::core::{Eventloop, StreamError};


/// Pass-through stage whose items and end-of-stream go through a [`TransformerLogic`].
///
/// Suspension, resumption and closing requested on the output are relayed to the input's
/// upstream; errors travel both ways. The input holds its upstream suspended until the output has
/// been bound and started, so a producer wired first cannot push into an unbound output.
pub struct StreamTransformer<I, O> {
  input:  Rc<Inlet<I>>,
  output: Rc<Outlet<O>>,
}

impl<I: 'static, O: 'static> StreamTransformer<I, O> {
  /// Creates the transformer around `logic`.
  #[must_use]
  pub fn new<L>(eventloop: &Eventloop, logic: L) -> Self
  where
    L: TransformerLogic<I, O> + 'static, {
    let input = Inlet::new(eventloop, 0);
    let output = Outlet::new(eventloop, 0);
    let bridge = Rc::new(TransformerBridge { input: Rc::downgrade(&input), output: Rc::downgrade(&output), logic });
    input.set_handler(bridge.clone());
    output.set_handler(bridge);
    input.suspend_upstream();
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

struct TransformerBridge<I, O, L> {
  input:  Weak<Inlet<I>>,
  output: Weak<Outlet<O>>,
  logic:  L,
}

impl<I, O, L> InletHandler<I> for TransformerBridge<I, O, L>
where
  I: 'static,
  O: 'static,
  L: TransformerLogic<I, O>,
{
  fn on_data(&self, _inlet: &Inlet<I>, item: I) {
    if let Some(output) = self.output.upgrade() {
      self.logic.on_data(&output, item);
    }
  }

  fn on_end_of_stream(&self, _inlet: &Inlet<I>) {
    if let Some(output) = self.output.upgrade() {
      self.logic.on_end_of_stream(&output);
    }
  }

  fn on_error(&self, _inlet: &Inlet<I>, error: &StreamError) {
    if let Some(output) = self.output.upgrade() {
      output.close_with_error(error.clone());
    }
  }
}

impl<I, O, L> OutletHandler<O> for TransformerBridge<I, O, L>
where
  I: 'static,
  O: 'static,
  L: TransformerLogic<I, O>,
{
  fn on_started(&self, outlet: &Outlet<O>) {
    if let Some(input) = self.input.upgrade().filter(|_| outlet.is_ready()) {
      input.resume_upstream();
    }
  }

  fn on_suspended(&self, _outlet: &Outlet<O>) {
    if let Some(input) = self.input.upgrade() {
      input.suspend_upstream();
    }
  }

  fn on_resumed(&self, _outlet: &Outlet<O>) {
    if let Some(input) = self.input.upgrade() {
      input.resume_upstream();
    }
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
