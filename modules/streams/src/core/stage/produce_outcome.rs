/// Result of one [`OutletHandler::do_produce`](super::OutletHandler::do_produce) step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProduceOutcome {
  /// An item was sent; the driver keeps going while the outlet is ready.
  Continue,
  /// Nothing to send right now; the handler resumes production itself.
  Yield,
  /// The source is exhausted; the driver sends end-of-stream.
  Exhausted,
}
