use super::Outlet;

/// Item-level behaviour of a [`StreamTransformer`](super::StreamTransformer).
pub trait TransformerLogic<I, O> {
  /// Handles one input item, emitting any number of outputs.
  fn on_data(&self, output: &Outlet<O>, item: I);

  /// Handles the end of the input. Forwards end-of-stream by default.
  fn on_end_of_stream(&self, output: &Outlet<O>)
  where
    O: 'static, {
    output.send_end_of_stream();
  }
}
