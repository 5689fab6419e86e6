use crate::core::stage::{Outlet, TransformerLogic};

/// Logic forwarding every item unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl<T: 'static> TransformerLogic<T, T> for PassThrough {
  fn on_data(&self, output: &Outlet<T>, item: T) {
    output.send(item);
  }
}
