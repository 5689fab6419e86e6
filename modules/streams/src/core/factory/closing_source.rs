use crate::core::{
  StreamError,
  stage::{Outlet, OutletHandler, StreamProducer},
};

/// Terminates its outlet as soon as it starts.
pub(crate) struct ClosingSource {
  error: Option<StreamError>,
}

impl ClosingSource {
  pub(crate) const fn end_of_stream() -> Self {
    Self { error: None }
  }

  pub(crate) const fn with_error(error: StreamError) -> Self {
    Self { error: Some(error) }
  }
}

impl<T: 'static> OutletHandler<T> for ClosingSource {
  fn on_started(&self, outlet: &Outlet<T>) {
    match &self.error {
      | Some(error) => outlet.close_with_error(error.clone()),
      | None => outlet.send_end_of_stream(),
    }
  }
}
