use crate::core::{
  StreamError,
  stage::{Inlet, InletHandler},
};

/// Closes whatever producer binds to its inlet.
pub(crate) struct ClosingSink {
  error: Option<StreamError>,
}

impl ClosingSink {
  pub(crate) const fn closed() -> Self {
    Self { error: None }
  }

  pub(crate) const fn with_error(error: StreamError) -> Self {
    Self { error: Some(error) }
  }
}

impl<T: 'static> InletHandler<T> for ClosingSink {
  fn on_upstream_bound(&self, inlet: &Inlet<T>) {
    match &self.error {
      | Some(error) => inlet.close_upstream_with_error(error.clone()),
      | None => inlet.close_upstream(),
    }
  }

  fn on_data(&self, _inlet: &Inlet<T>, _item: T) {
    tracing::warn!("item reached a closing consumer");
  }
}
