//! Opaque wrapper for errors raised outside the stream core.

use alloc::rc::Rc;
use core::{error::Error, fmt};

/// Foreign error shared between every endpoint it propagates to.
///
/// Equality is identity: two wrappers are equal only when they carry the same error instance.
#[derive(Clone)]
pub struct SharedError {
  inner: Rc<dyn Error>,
}

impl SharedError {
  /// Wraps the provided error.
  #[must_use]
  pub fn new<E>(error: E) -> Self
  where
    E: Error + 'static, {
    Self { inner: Rc::new(error) }
  }

  /// Returns the wrapped error.
  #[must_use]
  pub fn get(&self) -> &(dyn Error + 'static) {
    &*self.inner
  }
}

impl fmt::Debug for SharedError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("SharedError").field(&self.inner).finish()
  }
}

impl fmt::Display for SharedError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&*self.inner, f)
  }
}

impl PartialEq for SharedError {
  fn eq(&self, other: &Self) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(&self.inner), Rc::as_ptr(&other.inner))
  }
}

impl Eq for SharedError {}
