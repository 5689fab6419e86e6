//! Endpoint status state machine.

use core::fmt;

#[cfg(test)]
mod tests;

/// Lifecycle status shared by producers and consumers.
///
/// Variants are ordered: an endpoint's status never decreases. `Ready` and `Suspended` may
/// alternate; everything from `EndOfStream` on is terminal. `EndOfStream` is acknowledged by the
/// consumer, which moves the producer to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StreamStatus {
  /// Items may flow.
  Ready,
  /// The consumer asked the producer to pause.
  Suspended,
  /// The producer sent its last item.
  EndOfStream,
  /// The link was closed without an error.
  Closed,
  /// The link was closed with an error.
  ClosedWithError,
}

impl StreamStatus {
  /// Returns `true` for `Ready` and `Suspended`.
  #[must_use]
  pub const fn is_active(self) -> bool {
    matches!(self, Self::Ready | Self::Suspended)
  }

  /// Returns `true` once the endpoint has terminated or is terminating.
  #[must_use]
  pub const fn is_terminal(self) -> bool {
    !self.is_active()
  }

  /// Returns `true` for `Closed` and `ClosedWithError`.
  #[must_use]
  pub const fn is_final(self) -> bool {
    matches!(self, Self::Closed | Self::ClosedWithError)
  }

  /// Returns `true` when the status may move to `next`.
  #[must_use]
  pub const fn can_transition_to(self, next: Self) -> bool {
    match (self, next) {
      | (Self::Ready, Self::Suspended) | (Self::Suspended, Self::Ready) => true,
      | (Self::Ready | Self::Suspended, Self::EndOfStream | Self::Closed | Self::ClosedWithError) => true,
      | (Self::EndOfStream, Self::Closed) => true,
      | _ => false,
    }
  }

  /// Moves to `next` and returns the previous status.
  ///
  /// # Panics
  ///
  /// Panics in debug builds when `next` is not reachable from the current status.
  pub fn transition(&mut self, next: Self) -> Self {
    debug_assert!(self.can_transition_to(next), "invalid status transition {self} -> {next}");
    core::mem::replace(self, next)
  }
}

impl fmt::Display for StreamStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      | Self::Ready => "ready",
      | Self::Suspended => "suspended",
      | Self::EndOfStream => "end-of-stream",
      | Self::Closed => "closed",
      | Self::ClosedWithError => "closed-with-error",
    };
    f.write_str(label)
  }
}
