//! Factory functions for canned producers.

use alloc::{boxed::Box, rc::Rc};

use super::{ClosingSource, ConcatSource, IterSource};
use crate::core::{
  Eventloop, StreamError,
  decorator::StreamForwarder,
  lifecycle::ResultCallback,
  stage::{Outlet, ProducerRef},
};


/// Namespace for producer constructors.
pub struct StreamProducers;

impl StreamProducers {
  /// Producer that never sends anything and never terminates on its own.
  #[must_use]
  pub fn idle<T: 'static>(eventloop: &Eventloop) -> ProducerRef<T> {
    Outlet::<T>::new(eventloop, 0)
  }

  /// Producer that sends end-of-stream as soon as it starts.
  #[must_use]
  pub fn closing<T: 'static>(eventloop: &Eventloop) -> ProducerRef<T> {
    Outlet::<T>::with_handler(eventloop, 0, Rc::new(ClosingSource::end_of_stream()))
  }

  /// Producer that closes with `error` as soon as it starts.
  #[must_use]
  pub fn closing_with_error<T: 'static>(eventloop: &Eventloop, error: StreamError) -> ProducerRef<T> {
    Outlet::<T>::with_handler(eventloop, 0, Rc::new(ClosingSource::with_error(error)))
  }

  /// Producer that sends `value` followed by end-of-stream.
  #[must_use]
  pub fn of_value<T: 'static>(eventloop: &Eventloop, value: T) -> ProducerRef<T> {
    Self::of_iter(eventloop, core::iter::once(value))
  }

  /// Producer that sends every item of `items` followed by end-of-stream.
  ///
  /// Production pauses while the consumer keeps the producer suspended and continues on a later
  /// loop turn after it resumes.
  #[must_use]
  pub fn of_iter<T, I>(eventloop: &Eventloop, items: I) -> ProducerRef<T>
  where
    T: 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static, {
    Outlet::<T>::with_handler(eventloop, 0, Rc::new(IterSource::new(items.into_iter())))
  }

  /// Producer streaming `producers` one after another.
  ///
  /// End-of-stream of one segment moves on to the next; a segment that fails fails the whole
  /// concatenation.
  #[must_use]
  pub fn concat<T, I>(eventloop: &Eventloop, producers: I) -> ProducerRef<T>
  where
    T: 'static,
    I: IntoIterator<Item = ProducerRef<T>>,
    I::IntoIter: 'static, {
    ConcatSource::start(eventloop, producers)
  }

  /// Producer streaming segments obtained one at a time from `fetch`.
  ///
  /// `fetch` is asked for the first segment right away and again whenever the current segment ends.
  /// Its callback, which may run on a later loop turn, takes `Some(producer)` for the next segment,
  /// `None` to end the concatenation, or an error to fail it.
  #[must_use]
  pub fn concat_async<T, F>(eventloop: &Eventloop, fetch: F) -> ProducerRef<T>
  where
    T: 'static,
    F: FnMut(ResultCallback<Option<ProducerRef<T>>>) + 'static, {
    ConcatSource::start_fetching(eventloop, fetch)
  }

  /// Producer whose actual source is obtained asynchronously.
  ///
  /// `resolver` runs on the next loop turn and eventually hands the actual producer to its callback.
  /// A resolver failure closes the returned producer with that error.
  #[must_use]
  pub fn asynchronously_resolving<T, F>(eventloop: &Eventloop, resolver: F) -> ProducerRef<T>
  where
    T: 'static,
    F: FnOnce(ResultCallback<ProducerRef<T>>) + 'static, {
    let forwarder = StreamForwarder::new(eventloop);
    let consumer = forwarder.consumer();
    let loop_handle = eventloop.clone();
    eventloop.post(move || {
      resolver(Box::new(move |result: Result<ProducerRef<T>, StreamError>| {
        let actual = match result {
          | Ok(actual) => actual,
          | Err(error) => {
            tracing::debug!(%error, "producer resolution failed");
            Self::closing_with_error(&loop_handle, error)
          },
        };
        actual.stream_to(consumer);
      }));
    });
    forwarder.producer()
  }
}
