use alloc::{
  boxed::Box,
  rc::{Rc, Weak},
};
use core::cell::RefCell;

use super::ClosingSource;
use crate::core::{
  Eventloop, StreamError,
  decorator::{ProducerDecorator, ProducerSwitcher},
  lifecycle::ResultCallback,
  stage::{Outlet, ProducerRef, TransformerLogic},
};

type SegmentFetch<T> = Box<dyn FnMut(ResultCallback<Option<ProducerRef<T>>>)>;

/// Streams a sequence of producers one after another through a switcher.
///
/// Segments are fetched one at a time through a callback, so the next segment may arrive
/// asynchronously. Each segment is decorated so that its end-of-stream fetches the next segment
/// instead of ending the concatenation. `None` ends the concatenation and a fetch error fails it.
pub(crate) struct ConcatSource<T> {
  this:      Weak<ConcatSource<T>>,
  eventloop: Eventloop,
  switcher:  ProducerSwitcher<T>,
  fetch:     RefCell<SegmentFetch<T>>,
}

impl<T: 'static> ConcatSource<T> {
  pub(crate) fn start<I>(eventloop: &Eventloop, segments: I) -> Rc<Outlet<T>>
  where
    I: IntoIterator<Item = ProducerRef<T>>,
    I::IntoIter: 'static, {
    let mut segments = segments.into_iter();
    Self::start_fetching(eventloop, move |callback: ResultCallback<Option<ProducerRef<T>>>| {
      callback(Ok(segments.next()));
    })
  }

  pub(crate) fn start_fetching<F>(eventloop: &Eventloop, fetch: F) -> Rc<Outlet<T>>
  where
    F: FnMut(ResultCallback<Option<ProducerRef<T>>>) + 'static, {
    let source = Rc::new_cyclic(|this| Self {
      this:      this.clone(),
      eventloop: eventloop.clone(),
      switcher:  ProducerSwitcher::new(eventloop),
      fetch:     RefCell::new(Box::new(fetch)),
    });
    source.next_segment();
    source.switcher.producer()
  }

  fn next_segment(&self) {
    let Some(this) = self.this.upgrade() else {
      return;
    };
    let callback: ResultCallback<Option<ProducerRef<T>>> = Box::new(move |result| this.on_segment(result));
    let mut fetch = self.fetch.borrow_mut();
    (*fetch)(callback);
  }

  fn on_segment(self: Rc<Self>, result: Result<Option<ProducerRef<T>>, StreamError>) {
    let next: ProducerRef<T> = match result {
      | Ok(Some(segment)) => {
        tracing::trace!("concatenation moves to the next segment");
        let decorator = ProducerDecorator::with_logic(&self.eventloop, segment, SegmentEnd { source: self.clone() });
        decorator.producer()
      },
      | Ok(None) => Outlet::<T>::with_handler(&self.eventloop, 0, Rc::new(ClosingSource::end_of_stream())),
      | Err(error) => {
        tracing::debug!(%error, "fetching the next segment failed");
        Outlet::<T>::with_handler(&self.eventloop, 0, Rc::new(ClosingSource::with_error(error)))
      },
    };
    self.switcher.switch_to(next);
  }
}

struct SegmentEnd<T> {
  source: Rc<ConcatSource<T>>,
}

impl<T: 'static> TransformerLogic<T, T> for SegmentEnd<T> {
  fn on_data(&self, output: &Outlet<T>, item: T) {
    output.send(item);
  }

  fn on_end_of_stream(&self, _output: &Outlet<T>) {
    let source = self.source.clone();
    self.source.eventloop.post(move || source.next_segment());
  }
}
