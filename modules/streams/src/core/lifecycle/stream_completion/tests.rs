use super::StreamCompletion;
use crate::core::{StreamError, lifecycle::Completion};

#[test]
fn completion_starts_pending() {
  let completion = StreamCompletion::<u32>::new();
  assert_eq!(completion.poll(), Completion::Pending);
  assert!(!completion.is_ready());
}

#[test]
fn first_result_wins() {
  let completion: StreamCompletion<u32> = StreamCompletion::new();
  completion.complete(Ok(7));
  completion.complete(Err(StreamError::Cancelled));
  assert_eq!(completion.poll(), Completion::Ready(Ok(7)));
}

#[test]
fn try_take_consumes_result() {
  let completion: StreamCompletion<u32> = StreamCompletion::new();
  completion.complete(Err(StreamError::Timeout));
  assert_eq!(completion.try_take(), Some(Err(StreamError::Timeout)));
  assert_eq!(completion.poll().into_result(), None);
}

#[test]
fn taken_result_still_blocks_later_resolutions() {
  let completion: StreamCompletion<u32> = StreamCompletion::new();
  completion.complete(Ok(1));
  assert_eq!(completion.try_take(), Some(Ok(1)));
  completion.complete(Ok(2));
  assert_eq!(completion.poll(), Completion::Pending);
  assert_eq!(completion.try_take(), None);
}
