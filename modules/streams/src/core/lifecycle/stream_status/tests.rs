use super::StreamStatus;

const ALL: [StreamStatus; 5] = [
  StreamStatus::Ready,
  StreamStatus::Suspended,
  StreamStatus::EndOfStream,
  StreamStatus::Closed,
  StreamStatus::ClosedWithError,
];

#[test]
fn ordinal_comparison_detects_termination() {
  assert!(StreamStatus::Suspended < StreamStatus::EndOfStream);
  assert!(StreamStatus::ClosedWithError >= StreamStatus::EndOfStream);
  for status in ALL {
    assert_eq!(status.is_terminal(), status >= StreamStatus::EndOfStream);
  }
}

#[test]
fn final_statuses_accept_no_transition() {
  for next in ALL {
    assert!(!StreamStatus::Closed.can_transition_to(next));
    assert!(!StreamStatus::ClosedWithError.can_transition_to(next));
  }
}

#[test]
fn transitions_never_decrease() {
  for from in ALL {
    for to in ALL {
      if from.can_transition_to(to) && from.is_terminal() {
        assert!(to > from);
      }
    }
  }
  assert!(StreamStatus::Suspended.can_transition_to(StreamStatus::Ready));
  assert!(StreamStatus::EndOfStream.can_transition_to(StreamStatus::Closed));
  assert!(!StreamStatus::EndOfStream.can_transition_to(StreamStatus::ClosedWithError));
}

#[test]
fn display_is_kebab_case() {
  assert_eq!(StreamStatus::ClosedWithError.to_string(), "closed-with-error");
  assert_eq!(StreamStatus::EndOfStream.to_string(), "end-of-stream");
}

#[test]
fn transition_returns_the_previous_status() {
  let mut status = StreamStatus::Ready;
  assert_eq!(status.transition(StreamStatus::Suspended), StreamStatus::Ready);
  assert_eq!(status.transition(StreamStatus::EndOfStream), StreamStatus::Suspended);
  assert_eq!(status.transition(StreamStatus::Closed), StreamStatus::EndOfStream);
  assert_eq!(status, StreamStatus::Closed);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "invalid status transition")]
fn transition_out_of_a_final_status_panics() {
  let mut status = StreamStatus::ClosedWithError;
  status.transition(StreamStatus::Ready);
}
