use alloc::boxed::Box;

use crate::core::StreamError;

/// One-shot delivery of a value or the error that prevented it.
pub type ResultCallback<T> = Box<dyn FnOnce(Result<T, StreamError>)>;
