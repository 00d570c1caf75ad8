use std::{fmt, future::Future, time::Duration};

/// Without a runtime there is no timer, so every `timeout` expires at once
/// and the future is never polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutError;

pub async fn timeout<F, T>(_: Duration, f: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    drop(f);
    Err(TimeoutError)
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Timeout: please enable a runtime")
    }
}

impl std::error::Error for TimeoutError {}
