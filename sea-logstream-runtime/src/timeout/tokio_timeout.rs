use futures::future::Future;
use std::time::Duration;
pub use tokio::time::error::Elapsed as TimeoutError;

/// Await `f`, giving up after `dur`. The inner future is dropped on expiry.
pub async fn timeout<F, T>(dur: Duration, f: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(dur, f).await
}
