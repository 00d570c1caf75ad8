use futures::future::Future;

pub use tokio::task::{JoinError, JoinHandle as TaskHandle};

/// Spawn a task onto the tokio runtime. The handle resolves to `Result<T, JoinError>`.
pub fn spawn_task<F, T>(future: F) -> TaskHandle<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn(future)
}

/// Run a blocking closure on the tokio blocking pool.
pub fn spawn_blocking<F, T>(f: F) -> TaskHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
}
