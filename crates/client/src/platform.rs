//! Task spawning and sleeping that work on both the web and desktop builds.
//!
//! Transport callbacks and timers run outside any component scope, so they
//! use the platform executor (`spawn_local` / `tokio::spawn`) rather than
//! Dioxus `spawn`.

use std::future::Future;
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable};

/// Aborts the task when dropped.
#[derive(Debug)]
pub struct TaskHandle(AbortHandle);

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_abortable<F>(future: F) -> TaskHandle
where
    F: Future<Output = ()> + 'static,
{
    let (handle, registration) = AbortHandle::new_pair();
    wasm_bindgen_futures::spawn_local(async move {
        let _ = Abortable::new(future, registration).await;
    });
    TaskHandle(handle)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_abortable<F>(future: F) -> TaskHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    let (handle, registration) = AbortHandle::new_pair();
    tokio::spawn(async move {
        let _ = Abortable::new(future, registration).await;
    });
    TaskHandle(handle)
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
