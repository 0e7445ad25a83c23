//! Deferred Background Tasks
//!
//! Request-scoped fire-and-forget queue. Handlers enqueue work through the
//! [`BackgroundTasks`] extractor; the [`run_after_response`] middleware holds
//! the queue on the response body and spawns the queued work once the body
//! has been fully written (or dropped). Each task runs in its own tokio task
//! behind a panic-catching wrapper.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::{FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use http_body::{Body as HttpBody, Frame, SizeHint};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

struct QueuedTask {
    name: &'static str,
    future: BoxFuture<'static, ()>,
}

/// Handle used by request handlers to schedule work after the response.
#[derive(Clone)]
pub struct BackgroundTasks {
    tx: mpsc::UnboundedSender<QueuedTask>,
}

impl BackgroundTasks {
    /// Schedule `task` to run after the response has been sent.
    pub fn add<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let queued = QueuedTask {
            name,
            future: task.boxed(),
        };
        if self.tx.send(queued).is_err() {
            warn!(task = name, "Background task queue already drained, dropping task");
        }
    }
}

/// Receiving side of a request's task queue.
pub struct TaskQueue {
    rx: mpsc::UnboundedReceiver<QueuedTask>,
    runtime: Handle,
}

impl TaskQueue {
    /// Create a queue bound to the current tokio runtime.
    ///
    /// Must be called from within a runtime.
    pub fn channel() -> (BackgroundTasks, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let queue = Self {
            rx,
            runtime: Handle::current(),
        };
        (BackgroundTasks { tx }, queue)
    }

    /// Spawn every queued task. Returns how many were started.
    pub fn spawn_all(mut self) -> usize {
        let mut started = 0;
        while let Ok(task) = self.rx.try_recv() {
            spawn_isolated(&self.runtime, task.name, task.future);
            started += 1;
        }
        if started > 0 {
            debug!(count = started, "Started background tasks");
        }
        started
    }
}

/// Run `future` in its own task; a panic is logged instead of propagating.
fn spawn_isolated(
    runtime: &Handle,
    name: &'static str,
    future: BoxFuture<'static, ()>,
) -> JoinHandle<()> {
    let inner = runtime.clone();
    runtime.spawn(async move {
        let handle = inner.spawn(future);
        if let Err(e) = handle.await {
            error!(task = name, "Background task panicked: {}", e);
        }
    })
}

impl<S> FromRequestParts<S> for BackgroundTasks
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Background task queue not installed",
        ))
    }
}

/// Middleware that installs a [`BackgroundTasks`] queue for the request and
/// starts the queued tasks only after the response body is done.
///
/// ```ignore
/// Router::new()
///     .route("/interactions", post(handler))
///     .layer(axum::middleware::from_fn(run_after_response))
/// ```
pub async fn run_after_response(mut request: Request, next: Next) -> Response {
    let (tasks, queue) = TaskQueue::channel();
    request.extensions_mut().insert(tasks);

    let response = next.run(request).await;
    let (parts, body) = response.into_parts();
    Response::from_parts(
        parts,
        Body::new(DeferredBody {
            inner: body,
            queue: Some(queue),
        }),
    )
}

/// Response body that releases its task queue once finished or dropped.
struct DeferredBody {
    inner: Body,
    queue: Option<TaskQueue>,
}

impl DeferredBody {
    fn release(&mut self) {
        if let Some(queue) = self.queue.take() {
            queue.spawn_all();
        }
    }
}

impl HttpBody for DeferredBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let poll = Pin::new(&mut self.inner).poll_frame(cx);
        if matches!(poll, Poll::Ready(None)) {
            self.release();
        }
        poll
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for DeferredBody {
    fn drop(&mut self) {
        self.release();
    }
}
