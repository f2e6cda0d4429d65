//! Tower integration for status-rail.
//!
//! This module provides a Tower `Layer` and `Service` that canonicalize the
//! errors of a wrapped service into [`Coded`] values at the service
//! boundary.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! status-rail = { version = "0.1", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use status_rail::tower::StatusLayer;
//! use status_rail::Code;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(StatusLayer::new(Code::UNAVAILABLE))
//!     .service(my_service);
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::error::Error;

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::code::Code;
use crate::convert::from_error;
use crate::types::Coded;

type BoxError = Box<dyn Error + Send + Sync>;

/// A Tower [`Layer`] that canonicalizes service errors into [`Coded`].
///
/// Errors that already carry a code (a [`Status`](crate::Status), a
/// [`Code`] or a [`Coded`], possibly at the root of a source chain) pass
/// through unchanged; anything else becomes a status under the fallback
/// code with the error's text as its message.
#[derive(Clone, Copy, Debug)]
pub struct StatusLayer {
    fallback: Code,
}

impl StatusLayer {
    /// Creates a layer that files uncoded errors under `fallback`.
    #[inline]
    pub const fn new(fallback: Code) -> Self {
        Self { fallback }
    }

    /// Returns the fallback code.
    #[inline]
    pub const fn fallback(&self) -> Code {
        self.fallback
    }
}

impl Default for StatusLayer {
    fn default() -> Self {
        Self::new(Code::UNKNOWN)
    }
}

impl<S> Layer<S> for StatusLayer {
    type Service = StatusService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        StatusService { inner, fallback: self.fallback }
    }
}

/// A Tower [`Service`] that canonicalizes errors into [`Coded`].
///
/// This is created by [`StatusLayer`] and wraps an inner service.
#[derive(Clone, Debug)]
pub struct StatusService<S> {
    inner: S,
    fallback: Code,
}

impl<S> StatusService<S> {
    /// Creates a new `StatusService` wrapping the given service.
    #[inline]
    pub const fn new(inner: S, fallback: Code) -> Self {
        Self { inner, fallback }
    }

    /// Returns a reference to the inner service.
    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns a mutable reference to the inner service.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes the wrapper and returns the inner service.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, Request> Service<Request> for StatusService<S>
where
    S: Service<Request>,
    S::Error: Into<BoxError>,
{
    type Response = S::Response;
    type Error = Coded;
    type Future = StatusFuture<S::Future>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        let fallback = self.fallback;
        self.inner.poll_ready(cx).map_err(|e| canonicalize(e, fallback))
    }

    #[inline]
    fn call(&mut self, request: Request) -> Self::Future {
        StatusFuture::new(self.inner.call(request), self.fallback)
    }
}

fn canonicalize(error: impl Into<BoxError>, fallback: Code) -> Coded {
    let boxed: BoxError = error.into();
    let error: &(dyn Error + 'static) = &*boxed;
    from_error(Some(error), fallback)
}

pin_project! {
    /// Future returned by [`StatusService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct StatusFuture<F> {
        #[pin]
        inner: F,
        fallback: Code,
        terminated: bool,
    }
}

impl<F> StatusFuture<F> {
    #[inline]
    fn new(inner: F, fallback: Code) -> Self {
        Self { inner, fallback, terminated: false }
    }
}

impl<F, T, E> Future for StatusFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    type Output = Result<T, Coded>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.inner.poll(cx) {
            Poll::Ready(result) => {
                *this.terminated = true;
                let fallback = *this.fallback;
                Poll::Ready(result.map_err(|e| canonicalize(e, fallback)))
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T, E> FusedFuture for StatusFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// Extension trait for easily wrapping services with error canonicalization.
pub trait ServiceStatusExt<Request>: Service<Request> + Sized {
    /// Wraps this service so its errors come out as [`Coded`] values.
    fn with_status(self, fallback: Code) -> StatusService<Self> {
        StatusService::new(self, fallback)
    }
}

impl<S, Request> ServiceStatusExt<Request> for S where S: Service<Request> {}
