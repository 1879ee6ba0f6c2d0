// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based request-rate layer for alloy RPC clients.
//!
//! Requests are scheduled on a virtual timeline (generic cell rate): each one
//! books the next emission slot, and may go as soon as that slot lies within
//! the burst allowance of "now". A burst of `requests` is allowed from idle,
//! after which requests are spaced `period / requests` apart.

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, PoisonError},
    task::{Context, Poll},
    time::Duration,
};

use tokio::time::Instant;
use tower::Layer;

/// A Tower layer limiting how many requests start per period.
///
/// The limiter is shared by every service the layer produces, so cloning the
/// resulting client keeps one budget.
///
/// # Example
///
/// ```rust
/// use tradescan::transport::RateLimitLayer;
///
/// // 25 requests per second
/// let layer = RateLimitLayer::per_second(25);
/// assert_eq!(layer.burst(), 25);
/// ```
#[derive(Clone, Debug)]
pub struct RateLimitLayer {
    schedule: Arc<Mutex<Schedule>>,
    burst: u32,
}

impl RateLimitLayer {
    /// Allow `requests` per `period`. A zero request count is treated as one.
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = requests.max(1);
        Self {
            schedule: Arc::new(Mutex::new(Schedule::new(burst, period))),
            burst,
        }
    }

    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }

    /// Requests allowed back to back from idle
    pub fn burst(&self) -> u32 {
        self.burst
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RateLimitService {
            service,
            schedule: Arc::clone(&self.schedule),
        }
    }
}

#[derive(Debug)]
struct Schedule {
    /// Spacing between requests at the sustained rate
    interval: Duration,
    /// How far ahead of "now" the timeline may run before requests wait
    tolerance: Duration,
    /// Theoretical arrival time of the next request
    next_slot: Option<Instant>,
}

impl Schedule {
    fn new(burst: u32, period: Duration) -> Self {
        let interval = period / burst;
        Self {
            interval,
            tolerance: interval * (burst - 1),
            next_slot: None,
        }
    }

    /// Book a slot and return the instant the request may start.
    fn reserve(&mut self, now: Instant) -> Instant {
        let slot = self.next_slot.map_or(now, |next| next.max(now));
        self.next_slot = Some(slot + self.interval);

        match slot.checked_sub(self.tolerance) {
            Some(start) if start > now => start,
            _ => now,
        }
    }
}

/// Service produced by [`RateLimitLayer`].
#[derive(Clone, Debug)]
pub struct RateLimitService<S> {
    service: S,
    schedule: Arc<Mutex<Schedule>>,
}

impl<S, Request> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let start_at = self
            .schedule
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reserve(Instant::now());
        let mut service = self.service.clone();

        Box::pin(async move {
            tokio::time::sleep_until(start_at).await;
            service.call(request).await
        })
    }
}
