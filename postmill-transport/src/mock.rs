//! In-memory collaborators for tests.
//!
//! - [`ScriptedTransport`] answers requests from a queue and records them
//! - [`ManualClock`] advances virtual time instead of sleeping
//! - [`SequentialIds`] hands out predictable identifiers

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::clock::Clock;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::ids::IdSource;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Scripted Transport
// ============================================================================

#[derive(Debug)]
enum Scripted {
    Respond(HttpResponse),
    TimedOut,
}

/// Transport that replays queued responses in order.
///
/// Every request is recorded, answered or not. Running out of responses is
/// a [`TransportError::Unscripted`].
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn push(&self, response: HttpResponse) -> &Self {
        lock(&self.responses).push_back(Scripted::Respond(response));
        self
    }

    /// Queues a JSON response.
    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(HttpResponse::json_body(status, &body))
    }

    /// Queues a request timeout.
    pub fn push_timeout(&self) -> &Self {
        lock(&self.responses).push_back(Scripted::TimedOut);
        self
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests whose URL contains `fragment`.
    pub fn count_matching(&self, fragment: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.contains(fragment))
            .count()
    }

    /// Number of queued responses not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        lock(&self.requests).push(request);
        match lock(&self.responses).pop_front() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::TimedOut) => Err(TransportError::Timeout),
            None => Err(TransportError::Unscripted(url)),
        }
    }
}

// ============================================================================
// Manual Clock
// ============================================================================

/// Clock whose sleeps return immediately and advance virtual time.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// Creates a clock starting at `start`.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        lock(&self.sleeps).clone()
    }

    /// Moves virtual time forward without recording a sleep.
    pub fn advance(&self, by: Duration) {
        let mut now = lock(&self.now);
        if let Ok(delta) = chrono::Duration::from_std(by) {
            *now += delta;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::starting_at(start)
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *lock(&self.now)
    }

    async fn sleep(&self, duration: Duration) {
        lock(&self.sleeps).push(duration);
        self.advance(duration);
    }
}

// ============================================================================
// Sequential Ids
// ============================================================================

/// Id source producing `id-1`, `id-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdSource for SequentialIds {
    fn generate(&self) -> Result<String, TransportError> {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("id-{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_transport_replays_in_order() {
        let transport = ScriptedTransport::new();
        transport
            .push(HttpResponse::new(200, "one"))
            .push_json(201, serde_json::json!({"n": 2}));

        let a = transport.send(HttpRequest::get("https://x/1")).await.unwrap();
        let b = transport.send(HttpRequest::post("https://x/2")).await.unwrap();
        assert_eq!(a.text(), "one");
        assert_eq!(b.status, 201);

        let err = transport.send(HttpRequest::get("https://x/3")).await.unwrap_err();
        assert!(matches!(err, TransportError::Unscripted(url) if url == "https://x/3"));
        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.count_matching("/2"), 1);
    }

    #[tokio::test]
    async fn test_manual_clock_advances_on_sleep() {
        let clock = ManualClock::default();
        let start = clock.now();
        clock.sleep(Duration::from_secs(30)).await;
        assert_eq!(clock.now() - start, chrono::Duration::seconds(30));
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(30)]);
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::default();
        assert_eq!(ids.generate().unwrap(), "id-1");
        assert_eq!(ids.generate().unwrap(), "id-2");
    }
}
