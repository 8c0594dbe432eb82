//! End-to-end hook wiring against the in-memory sink.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::time::sleep;
use url::Url;

use reqpulse_core::context::RequestTraceContext;
use reqpulse_core::error::{ReqPulseError, Result};
use reqpulse_core::phase::{Phase, PhaseParams};
use reqpulse_trace::dispatch::{standard_dispatcher, PhaseObserver, StatsObserver, TraceDispatcher};
use reqpulse_trace::emit::{MemorySink, StatsEmitter};
use reqpulse_trace::session::{error_kind_of, RequestTrace};

fn harness() -> (Arc<MemorySink>, Arc<TraceDispatcher>) {
    let sink = Arc::new(MemorySink::new());
    let emitter = StatsEmitter::new(sink.clone());
    let dispatcher = standard_dispatcher(emitter, "client");
    (sink, dispatcher)
}

fn value_of(line: &str) -> i64 {
    let (_, v) = line.split_once(" value=").unwrap();
    v.trim().parse().unwrap()
}

#[tokio::test]
async fn full_lifecycle_emits_the_expected_lines() {
    let (sink, dispatcher) = harness();
    let url = Url::parse("https://www.python.org/").unwrap();
    let host = url.host_str().unwrap();

    // The standard profiler observes the entire phase set.
    assert_eq!(dispatcher.observed_phases().len(), Phase::ALL.len());

    let mut trace = RequestTrace::new(dispatcher);
    trace.on_request_start().await;
    trace.on_dns_resolvehost_start(host).await;
    sleep(Duration::from_millis(5)).await;
    trace.on_dns_resolvehost_end(host).await;
    trace.on_dns_cache_miss(host).await;
    trace.on_connection_queued_start().await;
    sleep(Duration::from_millis(5)).await;
    trace.on_connection_queued_end().await;
    trace.on_connection_create_start().await;
    sleep(Duration::from_millis(5)).await;
    trace.on_connection_create_end().await;
    trace
        .on_response_chunk_received(&url, Bytes::from_static(b"<html>"))
        .await;
    trace.on_request_end(&url).await;

    let lines = sink.lines();
    assert_eq!(lines.len(), 6);

    assert!(lines[0].starts_with("client-dns-resolvehost-time,domain=www.python.org value="));
    assert!(value_of(&lines[0]) >= 5);

    assert_eq!(lines[1], "client-dns-cache-miss,domain=www.python.org value=1\n");

    // Connection phases carry no host, so the durations go out untagged.
    assert!(lines[2].starts_with("client-connection-queued-time value="));
    assert!(value_of(&lines[2]) >= 5);
    assert!(lines[3].starts_with("client-connection-create-time value="));
    assert!(value_of(&lines[3]) >= 5);

    assert_eq!(
        lines[4],
        "client-response-chunk-received,domain=www.python.org value=6\n"
    );

    assert!(lines[5].starts_with("client-request-exec-time,domain=www.python.org value="));
    assert!(value_of(&lines[5]) >= 15);

    assert_eq!(trace.pending_marks(), 0);
}

#[tokio::test]
async fn single_shot_events_count_one() {
    let (sink, dispatcher) = harness();
    let url = Url::parse("https://www.mozilla.org/en-US/").unwrap();

    let mut trace = RequestTrace::new(dispatcher);
    trace.on_connection_reuseconn().await;
    trace.on_dns_cache_hit("www.mozilla.org").await;
    trace.on_request_redirect(&url).await;

    let lines = sink.lines();
    assert_eq!(
        lines,
        vec![
            "client-connection-reuseconn value=1\n".to_string(),
            "client-dns-cache-hit,domain=www.mozilla.org value=1\n".to_string(),
            "client-request-redirect,domain=www.mozilla.org value=1\n".to_string(),
        ]
    );
}

#[tokio::test]
async fn exception_is_tagged_with_the_failure_class() {
    #[derive(Debug)]
    struct ConnectTimeout;
    impl std::fmt::Display for ConnectTimeout {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("connect timed out")
        }
    }
    impl std::error::Error for ConnectTimeout {}

    let (sink, dispatcher) = harness();
    let url = Url::parse("https://www.python.org/").unwrap();
    let err = ConnectTimeout;

    let mut trace = RequestTrace::new(dispatcher);
    trace.on_request_start().await;
    trace.on_request_exception(&url, error_kind_of(&err)).await;

    let lines = sink.lines();
    assert_eq!(
        lines,
        vec![
            "client-request-exception,domain=www.python.org,exception-class=ConnectTimeout value=1\n"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn end_without_start_emits_nothing() {
    let (sink, dispatcher) = harness();
    let url = Url::parse("https://www.python.org/").unwrap();

    let mut trace = RequestTrace::new(dispatcher);
    trace.on_request_end(&url).await;

    // The pairing error is logged, not surfaced, and no garbage duration
    // reaches the sink.
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn failing_observer_does_not_starve_later_observers() {
    struct FailingObserver;

    #[async_trait]
    impl PhaseObserver for FailingObserver {
        async fn on_phase(
            &self,
            _ctx: &mut RequestTraceContext,
            _phase: Phase,
            _params: &PhaseParams,
        ) -> Result<()> {
            Err(ReqPulseError::Internal("boom".into()))
        }
    }

    let sink = Arc::new(MemorySink::new());
    let emitter = StatsEmitter::new(sink.clone());
    let stats = Arc::new(StatsObserver::new(emitter, "client"));

    let dispatcher = TraceDispatcher::new();
    dispatcher.register(Phase::RequestStart, stats.clone());
    dispatcher.register(Phase::RequestEnd, Arc::new(FailingObserver));
    dispatcher.register(Phase::RequestEnd, stats);

    let url = Url::parse("https://www.python.org/").unwrap();
    let mut trace = RequestTrace::new(Arc::new(dispatcher));
    trace.on_request_start().await;
    trace.on_request_end(&url).await;

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("client-request-exec-time,domain=www.python.org value="));
}

#[tokio::test]
async fn concurrent_requests_never_cross_contaminate() {
    let (sink, dispatcher) = harness();

    let mut handles = Vec::new();
    for i in 0..100u64 {
        let dispatcher = Arc::clone(&dispatcher);
        handles.push(tokio::spawn(async move {
            let slept = 10 + (i % 5) * 10;
            let url = Url::parse(&format!("https://h{i}.test/")).unwrap();
            let mut trace = RequestTrace::new(dispatcher);
            trace.on_request_start().await;
            sleep(Duration::from_millis(slept)).await;
            trace.on_request_end(&url).await;
            (i, slept)
        }));
    }

    for handle in handles {
        let (i, slept) = handle.await.unwrap();
        let needle = format!("domain=h{i}.test");
        let line = sink
            .lines()
            .into_iter()
            .find(|l| l.starts_with("client-request-exec-time") && l.contains(&needle))
            .unwrap();
        let value = value_of(&line);
        // Each duration depends only on its own context's start mark:
        // at least what the task slept, and nowhere near the longest sleeper
        // plus scheduling noise from a neighbor.
        assert!(value >= slept as i64, "task {i}: {value} < {slept}");
        assert!(value < slept as i64 + 1_000, "task {i}: {value} way over {slept}");
    }

    assert_eq!(sink.lines().len(), 100);
}
