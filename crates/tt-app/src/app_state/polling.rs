//! Background daemon status poller and main-loop scheduling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tt_rpc::{TrayStatus, Transport};
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::TorrentHostApp;
use super::types::{UserEvent, POLL_INTERVAL};

/// Granularity at which the poller notices a stop request while sleeping.
const STOP_CHECK: Duration = Duration::from_millis(50);

/// Longest `stop` waits for the thread before detaching it. A poll in
/// flight can take the full RPC timeout.
const STOP_JOIN_LIMIT: Duration = Duration::from_millis(250);

// =============================================================================
// POLLER THREAD
// =============================================================================

/// Polls `session-tray-status` on a dedicated thread.
///
/// At most one snapshot is in flight: while `pending` is set, new results
/// are dropped rather than queued. The receiver clears `pending` when it
/// takes a snapshot.
pub(super) struct StatusPoller {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StatusPoller {
    /// `deliver` returns `false` once the receiver is gone, which ends the
    /// thread.
    pub(super) fn spawn<T, F>(
        transport: Arc<T>,
        interval: Duration,
        pending: Arc<AtomicBool>,
        mut deliver: F,
    ) -> std::io::Result<Self>
    where
        T: Transport + ?Sized + 'static,
        F: FnMut(Option<TrayStatus>) -> bool + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("tt-status-poller".into())
            .spawn(move || {
                tracing::debug!(interval_ms = interval.as_millis() as u64, "status poller started");
                while !thread_stop.load(Ordering::Acquire) {
                    let status = tt_rpc::tray_status(&*transport);
                    if thread_stop.load(Ordering::Acquire) {
                        break;
                    }
                    if pending.swap(true, Ordering::AcqRel) {
                        tracing::trace!("status snapshot still pending, skipping");
                    } else if !deliver(status) {
                        break;
                    }
                    sleep_unless_stopped(&thread_stop, interval);
                }
                tracing::debug!("status poller stopped");
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait briefly for it. Returns `false` when the
    /// thread was still busy and has been detached; it exits on its own
    /// without delivering anything further.
    pub(super) fn stop(&mut self) -> bool {
        self.stop.store(true, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return true;
        };

        let deadline = Instant::now() + STOP_JOIN_LIMIT;
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                tracing::debug!("status poller busy, detaching");
                return false;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        if handle.join().is_err() {
            tracing::warn!("status poller thread panicked");
        }
        true
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sleep_unless_stopped(stop: &AtomicBool, total: Duration) {
    let until = Instant::now() + total;
    loop {
        let now = Instant::now();
        if now >= until || stop.load(Ordering::Acquire) {
            return;
        }
        std::thread::sleep((until - now).min(STOP_CHECK));
    }
}

// =============================================================================
// MAIN LOOP SCHEDULING
// =============================================================================

impl TorrentHostApp {
    /// Start the poller, posting snapshots to the event loop.
    pub(super) fn start_status_poller(&mut self) {
        if self.poller.is_some() {
            return;
        }
        let proxy = self.proxy.clone();
        let spawned = StatusPoller::spawn(
            Arc::clone(&self.rpc),
            self.config.startup.poll_interval(),
            Arc::clone(&self.status_pending),
            move |status| proxy.send_event(UserEvent::Status(status)).is_ok(),
        );
        match spawned {
            Ok(poller) => self.poller = Some(poller),
            Err(e) => tracing::error!(error = %e, "failed to start status poller"),
        }
    }

    /// Drain engine events, check timers and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        self.poll_engine_events();
        self.poll_handshake_deadline(now);
        self.poll_splash(now);

        if self.should_exit {
            event_loop.exit();
            return;
        }

        let mut wake = now + POLL_INTERVAL;
        if !self.handshake.is_completed() {
            wake = wake.min(self.handshake.deadline());
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct FixedReply(&'static str);

    impl Transport for FixedReply {
        fn post(&self, _body: &str) -> String {
            self.0.to_string()
        }
    }

    const ATTACHED: &str = r#"{"result":"success","arguments":{"uiAttached":true,"downloadSpeed":5}}"#;

    #[test]
    fn delivers_parsed_snapshots() {
        let (tx, rx) = mpsc::channel();
        let pending = Arc::new(AtomicBool::new(false));
        let mut poller = StatusPoller::spawn(
            Arc::new(FixedReply(ATTACHED)),
            Duration::from_millis(10),
            Arc::clone(&pending),
            move |s| tx.send(s).is_ok(),
        )
        .unwrap();

        let status = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        assert!(status.ui_attached);
        assert_eq!(status.download_speed, 5);
        poller.stop();
    }

    #[test]
    fn skips_while_a_snapshot_is_pending() {
        let (tx, rx) = mpsc::channel();
        let pending = Arc::new(AtomicBool::new(false));
        let mut poller = StatusPoller::spawn(
            Arc::new(FixedReply(ATTACHED)),
            Duration::from_millis(5),
            Arc::clone(&pending),
            move |s| tx.send(s).is_ok(),
        )
        .unwrap();

        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(150)).is_err());

        pending.store(false, Ordering::Release);
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        poller.stop();
    }

    #[test]
    fn unreachable_daemon_delivers_none() {
        let (tx, rx) = mpsc::channel();
        let mut poller = StatusPoller::spawn(
            Arc::new(FixedReply("")),
            Duration::from_millis(10),
            Arc::new(AtomicBool::new(false)),
            move |s| tx.send(s).is_ok(),
        )
        .unwrap();

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), None);
        poller.stop();
    }

    #[test]
    fn stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel::<Option<TrayStatus>>();
        drop(rx);
        let mut poller = StatusPoller::spawn(
            Arc::new(FixedReply("")),
            Duration::from_millis(5),
            Arc::new(AtomicBool::new(false)),
            move |s| tx.send(s).is_ok(),
        )
        .unwrap();
        let handle = poller.handle.take().unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn stop_is_idempotent() {
        let mut poller = StatusPoller::spawn(
            Arc::new(FixedReply("")),
            Duration::from_secs(30),
            Arc::new(AtomicBool::new(false)),
            |_| true,
        )
        .unwrap();
        assert!(poller.stop());
        assert!(poller.stop());
        assert!(poller.handle.is_none());
    }

    struct SlowReply(Duration);

    impl Transport for SlowReply {
        fn post(&self, _body: &str) -> String {
            std::thread::sleep(self.0);
            String::new()
        }
    }

    #[test]
    fn stop_does_not_wait_for_a_poll_in_flight() {
        let (tx, rx) = mpsc::channel();
        let mut poller = StatusPoller::spawn(
            Arc::new(SlowReply(Duration::from_secs(2))),
            Duration::from_millis(10),
            Arc::new(AtomicBool::new(false)),
            move |s| tx.send(s).is_ok(),
        )
        .unwrap();
        std::thread::sleep(Duration::from_millis(50));

        let started = Instant::now();
        assert!(!poller.stop());
        assert!(started.elapsed() < Duration::from_secs(1));

        // The detached thread finishes its poll and exits without delivering.
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
