//! Heartbeat liveness accounting.
//!
//! Ported from the reference engine's `fixengine/heartbeat.py` send-loop,
//! using the same timer machinery as [`crate::io::time`]. Replaces a plain
//! `auto_disconnect_after_no_heartbeat: u32` retry counter with the exact
//! 1.2x / 2.5x heartbeat-interval multipliers.

use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::{FORCE_DISCONNECT_THRESHOLD, TEST_REQUEST_THRESHOLD};

/// Granularity of [`LivenessMonitor::tick_interval`]. Both
/// `TEST_REQUEST_THRESHOLD` (1.2) and `FORCE_DISCONNECT_THRESHOLD` (2.5) are
/// exact multiples of this, so ticking at this cadence lands `on_timeout`
/// exactly on both thresholds instead of compounding the coarser 1.2x
/// interval past 2.5x (1.2, 2.4, 3.6, ...).
const TICK_GRANULARITY: f32 = 0.1;

/// Tolerance for the float multiplication drift in `on_timeout`'s threshold
/// comparisons.
const THRESHOLD_EPSILON: f32 = 1e-4;

/// What to do in response to an elapsed inbound-silence tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LivenessAction {
    /// Keep waiting, nothing has exceeded a threshold yet.
    Wait,
    /// Inbound silence exceeded `heartbeat_interval * 1.2`: send TestRequest<1>.
    SendTestRequest,
    /// Inbound silence exceeded `heartbeat_interval * 2.5`: drop the connection.
    ForceDisconnect,
}

/// Tracks elapsed inbound-timeout ticks (each spaced `tick_interval()` apart,
/// driven externally by the input stream's timeout wrapper) and turns them
/// into [`LivenessAction`]s.
#[derive(Debug)]
pub struct LivenessMonitor {
    heartbeat_interval: Duration,
    elapsed_ticks: u32,
    test_request_pending: bool,
    cancel: CancellationToken,
}

impl LivenessMonitor {
    pub fn new(heartbeat_interval: Duration) -> LivenessMonitor {
        LivenessMonitor {
            heartbeat_interval,
            elapsed_ticks: 0,
            test_request_pending: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Interval between inbound-timeout ticks that should drive [`Self::on_timeout`].
    pub fn tick_interval(&self) -> Duration {
        self.heartbeat_interval.mul_f32(TICK_GRANULARITY)
    }

    /// Token that can be used to cancel any task awaiting on this monitor's
    /// behalf (e.g. a pending `sleep` in the input loop) when the session
    /// disconnects for an unrelated reason.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Call once per elapsed `tick_interval()` with no inbound traffic.
    ///
    /// Force-disconnects once total silence reaches `2.5x` the heartbeat
    /// interval, and sends at most one `TestRequest` per silence window (it
    /// stays outstanding, never resent, until traffic arrives and
    /// [`Self::on_message_received`] clears the window).
    pub fn on_timeout(&mut self) -> LivenessAction {
        self.elapsed_ticks += 1;
        let elapsed_multiplier = TICK_GRANULARITY * self.elapsed_ticks as f32;
        if elapsed_multiplier + THRESHOLD_EPSILON >= FORCE_DISCONNECT_THRESHOLD {
            LivenessAction::ForceDisconnect
        } else if elapsed_multiplier + THRESHOLD_EPSILON >= TEST_REQUEST_THRESHOLD
            && !self.test_request_pending
        {
            self.test_request_pending = true;
            LivenessAction::SendTestRequest
        } else {
            LivenessAction::Wait
        }
    }

    /// Call whenever any inbound message is received, resetting the silence window.
    pub fn on_message_received(&mut self) {
        self.elapsed_ticks = 0;
        self.test_request_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks the monitor `n` times, returning the last action.
    fn tick_n(monitor: &mut LivenessMonitor, n: u32) -> LivenessAction {
        (0..n).map(|_| monitor.on_timeout()).last().unwrap()
    }

    #[test]
    fn ticks_below_test_request_threshold_wait() {
        let mut monitor = LivenessMonitor::new(Duration::from_secs(10));
        // 11 ticks * 0.1 = 1.1x, still shy of 1.2x.
        assert_eq!(tick_n(&mut monitor, 11), LivenessAction::Wait);
    }

    #[test]
    fn silence_past_1_2x_sends_a_single_test_request() {
        let mut monitor = LivenessMonitor::new(Duration::from_secs(10));
        // 12 ticks * 0.1 = 1.2x.
        assert_eq!(tick_n(&mut monitor, 12), LivenessAction::SendTestRequest);
        // Further ticks don't resend while the request is still outstanding.
        assert_eq!(monitor.on_timeout(), LivenessAction::Wait);
        assert_eq!(monitor.on_timeout(), LivenessAction::Wait);
    }

    #[test]
    fn silence_past_2_5x_forces_disconnect_without_a_second_test_request() {
        let mut monitor = LivenessMonitor::new(Duration::from_secs(10));
        assert_eq!(tick_n(&mut monitor, 12), LivenessAction::SendTestRequest);
        // 13 more ticks: 25 * 0.1 = 2.5x exactly.
        assert_eq!(tick_n(&mut monitor, 13), LivenessAction::ForceDisconnect);
    }

    #[test]
    fn message_received_resets_window_and_pending_flag() {
        let mut monitor = LivenessMonitor::new(Duration::from_secs(10));
        assert_eq!(tick_n(&mut monitor, 12), LivenessAction::SendTestRequest);
        monitor.on_message_received();
        // Window restarts from zero: 11 ticks still shy of 1.2x.
        assert_eq!(tick_n(&mut monitor, 11), LivenessAction::Wait);
        // And a fresh TestRequest is allowed again at 1.2x.
        assert_eq!(monitor.on_timeout(), LivenessAction::SendTestRequest);
    }
}
