//! Formal session lifecycle, kept alongside the handler bookkeeping in
//! `session_state::State`. Ported from the `State`/`StateMachine` class
//! hierarchy of the reference engine's `fixengine/state_machine.py`.

use std::panic::{self, AssertUnwindSafe};

use tracing::{trace, warn};

/// Session lifecycle state (spec side).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    AwaitingLogon,
    LogonInProgress,
    Active,
    LogoutInProgress,
    Reconnecting,
}

/// Events that drive transitions between `SessionState` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    /// Initiator started a TCP connect attempt.
    ConnectRequested,
    /// Acceptor accepted a TCP connection and is waiting for the first Logon.
    ConnectionAccepted,
    /// TCP connect (initiator) or accept (acceptor) succeeded.
    TransportEstablished,
    /// A Logon<A> was sent (initiator) or received (acceptor).
    LogonStarted,
    /// Logon<A> handshake completed in both directions.
    LogonCompleted,
    /// A Logout<5> was sent or received, handshake in progress.
    LogoutStarted,
    /// Session torn down, either gracefully or by error.
    Disconnected,
    /// Initiator is about to retry after losing the connection.
    ReconnectScheduled,
}

fn transition(state: SessionState, event: Event) -> Option<SessionState> {
    use Event::*;
    use SessionState::*;
    Some(match (state, event) {
        (Disconnected, ConnectRequested) => Connecting,
        (Disconnected, ConnectionAccepted) => AwaitingLogon,
        (Connecting, TransportEstablished) => LogonInProgress,
        (Connecting, Disconnected) => Disconnected,
        (AwaitingLogon, LogonStarted) => LogonInProgress,
        (AwaitingLogon, Disconnected) => Disconnected,
        (LogonInProgress, LogonCompleted) => Active,
        (LogonInProgress, Disconnected) => Disconnected,
        (Active, LogoutStarted) => LogoutInProgress,
        (Active, Disconnected) => Disconnected,
        (LogoutInProgress, Disconnected) => Disconnected,
        (Disconnected, ReconnectScheduled) => Reconnecting,
        (Reconnecting, ConnectRequested) => Connecting,
        (Reconnecting, Disconnected) => Disconnected,
        // Any state can be forced back to Disconnected.
        (_, Disconnected) => Disconnected,
        _ => return None,
    })
}

type Subscriber = Box<dyn Fn(SessionState, SessionState)>;

/// Drives `SessionState` transitions and notifies subscribers after each
/// one. Notification is synchronous and non-blocking: a panicking
/// subscriber is caught and logged, it never poisons the machine.
pub struct StateMachine {
    state: SessionState,
    subscribers: Vec<Subscriber>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> StateMachine {
        StateMachine {
            state: SessionState::Disconnected,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> SessionState {
        self.state
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(SessionState, SessionState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply `event`. Returns `false` if the event is not valid for the
    /// current state (the machine is left unchanged).
    pub fn apply(&mut self, event: Event) -> bool {
        let Some(next) = transition(self.state, event) else {
            warn!(?event, state = ?self.state, "ignored event: no valid transition");
            return false;
        };
        let prev = self.state;
        self.state = next;
        trace!(?prev, ?next, ?event, "session state transition");
        for subscriber in &self.subscribers {
            let result = panic::catch_unwind(AssertUnwindSafe(|| subscriber(prev, next)));
            if result.is_err() {
                warn!("session state subscriber panicked, ignoring");
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initiator_happy_path() {
        let mut sm = StateMachine::new();
        assert_eq!(sm.current(), SessionState::Disconnected);
        assert!(sm.apply(Event::ConnectRequested));
        assert_eq!(sm.current(), SessionState::Connecting);
        assert!(sm.apply(Event::TransportEstablished));
        assert_eq!(sm.current(), SessionState::LogonInProgress);
        assert!(sm.apply(Event::LogonCompleted));
        assert_eq!(sm.current(), SessionState::Active);
        assert!(sm.apply(Event::LogoutStarted));
        assert_eq!(sm.current(), SessionState::LogoutInProgress);
        assert!(sm.apply(Event::Disconnected));
        assert_eq!(sm.current(), SessionState::Disconnected);
    }

    #[test]
    fn acceptor_happy_path() {
        let mut sm = StateMachine::new();
        assert!(sm.apply(Event::ConnectionAccepted));
        assert_eq!(sm.current(), SessionState::AwaitingLogon);
        assert!(sm.apply(Event::LogonStarted));
        assert!(sm.apply(Event::LogonCompleted));
        assert_eq!(sm.current(), SessionState::Active);
    }

    #[test]
    fn invalid_transition_is_noop() {
        let mut sm = StateMachine::new();
        assert!(!sm.apply(Event::LogonCompleted));
        assert_eq!(sm.current(), SessionState::Disconnected);
    }

    #[test]
    fn reconnect_loop() {
        let mut sm = StateMachine::new();
        sm.apply(Event::ConnectRequested);
        sm.apply(Event::Disconnected);
        assert!(sm.apply(Event::ReconnectScheduled));
        assert_eq!(sm.current(), SessionState::Reconnecting);
        assert!(sm.apply(Event::ConnectRequested));
        assert_eq!(sm.current(), SessionState::Connecting);
    }

    #[test]
    fn subscriber_panic_does_not_poison_machine() {
        let mut sm = StateMachine::new();
        sm.subscribe(|_, _| panic!("boom"));
        assert!(sm.apply(Event::ConnectRequested));
        assert_eq!(sm.current(), SessionState::Connecting);
    }
}
