use std::{
    cell::RefCell,
    collections::HashMap,
    net::SocketAddr,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use easyfix_messages::fields::{FixString, SeqNum, SessionStatus};
use futures::Stream;
use pin_project::pin_project;
use tokio::net::TcpStream;
use tracing::{error, info, info_span, warn, Instrument};

use crate::{
    application::{events_channel, AsEvent, Emitter, EventStream},
    io::initiator_connection,
    messages_storage::MessagesStorage,
    session::Session,
    session_id::SessionId,
    session_state::State,
    settings::{SessionSettings, Settings},
    state_machine::Event as LifecycleEvent,
    transport::connect_tls,
    DisconnectReason, Error,
};

/// Connect a plain or TLS-wrapped stream depending on `settings.tls`.
async fn dial(
    settings: &Settings,
) -> Result<
    (
        Box<dyn tokio::io::AsyncRead + Unpin>,
        Box<dyn tokio::io::AsyncWrite + Unpin>,
    ),
    Error,
> {
    if let Some(tls) = &settings.tls {
        let (reader, writer) = connect_tls(settings, tls).await?;
        Ok((Box::new(reader), Box::new(writer)))
    } else {
        let addr = SocketAddr::from((settings.host, settings.port));
        let tcp_stream = TcpStream::connect(addr).await?;
        tcp_stream.set_nodelay(true)?;
        let (reader, writer) = tcp_stream.into_split();
        Ok((Box::new(reader), Box::new(writer)))
    }
}

// TODO: Same as in Acceptor, not need for duplicate
pub(crate) type ActiveSessionsMap<S> = HashMap<SessionId, Rc<Session<S>>>;

#[pin_project]
pub struct Initiator<S: MessagesStorage> {
    id: SessionId,
    settings: Settings,
    session_settings: SessionSettings,
    state: Rc<RefCell<State<S>>>,
    active_sessions: Rc<RefCell<ActiveSessionsMap<S>>>,
    emitter: Emitter,
    #[pin]
    event_stream: EventStream,
}

impl<S: MessagesStorage + 'static> Initiator<S> {
    pub fn new(
        settings: Settings,
        session_settings: SessionSettings,
        messages_storage: S,
    ) -> Initiator<S> {
        let (emitter, event_stream) = events_channel();
        Initiator {
            id: session_settings.session_id.clone(),
            settings,
            session_settings,
            state: Rc::new(RefCell::new(State::new(messages_storage))),
            active_sessions: Rc::new(RefCell::new(HashMap::new())),
            emitter,
            event_stream,
        }
    }

    /// Connect once, run the session until it disconnects, and return.
    ///
    /// On a failed connection attempt this returns the I/O error directly
    /// rather than retrying; use [`Self::run`] for the reconnecting variant.
    pub async fn connect(&self) -> Result<(), Error> {
        info!("Initiator started");

        let addr = SocketAddr::from((self.settings.host, self.settings.port));
        let (source, sink) = dial(&self.settings).await?;
        let emitter = self.emitter.clone();
        let settings = self.settings.clone();
        let session_settings = self.session_settings.clone();
        let active_sessions = self.active_sessions.clone();
        let state = self.state.clone();

        let connection_span = info_span!("connection", %addr);

        tokio::task::spawn_local(async move {
            initiator_connection(
                source,
                sink,
                settings,
                session_settings,
                state,
                active_sessions,
                emitter,
            )
            .instrument(connection_span.clone())
            .await;
            connection_span.in_scope(|| {
                info!("Connection closed");
            });
        });
        Ok(())
    }

    /// Connect and keep reconnecting after every disconnection (including
    /// failed connection attempts), spaced `session_settings.retry_interval`
    /// apart. Gives up after `session_settings.max_retries` consecutive
    /// failed *connection attempts* (a successful connection, however
    /// short-lived, resets the counter). Runs until the retry budget is
    /// exhausted; to stop earlier, drop the returned task's `JoinHandle`.
    pub fn run(&self) -> tokio::task::JoinHandle<()> {
        let addr = SocketAddr::from((self.settings.host, self.settings.port));
        let emitter = self.emitter.clone();
        let settings = self.settings.clone();
        let session_settings = self.session_settings.clone();
        let active_sessions = self.active_sessions.clone();
        let state = self.state.clone();
        let retry_interval = session_settings.retry_interval;
        let max_retries = session_settings.max_retries;

        tokio::task::spawn_local(async move {
            let mut attempt: u32 = 0;
            loop {
                let connection_span = info_span!("connection", %addr, attempt);
                match dial(&settings).instrument(connection_span.clone()).await {
                    Ok((source, sink)) => {
                        attempt = 0;
                        initiator_connection(
                            source,
                            sink,
                            settings.clone(),
                            session_settings.clone(),
                            state.clone(),
                            active_sessions.clone(),
                            emitter.clone(),
                        )
                        .instrument(connection_span.clone())
                        .await;
                        connection_span.in_scope(|| info!("Connection closed"));
                    }
                    Err(err) => {
                        attempt += 1;
                        warn!(%err, attempt, "failed to connect");
                        if let Some(max_retries) = max_retries {
                            if attempt >= max_retries {
                                error!(attempt, "giving up reconnecting, retry budget exhausted");
                                return;
                            }
                        }
                        state
                            .borrow_mut()
                            .apply_lifecycle(LifecycleEvent::ReconnectScheduled);
                    }
                }
                tokio::time::sleep(retry_interval).await;
            }
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.active_sessions.borrow().contains_key(&self.id)
    }

    /// Sender (outbound) seq_num getter.
    pub fn next_sender_msg_seq_num(&self) -> SeqNum {
        self.state.borrow().next_sender_msg_seq_num()
    }

    /// Target (inbound) seq_num getter.
    pub fn next_target_msg_seq_num(&self) -> SeqNum {
        self.state.borrow().next_target_msg_seq_num()
    }

    pub fn set_next_sender_msg_seq_num(&self, seq_num: SeqNum) {
        self.state.borrow_mut().set_next_sender_msg_seq_num(seq_num);
    }

    pub fn set_next_target_msg_seq_num(&self, seq_num: SeqNum) {
        self.state.borrow_mut().set_next_target_msg_seq_num(seq_num);
    }

    /// Resets both sequence numbers to 1. Refuses while the connection is up
    /// (matches `Acceptor::reset`'s `SessionActive` guard).
    pub fn reset(&self) -> bool {
        if self.is_active() {
            return false;
        }
        self.state.borrow_mut().reset();
        true
    }

    pub fn logout(&self, session_status: Option<SessionStatus>, text: Option<FixString>) {
        if let Some(session) = self.active_sessions.borrow().get(&self.id) {
            session.send_logout(&mut session.state().borrow_mut(), session_status, text);
        }
    }

    pub fn disconnect(&self) {
        if let Some(session) = self.active_sessions.borrow_mut().remove(&self.id) {
            session.disconnect(
                &mut session.state().borrow_mut(),
                DisconnectReason::ApplicationForcedDisconnect,
            );
        }
    }
}

impl<S: MessagesStorage> Stream for Initiator<S> {
    type Item = impl AsEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.event_stream).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.event_stream.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use chrono::NaiveTime;
    use easyfix_macros::fix_str;

    use super::*;
    use crate::messages_storage::NullStorage;

    fn test_settings(port: u16) -> Settings {
        Settings {
            host: "127.0.0.1".parse().unwrap(),
            port,
            sender_comp_id: fix_str!("client_1").to_owned(),
            sender_sub_id: None,
            heartbeat_interval: StdDuration::from_secs(30),
            auto_disconnect_after_no_logon_received: StdDuration::from_secs(5),
            tls: None,
        }
    }

    fn test_session_settings(retry_interval: StdDuration, max_retries: Option<u32>) -> SessionSettings {
        SessionSettings {
            session_id: SessionId::new(
                fix_str!("FIXT.1.1").to_owned(),
                fix_str!("client_1").to_owned(),
                fix_str!("acceptor").to_owned(),
            ),
            session_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
                ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            logon_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
                ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            send_redundant_resend_requests: false,
            check_comp_id: true,
            check_latency: false,
            max_latency: StdDuration::from_secs(120),
            reset_on_logon: false,
            reset_on_logout: false,
            reset_on_disconnect: false,
            refresh_on_logon: false,
            sender_default_appl_ver_id: fix_str!("9").to_owned(),
            target_default_appl_ver_id: fix_str!("9").to_owned(),
            enable_next_expected_msg_seq_num: true,
            persist: true,
            verify_logout: true,
            retry_interval,
            max_retries,
        }
    }

    #[tokio::test]
    async fn dial_connects_over_plain_tcp() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let settings = test_settings(addr.port());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let (accepted, dialed) =
                    tokio::join!(listener.accept(), dial(&settings));
                accepted.unwrap();
                dialed.unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn run_gives_up_after_max_retries_against_a_closed_port() {
        // Bind then immediately drop: the port is free but nothing accepts,
        // so connection attempts fail fast with ECONNREFUSED on loopback.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let settings = test_settings(addr.port());
        let session_settings =
            test_session_settings(StdDuration::from_millis(10), Some(2));
        let initiator = Initiator::new(settings, session_settings, NullStorage::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let handle = initiator.run();
                tokio::time::timeout(StdDuration::from_secs(5), handle)
                    .await
                    .expect("run() should give up instead of retrying forever")
                    .unwrap();
            })
            .await;
    }
}
