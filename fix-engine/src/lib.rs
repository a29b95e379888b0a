//! Composition root: picks a [`MessagesStorage`] implementation and an
//! acceptor/initiator role from [`EngineSettings`] and wraps the result in a
//! single-session façade exposed as [`Engine`].
//!
//! `fix-session` itself stays generic and policy-free (`Acceptor<S>`,
//! `Initiator<S>`); this crate is where a concrete `S` gets picked at
//! runtime and the two roles get a uniform start/stop/send surface.

use std::{
    cell::RefCell,
    path::PathBuf,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
    time::Duration,
};

use easyfix_messages::messages::Message;
use fix_session::{
    acceptor::{Acceptor, AcceptorError, TcpConnection},
    initiator::Initiator,
    messages_storage::{FileStorage, FileStorageError, InMemoryStorage, MessagesStorage, NullStorage},
    session_id::SessionId,
    settings::{SessionSettings, Settings},
    transport::TlsTcpConnection,
};
use futures::Stream;
use serde::Deserialize;
use tracing::{info, warn};

/// Which role this engine instance plays on the wire.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Initiator,
    Acceptor,
}

/// Which [`MessagesStorage`] backend to construct.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStoreType {
    /// Discards everything; resend requests are answered with gap fills only.
    #[default]
    Null,
    /// Keeps messages in a `BTreeMap`; lost on process restart.
    Memory,
    /// Durable, fsync'd journal under `state_file`.
    File,
}

/// Composition-root configuration: the keys that select *how* to run a
/// session rather than *which* session (those live in `Settings`/
/// `SessionSettings`, unchanged from `fix-session`).
#[derive(Clone, Debug, Deserialize)]
pub struct EngineSettings {
    pub mode: SessionMode,
    #[serde(default)]
    pub message_store_type: MessageStoreType,
    /// Root directory for [`MessageStoreType::File`]. Required when
    /// `message_store_type` is `file`, ignored otherwise.
    pub state_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("message_store_type is `file` but no state_file directory was configured")]
    MissingStateFile,
    #[error("failed to open message store at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: FileStorageError,
    },
    #[error(transparent)]
    Acceptor(#[from] AcceptorError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("send failed: peer is not logged on")]
    NotLoggedOn,
    #[error("timed out waiting for graceful logoff")]
    LogoffTimeout,
}

/// Delegates [`MessagesStorage`] to one of three runtime-selected backends.
///
/// `Acceptor<S>`/`Initiator<S>` are generic over `S` at compile time, but
/// `EngineSettings::message_store_type` is only known at runtime; this enum
/// bridges the two so [`Engine`] itself stays non-generic.
pub enum AnyStorage {
    Null(NullStorage),
    Memory(InMemoryStorage),
    File(FileStorage),
}

impl AnyStorage {
    fn open(store_type: MessageStoreType, root: Option<&std::path::Path>) -> Result<AnyStorage, EngineError> {
        match store_type {
            MessageStoreType::Null => Ok(AnyStorage::Null(NullStorage::new())),
            MessageStoreType::Memory => Ok(AnyStorage::Memory(InMemoryStorage::new())),
            MessageStoreType::File => {
                let root = root.ok_or(EngineError::MissingStateFile)?;
                FileStorage::open(root)
                    .map(AnyStorage::File)
                    .map_err(|source| EngineError::Storage {
                        path: root.to_path_buf(),
                        source,
                    })
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnyStorageError {
    #[error(transparent)]
    File(#[from] FileStorageError),
}

impl MessagesStorage for AnyStorage {
    type Error = AnyStorageError;

    fn fetch(&mut self, seq_num: easyfix_messages::fields::SeqNum) -> Result<Vec<u8>, Self::Error> {
        match self {
            AnyStorage::Null(s) => Ok(s.fetch(seq_num).unwrap()),
            AnyStorage::Memory(s) => Ok(s.fetch(seq_num).unwrap()),
            AnyStorage::File(s) => Ok(s.fetch(seq_num)?),
        }
    }

    fn fetch_range(
        &mut self,
        range: std::ops::RangeInclusive<easyfix_messages::fields::SeqNum>,
    ) -> Result<Vec<Vec<u8>>, Self::Error> {
        match self {
            AnyStorage::Null(s) => Ok(s.fetch_range(range).unwrap()),
            AnyStorage::Memory(s) => Ok(s.fetch_range(range).unwrap()),
            AnyStorage::File(s) => Ok(s.fetch_range(range)?),
        }
    }

    fn store(&mut self, seq_num: easyfix_messages::fields::SeqNum, data: &[u8]) -> Result<(), Self::Error> {
        match self {
            AnyStorage::Null(s) => Ok(s.store(seq_num, data).unwrap()),
            AnyStorage::Memory(s) => Ok(s.store(seq_num, data).unwrap()),
            AnyStorage::File(s) => Ok(s.store(seq_num, data)?),
        }
    }

    fn next_sender_msg_seq_num(&self) -> easyfix_messages::fields::SeqNum {
        match self {
            AnyStorage::Null(s) => s.next_sender_msg_seq_num(),
            AnyStorage::Memory(s) => s.next_sender_msg_seq_num(),
            AnyStorage::File(s) => s.next_sender_msg_seq_num(),
        }
    }

    fn next_target_msg_seq_num(&self) -> easyfix_messages::fields::SeqNum {
        match self {
            AnyStorage::Null(s) => s.next_target_msg_seq_num(),
            AnyStorage::Memory(s) => s.next_target_msg_seq_num(),
            AnyStorage::File(s) => s.next_target_msg_seq_num(),
        }
    }

    fn set_next_sender_msg_seq_num(&mut self, seq_num: easyfix_messages::fields::SeqNum) {
        match self {
            AnyStorage::Null(s) => s.set_next_sender_msg_seq_num(seq_num),
            AnyStorage::Memory(s) => s.set_next_sender_msg_seq_num(seq_num),
            AnyStorage::File(s) => s.set_next_sender_msg_seq_num(seq_num),
        }
    }

    fn set_next_target_msg_seq_num(&mut self, seq_num: easyfix_messages::fields::SeqNum) {
        match self {
            AnyStorage::Null(s) => s.set_next_target_msg_seq_num(seq_num),
            AnyStorage::Memory(s) => s.set_next_target_msg_seq_num(seq_num),
            AnyStorage::File(s) => s.set_next_target_msg_seq_num(seq_num),
        }
    }

    fn incr_next_sender_msg_seq_num(&mut self) {
        match self {
            AnyStorage::Null(s) => s.incr_next_sender_msg_seq_num(),
            AnyStorage::Memory(s) => s.incr_next_sender_msg_seq_num(),
            AnyStorage::File(s) => s.incr_next_sender_msg_seq_num(),
        }
    }

    fn incr_next_target_msg_seq_num(&mut self) {
        match self {
            AnyStorage::Null(s) => s.incr_next_target_msg_seq_num(),
            AnyStorage::Memory(s) => s.incr_next_target_msg_seq_num(),
            AnyStorage::File(s) => s.incr_next_target_msg_seq_num(),
        }
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        match self {
            AnyStorage::Null(s) => Ok(s.reset().unwrap()),
            AnyStorage::Memory(s) => Ok(s.reset().unwrap()),
            AnyStorage::File(s) => Ok(s.reset()?),
        }
    }
}

/// Either role, with the same `AnyStorage` backend, wrapped so [`Engine`]
/// doesn't need its own generic parameter.
///
/// `Acceptor`/`Initiator` live behind `Rc<RefCell<..>>` rather than owned
/// directly: [`Engine::events`] hands out an independently-pollable stream
/// wrapper (see [`AcceptorEvents`]/[`InitiatorEvents`]) that clones the `Rc`,
/// so driving it doesn't tie up a borrow of `Engine` itself and the host can
/// still call `engine.set_sender(..)` etc. from inside the same event loop.
enum Role {
    Acceptor(Rc<RefCell<Acceptor<AnyStorage>>>, SessionId),
    Initiator(Rc<RefCell<Initiator<AnyStorage>>>),
}

/// A single FIX session, running as either an acceptor or an initiator,
/// fronted by one unified `start`/`stop`/`send` surface.
///
/// `Engine` does not run its own event loop: call [`Engine::events`] and
/// drive the returned handle the same way `fix-session`'s own examples do
/// (`while let Some(mut event) = stream.next().await { match event.as_event() { ... } }`).
/// When the host observes `FixEvent::Logon`, it should hand the `Sender` to
/// [`Engine::set_sender`] so `Engine::send`/`request_logoff` have something
/// to send through; [`Engine::clear_sender`] on `FixEvent::Logout`.
pub struct Engine {
    role: Role,
    session_id: SessionId,
    settings: Settings,
    sender: std::cell::RefCell<Option<fix_session::Sender>>,
}

/// An owned, clone-of-`Rc` handle to an acceptor's event stream.
pub struct AcceptorEvents(Rc<RefCell<Acceptor<AnyStorage>>>);

impl Stream for AcceptorEvents {
    type Item = <Acceptor<AnyStorage> as Stream>::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut acceptor = self.get_mut().0.borrow_mut();
        Pin::new(&mut *acceptor).poll_next(cx)
    }
}

/// An owned, clone-of-`Rc` handle to an initiator's event stream.
pub struct InitiatorEvents(Rc<RefCell<Initiator<AnyStorage>>>);

impl Stream for InitiatorEvents {
    type Item = <Initiator<AnyStorage> as Stream>::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut initiator = self.get_mut().0.borrow_mut();
        Pin::new(&mut *initiator).poll_next(cx)
    }
}

/// Which role this engine was built as; returned by [`Engine::events`].
pub enum EngineHandle {
    Acceptor(AcceptorEvents),
    Initiator(InitiatorEvents),
}

impl Engine {
    /// Build a not-yet-started acceptor-mode engine listening for exactly
    /// one peer described by `session_settings.session_id`.
    pub fn acceptor(
        engine_settings: EngineSettings,
        settings: Settings,
        session_settings: SessionSettings,
    ) -> Result<Engine, EngineError> {
        let session_id = session_settings.session_id.clone();
        let store_type = engine_settings.message_store_type;
        let state_file = engine_settings.state_file.clone();
        let builder: Box<dyn Fn(&SessionId) -> AnyStorage> = Box::new(move |id| {
            let root = state_file.as_deref().map(|root| root.join(id.to_string().replace('/', "_")));
            AnyStorage::open(store_type, root.as_deref())
                .unwrap_or_else(|err| {
                    warn!(%err, "falling back to null message store");
                    AnyStorage::Null(NullStorage::new())
                })
        });
        let mut acceptor = Acceptor::new(settings.clone(), builder);
        acceptor.register_session(session_id.clone(), session_settings);
        Ok(Engine {
            role: Role::Acceptor(Rc::new(RefCell::new(acceptor)), session_id.clone()),
            session_id,
            settings,
            sender: std::cell::RefCell::new(None),
        })
    }

    /// Build a not-yet-started initiator-mode engine for one peer.
    pub fn initiator(
        engine_settings: EngineSettings,
        settings: Settings,
        session_settings: SessionSettings,
    ) -> Result<Engine, EngineError> {
        let session_id = session_settings.session_id.clone();
        let storage = AnyStorage::open(engine_settings.message_store_type, engine_settings.state_file.as_deref())?;
        let initiator = Initiator::new(settings.clone(), session_settings, storage);
        Ok(Engine {
            role: Role::Initiator(Rc::new(RefCell::new(initiator))),
            session_id,
            settings,
            sender: std::cell::RefCell::new(None),
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Begin listening (acceptor) or connecting with retry (initiator).
    /// TLS is used automatically when `Settings::tls` is set. Returns the
    /// spawned task's `JoinHandle`; must be called from within a
    /// `tokio::task::LocalSet` (the same requirement `fix-session` itself
    /// has, since sessions are `!Send`).
    pub async fn start(&self) -> Result<tokio::task::JoinHandle<()>, EngineError> {
        match &self.role {
            Role::Acceptor(acceptor, session_id) => {
                let addr = std::net::SocketAddr::from((self.settings.host, self.settings.port));
                let handle = if let Some(tls) = &self.settings.tls {
                    let connection = TcpConnectionOrTls::Tls(TlsTcpConnection::new(addr, tls).await?);
                    acceptor.borrow().start(connection)
                } else {
                    let connection = TcpConnectionOrTls::Plain(TcpConnection::new(addr).await?);
                    acceptor.borrow().start(connection)
                };
                info!(%session_id, "engine started in acceptor mode");
                Ok(handle)
            }
            Role::Initiator(initiator) => {
                info!(session_id = %self.session_id, "engine started in initiator mode");
                Ok(initiator.borrow().run())
            }
        }
    }

    /// Attach the `Sender` handed out by `FixEvent::Logon` so `send`/
    /// `request_logoff` have somewhere to write.
    pub fn set_sender(&self, sender: fix_session::Sender) {
        *self.sender.borrow_mut() = Some(sender);
    }

    /// Drop the attached `Sender`; call this on `FixEvent::Logout`.
    pub fn clear_sender(&self) {
        *self.sender.borrow_mut() = None;
    }

    /// Send an application message through the currently logged-on session.
    /// Header/trailer fields are filled in with session defaults.
    pub fn send(&self, msg: Box<Message>) -> Result<(), EngineError> {
        let sender = self.sender.borrow();
        let sender = sender.as_ref().ok_or(EngineError::NotLoggedOn)?;
        sender.send(msg).map_err(|_| EngineError::NotLoggedOn)
    }

    /// Send a pre-built `FixtMessage`, e.g. one re-routed from `FixEvent::AppMsgIn`.
    pub fn send_raw(&self, msg: Box<easyfix_messages::messages::FixtMessage>) -> Result<(), EngineError> {
        let sender = self.sender.borrow();
        let sender = sender.as_ref().ok_or(EngineError::NotLoggedOn)?;
        sender.send_raw(msg).map_err(|_| EngineError::NotLoggedOn)
    }

    /// Send `Logout<5>` and wait up to `timeout` for the session to report
    /// itself inactive. Returns `Ok(())` even if the peer never replies, as
    /// long as the local side tears down the connection in time.
    pub async fn request_logoff(&self, timeout: Duration) -> Result<(), EngineError> {
        match &self.role {
            Role::Acceptor(acceptor, session_id) => acceptor.borrow().logout(session_id, None, None)?,
            Role::Initiator(initiator) => initiator.borrow().logout(None, None),
        }
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if !self.is_active() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(EngineError::LogoffTimeout);
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    /// Hard-stop the session. `graceful` sends `Logout<5>` and waits for
    /// `timeout` first; otherwise the connection is dropped immediately.
    pub async fn stop(&self, graceful: bool, timeout: Duration) -> Result<(), EngineError> {
        if graceful {
            self.request_logoff(timeout).await?;
        }
        match &self.role {
            Role::Acceptor(acceptor, session_id) => acceptor.borrow().disconnect(session_id)?,
            Role::Initiator(initiator) => initiator.borrow().disconnect(),
        }
        self.clear_sender();
        Ok(())
    }

    fn is_active(&self) -> bool {
        match &self.role {
            Role::Acceptor(acceptor, session_id) => {
                acceptor.borrow().is_session_active(session_id).unwrap_or(false)
            }
            Role::Initiator(initiator) => initiator.borrow().is_active(),
        }
    }

    /// Reset both sequence counters to 1. Fails while the session is
    /// connected; stop it first.
    pub fn reset_sequence_numbers(&self) -> Result<(), EngineError> {
        match &self.role {
            Role::Acceptor(acceptor, session_id) => Ok(acceptor.borrow().reset(session_id)?),
            Role::Initiator(initiator) => {
                if initiator.borrow().reset() {
                    Ok(())
                } else {
                    Err(EngineError::Acceptor(AcceptorError::SessionActive))
                }
            }
        }
    }

    pub fn set_inbound_sequence_number(&self, seq_num: easyfix_messages::fields::SeqNum) -> Result<(), EngineError> {
        match &self.role {
            Role::Acceptor(acceptor, session_id) => {
                Ok(acceptor.borrow().set_next_target_msg_seq_num(session_id, seq_num)?)
            }
            Role::Initiator(initiator) => {
                initiator.borrow().set_next_target_msg_seq_num(seq_num);
                Ok(())
            }
        }
    }

    pub fn set_outbound_sequence_number(&self, seq_num: easyfix_messages::fields::SeqNum) -> Result<(), EngineError> {
        match &self.role {
            Role::Acceptor(acceptor, session_id) => {
                Ok(acceptor.borrow().set_next_sender_msg_seq_num(session_id, seq_num)?)
            }
            Role::Initiator(initiator) => {
                initiator.borrow().set_next_sender_msg_seq_num(seq_num);
                Ok(())
            }
        }
    }

    /// Hand out an independent, owned handle to the event stream. Cheap
    /// (clones an `Rc`); can be called while the engine is also being driven
    /// through `send`/`stop`/etc. from the same event loop.
    pub fn events(&self) -> EngineHandle {
        match &self.role {
            Role::Acceptor(acceptor, _) => EngineHandle::Acceptor(AcceptorEvents(acceptor.clone())),
            Role::Initiator(initiator) => EngineHandle::Initiator(InitiatorEvents(initiator.clone())),
        }
    }
}

enum TcpConnectionOrTls {
    Plain(TcpConnection),
    Tls(TlsTcpConnection),
}

impl fix_session::acceptor::Connection for TcpConnectionOrTls {
    async fn accept(
        &mut self,
    ) -> Result<
        (
            impl tokio::io::AsyncRead + Unpin + 'static,
            impl tokio::io::AsyncWrite + Unpin + 'static,
            std::net::SocketAddr,
        ),
        std::io::Error,
    > {
        match self {
            TcpConnectionOrTls::Plain(c) => {
                let (r, w, addr) = c.accept().await?;
                Ok((Either::Left(r), Either::Left(w), addr))
            }
            TcpConnectionOrTls::Tls(c) => {
                let (r, w, addr) = c.accept().await?;
                Ok((Either::Right(r), Either::Right(w), addr))
            }
        }
    }
}

/// Minimal `Either` so the two accept branches above can share a return type
/// without boxing every byte of I/O.
enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L: tokio::io::AsyncRead + Unpin, R: tokio::io::AsyncRead + Unpin> tokio::io::AsyncRead for Either<L, R> {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            Either::Left(l) => std::pin::Pin::new(l).poll_read(cx, buf),
            Either::Right(r) => std::pin::Pin::new(r).poll_read(cx, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveTime;
    use easyfix_macros::fix_str;
    use easyfix_messages::fields::FixString;
    use fix_session::session_id::SessionId;

    use super::*;

    fn session_settings(session_id: SessionId) -> SessionSettings {
        SessionSettings {
            session_id,
            session_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
                ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            logon_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
                ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            send_redundant_resend_requests: false,
            check_comp_id: true,
            check_latency: false,
            max_latency: Duration::from_secs(120),
            reset_on_logon: false,
            reset_on_logout: false,
            reset_on_disconnect: false,
            refresh_on_logon: false,
            sender_default_appl_ver_id: fix_str!("9").to_owned(),
            target_default_appl_ver_id: fix_str!("9").to_owned(),
            enable_next_expected_msg_seq_num: true,
            persist: true,
            verify_logout: true,
            retry_interval: Duration::from_secs(1),
            max_retries: Some(3),
        }
    }

    fn settings(sender_comp_id: &str) -> Settings {
        Settings {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            sender_comp_id: sender_comp_id.try_into().unwrap(),
            sender_sub_id: None,
            heartbeat_interval: Duration::from_secs(30),
            auto_disconnect_after_no_logon_received: Duration::from_secs(5),
            tls: None,
        }
    }

    fn test_session_id(target: &str) -> SessionId {
        SessionId::new(
            FixString::from_ascii_lossy(b"FIXT.1.1".to_vec()),
            FixString::from_ascii_lossy(b"acceptor".to_vec()),
            FixString::from_ascii_lossy(target.as_bytes().to_vec()),
        )
    }

    #[test]
    fn any_storage_null_roundtrip_is_lossy_by_design() {
        let mut storage = AnyStorage::open(MessageStoreType::Null, None).unwrap();
        storage.store(1, b"hello").unwrap();
        assert_eq!(storage.fetch(1).unwrap(), Vec::<u8>::new());
        assert_eq!(storage.next_sender_msg_seq_num(), 1);
    }

    #[test]
    fn any_storage_memory_roundtrips() {
        let mut storage = AnyStorage::open(MessageStoreType::Memory, None).unwrap();
        storage.store(1, b"hello").unwrap();
        storage.incr_next_sender_msg_seq_num();
        assert_eq!(storage.fetch(1).unwrap(), b"hello");
        assert_eq!(storage.next_sender_msg_seq_num(), 2);
    }

    #[test]
    fn any_storage_file_requires_state_file() {
        let err = AnyStorage::open(MessageStoreType::File, None).unwrap_err();
        assert!(matches!(err, EngineError::MissingStateFile));
    }

    #[test]
    fn any_storage_file_roundtrips() {
        let dir = std::env::temp_dir().join(format!("fix-engine-test-{}", std::process::id()));
        let mut storage = AnyStorage::open(MessageStoreType::File, Some(&dir)).unwrap();
        storage.store(1, b"hello").unwrap();
        assert_eq!(storage.fetch(1).unwrap(), b"hello");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn acceptor_engine_starts_inactive_and_resettable() {
        let session_id = test_session_id("client_1");
        let engine = Engine::acceptor(
            EngineSettings {
                mode: SessionMode::Acceptor,
                message_store_type: MessageStoreType::Null,
                state_file: None,
            },
            settings("acceptor"),
            session_settings(session_id.clone()),
        )
        .unwrap();

        assert_eq!(engine.session_id(), &session_id);
        assert!(!engine.is_active());
        // No connection yet, so resetting and re-pointing sequence numbers is allowed.
        engine.reset_sequence_numbers().unwrap();
        engine.set_inbound_sequence_number(5).unwrap();
        engine.set_outbound_sequence_number(7).unwrap();
    }

    #[tokio::test]
    async fn request_logoff_on_inactive_session_returns_immediately() {
        let session_id = test_session_id("client_1");
        let engine = Engine::initiator(
            EngineSettings {
                mode: SessionMode::Initiator,
                message_store_type: MessageStoreType::Memory,
                state_file: None,
            },
            settings("initiator"),
            session_settings(session_id),
        )
        .unwrap();

        // Never connected, so there's nothing to log off; should not block
        // for the full timeout.
        engine.request_logoff(Duration::from_secs(5)).await.unwrap();
    }

    #[test]
    fn initiator_engine_with_file_store_requires_state_file() {
        let session_id = test_session_id("client_1");
        let err = Engine::initiator(
            EngineSettings {
                mode: SessionMode::Initiator,
                message_store_type: MessageStoreType::File,
                state_file: None,
            },
            settings("initiator"),
            session_settings(session_id),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MissingStateFile));
    }
}

impl<L: tokio::io::AsyncWrite + Unpin, R: tokio::io::AsyncWrite + Unpin> tokio::io::AsyncWrite for Either<L, R> {
    fn poll_write(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<std::io::Result<usize>> {
        match self.get_mut() {
            Either::Left(l) => std::pin::Pin::new(l).poll_write(cx, buf),
            Either::Right(r) => std::pin::Pin::new(r).poll_write(cx, buf),
        }
    }

    fn poll_flush(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            Either::Left(l) => std::pin::Pin::new(l).poll_flush(cx),
            Either::Right(r) => std::pin::Pin::new(r).poll_flush(cx),
        }
    }

    fn poll_shutdown(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            Either::Left(l) => std::pin::Pin::new(l).poll_shutdown(cx),
            Either::Right(r) => std::pin::Pin::new(r).poll_shutdown(cx),
        }
    }
}
