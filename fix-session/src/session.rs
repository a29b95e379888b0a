use std::{cell::RefCell, ops::RangeInclusive, rc::Rc};

use chrono::NaiveTime;
use easyfix_messages::{
    deserializer,
    fields::{
        DefaultApplVerId, EncryptMethod, FixStr, FixString, Int, MsgType, SeqNum,
        SessionRejectReason, SessionStatus, Utc, UtcTimestamp,
    },
    messages::{
        FieldTag, FixtMessage, Header, Heartbeat, Logon, Logout, Message, MsgCat, Reject,
        ResendRequest, SequenceReset, TestRequest, Trailer,
    },
};
use tokio::{sync::oneshot, time::Duration};
use tracing::{error, info, instrument, trace, warn};

use crate::{
    application::{DeserializeError, Emitter, FixEventInternal, InputResponderMsg, Responder},
    liveness::{LivenessAction, LivenessMonitor},
    messages_storage::MessagesStorage,
    session_id::SessionId,
    session_state::State,
    settings::{SessionSettings, Settings},
    state_machine::{Event as LifecycleEvent, SessionState as Lifecycle},
    DisconnectReason, Sender,
};

#[derive(Debug, thiserror::Error)]
enum VerifyError {
    #[error("Message already received")]
    Duplicate,
    #[error("Too high target sequence number {msg_seq_num}")]
    ResendRequest { msg_seq_num: SeqNum },
    #[error("Reject due to {reason:?} (tag={tag:?}, logout={logout})")]
    Reject {
        reason: SessionRejectReason,
        tag: Option<FieldTag>,
        logout: bool,
    },
    #[error("Reject due to {reason:?}, raised by application")]
    AppReject {
        ref_msg_type: FixString,
        ref_seq_num: SeqNum,
        reason: SessionRejectReason,
        text: FixString,
        ref_tag_id: Option<i64>,
    },
    #[error("Logout: {text:?}, disconnect: {disconnect}")]
    Logout {
        text: Option<FixString>,
        disconnect: bool,
    },
    #[error("Logout raised by application: {text:?}, disconnect: {disconnect}")]
    AppLogout {
        session_status: Option<SessionStatus>,
        text: Option<FixString>,
        disconnect: bool,
    },
    #[error("Disconnect: {0}")]
    Disconnect(String),
}

impl VerifyError {
    fn invalid_logon_state() -> VerifyError {
        VerifyError::Disconnect("invalid logon state".to_owned())
    }

    fn invalid_time() -> VerifyError {
        VerifyError::Reject {
            reason: SessionRejectReason::SendingTimeAccuracyProblem,
            tag: None,
            logout: false,
        }
    }

    fn invalid_comp_id() -> VerifyError {
        VerifyError::Reject {
            reason: SessionRejectReason::CompIdProblem,
            tag: None,
            logout: true,
        }
    }

    fn target_seq_num_too_high(msg_seq_num: SeqNum) -> VerifyError {
        VerifyError::ResendRequest { msg_seq_num }
    }

    fn missing_orig_time() -> VerifyError {
        VerifyError::Reject {
            reason: SessionRejectReason::RequiredTagMissing,
            tag: Some(FieldTag::OrigSendingTime),
            logout: false,
        }
    }

    fn invalid_orig_time() -> VerifyError {
        VerifyError::Reject {
            reason: SessionRejectReason::SendingTimeAccuracyProblem,
            tag: None,
            logout: true,
        }
    }

    fn seq_num_too_low(msg_seq_num: SeqNum, next_target_msg_seq_num: SeqNum) -> VerifyError {
        VerifyError::Logout {
            text: Some(FixString::from_ascii_lossy(
                format!(
                    "MsgSeqNum too low, expecting {}, but received {}",
                    next_target_msg_seq_num, msg_seq_num
                )
                .into_bytes(),
            )),
            disconnect: true,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Session<S> {
    state: Rc<RefCell<State<S>>>,
    sender: Sender,
    settings: Settings,
    session_settings: SessionSettings,
    emitter: Emitter,
    liveness: RefCell<LivenessMonitor>,
}

impl<S: MessagesStorage> Session<S> {
    pub(crate) fn new(
        settings: Settings,
        session_settings: SessionSettings,
        state: Rc<RefCell<State<S>>>,
        sender: Sender,
        emitter: Emitter,
    ) -> Session<S> {
        let liveness = LivenessMonitor::new(settings.heartbeat_interval);
        Session {
            state,
            settings,
            session_settings,
            sender,
            emitter,
            liveness: RefCell::new(liveness),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_settings.session_id
    }

    pub(crate) fn state(&self) -> &Rc<RefCell<State<S>>> {
        &self.state
    }

    pub fn logon_sent(&self) -> bool {
        self.state.borrow().logon_sent()
    }

    pub fn logout_sent(&self) -> bool {
        self.state.borrow().logout_sent()
    }

    pub fn logon_received(&self) -> bool {
        self.state.borrow().logon_received()
    }

    /// Formal connection lifecycle (spec's SessionStateMachine), driven
    /// alongside the booleans above.
    pub fn lifecycle(&self) -> Lifecycle {
        self.state.borrow().lifecycle()
    }

    pub fn is_logged_on(state: &State<S>) -> bool {
        state.logon_received() && state.logon_sent()
    }

    pub fn is_session_time(&self, time: UtcTimestamp) -> bool {
        self.session_settings
            .session_time
            .contains(&time.timestamp().time())
    }

    pub fn is_logon_time(&self, time: UtcTimestamp) -> bool {
        self.session_settings
            .logon_time
            .contains(&time.timestamp().time())
    }

    pub fn is_initiator(&self) -> bool {
        self.state.borrow().initiate()
    }

    pub fn is_acceptor(&self) -> bool {
        !self.state.borrow().initiate()
    }

    pub fn logon_time(&self) -> RangeInclusive<NaiveTime> {
        self.session_settings.logon_time.clone()
    }

    pub fn set_logon_time(&mut self, logon_time: RangeInclusive<NaiveTime>) {
        self.session_settings.logon_time = logon_time;
    }

    pub fn sender_default_appl_ver_id(&self) -> &FixStr {
        &self.session_settings.sender_default_appl_ver_id
    }

    pub fn set_sender_default_appl_ver_id(&mut self, default_appl_veri_id: FixString) {
        self.session_settings.sender_default_appl_ver_id = default_appl_veri_id;
    }

    pub fn target_default_appl_ver_id(&self) -> &FixStr {
        &self.session_settings.target_default_appl_ver_id
    }

    pub fn set_target_default_appl_ver_id(&mut self, default_appl_veri_id: FixString) {
        self.session_settings.target_default_appl_ver_id = default_appl_veri_id;
    }

    fn get_expected_sender_num(&self) -> SeqNum {
        self.state.borrow().next_sender_msg_seq_num()
    }

    fn get_expected_target_num(&self) -> SeqNum {
        self.state.borrow().next_target_msg_seq_num()
    }

    fn is_good_time(&self, sending_time: UtcTimestamp) -> bool {
        if !self.session_settings.check_latency {
            return true;
        }
        Utc::now() - sending_time.timestamp()
            <= chrono::Duration::from_std(self.session_settings.max_latency).expect("duration")
    }

    fn is_target_too_high(state: &State<S>, msg_seq_num: SeqNum) -> bool {
        msg_seq_num > state.next_target_msg_seq_num()
    }

    fn is_target_too_low(state: &State<S>, msg_seq_num: SeqNum) -> bool {
        msg_seq_num < state.next_target_msg_seq_num()
    }

    fn is_correct_comp_id(&self, sender_comp_id: &FixStr, target_comp_id: &FixStr) -> bool {
        if !self.session_settings.check_comp_id {
            return true;
        }

        self.session_settings.session_id.sender_comp_id() == target_comp_id
            && self.session_settings.session_id.target_comp_id() == sender_comp_id
    }

    fn should_send_reset(&self) -> bool {
        (self.session_settings.reset_on_logon
            || self.session_settings.reset_on_logout
            || self.session_settings.reset_on_disconnect)
            && self.get_expected_target_num() == 1
            && self.get_expected_sender_num() == 1
    }

    fn valid_logon_state(state: &State<S>, msg_type: MsgType) -> bool {
        if (msg_type == MsgType::Logon && state.reset_sent()) || state.reset_received() {
            return true;
        }
        if (msg_type == MsgType::Logon && !state.logon_received())
            || (msg_type != MsgType::Logon && state.logon_received())
        {
            return true;
        }
        if msg_type == MsgType::Logout && state.logon_sent() {
            return true;
        }
        if msg_type != MsgType::Logout && state.logon_sent() {
            return true;
        }
        if msg_type == MsgType::SequenceReset {
            return true;
        }
        if msg_type == MsgType::Reject {
            return true;
        }

        false
    }

    #[instrument(
        level = "trace",
        skip_all,
        fields(msg_type = ?msg.header.msg_type),
        err, ret
    )]
    async fn verify(
        &self,
        msg: Box<FixtMessage>,
        check_too_high: bool,
        check_too_low: bool,
    ) -> Result<(), VerifyError> {
        let sender_comp_id = &msg.header.sender_comp_id;
        let target_comp_id = &msg.header.target_comp_id;
        let sending_time = msg.header.sending_time;
        let msg_seq_num = msg.header.msg_seq_num;
        let msg_type = msg.header.msg_type;

        let state = self.state.borrow();

        if !Self::valid_logon_state(&state, msg_type) {
            return Err(VerifyError::invalid_logon_state());
        } else if !self.is_good_time(sending_time) {
            warn!("SendingTime<52> verification failed");
            return Err(VerifyError::invalid_time());
        } else if !self.is_correct_comp_id(sender_comp_id, target_comp_id) {
            warn!("CompID verification failed");
            return Err(VerifyError::invalid_comp_id());
        } else if check_too_high && Self::is_target_too_high(&state, msg_seq_num) {
            warn!("target too high");
            return Err(VerifyError::target_seq_num_too_high(msg_seq_num));
        } else if check_too_low && Self::is_target_too_low(&state, msg_seq_num) {
            warn!("target too low");
            if msg.header.poss_dup_flag.unwrap_or(false) {
                if msg_type != MsgType::SequenceReset {
                    let orig_sending_time = msg
                        .header
                        .orig_sending_time
                        .ok_or_else(VerifyError::missing_orig_time)?;
                    if orig_sending_time.timestamp() > sending_time.timestamp() {
                        return Err(VerifyError::invalid_orig_time());
                    }
                }
                return Err(VerifyError::Duplicate);
            } else {
                return Err(VerifyError::seq_num_too_low(
                    msg_seq_num,
                    state.next_target_msg_seq_num(),
                ));
            }
        }
        drop(state);

        // Deliver the message to the application layer and let it veto the
        // message via `InputResponder` (reject it, request a logout or force
        // a disconnection) before it is considered accepted.
        let (tx, rx) = oneshot::channel();
        match msg.msg_cat() {
            MsgCat::Admin => {
                self.emitter
                    .send(FixEventInternal::AdmMsgIn(Some(msg), Some(tx)))
                    .await
            }
            MsgCat::App => {
                self.emitter
                    .send(FixEventInternal::AppMsgIn(Some(msg), Some(tx)))
                    .await
            }
        }

        match rx.await {
            Ok(InputResponderMsg::Reject {
                ref_msg_type,
                ref_seq_num,
                reason,
                text,
                ref_tag_id,
            }) => Err(VerifyError::AppReject {
                ref_msg_type,
                ref_seq_num,
                reason,
                text,
                ref_tag_id,
            }),
            Ok(InputResponderMsg::Logout {
                session_status,
                text,
                disconnect,
            }) => Err(VerifyError::AppLogout {
                session_status,
                text,
                disconnect,
            }),
            Ok(InputResponderMsg::Disconnect { reason }) => Err(VerifyError::Disconnect(
                reason.unwrap_or_else(|| "application requested disconnect".to_owned()),
            )),
            // Responder dropped without a decision: accept the message.
            Err(_) => {
                if check_too_high || check_too_low {
                    let mut state = self.state.borrow_mut();
                    if let Some(range) = state.resend_range() {
                        if msg_seq_num >= *range.end() {
                            info!(?range, "outstanding ResendRequest<2> range satisfied");
                            state.set_resend_range(None);
                        }
                    }
                }
                Ok(())
            }
        }
    }

    fn send_logon_response(&self, state: &mut State<S>) {
        let reset_seq_num_flag = self.should_send_reset().then_some(true);

        let logon_response = Box::new(FixtMessage {
            header: self.new_header(MsgType::Logon),
            body: Message::Logon(Logon {
                encrypt_method: EncryptMethod::NoneOther,
                heart_bt_int: state.heart_bt_int(),
                raw_data: None,
                reset_seq_num_flag,
                next_expected_msg_seq_num: self
                    .session_settings
                    .enable_next_expected_msg_seq_num
                    .then(|| state.next_target_msg_seq_num()),
                max_message_size: None,
                test_message_indicator: None,
                username: None,
                password: None,
                default_appl_ver_id: DefaultApplVerId::Fix50Sp2,
                msg_type_grp: None,
            }),
            trailer: self.new_trailer(),
        });

        if reset_seq_num_flag.is_some() {
            state.reset();
        }
        state.set_test_request(0);
        state.set_logon_sent(true);
        state.set_reset_sent(reset_seq_num_flag.unwrap_or(false));
        self.send_raw_msg(logon_response);
    }

    /// Build and send Logon<A> as the connection initiator.
    pub(crate) fn send_logon_request(&self, state: &mut State<S>) {
        let reset_seq_num_flag = self.session_settings.reset_on_logon.then_some(true);
        if reset_seq_num_flag.is_some() {
            state.reset();
        }

        let logon_request = Box::new(FixtMessage {
            header: self.new_header(MsgType::Logon),
            body: Message::Logon(Logon {
                encrypt_method: EncryptMethod::NoneOther,
                heart_bt_int: self.settings.heartbeat_interval.as_secs() as Int,
                raw_data: None,
                reset_seq_num_flag,
                next_expected_msg_seq_num: self
                    .session_settings
                    .enable_next_expected_msg_seq_num
                    .then(|| state.next_target_msg_seq_num()),
                max_message_size: None,
                test_message_indicator: None,
                username: None,
                password: None,
                default_appl_ver_id: DefaultApplVerId::Fix50Sp2,
                msg_type_grp: None,
            }),
            trailer: self.new_trailer(),
        });

        state.set_heart_bt_int(self.settings.heartbeat_interval.as_secs() as Int);
        state.set_logon_sent(true);
        state.set_reset_sent(reset_seq_num_flag.unwrap_or(false));
        self.send_raw_msg(logon_request);
    }

    /// Send Logout<5>. `session_status` is folded into the human readable
    /// text when no explicit text is given, since the generated `Logout`
    /// message carries no SessionStatus(1409) field of its own.
    pub(crate) fn send_logout(
        &self,
        state: &mut State<S>,
        session_status: Option<SessionStatus>,
        text: Option<FixString>,
    ) {
        let text = text.or_else(|| {
            session_status.map(|status| {
                FixString::from_ascii_lossy(format!("{status:?}").into_bytes())
            })
        });

        let logout = Box::new(FixtMessage {
            header: self.new_header(MsgType::Logout),
            body: Message::Logout(Logout {
                encoded_text: None,
                text,
            }),
            trailer: self.new_trailer(),
        });
        self.send_raw_msg(logout);
        state.set_logout_sent(true);
        state.apply_lifecycle(LifecycleEvent::LogoutStarted);
    }

    /// How long to wait for the peer's Logout<5> response once we sent ours,
    /// before giving up and tearing the connection down unilaterally.
    pub(crate) fn logout_timeout(&self) -> Option<Duration> {
        self.state
            .borrow()
            .logout_sent()
            .then_some(self.settings.heartbeat_interval)
    }

    fn send_reject(
        &self,
        msg_type: MsgType,
        msg_seq_num: SeqNum,
        reason: SessionRejectReason,
        tag: Option<FieldTag>,
    ) {
        if msg_type != MsgType::Logon
            && msg_type != MsgType::SequenceReset
            && msg_seq_num == self.state.borrow().next_target_msg_seq_num()
        {
            self.state.borrow_mut().incr_next_target_msg_seq_num();
        }

        info!(
            "Message {} Rejected: {:?} (tag={:?})",
            msg_seq_num, reason, tag
        );

        let reject = Box::new(FixtMessage {
            header: self.new_header(MsgType::Reject),
            body: Message::Reject(Reject {
                ref_seq_num: msg_seq_num,
                ref_tag_id: tag.map(|v| v as Int),
                ref_msg_type: Some(msg_type.as_fix_str().to_owned()),
                session_reject_reason: Some(reason),
                text: Some(reason.as_fix_str().to_owned()),
                encoded_text: None,
            }),
            trailer: self.new_trailer(),
        });

        self.send_raw_msg(reject);
    }

    fn send_reject_with_text(
        &self,
        ref_msg_type: FixString,
        ref_seq_num: SeqNum,
        reason: SessionRejectReason,
        ref_tag_id: Option<i64>,
        text: FixString,
    ) {
        info!(%ref_seq_num, ?reason, "Message rejected by application");

        let reject = Box::new(FixtMessage {
            header: self.new_header(MsgType::Reject),
            body: Message::Reject(Reject {
                ref_seq_num,
                ref_tag_id: ref_tag_id.map(|v| v as Int),
                ref_msg_type: Some(ref_msg_type),
                session_reject_reason: Some(reason),
                text: Some(text),
                encoded_text: None,
            }),
            trailer: self.new_trailer(),
        });

        self.send_raw_msg(reject);
    }

    fn send_resend_request(&self, msg_seq_num: SeqNum) {
        let begin_seq_no = self.get_expected_target_num();
        let end_seq_no = msg_seq_num - 1;

        let resend_request = Box::new(FixtMessage {
            header: self.new_header(MsgType::ResendRequest),
            body: Message::ResendRequest(ResendRequest {
                begin_seq_no,
                end_seq_no,
            }),
            trailer: self.new_trailer(),
        });

        self.send_raw_msg(resend_request);

        self.state
            .borrow_mut()
            .set_resend_range(Some(begin_seq_no..=end_seq_no));
    }

    fn send_gap_fill(&self, new_seq_no_start: SeqNum, new_seq_no: SeqNum) {
        let mut header = self.new_header(MsgType::SequenceReset);
        header.msg_seq_num = new_seq_no_start;
        header.poss_dup_flag = Some(true);

        let gap_fill = Box::new(FixtMessage {
            header,
            body: Message::SequenceReset(SequenceReset {
                gap_fill_flag: Some(true),
                new_seq_no,
            }),
            trailer: self.new_trailer(),
        });
        self.send_raw_msg(gap_fill);
    }

    fn resend_stored_message(&self, mut stored: FixtMessage) {
        stored.header.poss_dup_flag = Some(true);
        stored.header.orig_sending_time = Some(stored.header.sending_time);
        self.send_raw_msg(Box::new(stored));
    }

    /// New outgoing header. `msg_seq_num` is left at `0`, the output stream
    /// fills it with the next sender sequence number (and advances the
    /// counter) right before serialization; callers that need to replay a
    /// historical sequence number (resend) set `header.msg_seq_num`
    /// themselves afterwards.
    fn new_header(&self, msg_type: MsgType) -> Box<Header> {
        Box::new(Header {
            begin_string: self.session_settings.session_id.begin_string().to_owned(),
            body_length: 0,
            msg_type,
            sender_comp_id: self.session_settings.session_id.sender_comp_id().to_owned(),
            target_comp_id: self.session_settings.session_id.target_comp_id().to_owned(),
            on_behalf_of_comp_id: None,
            deliver_to_comp_id: None,
            secure_data: None,
            msg_seq_num: 0,
            sender_sub_id: None,
            sender_location_id: None,
            target_sub_id: None,
            target_location_id: None,
            on_behalf_of_sub_id: None,
            on_behalf_of_location_id: None,
            deliver_to_sub_id: None,
            deliver_to_location_id: None,
            poss_dup_flag: None,
            poss_resend: None,
            sending_time: UtcTimestamp::now_with_secs(),
            orig_sending_time: None,
            xml_data: None,
            message_encoding: None,
            last_msg_seq_num_processed: None,
            hop_grp: None,
            appl_ver_id: None,
            cstm_appl_ver_id: None,
        })
    }

    fn new_trailer(&self) -> Box<Trailer> {
        Box::new(Trailer {
            signature: None,
            check_sum: FixString::new(),
        })
    }

    fn send_raw_msg(&self, msg: Box<FixtMessage>) {
        if let Err(msg) = self.sender.send_raw(msg) {
            error!(msg_type = ?msg.header.msg_type, "failed to send, output channel closed");
        }
    }

    /// Tear the session down. Does not emit `FixEvent::Logout` itself; that
    /// is done by `emit_logout` once the output queue finished flushing, so
    /// the event is delivered in a deterministic order relative to the last
    /// Logout<5> message sent or received.
    pub(crate) fn disconnect(&self, state: &mut State<S>, reason: DisconnectReason) {
        if state.disconnected() {
            return;
        }
        info!(?reason, "disconnecting");

        state.apply_lifecycle(LifecycleEvent::Disconnected);
        state.set_disconnected(true);
        state.set_logon_received(false);
        state.set_logon_sent(false);
        state.set_logout_sent(false);
        state.set_reset_received(false);
        state.set_reset_sent(false);
        state.clear_queue();
        state.set_resend_range(None);
        if self.session_settings.reset_on_disconnect {
            state.reset();
        }
        self.liveness.borrow_mut().cancel();
        self.sender.disconnect(reason);
    }

    pub(crate) async fn emit_logout(&self, reason: DisconnectReason) {
        self.emitter
            .send(FixEventInternal::Logout(self.session_id().clone(), reason))
            .await;
    }

    async fn on_heartbeat(&self, message: Box<FixtMessage>) -> Result<(), VerifyError> {
        trace!("got heartbeat");
        let test_req_id = {
            let Message::Heartbeat(ref heartbeat) = message.body else {
                unreachable!()
            };
            heartbeat.test_req_id.clone()
        };

        self.verify(message, false, true).await?;

        if let Some(test_req_id) = test_req_id {
            self.state
                .borrow_mut()
                .validate_grace_period_test_req_id(&test_req_id);
        }
        self.state.borrow_mut().incr_next_target_msg_seq_num();
        Ok(())
    }

    /// Got TestRequest, answer with Heartbeat.
    async fn on_test_request(&self, message: Box<FixtMessage>) -> Result<(), VerifyError> {
        trace!("on_test_request");
        let test_req_id = {
            let Message::TestRequest(ref test_request) = message.body else {
                unreachable!()
            };
            test_request.test_req_id.clone()
        };

        self.verify(message, false, true).await?;

        let heartbeat = Box::new(FixtMessage {
            header: self.new_header(MsgType::Heartbeat),
            body: Message::Heartbeat(Heartbeat {
                test_req_id: Some(test_req_id),
            }),
            trailer: self.new_trailer(),
        });
        trace!("Send Heartbeat");
        self.send_raw_msg(heartbeat);

        self.state.borrow_mut().incr_next_target_msg_seq_num();

        Ok(())
    }

    /// Replay stored outbound messages for `[begin_seq_no, end_seq_no]`,
    /// collapsing runs of admin messages (and gaps left by messages the
    /// store no longer has) into a single GapFill SequenceReset.
    async fn on_resend_request(&self, message: Box<FixtMessage>) -> Result<(), VerifyError> {
        trace!("on_resend_request");
        let (begin_seq_no, end_seq_no) = {
            let Message::ResendRequest(ref resend_request) = message.body else {
                unreachable!()
            };
            (resend_request.begin_seq_no, resend_request.end_seq_no)
        };

        self.verify(message, false, true).await?;

        let end_seq_no = if end_seq_no == 0 {
            self.get_expected_sender_num().saturating_sub(1)
        } else {
            end_seq_no
        };

        info!(begin_seq_no, end_seq_no, "replaying stored messages");

        let raw_messages = self
            .state
            .borrow_mut()
            .fetch_range(begin_seq_no..=end_seq_no);

        let mut next_seq_no = begin_seq_no;
        let mut gap_start: Option<SeqNum> = None;

        for raw in raw_messages {
            let Ok((_, raw_msg)) = deserializer::raw_message(&raw) else {
                continue;
            };
            let Ok(stored) = FixtMessage::from_raw_message(raw_msg) else {
                continue;
            };
            let seq_num = stored.header.msg_seq_num;

            if seq_num > next_seq_no {
                // A message that used to be in this range is no longer in
                // the store (already archived/pruned); treat it as a gap.
                gap_start.get_or_insert(next_seq_no);
            }

            if stored.msg_cat() == MsgCat::Admin && stored.header.msg_type != MsgType::Reject {
                gap_start.get_or_insert(seq_num);
            } else {
                if let Some(start) = gap_start.take() {
                    self.send_gap_fill(start, seq_num);
                }
                self.resend_stored_message(stored);
            }
            next_seq_no = seq_num + 1;
        }

        if next_seq_no <= end_seq_no {
            gap_start.get_or_insert(next_seq_no);
        }
        if let Some(start) = gap_start {
            self.send_gap_fill(start, end_seq_no + 1);
        }

        self.state.borrow_mut().incr_next_target_msg_seq_num();

        Ok(())
    }

    async fn on_reject(&self, message: Box<FixtMessage>) -> Result<(), VerifyError> {
        trace!("on_reject");

        self.verify(message, false, true).await?;

        self.state.borrow_mut().incr_next_target_msg_seq_num();

        Ok(())
    }

    /// SequenceReset-GapFill sets `next_target_msg_seq_num` directly without
    /// the usual too-low check (that's the entire point of a gap fill), but
    /// still rejects a `NewSeqNo` at or below the message's own MsgSeqNum(34)
    /// (it would shrink, not advance, the expected sequence) and merely logs
    /// a warning when `NewSeqNo` is at or below the current expected number
    /// but still above the message's own header sequence.
    /// SequenceReset-Reset resets both directions (matches source behaviour,
    /// flagged in DESIGN.md as a deviation from strict FIX semantics), and
    /// rejects a `NewSeqNo` that wouldn't advance `next_target_msg_seq_num`.
    async fn on_sequence_reset(&self, message: Box<FixtMessage>) -> Result<(), VerifyError> {
        trace!("on_sequence_reset");
        let (gap_fill_flag, new_seq_no, header_seq_num) = {
            let Message::SequenceReset(ref sequence_reset) = message.body else {
                unreachable!()
            };
            (
                sequence_reset.gap_fill_flag.unwrap_or(false),
                sequence_reset.new_seq_no,
                message.header.msg_seq_num,
            )
        };

        if gap_fill_flag {
            self.verify(message, true, false).await?;

            if new_seq_no <= header_seq_num {
                warn!(
                    new_seq_no,
                    header_seq_num, "GapFill new_seq_no does not exceed its own MsgSeqNum"
                );
                return Err(VerifyError::Reject {
                    reason: SessionRejectReason::ValueIsIncorrect,
                    tag: Some(FieldTag::NewSeqNo),
                    logout: false,
                });
            }

            let mut state = self.state.borrow_mut();
            let current = state.next_target_msg_seq_num();
            if new_seq_no > current {
                info!(new_seq_no, "GapFill advancing expected sequence number");
                state.set_next_target_msg_seq_num(new_seq_no);
            } else {
                warn!(new_seq_no, current, "GapFill new_seq_no does not exceed expected sequence number");
            }
        } else {
            self.verify(message, false, false).await?;

            let mut state = self.state.borrow_mut();
            let current = state.next_target_msg_seq_num();
            if new_seq_no <= current {
                warn!(new_seq_no, current, "Reset new_seq_no does not advance expected sequence number");
                return Err(VerifyError::Reject {
                    reason: SessionRejectReason::ValueIsIncorrect,
                    tag: Some(FieldTag::NewSeqNo),
                    logout: false,
                });
            }

            info!(new_seq_no, "SequenceReset-Reset, resetting both directions");
            state.set_next_target_msg_seq_num(new_seq_no);
            state.set_next_sender_msg_seq_num(new_seq_no);
        }

        Ok(())
    }

    async fn on_logout(&self, message: Box<FixtMessage>) -> Result<(), VerifyError> {
        self.verify(message, false, false).await?;

        let mut state = self.state.borrow_mut();
        if state.logout_sent() {
            info!("received logout response");
        } else {
            info!("received logout request");
            self.send_logout(&mut state, None, None);
            info!("sending logout response");
        }

        state.incr_next_target_msg_seq_num();
        if self.session_settings.reset_on_logout {
            state.reset();
        }

        Ok(())
    }

    async fn on_logon(
        &self,
        message: Box<FixtMessage>,
    ) -> Result<Option<DisconnectReason>, VerifyError> {
        let msg_seq_num = message.header.msg_seq_num;

        let (reset_seq_num_flag, heart_bt_int) = {
            let Message::Logon(ref logon) = message.body else {
                unreachable!()
            };
            (logon.reset_seq_num_flag, logon.heart_bt_int)
        };

        let mut state = self.state.borrow_mut();

        if !self.is_logon_time(message.header.sending_time) {
            error!("Received logon outside of valid logon time");
            return Ok(Some(DisconnectReason::InvalidLogonState));
        }

        if let Some(true) = reset_seq_num_flag {
            state.set_reset_received(true);
            info!("Logon contains ResetSeqNumFlag=Y, reseting sequence numbers to 1");
            if !state.reset_sent() {
                state.reset();
            }
        }

        if state.should_send_logon() && !state.reset_received() {
            error!("Received logon response before sending request");
            return Ok(Some(DisconnectReason::InvalidLogonState));
        }

        if !state.initiate() && self.session_settings.reset_on_logon {
            state.reset();
        }

        // MsgSeqNum > expected on Logon is treated as fatal (send Logout and
        // disconnect) instead of accept-then-ResendRequest: it is ambiguous
        // whether the peer's sequence numbers are trustworthy at this point.
        if Self::is_target_too_high(&state, msg_seq_num) && !reset_seq_num_flag.unwrap_or(false) {
            error!(msg_seq_num, expected = state.next_target_msg_seq_num(), "Logon MsgSeqNum too high");
            self.send_logout(
                &mut state,
                None,
                Some(FixString::from_ascii_lossy(
                    b"MsgSeqNum too high on Logon".to_vec(),
                )),
            );
            return Ok(Some(DisconnectReason::MsgSeqNumTooLow));
        }

        drop(state);
        self.verify(message, false, true).await?;
        let mut state = self.state.borrow_mut();

        state.set_logon_received(true);

        if !state.initiate() || (state.reset_received() && !state.reset_sent()) {
            state.apply_lifecycle(LifecycleEvent::LogonStarted);
            state.set_heart_bt_int(heart_bt_int);
            info!("Received logon request");
            self.send_logon_response(&mut state);
            info!("Responding to logon request");
        } else {
            info!("Received logon response");
        }

        state.set_reset_sent(false);
        state.set_reset_received(false);
        state.incr_next_target_msg_seq_num();

        if Self::is_logged_on(&state) {
            state.apply_lifecycle(LifecycleEvent::LogonCompleted);
            drop(state);
            self.liveness.borrow_mut().on_message_received();
            self.emitter
                .send(FixEventInternal::Logon(
                    self.session_settings.session_id.clone(),
                    Some(self.sender.clone()),
                ))
                .await;
        }

        Ok(None)
    }

    fn handle_verify_error(&self, msg_type: MsgType, msg_seq_num: SeqNum, error: VerifyError) -> Option<DisconnectReason> {
        match error {
            VerifyError::Duplicate => None,
            VerifyError::ResendRequest { msg_seq_num } => {
                self.send_resend_request(msg_seq_num);
                None
            }
            VerifyError::Reject { reason, tag, logout } => {
                self.send_reject(msg_type, msg_seq_num, reason, tag);
                if logout {
                    self.send_logout(&mut self.state.borrow_mut(), None, None);
                    Some(DisconnectReason::InvalidLogonState)
                } else {
                    None
                }
            }
            VerifyError::AppReject {
                ref_msg_type,
                ref_seq_num,
                reason,
                text,
                ref_tag_id,
            } => {
                self.send_reject_with_text(ref_msg_type, ref_seq_num, reason, ref_tag_id, text);
                None
            }
            VerifyError::Logout { text, disconnect } => {
                self.send_logout(&mut self.state.borrow_mut(), None, text);
                disconnect.then_some(DisconnectReason::MsgSeqNumTooLow)
            }
            VerifyError::AppLogout {
                session_status,
                text,
                disconnect,
            } => {
                self.send_logout(&mut self.state.borrow_mut(), session_status, text);
                disconnect.then_some(DisconnectReason::ApplicationForcedDisconnect)
            }
            VerifyError::Disconnect(reason) => {
                error!(%reason, "disconnecting");
                Some(DisconnectReason::InvalidLogonState)
            }
        }
    }

    pub(crate) async fn on_message_in(&self, msg: Box<FixtMessage>) -> Option<DisconnectReason> {
        let msg_type = msg.header.msg_type;
        let msg_seq_num = msg.header.msg_seq_num;
        trace!(msg_type = format!("{:?}<{}>", msg_type, msg_type.as_fix_str()));

        self.liveness.borrow_mut().on_message_received();

        let outcome: Result<Option<DisconnectReason>, VerifyError> = match &msg.body {
            Message::Heartbeat(_) => self.on_heartbeat(msg).await.map(|()| None),
            Message::TestRequest(_) => self.on_test_request(msg).await.map(|()| None),
            Message::ResendRequest(_) => self.on_resend_request(msg).await.map(|()| None),
            Message::Reject(_) => self.on_reject(msg).await.map(|()| None),
            Message::SequenceReset(_) => self.on_sequence_reset(msg).await.map(|()| None),
            Message::Logout(_) => self
                .on_logout(msg)
                .await
                .map(|()| Some(DisconnectReason::RemoteRequestedLogout)),
            Message::Logon(_) => self.on_logon(msg).await,
            _ => match self.verify(msg, true, true).await {
                Ok(()) => {
                    self.state.borrow_mut().incr_next_target_msg_seq_num();
                    Ok(None)
                }
                Err(e) => Err(e),
            },
        };

        match outcome {
            Ok(reason) => reason,
            Err(e) => self.handle_verify_error(msg_type, msg_seq_num, e),
        }
    }

    pub(crate) async fn on_message_out(
        self: &Rc<Self>,
        msg: Box<FixtMessage>,
    ) -> Option<Box<FixtMessage>> {
        let (tx, rx) = oneshot::channel();
        match msg.msg_cat() {
            MsgCat::Admin => {
                self.emitter
                    .send(FixEventInternal::AdmMsgOut(Some(msg), Responder::new(tx)))
                    .await
            }
            MsgCat::App => {
                self.emitter
                    .send(FixEventInternal::AppMsgOut(Some(msg), Responder::new(tx)))
                    .await
            }
        }
        rx.await.ok()
    }

    pub(crate) async fn on_deserialize_error(
        self: &Rc<Self>,
        error: DeserializeError,
    ) -> Option<DisconnectReason> {
        trace!("on_deserialize_error");

        // Processing of the next valid FIX message will cause detection of
        // a sequence gap and a ResendRequest<2> will be generated, so
        // garbled input is simply discarded rather than rejected.
        let text = FixString::from_ascii_lossy(error.to_string().into_bytes());
        error!(deserialize_error = %text);
        if let DeserializeError::Reject {
            msg_type,
            seq_num,
            tag,
            reason,
        } = &error
        {
            let reject = Box::new(FixtMessage {
                header: self.new_header(MsgType::Reject),
                body: Message::Reject(Reject {
                    ref_seq_num: *seq_num,
                    ref_tag_id: tag.map(i64::from),
                    ref_msg_type: msg_type.clone(),
                    session_reject_reason: Some(*reason),
                    text: Some(text),
                    encoded_text: None,
                }),
                trailer: self.new_trailer(),
            });
            self.send_raw_msg(reject);
        }

        self.emitter
            .send(FixEventInternal::DeserializeError(
                self.session_id().clone(),
                error,
            ))
            .await;

        None
    }

    /// Returns `true` if the session should be force-disconnected.
    pub(crate) async fn on_in_timeout(&self) -> bool {
        trace!("on_in_timeout");
        match self.liveness.borrow_mut().on_timeout() {
            LivenessAction::Wait => false,
            LivenessAction::SendTestRequest => {
                let test_req_id = FixString::from_ascii_lossy(
                    format!("{}", Utc::now().format("%Y%m%d-%H:%M:%S.%f")).into_bytes(),
                );
                self.state
                    .borrow_mut()
                    .register_grace_period_test_req_id(test_req_id.clone());
                let test_request = Box::new(FixtMessage {
                    header: self.new_header(MsgType::TestRequest),
                    body: Message::TestRequest(TestRequest { test_req_id }),
                    trailer: self.new_trailer(),
                });
                self.send_raw_msg(test_request);
                false
            }
            LivenessAction::ForceDisconnect => true,
        }
    }

    pub(crate) async fn on_out_timeout(&self) {
        trace!("on_out_timeout");
        let heartbeat = Box::new(FixtMessage {
            header: self.new_header(MsgType::Heartbeat),
            body: Message::Heartbeat(Heartbeat { test_req_id: None }),
            trailer: self.new_trailer(),
        });
        self.send_raw_msg(heartbeat);
    }

    pub fn heartbeat_interval(&self) -> Duration {
        self.settings.heartbeat_interval
    }

    /// Cadence at which the input loop should poll [`Self::on_in_timeout`].
    pub fn liveness_tick_interval(&self) -> Duration {
        self.liveness.borrow().tick_interval()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use easyfix_macros::fix_str;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{application::events_channel, messages_storage::NullStorage, SenderMsg};

    fn settings() -> Settings {
        Settings {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            sender_comp_id: fix_str!("acceptor").to_owned(),
            sender_sub_id: None,
            heartbeat_interval: Duration::from_secs(30),
            auto_disconnect_after_no_logon_received: Duration::from_secs(5),
            tls: None,
        }
    }

    fn session_settings() -> SessionSettings {
        SessionSettings {
            session_id: SessionId::new(
                fix_str!("FIXT.1.1").to_owned(),
                fix_str!("acceptor").to_owned(),
                fix_str!("client_1").to_owned(),
            ),
            session_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
                ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            logon_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
                ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            send_redundant_resend_requests: false,
            // Comp-id verification is out of scope for these tests, so it is
            // turned off and every constructed message header can use
            // whatever sender/target pair is convenient.
            check_comp_id: false,
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
            max_retries: None,
        }
    }

    /// Builds a `Session` wired to a raw channel so tests can inspect
    /// everything it sends, and drops the event receiver immediately: with
    /// nobody polling the event stream, `verify`'s application round-trip
    /// always resolves to "accept" (the oneshot responder is dropped
    /// unanswered), which is exactly the behaviour an application that
    /// never vetoes a message would show.
    fn new_session() -> (Session<NullStorage>, mpsc::UnboundedReceiver<SenderMsg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (emitter, _event_stream) = events_channel();
        let state = Rc::new(RefCell::new(State::new(NullStorage::new())));
        // valid_logon_state() requires an already-completed logon for every
        // message type these tests exercise (ResendRequest, SequenceReset).
        state.borrow_mut().set_logon_sent(true);
        state.borrow_mut().set_logon_received(true);
        let session = Session::new(settings(), session_settings(), state, Sender::new(tx), emitter);
        (session, rx)
    }

    fn resend_request(msg_seq_num: SeqNum, begin_seq_no: SeqNum, end_seq_no: SeqNum) -> Box<FixtMessage> {
        Box::new(FixtMessage {
            header: Box::new(Header {
                begin_string: FixString::new(),
                body_length: 0,
                msg_type: MsgType::ResendRequest,
                sender_comp_id: FixString::new(),
                target_comp_id: FixString::new(),
                on_behalf_of_comp_id: None,
                deliver_to_comp_id: None,
                secure_data: None,
                msg_seq_num,
                sender_sub_id: None,
                sender_location_id: None,
                target_sub_id: None,
                target_location_id: None,
                on_behalf_of_sub_id: None,
                on_behalf_of_location_id: None,
                deliver_to_sub_id: None,
                deliver_to_location_id: None,
                poss_dup_flag: None,
                poss_resend: None,
                sending_time: UtcTimestamp::now_with_secs(),
                orig_sending_time: None,
                xml_data: None,
                message_encoding: None,
                last_msg_seq_num_processed: None,
                hop_grp: None,
                appl_ver_id: None,
                cstm_appl_ver_id: None,
            }),
            body: Message::ResendRequest(ResendRequest {
                begin_seq_no,
                end_seq_no,
            }),
            trailer: Box::new(Trailer {
                signature: None,
                check_sum: FixString::new(),
            }),
        })
    }

    #[test]
    fn send_resend_request_records_range_and_emits_request() {
        let (session, mut rx) = new_session();
        session.state.borrow_mut().set_next_target_msg_seq_num(5);

        session.send_resend_request(10);

        assert_eq!(session.state.borrow().resend_range(), Some(5..=9));
        let SenderMsg::Msg(sent) = rx.try_recv().unwrap() else {
            panic!("expected a message, not a disconnect");
        };
        let Message::ResendRequest(resend_request) = sent.body else {
            panic!("expected ResendRequest, got {:?}", sent.header.msg_type);
        };
        assert_eq!(resend_request.begin_seq_no, 5);
        assert_eq!(resend_request.end_seq_no, 9);
    }

    #[test]
    fn send_gap_fill_emits_poss_dup_sequence_reset() {
        let (session, mut rx) = new_session();

        session.send_gap_fill(3, 7);

        let SenderMsg::Msg(sent) = rx.try_recv().unwrap() else {
            panic!("expected a message, not a disconnect");
        };
        assert_eq!(sent.header.msg_seq_num, 3);
        assert_eq!(sent.header.poss_dup_flag, Some(true));
        let Message::SequenceReset(sequence_reset) = sent.body else {
            panic!("expected SequenceReset, got {:?}", sent.header.msg_type);
        };
        assert_eq!(sequence_reset.gap_fill_flag, Some(true));
        assert_eq!(sequence_reset.new_seq_no, 7);
    }

    #[tokio::test]
    async fn on_resend_request_against_empty_store_sends_one_gap_fill_for_whole_range() {
        let (session, mut rx) = new_session();
        session.state.borrow_mut().set_next_target_msg_seq_num(9);

        session
            .on_resend_request(resend_request(9, 1, 3))
            .await
            .unwrap();

        let SenderMsg::Msg(sent) = rx.try_recv().unwrap() else {
            panic!("expected a message, not a disconnect");
        };
        let Message::SequenceReset(sequence_reset) = sent.body else {
            panic!("expected SequenceReset, got {:?}", sent.header.msg_type);
        };
        assert_eq!(sent.header.msg_seq_num, 1);
        assert_eq!(sequence_reset.new_seq_no, 4);
        assert!(rx.try_recv().is_err(), "no further messages expected");
        // The ResendRequest<2> itself still advances the target seq num.
        assert_eq!(session.state.borrow().next_target_msg_seq_num(), 10);
    }

    fn sequence_reset_gap_fill(msg_seq_num: SeqNum, new_seq_no: SeqNum) -> Box<FixtMessage> {
        let mut msg = resend_request(msg_seq_num, 0, 0);
        msg.header.msg_type = MsgType::SequenceReset;
        msg.body = Message::SequenceReset(SequenceReset {
            gap_fill_flag: Some(true),
            new_seq_no,
        });
        msg
    }

    #[tokio::test]
    async fn on_sequence_reset_gap_fill_advances_target_seq_num() {
        let (session, _rx) = new_session();
        session.state.borrow_mut().set_next_target_msg_seq_num(3);

        session
            .on_sequence_reset(sequence_reset_gap_fill(3, 10))
            .await
            .unwrap();

        assert_eq!(session.state.borrow().next_target_msg_seq_num(), 10);
    }

    #[tokio::test]
    async fn on_sequence_reset_gap_fill_rejects_new_seq_no_below_current() {
        let (session, _rx) = new_session();
        session.state.borrow_mut().set_next_target_msg_seq_num(10);

        let result = session
            .on_sequence_reset(sequence_reset_gap_fill(10, 2))
            .await;

        assert!(matches!(
            result,
            Err(VerifyError::Reject {
                reason: SessionRejectReason::ValueIsIncorrect,
                ..
            })
        ));
        // Rejected GapFill must not have moved the target seq num.
        assert_eq!(session.state.borrow().next_target_msg_seq_num(), 10);
    }

    fn sequence_reset_reset(msg_seq_num: SeqNum, new_seq_no: SeqNum) -> Box<FixtMessage> {
        let mut msg = resend_request(msg_seq_num, 0, 0);
        msg.header.msg_type = MsgType::SequenceReset;
        msg.body = Message::SequenceReset(SequenceReset {
            gap_fill_flag: Some(false),
            new_seq_no,
        });
        msg
    }

    #[tokio::test]
    async fn on_sequence_reset_reset_advances_both_directions() {
        let (session, _rx) = new_session();
        session.state.borrow_mut().set_next_target_msg_seq_num(3);
        session.state.borrow_mut().set_next_sender_msg_seq_num(3);

        session
            .on_sequence_reset(sequence_reset_reset(3, 10))
            .await
            .unwrap();

        assert_eq!(session.state.borrow().next_target_msg_seq_num(), 10);
        assert_eq!(session.state.borrow().next_sender_msg_seq_num(), 10);
    }

    #[tokio::test]
    async fn on_sequence_reset_reset_rejects_new_seq_no_not_above_current() {
        let (session, _rx) = new_session();
        session.state.borrow_mut().set_next_target_msg_seq_num(10);
        session.state.borrow_mut().set_next_sender_msg_seq_num(10);

        let result = session
            .on_sequence_reset(sequence_reset_reset(10, 2))
            .await;

        assert!(matches!(
            result,
            Err(VerifyError::Reject {
                reason: SessionRejectReason::ValueIsIncorrect,
                ..
            })
        ));
        // Rejected Reset must not have moved either seq num.
        assert_eq!(session.state.borrow().next_target_msg_seq_num(), 10);
        assert_eq!(session.state.borrow().next_sender_msg_seq_num(), 10);
    }
}
