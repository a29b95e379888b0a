use std::time::Duration;

use chrono::NaiveTime;
use easyfix_macros::fix_str;
use easyfix_messages::{fields::FixString, messages::Header};
use fix_engine::{Engine, EngineHandle, EngineSettings, MessageStoreType, SessionMode};
use fix_session::{
    application::{AsEvent, FixEvent},
    session_id::SessionId,
    settings::{SessionSettings, Settings},
};
use tokio::{runtime::Builder, task::LocalSet};
use tokio_stream::StreamExt;
use tracing::{error, info};

async fn acceptor() {
    let settings = Settings {
        host: "127.0.0.1".parse().unwrap(),
        port: 10050,
        sender_comp_id: "easyfix-acceptor".try_into().unwrap(),
        sender_sub_id: None,
        heartbeat_interval: Duration::from_secs(10),
        auto_disconnect_after_no_logon_received: Duration::from_secs(3),
        tls: None,
    };

    let session_id = SessionId::new(
        FixString::from_ascii_lossy(b"FIXT.1.1".to_vec()),
        settings.sender_comp_id.clone(),
        FixString::from_ascii_lossy(b"client_1".to_vec()),
    );

    let session_settings = SessionSettings {
        session_id: session_id.clone(),
        session_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
            ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
        logon_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap()
            ..=NaiveTime::from_hms_opt(23, 59, 59).unwrap(),

        send_redundant_resend_requests: false,
        check_comp_id: true,
        check_latency: true,
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

        retry_interval: Duration::from_secs(5),
        max_retries: None,
    };

    let engine_settings = EngineSettings {
        mode: SessionMode::Acceptor,
        message_store_type: MessageStoreType::File,
        state_file: Some("./acceptor-example-state".into()),
    };

    let engine = Engine::acceptor(engine_settings, settings, session_settings).unwrap();
    engine.start().await.expect("failed to bind listener");

    let EngineHandle::Acceptor(mut events) = engine.events() else {
        unreachable!("Engine::acceptor always builds an acceptor-mode engine");
    };
    while let Some(mut entry) = events.next().await {
        match entry.as_event() {
            FixEvent::Created(session_id) => info!("Session created: {session_id}"),
            FixEvent::Logon(session_id, sender) => {
                info!("Logon: {session_id}");
                engine.set_sender(sender);
            }
            FixEvent::Logout(session_id, reason) => {
                info!("Logout: {session_id}, reason: {reason:?}");
                engine.clear_sender();
            }
            FixEvent::AppMsgIn(mut msg, _responder) => {
                info!("App input msg: {:?}", msg.msg_type());
                reverse_route(&mut msg.header);
                let _ = engine.send_raw(msg);
            }
            FixEvent::AdmMsgIn(msg, _responder) => info!("Adm input msg: {:?}", msg.msg_type()),
            FixEvent::AppMsgOut(msg, _responder) => info!("App output msg: {:?}", msg.msg_type()),
            FixEvent::AdmMsgOut(msg) => info!("Adm output msg: {:?}", msg.msg_type()),
            FixEvent::DeserializeError(session_id, error) => {
                error!("{session_id}: {error}");
            }
        }
    }
}

fn reverse_route(header: &mut Header) {
    std::mem::swap(&mut header.sender_comp_id, &mut header.target_comp_id);
    std::mem::swap(&mut header.sender_sub_id, &mut header.target_sub_id);
}

fn main() {
    tracing_subscriber::fmt::init();

    let runtime = Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()
        .unwrap();

    let local_set = LocalSet::new();
    local_set.block_on(&runtime, acceptor());
}
