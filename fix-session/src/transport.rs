//! Optional TLS transport.
//!
//! The reference engine is plain-TCP only; TLS support follows the
//! `rustls` + `tokio-rustls` convention used elsewhere in this workspace's
//! source corpus for wrapping a `TcpStream` in a negotiated stream.

use std::{fs::File, io::BufReader, net::SocketAddr, path::Path, sync::Arc};

use rustls::{ClientConfig, RootCertStore, ServerConfig};
use rustls_pemfile::{certs, private_key};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{TcpListener, TcpStream},
};
use tokio_rustls::{TlsAcceptor, TlsConnector};
use tracing::instrument;

use crate::{
    acceptor::Connection,
    settings::{Settings, TlsConfig},
};

#[derive(Debug, thiserror::Error)]
pub enum TlsSetupError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no certificate found in {0}")]
    NoCertificate(String),
    #[error("no private key found in {0}")]
    NoPrivateKey(String),
    #[error("rustls configuration error: {0}")]
    Rustls(#[from] rustls::Error),
}

fn load_certs(path: &Path) -> Result<Vec<rustls::pki_types::CertificateDer<'static>>, TlsSetupError> {
    let file = File::open(path).map_err(|source| TlsSetupError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let certs = certs(&mut BufReader::new(file)).collect::<Result<Vec<_>, _>>().map_err(|source| {
        TlsSetupError::Io {
            path: path.display().to_string(),
            source,
        }
    })?;
    if certs.is_empty() {
        return Err(TlsSetupError::NoCertificate(path.display().to_string()));
    }
    Ok(certs)
}

fn load_private_key(path: &Path) -> Result<rustls::pki_types::PrivateKeyDer<'static>, TlsSetupError> {
    let file = File::open(path).map_err(|source| TlsSetupError::Io {
        path: path.display().to_string(),
        source,
    })?;
    private_key(&mut BufReader::new(file))
        .map_err(|source| TlsSetupError::Io {
            path: path.display().to_string(),
            source,
        })?
        .ok_or_else(|| TlsSetupError::NoPrivateKey(path.display().to_string()))
}

/// Build a server-side TLS acceptor from a PEM certificate chain and key.
pub fn server_acceptor(tls: &TlsConfig) -> Result<TlsAcceptor, TlsSetupError> {
    let certs = load_certs(&tls.certfile)?;
    let key = load_private_key(&tls.keyfile)?;
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    Ok(TlsAcceptor::from(Arc::new(config)))
}

/// Build a client-side TLS connector trusting the platform's native roots.
pub fn client_connector() -> TlsConnector {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

/// `acceptor::Connection` implementation that terminates TLS on every
/// accepted socket before handing the plaintext stream up to the session
/// layer.
pub struct TlsTcpConnection {
    listener: TcpListener,
    acceptor: TlsAcceptor,
}

impl TlsTcpConnection {
    pub async fn new(
        socket_addr: impl Into<SocketAddr>,
        tls: &TlsConfig,
    ) -> Result<TlsTcpConnection, std::io::Error> {
        let listener = TcpListener::bind(socket_addr.into()).await?;
        let acceptor = server_acceptor(tls)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        Ok(TlsTcpConnection { listener, acceptor })
    }
}

impl Connection for TlsTcpConnection {
    #[instrument(skip_all)]
    async fn accept(
        &mut self,
    ) -> Result<
        (
            impl AsyncRead + Unpin + 'static,
            impl AsyncWrite + Unpin + 'static,
            SocketAddr,
        ),
        std::io::Error,
    > {
        let (tcp_stream, peer_addr) = self.listener.accept().await?;
        tcp_stream.set_nodelay(true)?;
        let tls_stream = self.acceptor.accept(tcp_stream).await?;
        let (reader, writer) = tokio::io::split(tls_stream);
        Ok((reader, writer, peer_addr))
    }
}

/// Connect and perform a TLS handshake for the initiator side.
pub async fn connect_tls(
    settings: &Settings,
    tls: &TlsConfig,
) -> Result<
    (
        impl AsyncRead + Unpin + 'static,
        impl AsyncWrite + Unpin + 'static,
    ),
    std::io::Error,
> {
    let addr = SocketAddr::from((settings.host, settings.port));
    let tcp_stream = TcpStream::connect(addr).await?;
    tcp_stream.set_nodelay(true)?;
    let server_name = rustls::pki_types::ServerName::try_from(tls.server_name.clone())
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let tls_stream = client_connector().connect(server_name, tcp_stream).await?;
    Ok(tokio::io::split(tls_stream))
}
