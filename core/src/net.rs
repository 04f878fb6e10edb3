/*
 * net.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Slingshot, an embeddable HTTP(S) client.
 *
 * Slingshot is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Slingshot is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Slingshot.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Connection transport: one read/write/close contract over plain TCP or a
//! rustls session. The socket backend is injected through [`SocketConnector`]
//! so embedders can supply sockets with deadlines, proxies, or test doubles.
//!
//! TLS handshakes advertise ALPN `http/1.1` and complete inside `connect`;
//! close sends a best-effort close-notify before releasing the socket.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;

use log::{debug, trace};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use crate::error::{Error, Result};

/// Application protocol of a connection, fixed at connect time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Map a URL scheme onto a protocol; anything but `http`/`https` is rejected.
    pub fn from_scheme(scheme: &str) -> Result<Self> {
        match scheme {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(Error::InvalidScheme),
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }

    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// A connected byte stream the transport can read, write, and shut down.
pub trait SocketStream: Read + Write + Send {
    /// Close both directions of the stream.
    fn shutdown(&mut self) -> io::Result<()>;
}

impl SocketStream for TcpStream {
    fn shutdown(&mut self) -> io::Result<()> {
        TcpStream::shutdown(self, Shutdown::Both)
    }
}

/// Opens sockets for [`Connection`]. Injected at construction so the backend
/// is a value, not a process-wide constant; reconnect reuses the same
/// connector.
pub trait SocketConnector: Send + Sync {
    fn connect(&self, host: &str, port: u16) -> io::Result<Box<dyn SocketStream>>;
}

/// Default connector: `std::net::TcpStream` with system DNS resolution.
pub struct TcpConnector;

impl SocketConnector for TcpConnector {
    fn connect(&self, host: &str, port: u16) -> io::Result<Box<dyn SocketStream>> {
        let stream = TcpStream::connect((host, port))?;
        Ok(Box::new(stream))
    }
}

/// Caller-supplied certificates for validating a TLS peer. When absent, the
/// handshake runs with no certificate verification at all.
#[derive(Clone)]
pub struct TrustChain {
    roots: RootCertStore,
}

impl TrustChain {
    /// Root store from the platform: native certs first, webpki-roots as fallback.
    pub fn native() -> Self {
        let mut roots = RootCertStore::empty();
        if let Ok(certs) = rustls_native_certs::load_native_certs() {
            for cert in certs {
                let _ = roots.add(cert);
            }
        }
        if roots.is_empty() {
            roots.roots = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
        }
        Self { roots }
    }

    /// Root store from PEM-encoded certificates.
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let mut roots = RootCertStore::empty();
        let mut reader = pem;
        for cert in rustls_pemfile::certs(&mut reader) {
            roots.add(cert?)?;
        }
        if roots.is_empty() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "no certificates in PEM input",
            )));
        }
        Ok(Self { roots })
    }
}

mod danger {
    use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
    use rustls::crypto::WebPkiSupportedAlgorithms;
    use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
    use rustls::{DigitallySignedStruct, SignatureScheme};

    /// Accepts any server certificate. Installed when no trust chain is supplied.
    #[derive(Debug)]
    pub(super) struct NoVerification {
        supported: WebPkiSupportedAlgorithms,
    }

    impl NoVerification {
        pub(super) fn new() -> Self {
            Self {
                supported: rustls::crypto::ring::default_provider()
                    .signature_verification_algorithms,
            }
        }
    }

    impl ServerCertVerifier for NoVerification {
        fn verify_server_cert(
            &self,
            _end_entity: &CertificateDer<'_>,
            _intermediates: &[CertificateDer<'_>],
            _server_name: &ServerName<'_>,
            _ocsp_response: &[u8],
            _now: UnixTime,
        ) -> std::result::Result<ServerCertVerified, rustls::Error> {
            Ok(ServerCertVerified::assertion())
        }

        fn verify_tls12_signature(
            &self,
            _message: &[u8],
            _cert: &CertificateDer<'_>,
            _dss: &DigitallySignedStruct,
        ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
            Ok(HandshakeSignatureValid::assertion())
        }

        fn verify_tls13_signature(
            &self,
            _message: &[u8],
            _cert: &CertificateDer<'_>,
            _dss: &DigitallySignedStruct,
        ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
            Ok(HandshakeSignatureValid::assertion())
        }

        fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
            self.supported.supported_schemes()
        }
    }
}

/// TLS client config advertising ALPN `http/1.1`. No trust chain means no
/// certificate verification.
fn tls_client_config(trust: Option<&TrustChain>) -> Arc<ClientConfig> {
    let mut config = match trust {
        Some(chain) => ClientConfig::builder()
            .with_root_certificates(chain.roots.clone())
            .with_no_client_auth(),
        None => ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(danger::NoVerification::new()))
            .with_no_client_auth(),
    };
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Arc::new(config)
}

/// Unified stream: plain socket or TLS session over one.
enum Stream {
    Plain(Box<dyn SocketStream>),
    Tls(StreamOwned<ClientConnection, Box<dyn SocketStream>>),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(s) => s.read(buf),
            Stream::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(s) => s.write(buf),
            Stream::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Plain(s) => s.flush(),
            Stream::Tls(s) => s.flush(),
        }
    }
}

/// Best-effort teardown: close-notify for TLS (failures swallowed), then
/// socket shutdown.
fn shutdown_stream(stream: &mut Stream) {
    match stream {
        Stream::Plain(sock) => {
            let _ = sock.shutdown();
        }
        Stream::Tls(tls) => {
            tls.conn.send_close_notify();
            while tls.conn.wants_write() {
                match tls.conn.write_tls(&mut tls.sock) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
            }
            let _ = tls.sock.shutdown();
        }
    }
}

/// Surface a handshake failure as a TLS error when rustls is the cause.
fn handshake_error(e: io::Error) -> Error {
    match e
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<rustls::Error>())
    {
        Some(tls) => Error::Tls(tls.clone()),
        None => Error::Io(e),
    }
}

/// Open a socket and, for https, drive the handshake to completion so
/// failures surface here rather than on the first read.
fn open_stream(
    connector: &dyn SocketConnector,
    host: &str,
    port: u16,
    tls_config: Option<&Arc<ClientConfig>>,
) -> Result<Stream> {
    let mut sock = connector.connect(host, port)?;
    let Some(config) = tls_config else {
        return Ok(Stream::Plain(sock));
    };
    let server_name =
        ServerName::try_from(host.to_string()).map_err(|_| Error::InvalidServerName)?;
    let mut tls = ClientConnection::new(config.clone(), server_name)?;
    while tls.is_handshaking() {
        if let Err(e) = tls.complete_io(&mut sock) {
            let _ = sock.shutdown();
            return Err(handshake_error(e));
        }
    }
    trace!(
        "TLS handshake with {} complete, alpn={:?}",
        host,
        tls.alpn_protocol().map(String::from_utf8_lossy)
    );
    Ok(Stream::Tls(StreamOwned::new(tls, sock)))
}

/// One client connection: hostname, protocol, resolved port, and the
/// underlying plain or TLS stream. Exclusively owned by one request at a
/// time; dropping it closes the transport gracefully.
pub struct Connection {
    host: String,
    port: u16,
    protocol: Protocol,
    stream: Stream,
    /// Retained for the re-handshake on reconnect; present iff https.
    tls_config: Option<Arc<ClientConfig>>,
    connector: Arc<dyn SocketConnector>,
}

impl Connection {
    /// Connect to `host`, on `port` or the protocol default (80/443). For
    /// https the TLS handshake completes before this returns; a handshake
    /// failure closes the socket and no partially constructed connection
    /// escapes.
    pub fn connect(
        connector: Arc<dyn SocketConnector>,
        host: &str,
        port: Option<u16>,
        protocol: Protocol,
        trust: Option<&TrustChain>,
    ) -> Result<Self> {
        let port = port.unwrap_or_else(|| protocol.default_port());
        let tls_config = match protocol {
            Protocol::Https => Some(tls_client_config(trust)),
            Protocol::Http => None,
        };
        let stream = open_stream(connector.as_ref(), host, port, tls_config.as_ref())?;
        debug!("connected to {}://{}:{}", protocol.scheme(), host, port);
        Ok(Self {
            host: host.to_string(),
            port,
            protocol,
            stream,
            tls_config,
            connector,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn is_secure(&self) -> bool {
        self.protocol == Protocol::Https
    }

    /// Tear down the current transport and re-establish it in place: fresh
    /// socket to the same host and port, fresh handshake if https. The old
    /// stream is kept until the replacement exists, so a failed reconnect
    /// leaves the connection unchanged.
    pub fn reconnect(&mut self) -> Result<()> {
        debug!("reconnecting to {}:{}", self.host, self.port);
        let fresh = open_stream(
            self.connector.as_ref(),
            &self.host,
            self.port,
            self.tls_config.as_ref(),
        )?;
        let mut old = std::mem::replace(&mut self.stream, fresh);
        shutdown_stream(&mut old);
        Ok(())
    }

    /// Close the connection: best-effort TLS close-notify, then socket
    /// shutdown. Equivalent to dropping it.
    pub fn close(self) {}
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        trace!("closing connection to {}:{}", self.host, self.port);
        shutdown_stream(&mut self.stream);
    }
}
