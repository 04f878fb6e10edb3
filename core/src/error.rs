/*
 * error.rs
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

//! Client errors: URL parsing, connection identity, request shape, transport.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from URL parsing, connection setup, and the request engine.
///
/// URI and request-shape errors are reported before any bytes are written;
/// identity errors (on reset) leave the request state unchanged. Transport
/// errors are surfaced as-is, with no automatic reconnect or retry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scheme is present but not a valid lowercase token, or not http/https.
    #[error("invalid URL scheme")]
    InvalidScheme,
    /// URL structure is malformed (bad `://`, empty or non-numeric port).
    #[error("malformed URL")]
    InvalidUrl,
    #[error("URL has no scheme")]
    MissingScheme,
    #[error("URL has no host")]
    MissingHost,

    /// Reset target uses a different protocol than the open connection.
    #[error("protocol does not match the open connection")]
    ProtocolMismatch,
    /// Reset target names a different host than the open connection.
    #[error("hostname does not match the open connection")]
    HostnameMismatch,
    /// Reset target resolves to a different port than the open connection.
    #[error("port does not match the open connection")]
    PortMismatch,

    #[error("method requires a payload")]
    MissingPayload,
    #[error("method does not allow a payload")]
    MustOmitPayload,
    #[error("URL credentials are missing a username")]
    MissingUsername,
    #[error("URL credentials are missing a password")]
    MissingPassword,
    /// Caller supplied an Authorization header while the URL carries credentials.
    #[error("Authorization header conflicts with URL credentials")]
    AuthorizationMismatch,

    /// Lifecycle operation invoked outside the commit → fulfill → read order.
    #[error("{0} called out of order")]
    OutOfOrder(&'static str),
    /// The wire parser produced body framing before the head was complete.
    #[error("protocol violation: {0}")]
    ProtocolViolation(&'static str),

    #[error("hostname is not a valid TLS server name")]
    InvalidServerName,
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
