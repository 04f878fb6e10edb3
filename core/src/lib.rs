/*
 * lib.rs
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

//! Embeddable HTTP(S) client core.
//!
//! Two coupled pieces: [`net::Connection`], one read/write/close contract over
//! plain TCP or a rustls session (handshake, reconnect, graceful shutdown);
//! and [`protocol::http::Request`], the HTTP/1.1 engine that sequences URI
//! parsing, default-header injection, request serialization, response head
//! parsing, and body streaming, with connection reuse via reset.
//!
//! The model is strictly synchronous blocking I/O: one request/response cycle
//! in flight per connection, no internal timeouts or cancellation. Callers
//! wanting bounded waits inject a [`net::SocketConnector`] that configures
//! deadlines on the sockets it opens.

pub mod error;
pub mod net;
pub mod protocol;
pub mod uri;

pub use error::{Error, Result};
pub use net::{Connection, Protocol, SocketConnector, SocketStream, TcpConnector, TrustChain};
pub use protocol::http::{BodyReader, ClientOptions, Headers, Method, PayloadPolicy, Request, Status};
pub use uri::Uri;
