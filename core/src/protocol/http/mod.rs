/*
 * mod.rs
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

//! HTTP/1.1 client engine.
//!
//! - `Request` drives one request/response cycle over an owned Connection:
//!   commit (serialize + flush) → fulfill (parse head) → reader (stream
//!   body), with `reset` reusing the connection for a same-identity target.
//! - `Headers` is the ordered, case-insensitively keyed header store used on
//!   both sides of the exchange.
//! - `h1` is the wire codec: pull parser for response framing, serializer
//!   for request framing.

pub mod h1;
mod headers;
mod request;

pub use headers::Headers;
pub use request::{BodyReader, ClientOptions, Method, PayloadPolicy, Request, Status};
