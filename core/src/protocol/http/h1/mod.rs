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

//! HTTP/1.1 wire codec: pull parser for responses, serializer for requests.
//! The request engine consumes this through the event/writer interface only.

mod parser;
mod writer;

pub use parser::{Event, ParseState, PayloadRead, ResponseParser};
pub use writer::RequestWriter;
