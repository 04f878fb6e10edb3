/*
 * writer.rs
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

//! HTTP/1.1 request serialization: request line, header block, payload.
//! Writes into any `io::Write`; the engine points it at an in-memory buffer
//! (buffered mode) or straight at the connection.

use std::io::{self, Write};

use crate::protocol::http::request::Method;

/// Serializes one request in wire order: request line, headers, blank line,
/// payload. The caller flushes at the end of the request so everything is on
/// the wire before the response is awaited.
pub struct RequestWriter<W: Write> {
    out: W,
}

impl<W: Write> RequestWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `METHOD /path[?query][#fragment] HTTP/1.1`
    pub fn write_request_line(
        &mut self,
        method: Method,
        path: &str,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> io::Result<()> {
        self.out.write_all(method.as_str().as_bytes())?;
        self.out.write_all(b" ")?;
        self.out.write_all(path.as_bytes())?;
        if let Some(query) = query {
            self.out.write_all(b"?")?;
            self.out.write_all(query.as_bytes())?;
        }
        if let Some(fragment) = fragment {
            self.out.write_all(b"#")?;
            self.out.write_all(fragment.as_bytes())?;
        }
        self.out.write_all(b" HTTP/1.1\r\n")
    }

    pub fn write_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        write!(self.out, "{}: {}\r\n", name, value)
    }

    /// Terminate the header block.
    pub fn finish_headers(&mut self) -> io::Result<()> {
        self.out.write_all(b"\r\n")
    }

    pub fn write_payload(&mut self, data: &[u8]) -> io::Result<()> {
        self.out.write_all(data)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line_with_query_and_fragment() {
        let mut w = RequestWriter::new(Vec::new());
        w.write_request_line(Method::Get, "/a/b", Some("x=1"), Some("y"))
            .unwrap();
        assert_eq!(w.into_inner(), b"GET /a/b?x=1#y HTTP/1.1\r\n");
    }

    #[test]
    fn bare_request_line() {
        let mut w = RequestWriter::new(Vec::new());
        w.write_request_line(Method::Head, "/", None, None).unwrap();
        assert_eq!(w.into_inner(), b"HEAD / HTTP/1.1\r\n");
    }

    #[test]
    fn full_request_serialization() {
        let mut w = RequestWriter::new(Vec::new());
        w.write_request_line(Method::Post, "/submit", None, None).unwrap();
        w.write_header("Host", "example.test").unwrap();
        w.write_header("Content-Length", "3").unwrap();
        w.finish_headers().unwrap();
        w.write_payload(b"abc").unwrap();
        assert_eq!(
            w.into_inner(),
            b"POST /submit HTTP/1.1\r\nHost: example.test\r\nContent-Length: 3\r\n\r\nabc"
        );
    }
}
