/*
 * parser.rs
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

//! HTTP/1.1 response pull parser: status line, headers, body (Content-Length,
//! chunked, or read-until-close). The caller owns the input buffer and feeds
//! it from the transport; the parser consumes complete tokens and reports
//! when it needs more bytes.

use bytes::{Buf, BytesMut};
use std::io;

/// One parse event pulled from the response stream.
///
/// `Skip` marks bytes the parser consumed without surfacing (e.g. a header
/// line with no colon). `Payload` signals body data is pending; it carries
/// the buffered byte count and consumes nothing — body bytes are drained
/// through [`ResponseParser::read_payload`]. `End` means the response is
/// complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Status { code: u16, reason: String },
    Header { name: String, value: String },
    HeadDone,
    Skip,
    Payload { amount: usize },
    End,
}

/// Outcome of one body read step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadRead {
    /// Bytes copied into the output buffer.
    Data(usize),
    /// The input buffer is exhausted mid-body; feed more bytes.
    NeedInput,
    /// The body is complete.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Idle,
    StatusLine,
    Headers,
    /// Head done; the engine must fix framing via `set_body_mode` or `set_no_body`.
    HeadersComplete,
    Body,
    ChunkSize,
    ChunkData,
    /// Consume the CRLF that terminates a chunk's data.
    ChunkDataEnd,
    ChunkTrailer,
}

/// Pull parser for one HTTP/1.1 response. `next` drives the head; after
/// `HeadDone` the engine calls `set_body_mode` and drains the body with
/// `read_payload`. `rewind` restores the parser for the next response on a
/// reused connection.
pub struct ResponseParser {
    state: ParseState,
    /// Content-Length when known (-1 for chunked or read-until-close).
    content_length: i64,
    bytes_received: i64,
    /// Remaining bytes of the current chunk (chunked encoding).
    chunk_remaining: i64,
    /// Body runs until the peer closes the connection.
    close_delimited: bool,
}

fn invalid(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::StatusLine,
            content_length: -1,
            bytes_received: 0,
            chunk_remaining: 0,
            close_delimited: false,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Restore the parser to the start of a response head.
    pub fn rewind(&mut self) {
        self.state = ParseState::StatusLine;
        self.content_length = -1;
        self.bytes_received = 0;
        self.chunk_remaining = 0;
        self.close_delimited = false;
    }

    /// Find CRLF in buf; returns the byte count up to the start of CRLF.
    fn find_crlf(buf: &[u8]) -> Option<usize> {
        let mut i = 0;
        while i + 1 < buf.len() {
            if buf[i] == b'\r' && buf[i + 1] == b'\n' {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Pull the next event. `Ok(None)` means no complete token is buffered
    /// yet; read more from the transport and call again. Once the head is
    /// done, body states report `Payload`/`End` without consuming anything.
    pub fn next(&mut self, buf: &mut BytesMut) -> io::Result<Option<Event>> {
        match self.state {
            ParseState::StatusLine => {
                let line_end = match Self::find_crlf(buf) {
                    Some(n) => n,
                    None => return Ok(None),
                };
                let line = buf.split_to(line_end + 2);
                let line_str = std::str::from_utf8(&line[..line_end])
                    .map_err(|_| invalid("invalid status line UTF-8"))?;
                // HTTP/1.1 200 OK or HTTP/1.1 200
                let mut parts = line_str.splitn(3, ' ');
                let _version = parts.next();
                let code = parts
                    .next()
                    .and_then(|s| s.parse::<u16>().ok())
                    .ok_or_else(|| invalid("invalid status code"))?;
                let reason = parts.next().unwrap_or("").to_string();
                self.state = ParseState::Headers;
                Ok(Some(Event::Status { code, reason }))
            }
            ParseState::Headers => {
                let line_end = match Self::find_crlf(buf) {
                    Some(n) => n,
                    None => return Ok(None),
                };
                if line_end == 0 {
                    buf.advance(2);
                    self.state = ParseState::HeadersComplete;
                    return Ok(Some(Event::HeadDone));
                }
                let line = buf.split_to(line_end + 2);
                let line_str = std::str::from_utf8(&line[..line_end])
                    .map_err(|_| invalid("invalid header UTF-8"))?;
                match line_str.find(':') {
                    Some(colon) => Ok(Some(Event::Header {
                        name: line_str[..colon].trim().to_string(),
                        value: line_str[colon + 1..].trim().to_string(),
                    })),
                    // Line without a colon: consumed, nothing surfaced.
                    None => Ok(Some(Event::Skip)),
                }
            }
            ParseState::HeadersComplete => Ok(Some(Event::HeadDone)),
            ParseState::Body
            | ParseState::ChunkSize
            | ParseState::ChunkData
            | ParseState::ChunkDataEnd
            | ParseState::ChunkTrailer => Ok(Some(Event::Payload { amount: buf.len() })),
            ParseState::Idle => Ok(Some(Event::End)),
        }
    }

    /// Fix the body framing once the head is complete. Chunked wins over
    /// Content-Length; neither means the body runs until close.
    pub fn set_body_mode(&mut self, content_length: Option<u64>, chunked: bool) {
        if self.state != ParseState::HeadersComplete {
            return;
        }
        self.close_delimited = false;
        if chunked {
            self.content_length = -1;
            self.state = ParseState::ChunkSize;
        } else if let Some(cl) = content_length {
            self.content_length = cl as i64;
            self.bytes_received = 0;
            self.state = if cl == 0 {
                ParseState::Idle
            } else {
                ParseState::Body
            };
        } else {
            self.content_length = -1;
            self.close_delimited = true;
            self.state = ParseState::Body;
        }
    }

    /// Mark the response as having no body at all (HEAD, 204, 304), whatever
    /// the headers advertise.
    pub fn set_no_body(&mut self) {
        if self.state == ParseState::HeadersComplete {
            self.state = ParseState::Idle;
        }
    }

    /// True when the body ends only when the peer closes the connection.
    pub fn is_close_delimited(&self) -> bool {
        self.close_delimited && self.state == ParseState::Body
    }

    /// End a close-delimited body (the transport reported EOF).
    pub fn finish(&mut self) {
        if self.is_close_delimited() {
            self.state = ParseState::Idle;
        }
    }

    /// Copy decoded body bytes into `out`, consuming framing as needed.
    /// Callers guarantee `out` is non-empty.
    pub fn read_payload(
        &mut self,
        buf: &mut BytesMut,
        out: &mut [u8],
    ) -> io::Result<PayloadRead> {
        loop {
            match self.state {
                ParseState::Idle => return Ok(PayloadRead::Finished),
                ParseState::Body => {
                    if self.content_length >= 0 {
                        let remaining = (self.content_length - self.bytes_received) as usize;
                        if remaining == 0 {
                            self.state = ParseState::Idle;
                            return Ok(PayloadRead::Finished);
                        }
                        if buf.is_empty() {
                            return Ok(PayloadRead::NeedInput);
                        }
                        let n = remaining.min(buf.len()).min(out.len());
                        out[..n].copy_from_slice(&buf[..n]);
                        buf.advance(n);
                        self.bytes_received += n as i64;
                        if self.bytes_received >= self.content_length {
                            self.state = ParseState::Idle;
                        }
                        return Ok(PayloadRead::Data(n));
                    }
                    // Read until close: deliver whatever is buffered.
                    if buf.is_empty() {
                        return Ok(PayloadRead::NeedInput);
                    }
                    let n = buf.len().min(out.len());
                    out[..n].copy_from_slice(&buf[..n]);
                    buf.advance(n);
                    return Ok(PayloadRead::Data(n));
                }
                ParseState::ChunkSize => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(PayloadRead::NeedInput),
                    };
                    let line = buf.split_to(line_end + 2);
                    let line_str = std::str::from_utf8(&line[..line_end])
                        .map_err(|_| invalid("invalid chunk size"))?;
                    let hex_part = line_str.split(';').next().unwrap_or(line_str).trim();
                    self.chunk_remaining = i64::from_str_radix(hex_part, 16)
                        .map_err(|_| invalid("invalid chunk size"))?;
                    self.state = if self.chunk_remaining == 0 {
                        ParseState::ChunkTrailer
                    } else {
                        ParseState::ChunkData
                    };
                }
                ParseState::ChunkData => {
                    if buf.is_empty() {
                        return Ok(PayloadRead::NeedInput);
                    }
                    let n = (self.chunk_remaining as usize).min(buf.len()).min(out.len());
                    out[..n].copy_from_slice(&buf[..n]);
                    buf.advance(n);
                    self.chunk_remaining -= n as i64;
                    if self.chunk_remaining == 0 {
                        self.state = ParseState::ChunkDataEnd;
                    }
                    return Ok(PayloadRead::Data(n));
                }
                ParseState::ChunkDataEnd => {
                    if buf.len() < 2 {
                        return Ok(PayloadRead::NeedInput);
                    }
                    buf.advance(2);
                    self.state = ParseState::ChunkSize;
                }
                ParseState::ChunkTrailer => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(PayloadRead::NeedInput),
                    };
                    if line_end == 0 {
                        buf.advance(2);
                        self.state = ParseState::Idle;
                        return Ok(PayloadRead::Finished);
                    }
                    // Trailer line: consumed, not surfaced.
                    buf.advance(line_end + 2);
                }
                ParseState::StatusLine | ParseState::Headers | ParseState::HeadersComplete => {
                    return Err(invalid("payload read before response head complete"));
                }
            }
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut ResponseParser, buf: &mut BytesMut) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = parser.next(buf).unwrap() {
            let done = event == Event::HeadDone;
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    fn drain_body(parser: &mut ResponseParser, buf: &mut BytesMut) -> Vec<u8> {
        let mut body = Vec::new();
        let mut out = [0u8; 16];
        loop {
            match parser.read_payload(buf, &mut out).unwrap() {
                PayloadRead::Data(n) => body.extend_from_slice(&out[..n]),
                PayloadRead::Finished => return body,
                PayloadRead::NeedInput => panic!("parser starved with full input"),
            }
        }
    }

    #[test]
    fn head_events_in_order() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(
            &b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\n"[..],
        );
        let events = feed(&mut parser, &mut buf);
        assert_eq!(
            events[0],
            Event::Status {
                code: 200,
                reason: "OK".to_string()
            }
        );
        assert_eq!(
            events[1],
            Event::Header {
                name: "Content-Type".to_string(),
                value: "text/plain".to_string()
            }
        );
        assert_eq!(events.last(), Some(&Event::HeadDone));
        assert_eq!(parser.state(), ParseState::HeadersComplete);
    }

    #[test]
    fn status_without_reason() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 204\r\n\r\n"[..]);
        let events = feed(&mut parser, &mut buf);
        assert_eq!(
            events[0],
            Event::Status {
                code: 204,
                reason: String::new()
            }
        );
    }

    #[test]
    fn partial_head_needs_more_input() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 O"[..]);
        assert_eq!(parser.next(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"K\r\nA: b\r\n\r\n");
        let events = feed(&mut parser, &mut buf);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn header_line_without_colon_is_skipped() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\ngarbage line\r\nA: b\r\n\r\n"[..]);
        let events = feed(&mut parser, &mut buf);
        assert_eq!(events[1], Event::Skip);
        assert!(matches!(events[2], Event::Header { .. }));
    }

    #[test]
    fn content_length_body() {
        let mut parser = ResponseParser::new();
        let mut buf =
            BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhelloEXTRA"[..]);
        feed(&mut parser, &mut buf);
        parser.set_body_mode(Some(5), false);
        assert_eq!(drain_body(&mut parser, &mut buf), b"hello");
        // Bytes past the declared length stay in the buffer.
        assert_eq!(&buf[..], b"EXTRA");
    }

    #[test]
    fn zero_length_body_finishes_immediately() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n"[..]);
        feed(&mut parser, &mut buf);
        parser.set_body_mode(Some(0), false);
        let mut out = [0u8; 4];
        assert_eq!(
            parser.read_payload(&mut buf, &mut out).unwrap(),
            PayloadRead::Finished
        );
    }

    #[test]
    fn chunked_body_reassembles() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(
            &b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n"[..],
        );
        feed(&mut parser, &mut buf);
        parser.set_body_mode(None, true);
        assert_eq!(drain_body(&mut parser, &mut buf), b"Wikipedia");
        assert_eq!(parser.state(), ParseState::Idle);
    }

    #[test]
    fn chunked_body_across_split_input() {
        let wire = b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";
        // Any split point must reassemble the same body.
        for split in 1..wire.len() {
            let mut parser = ResponseParser::new();
            let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n\r\n"[..]);
            feed(&mut parser, &mut buf);
            parser.set_body_mode(None, true);
            buf.extend_from_slice(&wire[..split]);
            let mut body = Vec::new();
            let mut out = [0u8; 8];
            let mut fed_rest = false;
            loop {
                match parser.read_payload(&mut buf, &mut out).unwrap() {
                    PayloadRead::Data(n) => body.extend_from_slice(&out[..n]),
                    PayloadRead::Finished => break,
                    PayloadRead::NeedInput => {
                        assert!(!fed_rest, "parser starved after full input at split {}", split);
                        buf.extend_from_slice(&wire[split..]);
                        fed_rest = true;
                    }
                }
            }
            assert_eq!(body, b"Wikipedia", "split {}", split);
        }
    }

    #[test]
    fn chunked_trailers_are_consumed() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(
            &b"HTTP/1.1 200 OK\r\n\r\n2\r\nok\r\n0\r\nExpires: never\r\n\r\n"[..],
        );
        feed(&mut parser, &mut buf);
        parser.set_body_mode(None, true);
        assert_eq!(drain_body(&mut parser, &mut buf), b"ok");
    }

    #[test]
    fn close_delimited_body() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n\r\nsome data"[..]);
        feed(&mut parser, &mut buf);
        parser.set_body_mode(None, false);
        assert!(parser.is_close_delimited());
        let mut out = [0u8; 32];
        assert_eq!(
            parser.read_payload(&mut buf, &mut out).unwrap(),
            PayloadRead::Data(9)
        );
        assert_eq!(
            parser.read_payload(&mut buf, &mut out).unwrap(),
            PayloadRead::NeedInput
        );
        parser.finish();
        assert_eq!(
            parser.read_payload(&mut buf, &mut out).unwrap(),
            PayloadRead::Finished
        );
    }

    #[test]
    fn body_states_report_payload_event() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n\r\nbody"[..]);
        feed(&mut parser, &mut buf);
        parser.set_body_mode(Some(4), false);
        assert_eq!(
            parser.next(&mut buf).unwrap(),
            Some(Event::Payload { amount: 4 })
        );
        // The event consumed nothing.
        assert_eq!(&buf[..], b"body");
    }

    #[test]
    fn idle_reports_end_and_rewind_restarts() {
        let mut parser = ResponseParser::new();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\n\r\n"[..]);
        feed(&mut parser, &mut buf);
        parser.set_body_mode(Some(0), false);
        assert_eq!(parser.next(&mut buf).unwrap(), Some(Event::End));
        parser.rewind();
        assert_eq!(parser.state(), ParseState::StatusLine);
        buf.extend_from_slice(b"HTTP/1.1 404 Not Found\r\n\r\n");
        let events = feed(&mut parser, &mut buf);
        assert_eq!(
            events[0],
            Event::Status {
                code: 404,
                reason: "Not Found".to_string()
            }
        );
    }
}
