/*
 * uri.rs
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

//! Absolute URL parsing: scheme://[user[:password]@]host[:port][/path][?query][#fragment].
//! Components are slices of the input string; the caller keeps the original
//! text alive for as long as the parsed view is used.

use crate::error::{Error, Result};

/// Parsed view over an absolute URL. Produced once per [`Uri::parse`] call,
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uri<'a> {
    pub scheme: &'a str,
    pub user: Option<&'a str>,
    pub password: Option<&'a str>,
    pub host: &'a str,
    pub port: Option<u16>,
    /// Absolute path, `/` when the URL has none.
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl<'a> Uri<'a> {
    /// Parse an absolute URL.
    ///
    /// The scheme is a run of lowercase letters terminated by `://`; the
    /// authority may carry `user[:password]@` credentials; the host runs to
    /// the first `:` (port), `/` (path) or end of input. A `:` with an empty
    /// or non-numeric port is rejected.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let bytes = raw.as_bytes();

        let mut scheme_len = 0;
        while scheme_len < bytes.len() && bytes[scheme_len].is_ascii_lowercase() {
            scheme_len += 1;
        }
        if scheme_len == 0 {
            return if bytes.first() == Some(&b':') || bytes.is_empty() {
                Err(Error::MissingScheme)
            } else {
                Err(Error::InvalidScheme)
            };
        }
        if bytes.get(scheme_len) != Some(&b':') {
            return Err(Error::InvalidScheme);
        }
        let scheme = &raw[..scheme_len];
        let rest = raw[scheme_len..].strip_prefix("://").ok_or(Error::InvalidUrl)?;

        // Authority runs to the first '/'; everything from that '/' is the path.
        let (authority, path_and_more) = match rest.find('/') {
            Some(n) => (&rest[..n], &rest[n..]),
            None => (rest, ""),
        };

        // Credentials only count when the '@' sits inside the authority.
        let (user, password, hostport) = match authority.find('@') {
            Some(n) => {
                let userinfo = &authority[..n];
                match userinfo.find(':') {
                    Some(c) => (
                        Some(&userinfo[..c]),
                        Some(&userinfo[c + 1..]),
                        &authority[n + 1..],
                    ),
                    None => (Some(userinfo), None, &authority[n + 1..]),
                }
            }
            None => (None, None, authority),
        };

        let (host, port) = match hostport.find(':') {
            Some(n) => {
                let port_str = &hostport[n + 1..];
                if port_str.is_empty() || !port_str.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::InvalidUrl);
                }
                let port = port_str.parse::<u16>().map_err(|_| Error::InvalidUrl)?;
                (&hostport[..n], Some(port))
            }
            None => (hostport, None),
        };
        if host.is_empty() {
            return Err(Error::MissingHost);
        }

        let (path, query, fragment) = if path_and_more.is_empty() {
            ("/", None, None)
        } else {
            let (without_fragment, fragment) = match path_and_more.find('#') {
                Some(n) => (&path_and_more[..n], Some(&path_and_more[n + 1..])),
                None => (path_and_more, None),
            };
            let (path, query) = match without_fragment.find('?') {
                Some(n) => (&without_fragment[..n], Some(&without_fragment[n + 1..])),
                None => (without_fragment, None),
            };
            (path, query, fragment)
        };

        Ok(Self {
            scheme,
            user,
            password,
            host,
            port,
            path,
            query,
            fragment,
        })
    }

    /// True when the URL carries a `user[:password]@` prefix.
    pub fn has_credentials(&self) -> bool {
        self.user.is_some() || self.password.is_some()
    }
}
