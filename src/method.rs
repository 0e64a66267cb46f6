//! HTTP method as a typed enum.
//!
//! Covers RFC 9110 standard methods, WebDAV extensions (RFC 4918 / 4791 / 3253 / 5323),
//! and `PURGE` used by nginx and Varnish for cache invalidation.
//!
//! The set is closed: a [`RouteTable`](crate::RouteTable) keeps one slot per
//! variant, so a lookup can only ever come back empty, never "unknown method".
//! Unknown method strings are rejected when parsed, before they reach a table.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A known HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    // RFC 9110 ─────────────────────────────────────────────────────────────────
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    // WebDAV RFC 4918 ──────────────────────────────────────────────────────────
    Copy,
    Lock,
    Mkcol,
    Move,
    Propfind,
    Proppatch,
    Unlock,
    // WebDAV extensions ────────────────────────────────────────────────────────
    Mkcalendar, // RFC 4791 — CalDAV
    Report,     // RFC 3253
    Search,     // RFC 5323
    // Cache invalidation ───────────────────────────────────────────────────────
    Purge, // nginx / Varnish
}

impl Method {
    /// Number of variants; the size of a route table.
    pub const COUNT: usize = 20;

    /// Every method, in declaration order. `ALL[m.index()] == m`.
    pub const ALL: [Method; Self::COUNT] = [
        Self::Connect,
        Self::Delete,
        Self::Get,
        Self::Head,
        Self::Options,
        Self::Patch,
        Self::Post,
        Self::Put,
        Self::Trace,
        Self::Copy,
        Self::Lock,
        Self::Mkcol,
        Self::Move,
        Self::Propfind,
        Self::Proppatch,
        Self::Unlock,
        Self::Mkcalendar,
        Self::Report,
        Self::Search,
        Self::Purge,
    ];

    /// Slot of this method in a fixed-size per-method table.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect    => "CONNECT",
            Self::Copy       => "COPY",
            Self::Delete     => "DELETE",
            Self::Get        => "GET",
            Self::Head       => "HEAD",
            Self::Lock       => "LOCK",
            Self::Mkcalendar => "MKCALENDAR",
            Self::Mkcol      => "MKCOL",
            Self::Move       => "MOVE",
            Self::Options    => "OPTIONS",
            Self::Patch      => "PATCH",
            Self::Post       => "POST",
            Self::Propfind   => "PROPFIND",
            Self::Proppatch  => "PROPPATCH",
            Self::Purge      => "PURGE",
            Self::Put        => "PUT",
            Self::Report     => "REPORT",
            Self::Search     => "SEARCH",
            Self::Trace      => "TRACE",
            Self::Unlock     => "UNLOCK",
        }
    }
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONNECT"    => Ok(Self::Connect),
            "COPY"       => Ok(Self::Copy),
            "DELETE"     => Ok(Self::Delete),
            "GET"        => Ok(Self::Get),
            "HEAD"       => Ok(Self::Head),
            "LOCK"       => Ok(Self::Lock),
            "MKCALENDAR" => Ok(Self::Mkcalendar),
            "MKCOL"      => Ok(Self::Mkcol),
            "MOVE"       => Ok(Self::Move),
            "OPTIONS"    => Ok(Self::Options),
            "PATCH"      => Ok(Self::Patch),
            "POST"       => Ok(Self::Post),
            "PROPFIND"   => Ok(Self::Propfind),
            "PROPPATCH"  => Ok(Self::Proppatch),
            "PURGE"      => Ok(Self::Purge),
            "PUT"        => Ok(Self::Put),
            "REPORT"     => Ok(Self::Report),
            "SEARCH"     => Ok(Self::Search),
            "TRACE"      => Ok(Self::Trace),
            "UNLOCK"     => Ok(Self::Unlock),
            other        => Err(Error::UnknownMethod(other.to_owned())),
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = Error;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
