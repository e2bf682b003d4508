//! Known TLV type ids.
//!
//! These are the option tags that appear on the wire. Not every id in
//! `LOWEST..=HIGHEST` is registered in the built-in
//! [`TypeRegistry`](crate::TypeRegistry): `MIME_PART_NAME`,
//! `MIME_PART_DATA` and the `SECOND_RESPONSE*` ids only occur nested or
//! are handled outside the mutator, so a top-level record using them is
//! garbage.

pub const LOWEST: u16 = 1;

pub const URL: u16 = 1;
pub const RESPONSE0: u16 = 2;
pub const USERNAME: u16 = 3;
pub const PASSWORD: u16 = 4;
pub const POSTFIELDS: u16 = 5;
pub const HEADER: u16 = 6;
pub const COOKIE: u16 = 7;
pub const UPLOAD1: u16 = 8;
pub const RANGE: u16 = 9;
pub const CUSTOMREQUEST: u16 = 10;
pub const MAIL_RECIPIENT: u16 = 11;
pub const MAIL_FROM: u16 = 12;
pub const MIME_PART: u16 = 13;
pub const MIME_PART_NAME: u16 = 14;
pub const MIME_PART_DATA: u16 = 15;
pub const HTTPAUTH: u16 = 16;
pub const RESPONSE1: u16 = 17;
pub const RESPONSE2: u16 = 18;
pub const RESPONSE3: u16 = 19;
pub const RESPONSE4: u16 = 20;
pub const RESPONSE5: u16 = 21;
pub const RESPONSE6: u16 = 22;
pub const RESPONSE7: u16 = 23;
pub const RESPONSE8: u16 = 24;
pub const RESPONSE9: u16 = 25;
pub const RESPONSE10: u16 = 26;
pub const OPTHEADER: u16 = 27;
pub const NOBODY: u16 = 28;
pub const FOLLOWLOCATION: u16 = 29;
pub const ACCEPTENCODING: u16 = 30;
pub const SECOND_RESPONSE0: u16 = 31;
pub const SECOND_RESPONSE1: u16 = 32;
pub const WILDCARDMATCH: u16 = 33;
pub const RTSP_REQUEST: u16 = 34;
pub const RTSP_SESSION_ID: u16 = 35;
pub const RTSP_STREAM_URI: u16 = 36;
pub const RTSP_TRANSPORT: u16 = 37;
pub const RTSP_CLIENT_CSEQ: u16 = 38;
pub const MAIL_AUTH: u16 = 39;
pub const HTTP_VERSION: u16 = 40;
pub const DOH_URL: u16 = 41;
pub const PROXY_URL: u16 = 42;
pub const PROXYUSERPWD: u16 = 43;
pub const PROXYPORT: u16 = 44;
pub const FAILONERROR: u16 = 45;
pub const TIMEVALUE: u16 = 46;
pub const TIMECONDITION: u16 = 47;
pub const PROXYAUTH: u16 = 48;
pub const HTTPPROXYTUNNEL: u16 = 49;
pub const SUPPRESS_CONNECT_HEADERS: u16 = 50;

pub const HIGHEST: u16 = 50;
