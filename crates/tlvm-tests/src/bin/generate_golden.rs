//! Golden fixture generator for the TLV integration tests.
//!
//! Writes every fixture under `tests/golden/`. Run it after changing the
//! wire format or the standard registry and commit the result.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p tlvm-tests
//! ```
//!
//! # Generated fixtures
//!
//! | Directory                        | Contents                                   |
//! |----------------------------------|--------------------------------------------|
//! | url_header                       | URL "http" + HEADER "X-Foo: bar"           |
//! | http_exchange                    | URL, 2 HEADERs, NOBODY, RESPONSE0/1        |
//! | edge_cases/truncated_header      | URL record + 3 stray bytes                 |
//! | edge_cases/oversized_length      | URL record + HEADER claiming 4 GiB         |
//! | edge_cases/bad_flag_length       | NOBODY with 3 bytes + URL                  |
//! | edge_cases/unregistered_type     | ids 14, 0 and 51 + HEADER                  |
//! | edge_cases/duplicate_singleton   | URL "a", URL "b", HEADER "h"               |
//!
//! Fixtures with a `manifest.json` can also be rebuilt with
//! `tlvm encode manifest.json -o payload.tlv`.

#![allow(clippy::pedantic)]

use std::path::Path;

use tlvm_codec::TlvEncoder;
use tlvm_types::{Record, tlv_type};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    generate_url_header(&golden_dir);
    generate_http_exchange(&golden_dir);
    generate_edge_cases(&golden_dir);

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}

fn write_manifest(dir: &Path, json: &str) {
    write_file(&dir.join("manifest.json"), json.as_bytes());
}

fn write_payload(dir: &Path, data: &[u8]) {
    write_file(&dir.join("payload.tlv"), data);
}

/// Raw record bytes, with an explicit (possibly lying) length field.
fn raw(type_id: u16, length: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(6 + payload.len());
    out.extend_from_slice(&type_id.to_be_bytes());
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

fn honest(type_id: u16, payload: &[u8]) -> Vec<u8> {
    raw(type_id, payload.len() as u32, payload)
}

// ── Fixture generators ────────────────────────────────────────────────────────

fn generate_url_header(golden: &Path) {
    let dir = golden.join("url_header");
    write_manifest(
        &dir,
        r#"{
  "records": [
    { "type": "URL", "text": "http" },
    { "type": "HEADER", "text": "X-Foo: bar" }
  ]
}
"#,
    );

    let payload = TlvEncoder::encode_to_vec(&[
        Record::new(tlv_type::URL, b"http".to_vec()),
        Record::new(tlv_type::HEADER, b"X-Foo: bar".to_vec()),
    ])
    .expect("encode url_header");
    write_payload(&dir, &payload);
}

fn generate_http_exchange(golden: &Path) {
    let dir = golden.join("http_exchange");
    write_manifest(
        &dir,
        r#"{
  "records": [
    { "type": "URL", "text": "http://127.0.0.1/index.html" },
    { "type": "HEADER", "text": "Accept: */*" },
    { "type": "HEADER", "text": "User-Agent: fuzz" },
    { "type": "NOBODY", "hex": "00000000" },
    { "type": "RESPONSE0", "text": "HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello" },
    { "type": "RESPONSE1", "text": "HTTP/1.1 404 Not Found\r\n\r\n" }
  ]
}
"#,
    );

    let payload = TlvEncoder::encode_to_vec(&[
        Record::new(tlv_type::URL, b"http://127.0.0.1/index.html".to_vec()),
        Record::new(tlv_type::HEADER, b"Accept: */*".to_vec()),
        Record::new(tlv_type::HEADER, b"User-Agent: fuzz".to_vec()),
        Record::new(tlv_type::NOBODY, vec![0, 0, 0, 0]),
        Record::new(
            tlv_type::RESPONSE0,
            b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello".to_vec(),
        ),
        Record::new(tlv_type::RESPONSE1, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec()),
    ])
    .expect("encode http_exchange");
    write_payload(&dir, &payload);
}

fn generate_edge_cases(golden: &Path) {
    let dir = golden.join("edge_cases");

    let mut truncated = honest(tlv_type::URL, b"http");
    truncated.extend_from_slice(&[0x00, 0x06, 0x00]);
    write_payload(&dir.join("truncated_header"), &truncated);

    let mut oversized = honest(tlv_type::URL, b"http");
    oversized.extend(raw(tlv_type::HEADER, u32::MAX, b"abc"));
    write_payload(&dir.join("oversized_length"), &oversized);

    let mut bad_flag = honest(tlv_type::NOBODY, &[1, 2, 3]);
    bad_flag.extend(honest(tlv_type::URL, b"ok"));
    write_payload(&dir.join("bad_flag_length"), &bad_flag);

    let mut unregistered = honest(tlv_type::MIME_PART_NAME, b"x");
    unregistered.extend(honest(0, b"y"));
    unregistered.extend(honest(51, b"z"));
    unregistered.extend(honest(tlv_type::HEADER, b"h"));
    write_payload(&dir.join("unregistered_type"), &unregistered);

    let mut duplicate = honest(tlv_type::URL, b"a");
    duplicate.extend(honest(tlv_type::URL, b"b"));
    duplicate.extend(honest(tlv_type::HEADER, b"h"));
    write_payload(&dir.join("duplicate_singleton"), &duplicate);
}
