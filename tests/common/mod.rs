//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const HEADER_SIZE: usize = 40;

/// 2024-06-01 12:00:00 UTC
pub const START_MS: i64 = 1_717_243_200_000;

/// Build a dump starting 2024-06-01 12:00:00 with the given duration and records.
pub fn dump(duration_seconds: u16, records: &[[u8; 5]]) -> Vec<u8> {
    let mut bytes = vec![0u8; HEADER_SIZE];
    bytes[0..2].copy_from_slice(&0x0003u16.to_le_bytes());
    bytes[2..4].copy_from_slice(&2024u16.to_le_bytes());
    bytes[4..9].copy_from_slice(&[6, 1, 12, 0, 0]);
    bytes[9..11].copy_from_slice(&(HEADER_SIZE as u16).to_le_bytes());
    bytes[13..15].copy_from_slice(&duration_seconds.to_le_bytes());
    for record in records {
        bytes.extend_from_slice(record);
    }
    bytes
}

/// Write `bytes` to `name` inside `dir` and return the path.
pub fn write_dump(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write test dump");
    path
}
