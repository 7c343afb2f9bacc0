//! Login records from the utmp database
//!
//! Linux glibc layout: fixed 384-byte records in native byte order.

use chrono::{DateTime, Local, TimeZone};
use std::path::Path;

use crate::platform::traits::UserSession;

const RECORD_SIZE: usize = 384;
const USER_PROCESS: i16 = 7;

const TYPE_OFFSET: usize = 0;
const LINE_OFFSET: usize = 8;
const LINE_LEN: usize = 32;
const USER_OFFSET: usize = 44;
const USER_LEN: usize = 32;
const TV_SEC_OFFSET: usize = 340;

/// Default locations of the utmp file, in lookup order
pub const UTMP_PATHS: &[&str] = &["/var/run/utmp", "/run/utmp"];

/// Read the first utmp file that exists; a missing database means no sessions
pub fn read_sessions() -> std::io::Result<Vec<UserSession>> {
    for path in UTMP_PATHS {
        let path = Path::new(path);
        if path.exists() {
            return Ok(parse_records(&std::fs::read(path)?));
        }
    }
    Ok(Vec::new())
}

/// Decode every `USER_PROCESS` record in `data`
pub fn parse_records(data: &[u8]) -> Vec<UserSession> {
    data.chunks_exact(RECORD_SIZE)
        .filter_map(parse_record)
        .collect()
}

fn parse_record(record: &[u8]) -> Option<UserSession> {
    let kind = i16::from_ne_bytes([record[TYPE_OFFSET], record[TYPE_OFFSET + 1]]);
    if kind != USER_PROCESS {
        return None;
    }

    let user = c_string(&record[USER_OFFSET..USER_OFFSET + USER_LEN]);
    if user.is_empty() {
        return None;
    }

    let seconds = i32::from_ne_bytes(
        record[TV_SEC_OFFSET..TV_SEC_OFFSET + 4].try_into().ok()?,
    );
    let started: Option<DateTime<Local>> = Local.timestamp_opt(i64::from(seconds), 0).single();

    Some(UserSession {
        user,
        terminal: c_string(&record[LINE_OFFSET..LINE_OFFSET + LINE_LEN]),
        started,
    })
}

fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
