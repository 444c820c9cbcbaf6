//! Identifier generation for stored questions.

use catalog_domain::QuestionId;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generates 24-hex-digit identifiers in the document-store style:
/// 4 bytes of seconds since the epoch, 5 bytes of process discriminator
/// and a 3-byte counter.
#[derive(Debug)]
pub struct IdGenerator {
    discriminator: u64,
    counter: AtomicU32,
}

impl IdGenerator {
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or_default();
        Self {
            discriminator: ((u64::from(std::process::id()) << 20) ^ u64::from(nanos))
                & 0xff_ffff_ffff,
            counter: AtomicU32::new(nanos & 0xff_ffff),
        }
    }

    pub fn next_id(&self) -> QuestionId {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default() as u32;
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & 0xff_ffff;
        QuestionId::new(format!(
            "{:08x}{:010x}{:06x}",
            seconds, self.discriminator, count
        ))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
