//! Stored image file names.
//!
//! Names look like `image_<digits>.<ext>`. The digits start from the clock's
//! unix seconds and only move forward, so two uploads in the same second get
//! distinct names.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn from_timestamp(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct ImageNamer {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl ImageNamer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(i64::MIN),
        }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Next free name for a file with `extension`.
    pub fn next_name(&self, extension: &str) -> String {
        format!("image_{}.{}", self.reserve(), extension)
    }

    fn reserve(&self) -> i64 {
        let secs = self.clock.now().timestamp().max(0);
        let advance = |last: i64| if secs > last { secs } else { last + 1 };

        // fetch_update only fails when the closure returns None
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(advance(last))
            })
            .unwrap_or_else(|last| last);

        advance(previous)
    }
}

impl Default for ImageNamer {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_image_name(name: &str, ext: &str) -> bool {
        name.strip_prefix("image_")
            .and_then(|rest| rest.strip_suffix(&format!(".{ext}")))
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    }

    #[test]
    fn test_name_uses_clock_seconds() {
        let namer = ImageNamer::new(Arc::new(FixedClock::from_timestamp(1_760_000_000)));
        assert_eq!(namer.next_name("png"), "image_1760000000.png");
    }

    #[test]
    fn test_same_second_names_do_not_collide() {
        let namer = ImageNamer::new(Arc::new(FixedClock::from_timestamp(1_760_000_000)));

        let first = namer.next_name("png");
        let second = namer.next_name("png");
        let third = namer.next_name("jpg");

        assert_eq!(first, "image_1760000000.png");
        assert_eq!(second, "image_1760000001.png");
        assert_eq!(third, "image_1760000002.jpg");
    }

    #[test]
    fn test_system_clock_names_match_pattern() {
        let namer = ImageNamer::system();
        let name = namer.next_name("gif");
        assert!(is_image_name(&name, "gif"), "{name}");
    }

    #[test]
    fn test_concurrent_names_are_unique() {
        let namer = Arc::new(ImageNamer::new(Arc::new(FixedClock::from_timestamp(42))));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let namer = Arc::clone(&namer);
                std::thread::spawn(move || {
                    (0..50).map(|_| namer.next_name("png")).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for name in handle.join().unwrap() {
                assert!(is_image_name(&name, "png"));
                assert!(seen.insert(name));
            }
        }
        assert_eq!(seen.len(), 400);
    }
}
