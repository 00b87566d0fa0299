//! Process start instant.

use std::sync::OnceLock;
use std::time::Instant;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Record the process start. Call once at boot; later calls are no-ops.
pub fn mark_process_start() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

/// The recorded start, or now if `mark_process_start` was never called.
pub fn process_start() -> Instant {
    mark_process_start()
}

/// Whole seconds elapsed since `start`.
pub fn uptime_secs(start: Instant) -> u64 {
    start.elapsed().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_start_is_write_once() {
        let first = mark_process_start();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(mark_process_start(), first);
        assert_eq!(process_start(), first);
    }

    #[test]
    fn test_uptime_floors_to_seconds() {
        let start = Instant::now() - Duration::from_millis(2_500);
        assert_eq!(uptime_secs(start), 2);
    }
}
