use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use chrono::{DateTime, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

/// Granularity of the ticker's shutdown checks while waiting
const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

/// Shared flag that stops all tickers once triggered. In-flight ticks run to
/// completion; only future ticks are cancelled.
#[derive(Clone)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn new() -> Shutdown {
        Shutdown(Arc::new(AtomicBool::new(false)))
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Recurring hourly trigger for one location, firing at the configured minute
/// past the top of every hour in the location's timezone. Carries no payload
/// beyond the hour-start instant the tick represents.
pub struct Ticker {
    tz: Tz,
    minute: u8,
    shutdown: Shutdown,
}

impl Ticker {
    /// Returns a new Ticker
    ///
    /// # Arguments
    ///
    /// * 'tz' - the location's timezone
    /// * 'minute' - minute past the top of the hour to fire at
    /// * 'shutdown' - shared shutdown flag
    pub fn new(tz: Tz, minute: u8, shutdown: Shutdown) -> Ticker {
        Ticker { tz, minute, shutdown }
    }

    /// Blocks until the next tick and returns the hour-start it represents,
    /// or None once shutdown has been triggered
    pub fn wait(&self) -> Option<DateTime<Tz>> {
        let fire = next_fire(Utc::now().with_timezone(&self.tz), self.minute);

        loop {
            if self.shutdown.is_triggered() {
                return None;
            }
            let now = Utc::now().with_timezone(&self.tz);
            if now >= fire {
                return Some(hour_start(fire));
            }
            let remaining = (fire - now).to_std().unwrap_or(POLL_INTERVAL);
            thread::sleep(remaining.min(POLL_INTERVAL));
        }
    }
}

/// Start of the hour the given instant falls in, on its own local clock
pub fn hour_start(date_time: DateTime<Tz>) -> DateTime<Tz> {
    date_time
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(date_time)
}

/// Returns the next occurrence of 'minute' past the top of an hour strictly
/// after 'now'
///
/// # Arguments
///
/// * 'now' - the instant to schedule from
/// * 'minute' - minute past the top of the hour
pub fn next_fire(now: DateTime<Tz>, minute: u8) -> DateTime<Tz> {
    let candidate = hour_start(now) + TimeDelta::minutes(minute as i64);
    if candidate > now {
        candidate
    } else {
        candidate + TimeDelta::hours(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stockholm(h: u32, m: u32, s: u32) -> DateTime<Tz> {
        chrono_tz::Europe::Stockholm
            .with_ymd_and_hms(2026, 8, 26, h, m, s)
            .unwrap()
    }

    #[test]
    fn fires_later_this_hour_when_minute_not_passed() {
        let now = stockholm(9, 3, 20);
        assert_eq!(next_fire(now, 15), stockholm(9, 15, 0));
    }

    #[test]
    fn fires_next_hour_when_minute_already_passed() {
        let now = stockholm(9, 15, 0);
        assert_eq!(next_fire(now, 15), stockholm(10, 15, 0));

        let now = stockholm(9, 42, 11);
        assert_eq!(next_fire(now, 15), stockholm(10, 15, 0));
    }

    #[test]
    fn overrun_past_fire_time_skips_that_hour() {
        // a tick finishing at 10:20 with minute offset 15 schedules 11:15,
        // never the already-passed 10:15
        let now = stockholm(10, 20, 0);
        assert_eq!(next_fire(now, 15), stockholm(11, 15, 0));
    }

    #[test]
    fn zero_minute_fires_at_top_of_next_hour() {
        let now = stockholm(9, 0, 0);
        assert_eq!(next_fire(now, 0), stockholm(10, 0, 0));
    }

    #[test]
    fn tick_resolves_to_hour_start() {
        assert_eq!(hour_start(stockholm(9, 59, 59)), stockholm(9, 0, 0));
        assert_eq!(hour_start(next_fire(stockholm(9, 3, 20), 15)), stockholm(9, 0, 0));
    }

    #[test]
    fn cancelled_ticker_returns_none() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let ticker = Ticker::new(chrono_tz::Europe::Stockholm, 0, shutdown);
        assert!(ticker.wait().is_none());
    }
}
