//! Time source for the copyright year.

use chrono::Datelike;

/// Source of the current calendar year.
///
/// Read once per build so the HTML and text outputs always agree.
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// Clock returning a fixed year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    year: i32,
}

impl FixedClock {
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self { year }
    }
}

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock::new(2020).current_year(), 2020);
    }

    #[test]
    fn test_system_clock_matches_chrono() {
        let year = SystemClock.current_year();
        assert!((chrono::Local::now().year() - year).abs() <= 1);
    }
}
