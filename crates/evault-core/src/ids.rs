//! Injectable id and clock sources so tests stay deterministic.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Generates opaque ids with a short type prefix (`ev`, `req`, `item`).
pub trait IdSource: Send {
    fn next(&mut self, prefix: &str) -> String;
}

/// Default id source backed by UUID v4.
#[derive(Debug, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next(&mut self, prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4())
    }
}

/// Deterministic id source: `req_1`, `item_2`, ... in call order.
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    counter: u64,
}

impl IdSource for SequentialIdSource {
    fn next(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}_{}", prefix, self.counter)
    }
}

/// Supplies "today" for creation and fulfillment dates.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates in UTC.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_ids_carry_prefix_and_differ() {
        let mut ids = UuidIdSource;
        let a = ids.next("req");
        let b = ids.next("req");
        assert!(a.starts_with("req_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequential_ids_count_across_prefixes() {
        let mut ids = SequentialIdSource::default();
        assert_eq!(ids.next("req"), "req_1");
        assert_eq!(ids.next("item"), "item_2");
        assert_eq!(ids.next("item"), "item_3");
    }
}
