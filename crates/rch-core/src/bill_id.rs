//! # Bill Identifier Generator
//!
//! Human-readable bill ids of the form `RCH{DD}{Mon}{NN}`.
//!
//! ```text
//!   RCH 05 Mar 01
//!   │   │  │   └── existing bill count + 1, zero padded to 2 digits
//!   │   │  └────── English month abbreviation
//!   │   └───────── day of month, zero padded
//!   └───────────── hotel prefix
//! ```
//!
//! ## Known Race
//! The count is a snapshot taken when the billing form mounts and is only
//! advanced locally after this session's own submits. Two sessions that
//! mount before either submits will hand out the same id. Nothing here
//! prevents that; the store logs a warning when it sees a repeat.

use chrono::NaiveDate;

/// Prefix of every bill id.
pub const BILL_ID_PREFIX: &str = "RCH";

/// Formats the bill id for the `existing_count + 1`-th bill on `date`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use rch_core::bill_id::generate_bill_id;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
/// assert_eq!(generate_bill_id(0, date), "RCH05Mar01");
/// assert_eq!(generate_bill_id(41, date), "RCH05Mar42");
/// ```
pub fn generate_bill_id(existing_count: u64, date: NaiveDate) -> String {
    format!(
        "{}{}{:02}",
        BILL_ID_PREFIX,
        date.format("%d%b"),
        existing_count + 1
    )
}

/// Checks the `RCH\d{2}[A-Za-z]{3}\d{2,}` shape.
///
/// The sequence part grows past two digits from the 100th bill on.
pub fn is_well_formed(bill_id: &str) -> bool {
    let Some(rest) = bill_id.strip_prefix(BILL_ID_PREFIX) else {
        return false;
    };
    let bytes = rest.as_bytes();
    if bytes.len() < 7 {
        return false;
    }

    bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2..5].iter().all(u8::is_ascii_alphabetic)
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

/// The billing form's snapshot of how many bills exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillSequence {
    count: u64,
}

impl BillSequence {
    /// Takes the snapshot (fetched once when the form mounts).
    pub fn from_count(count: u64) -> Self {
        BillSequence { count }
    }

    /// Bills known to exist at snapshot time plus local submits.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The id the next submit will use.
    pub fn next_id(&self, date: NaiveDate) -> String {
        generate_bill_id(self.count, date)
    }

    /// Records a successful submit from this session.
    pub fn advance(&mut self) {
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_first_bill_of_empty_store() {
        assert_eq!(generate_bill_id(0, march_5()), "RCH05Mar01");
    }

    #[test]
    fn test_format_for_every_month() {
        for month in 1..=12 {
            let date = NaiveDate::from_ymd_opt(2025, month, 28).unwrap();
            for count in [0, 8, 9, 57, 98] {
                let id = generate_bill_id(count, date);
                assert!(is_well_formed(&id), "{} should be well formed", id);
                assert_eq!(id.len(), 10, "{}", id);
            }
        }
    }

    #[test]
    fn test_sequence_grows_past_two_digits() {
        let id = generate_bill_id(99, march_5());
        assert_eq!(id, "RCH05Mar100");
        assert!(is_well_formed(&id));
    }

    #[test]
    fn test_malformed_ids() {
        assert!(!is_well_formed("RCH5Mar01"));
        assert!(!is_well_formed("ABC05Mar01"));
        assert!(!is_well_formed("RCH05M4r01"));
        assert!(!is_well_formed("RCH05Mar"));
    }

    #[test]
    fn test_sequence_snapshot_and_advance() {
        let mut seq = BillSequence::from_count(3);
        assert_eq!(seq.next_id(march_5()), "RCH05Mar04");

        seq.advance();
        assert_eq!(seq.count(), 4);
        assert_eq!(seq.next_id(march_5()), "RCH05Mar05");
    }

    #[test]
    fn test_two_sessions_from_same_snapshot_collide() {
        let a = BillSequence::from_count(7);
        let b = BillSequence::from_count(7);
        assert_eq!(a.next_id(march_5()), b.next_id(march_5()));
    }
}
