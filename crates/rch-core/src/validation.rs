//! # Validation Module
//!
//! Input validation for the billing and login forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form state (apps/desk state::form)                           │
//! │  ├── Field edits by name, raw text kept as typed                       │
//! │  └── Tax/total recomputed leniently on every edit                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Submit                                                       │
//! │  └── THIS MODULE: required / pattern / min rules                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK constraints on enums and money columns                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rch_core::validation::{validate_mobile_number, validate_charge};
//!
//! assert!(validate_mobile_number("9876543210").is_ok());
//! assert_eq!(validate_charge("roomCharges", "1000", true).unwrap().paise(), 100000);
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Stay dates travel as ISO text, the way a date input submits them.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A mobile number is exactly this many ASCII digits.
pub const MOBILE_NUMBER_LEN: usize = 10;

/// Largest charge a single bill line accepts (₹100 crore).
pub const MAX_CHARGE: Money = Money::from_rupees(1_000_000_000);

fn required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

fn max_len(field: &str, value: String, max: usize) -> ValidationResult<String> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(value)
}

// =============================================================================
// Guest / Room
// =============================================================================

/// Validates the guest name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
///
/// Returns the trimmed name.
pub fn validate_guest_name(name: &str) -> ValidationResult<String> {
    max_len("guestName", required("guestName", name)?, 100)
}

/// Validates a mobile number: exactly ten ASCII digits, nothing else.
///
/// ```rust
/// use rch_core::validation::validate_mobile_number;
///
/// assert!(validate_mobile_number("98765 43210").is_err());
/// assert!(validate_mobile_number("+919876543210").is_err());
/// assert!(validate_mobile_number("").is_err());
/// ```
pub fn validate_mobile_number(mobile: &str) -> ValidationResult<String> {
    let mobile = required("mobileNumber", mobile)?;

    if mobile.len() != MOBILE_NUMBER_LEN || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobileNumber".to_string(),
            reason: format!("must be exactly {} digits", MOBILE_NUMBER_LEN),
        });
    }

    Ok(mobile)
}

/// Validates the room number (free text, e.g. `101` or `A-12`).
pub fn validate_room_no(room_no: &str) -> ValidationResult<String> {
    max_len("roomNo", required("roomNo", room_no)?, 20)
}

// =============================================================================
// Dates
// =============================================================================

/// Parses a required `YYYY-MM-DD` date field.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected a date as YYYY-MM-DD".to_string(),
    })
}

/// Check-out may be the same day as check-in but never before it.
pub fn validate_stay_dates(check_in: NaiveDate, check_out: NaiveDate) -> ValidationResult<()> {
    if check_out < check_in {
        return Err(ValidationError::DateOrder {
            field: "checkOutDate".to_string(),
            other: "checkInDate".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Money
// =============================================================================

/// Strict decimal shape: optional sign, digits, optional fraction.
fn is_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (unsigned, None),
    };

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let has_digits = !whole.is_empty() || fraction.is_some_and(|f| !f.is_empty());

    has_digits && digits(whole) && fraction.map_or(true, digits)
}

/// Validates a charge field and converts it to [`Money`].
///
/// ## Rules
/// - `required` fields must not be empty; optional empty fields are zero
/// - Must be a plain decimal number (`1000`, `999.50`)
/// - Must not be negative
///
/// ```rust
/// use rch_core::validation::validate_charge;
///
/// assert!(validate_charge("extraCharges", "", false).unwrap().is_zero());
/// assert!(validate_charge("roomCharges", "", true).is_err());
/// assert!(validate_charge("roomCharges", "-1", true).is_err());
/// assert!(validate_charge("roomCharges", "12abc", true).is_err());
/// ```
pub fn validate_charge(field: &str, value: &str, required_field: bool) -> ValidationResult<Money> {
    let value = value.trim();

    if value.is_empty() {
        if required_field {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
        return Ok(Money::zero());
    }

    if !is_decimal(value) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        });
    }

    let amount = Money::parse_lenient(value);
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if amount > MAX_CHARGE {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_CHARGE.fixed2(),
        });
    }

    Ok(amount)
}

// =============================================================================
// Login
// =============================================================================

/// Validates an email address (minimal `local@domain.tld` shape check).
///
/// Returns the trimmed, lowercased address.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = max_len("email", required("email", email)?, 254)?;

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be an email address".to_string(),
        });
    }

    Ok(email.to_lowercase())
}

/// Passwords are only checked for presence; the identity provider decides.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_name() {
        assert_eq!(validate_guest_name("  Asha Devi ").unwrap(), "Asha Devi");
        assert!(matches!(
            validate_guest_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_guest_name(&"x".repeat(101)),
            Err(ValidationError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_mobile_number_must_be_ten_digits() {
        assert_eq!(validate_mobile_number("9876543210").unwrap(), "9876543210");
        assert!(validate_mobile_number("987654321").is_err());
        assert!(validate_mobile_number("98765432101").is_err());
        assert!(validate_mobile_number("98765c3210").is_err());
        assert!(validate_mobile_number("９８７６５４３２１０").is_err());
    }

    #[test]
    fn test_room_no_required() {
        assert_eq!(validate_room_no("101").unwrap(), "101");
        assert!(validate_room_no("").is_err());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("checkInDate", "2025-03-05").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());

        assert!(matches!(
            parse_date("checkInDate", "05/03/2025"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_date("checkInDate", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_stay_dates_order() {
        let d5 = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let d6 = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();

        assert!(validate_stay_dates(d5, d6).is_ok());
        assert!(validate_stay_dates(d5, d5).is_ok());
        assert!(matches!(
            validate_stay_dates(d6, d5),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[test]
    fn test_charges() {
        assert_eq!(validate_charge("roomCharges", "1000", true).unwrap().paise(), 100000);
        assert_eq!(validate_charge("roomCharges", "999.5", true).unwrap().paise(), 99950);
        assert_eq!(validate_charge("roomCharges", "0", true).unwrap().paise(), 0);
        assert!(matches!(
            validate_charge("roomCharges", "-0.01", true),
            Err(ValidationError::Negative { .. })
        ));
        assert!(validate_charge("roomCharges", ".", true).is_err());
        assert!(validate_charge("roomCharges", "1.2.3", true).is_err());
    }

    #[test]
    fn test_charge_ceiling() {
        assert_eq!(
            validate_charge("roomCharges", "1000000000", true).unwrap(),
            MAX_CHARGE
        );
        assert!(matches!(
            validate_charge("roomCharges", "1000000000.01", true),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(matches!(
            validate_charge("extraCharges", "99999999999999999999", false),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_email() {
        assert_eq!(
            validate_email(" Front.Desk@RightChoice.in ").unwrap(),
            "front.desk@rightchoice.in"
        );
        assert!(validate_email("front-desk").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@@b.in").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password_presence_only() {
        assert!(validate_password("x").is_ok());
        assert!(validate_password("").is_err());
    }
}
