//! Fixed-rate currency normalization.
//!
//! Every stored salary is expressed in the reference currency (RUB).
//! Rates are hardcoded; there is no live exchange-rate lookup.

use vacdb_common::{Salary, REFERENCE_CURRENCY};

/// Conversion into reference-currency units, truncating toward zero.
type Conversion = fn(i64) -> i64;

/// Fixed conversion table. Codes not listed here (other than the
/// reference code itself) pass through unchanged.
const CONVERSIONS: &[(&str, Conversion)] = &[
    ("BYR", |amount| amount * 28),
    ("KZT", |amount| amount * 5),
    ("UZS", |amount| (amount as f64 * 0.0075) as i64),
];

fn conversion_for(code: &str) -> Option<Conversion> {
    CONVERSIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, convert)| *convert)
}

/// Normalize a salary record into the reference currency.
///
/// `from` and `to` are converted independently, each only when present.
/// A record already carrying the reference code is returned unchanged,
/// so normalizing twice never double-converts. Unrecognized codes pass
/// through untouched, code included.
pub fn normalize(salary: Salary) -> Salary {
    if salary.is_normalized() {
        return salary;
    }

    let Some(convert) = conversion_for(&salary.currency) else {
        return salary;
    };

    Salary {
        from: salary.from.map(convert),
        to: salary.to.map(convert),
        currency: REFERENCE_CURRENCY.to_string(),
    }
}
