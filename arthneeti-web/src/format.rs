//! Display formatting for money and holdings.
use arthneeti_client::Sector;

const LAKH: i64 = 100_000;

/// Rupee amount with Indian digit grouping, e.g. `₹12,34,567`.
#[must_use]
pub fn rupees(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(amount.unsigned_abs()))
}

/// Short form for tight spaces: amounts of a lakh or more become `₹1.2L`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compact_rupees(amount: i64) -> String {
    if amount.abs() >= LAKH {
        let sign = if amount < 0 { "-" } else { "" };
        format!("{sign}₹{:.1}L", amount.unsigned_abs() as f64 / LAKH as f64)
    } else {
        rupees(amount)
    }
}

#[must_use]
pub fn units(value: f64) -> String {
    format!("{value:.2}")
}

#[must_use]
pub fn sector_label(sector: &Sector) -> String {
    match sector {
        Sector::Gold => "Gold".to_string(),
        Sector::Tech => "Tech".to_string(),
        Sector::RealEstate => "Real Estate".to_string(),
        Sector::Other(raw) => raw.replace('_', " "),
    }
}

fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
