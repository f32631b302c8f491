use {
    super::variant::Variant,
    crate::StatementError,
    chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc},
    log::debug,
    std::str::FromStr,
};

/// Date operation names.
pub(super) const DATE_DISPLAY_NAMES: [&str; 12] = [
    "DateEquals",
    "DateEqualsIfExists",
    "DateNotEquals",
    "DateNotEqualsIfExists",
    "DateLessThan",
    "DateLessThanIfExists",
    "DateGreaterThanEquals",
    "DateGreaterThanEqualsIfExists",
    "DateLessThanEquals",
    "DateLessThanEqualsIfExists",
    "DateGreaterThan",
    "DateGreaterThanIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum DateCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

impl DateCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        DATE_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }
}

/// Parse a date condition value: ISO 8601 / RFC 3339 timestamps, plain dates, or seconds since the Unix epoch.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(nd) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return nd.and_hms_opt(0, 0, 0).map(|ndt| Utc.from_utc_datetime(&ndt));
    }

    match i64::from_str(value) {
        Ok(unix_seconds) => Utc.timestamp_opt(unix_seconds, 0).single(),
        Err(_) => None,
    }
}

pub(super) fn validate_date(value: &str) -> Result<(), StatementError> {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => {
            debug!("Condition value {value} is not a date");
            Err(StatementError::InvalidConditionValue(format!("{value} is not a date")))
        }
    }
}

/// Format a timestamp the way date condition values are written: `2024-01-31T12:00:00Z`.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
