use {super::variant::Variant, crate::StatementError, log::debug, std::str::FromStr};

/// Numeric operation names.
pub(super) const NUMERIC_DISPLAY_NAMES: [&str; 12] = [
    "NumericEquals",
    "NumericEqualsIfExists",
    "NumericNotEquals",
    "NumericNotEqualsIfExists",
    "NumericLessThan",
    "NumericLessThanIfExists",
    "NumericGreaterThanEquals",
    "NumericGreaterThanEqualsIfExists",
    "NumericLessThanEquals",
    "NumericLessThanEqualsIfExists",
    "NumericGreaterThan",
    "NumericGreaterThanIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum NumericCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

impl NumericCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        NUMERIC_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }
}

pub(super) fn validate_numeric(value: &str) -> Result<(), StatementError> {
    if i64::from_str(value).is_ok() {
        return Ok(());
    }

    match f64::from_str(value) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => {
            debug!("Condition value {value} is not numeric");
            Err(StatementError::InvalidConditionValue(format!("{value} is not a number")))
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{validate_numeric, NumericCmp},
        crate::condition::variant::Variant,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_display_name() {
        assert_eq!(NumericCmp::Equals.display_name(&Variant::None), "NumericEquals");
        assert_eq!(NumericCmp::LessThan.display_name(&Variant::IfExists), "NumericLessThanIfExists");
        assert_eq!(NumericCmp::LessThanEquals.display_name(&Variant::Negated), "NumericGreaterThan");
    }

    #[test_log::test]
    fn test_validate() {
        assert!(validate_numeric("3600").is_ok());
        assert!(validate_numeric("-12").is_ok());
        assert!(validate_numeric("1.5").is_ok());
        assert!(validate_numeric("NaN").is_err());
        assert_eq!(validate_numeric("ten").unwrap_err().to_string(), "Invalid condition value: ten is not a number");
    }
}
