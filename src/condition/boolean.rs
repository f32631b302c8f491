use {crate::StatementError, log::debug};

/// Boolean operation names.
pub(super) const BOOL_DISPLAY_NAMES: [&str; 2] = ["Bool", "BoolIfExists"];

pub(super) fn validate_bool(value: &str) -> Result<(), StatementError> {
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        Ok(())
    } else {
        debug!("Condition value {value} is not a boolean");
        Err(StatementError::InvalidConditionValue(format!("{value} is not true or false")))
    }
}
