use {super::variant::Variant, crate::StatementError, log::debug};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum ArnCmp {
    Equals = 0,
    Like = 4,
}

impl ArnCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        ARN_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }
}

// The order is important here. For a given operation, the if-exists variant must follow, then the negated variant,
// then the negated if-exists variant.

/// ARN operation names.
const ARN_DISPLAY_NAMES: [&str; 8] = [
    "ArnEquals",
    "ArnEqualsIfExists",
    "ArnNotEquals",
    "ArnNotEqualsIfExists",
    "ArnLike",
    "ArnLikeIfExists",
    "ArnNotLike",
    "ArnNotLikeIfExists",
];

/// ARN operators accept a full six-field ARN (possibly with wildcards) or a bare `*`.
pub(super) fn validate_arn(value: &str) -> Result<(), StatementError> {
    if value == "*" {
        return Ok(());
    }

    let parts = value.splitn(6, ':').collect::<Vec<&str>>();
    if parts.len() != 6 || parts[0] != "arn" {
        debug!("Condition value {value} is not an ARN");
        return Err(StatementError::InvalidConditionValue(format!("{value} is not an ARN")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::{validate_arn, ArnCmp},
        crate::condition::variant::Variant,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_display_name() {
        assert_eq!(ArnCmp::Equals.display_name(&Variant::Negated), "ArnNotEquals");
        assert_eq!(ArnCmp::Like.display_name(&Variant::IfExists), "ArnLikeIfExists");
    }

    #[test_log::test]
    fn test_validate() {
        assert!(validate_arn("arn:aws:iam::123456789012:role/*").is_ok());
        assert!(validate_arn("*").is_ok());
        assert_eq!(
            validate_arn("role/admin").unwrap_err().to_string(),
            "Invalid condition value: role/admin is not an ARN"
        );
    }
}
