use {crate::StatementError, log::debug};

/// Binary operation names.
pub(super) const BINARY_DISPLAY_NAMES: [&str; 2] = ["BinaryEquals", "BinaryEqualsIfExists"];

/// Binary values are written base64-encoded.
pub(super) fn validate_binary(value: &str) -> Result<(), StatementError> {
    match base64::decode(value) {
        Ok(_) => Ok(()),
        Err(e) => {
            debug!("Condition value {value} is not base64: {e}");
            Err(StatementError::InvalidConditionValue(format!("{value} is not base64-encoded")))
        }
    }
}

/// Encode raw bytes the way IAM expects binary condition values.
pub fn encode_binary<B: AsRef<[u8]>>(bytes: B) -> String {
    base64::encode(bytes)
}

#[cfg(test)]
mod tests {
    use {
        super::{encode_binary, validate_binary},
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_base64() {
        assert_eq!(encode_binary(b"hello"), "aGVsbG8=");
        assert!(validate_binary("aGVsbG8=").is_ok());
        assert!(validate_binary("not base64!").is_err());
    }
}
