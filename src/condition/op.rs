use {
    super::{
        arn::{validate_arn, ArnCmp},
        binary::{validate_binary, BINARY_DISPLAY_NAMES},
        boolean::{validate_bool, BOOL_DISPLAY_NAMES},
        date::{validate_date, DateCmp},
        has_policy_variable,
        ipaddr::{validate_ip_address, IP_ADDRESS_DISPLAY_NAMES},
        key::ConditionKeyType,
        null::NULL_DISPLAY_NAME,
        numeric::{validate_numeric, NumericCmp},
        string::StringCmp,
        variant::Variant,
    },
    crate::StatementError,
    log::debug,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// An operator for a condition clause.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionOp {
    /// Operators for ARNs.
    Arn(ArnCmp, Variant),

    /// Operators for binary values. Variant here is only allowed to be [Variant::None] or [Variant::IfExists].
    Binary(Variant),

    /// Operators on boolean values. Variant here is only allowed to be [Variant::None] or [Variant::IfExists].
    Bool(Variant),

    /// Operators for date/time values.
    Date(DateCmp, Variant),

    /// Operators on IP addresses and networks.
    IpAddress(Variant),

    /// Operator on the presence/absence of a value.
    Null,

    /// Operators on numeric values.
    Numeric(NumericCmp, Variant),

    /// Operators on string values.
    String(StringCmp, Variant),
}

/// The `ArnEquals` operator.
pub const ArnEquals: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::None);

/// The `ArnEqualsIfExists` operator.
pub const ArnEqualsIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::IfExists);

/// The `ArnNotEquals` operator.
pub const ArnNotEquals: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::Negated);

/// The `ArnNotEqualsIfExists` operator.
pub const ArnNotEqualsIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::IfExistsNegated);

/// The `ArnLike` operator.
pub const ArnLike: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::None);

/// The `ArnLikeIfExists` operator.
pub const ArnLikeIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::IfExists);

/// The `ArnNotLike` operator.
pub const ArnNotLike: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::Negated);

/// The `ArnNotLikeIfExists` operator.
pub const ArnNotLikeIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::IfExistsNegated);

/// The `BinaryEquals` operator.
pub const BinaryEquals: ConditionOp = ConditionOp::Binary(Variant::None);

/// The `BinaryEqualsIfExists` operator.
pub const BinaryEqualsIfExists: ConditionOp = ConditionOp::Binary(Variant::IfExists);

/// The `Bool` operator.
pub const Bool: ConditionOp = ConditionOp::Bool(Variant::None);

/// The `BoolIfExists` operator.
pub const BoolIfExists: ConditionOp = ConditionOp::Bool(Variant::IfExists);

/// The `DateEquals` operator.
pub const DateEquals: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::None);

/// The `DateEqualsIfExists` operator.
pub const DateEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::IfExists);

/// The `DateNotEquals` operator.
pub const DateNotEquals: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::Negated);

/// The `DateNotEqualsIfExists` operator.
pub const DateNotEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::IfExistsNegated);

/// The `DateLessThan` operator.
pub const DateLessThan: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::None);

/// The `DateLessThanIfExists` operator.
pub const DateLessThanIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::IfExists);

/// The `DateGreaterThanEquals` operator.
pub const DateGreaterThanEquals: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::Negated);

/// The `DateGreaterThanEqualsIfExists` operator.
pub const DateGreaterThanEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::IfExistsNegated);

/// The `DateLessThanEquals` operator.
pub const DateLessThanEquals: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::None);

/// The `DateLessThanEqualsIfExists` operator.
pub const DateLessThanEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExists);

/// The `DateGreaterThan` operator.
pub const DateGreaterThan: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::Negated);

/// The `DateGreaterThanIfExists` operator.
pub const DateGreaterThanIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExistsNegated);

/// The `IpAddress` operator.
pub const IpAddress: ConditionOp = ConditionOp::IpAddress(Variant::None);

/// The `IpAddressIfExists` operator.
pub const IpAddressIfExists: ConditionOp = ConditionOp::IpAddress(Variant::IfExists);

/// The `NotIpAddress` operator.
pub const NotIpAddress: ConditionOp = ConditionOp::IpAddress(Variant::Negated);

/// The `NotIpAddressIfExists` operator.
pub const NotIpAddressIfExists: ConditionOp = ConditionOp::IpAddress(Variant::IfExistsNegated);

/// The `Null` operator.
pub const Null: ConditionOp = ConditionOp::Null;

/// The `NumericEquals` operator.
pub const NumericEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::None);

/// The `NumericEqualsIfExists` operator.
pub const NumericEqualsIfExists: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExists);

/// The `NumericNotEquals` operator.
pub const NumericNotEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::Negated);

/// The `NumericNotEqualsIfExists` operator.
pub const NumericNotEqualsIfExists: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExistsNegated);

/// The `NumericLessThan` operator.
pub const NumericLessThan: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThan, Variant::None);

/// The `NumericLessThanIfExists` operator.
pub const NumericLessThanIfExists: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExists);

/// The `NumericGreaterThanEquals` operator.
pub const NumericGreaterThanEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThan, Variant::Negated);

/// The `NumericGreaterThanEqualsIfExists` operator.
pub const NumericGreaterThanEqualsIfExists: ConditionOp =
    ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExistsNegated);

/// The `NumericLessThanEquals` operator.
pub const NumericLessThanEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::None);

/// The `NumericLessThanEqualsIfExists` operator.
pub const NumericLessThanEqualsIfExists: ConditionOp =
    ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExists);

/// The `NumericGreaterThan` operator.
pub const NumericGreaterThan: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::Negated);

/// The `NumericGreaterThanIfExists` operator.
pub const NumericGreaterThanIfExists: ConditionOp =
    ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExistsNegated);

/// The `StringEquals` operator.
pub const StringEquals: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::None);

/// The `StringEqualsIfExists` operator.
pub const StringEqualsIfExists: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::IfExists);

/// The `StringNotEquals` operator.
pub const StringNotEquals: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::Negated);

/// The `StringNotEqualsIfExists` operator.
pub const StringNotEqualsIfExists: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::IfExistsNegated);

/// The `StringEqualsIgnoreCase` operator.
pub const StringEqualsIgnoreCase: ConditionOp = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::None);

/// The `StringEqualsIgnoreCaseIfExists` operator.
pub const StringEqualsIgnoreCaseIfExists: ConditionOp =
    ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExists);

/// The `StringNotEqualsIgnoreCase` operator.
pub const StringNotEqualsIgnoreCase: ConditionOp = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::Negated);

/// The `StringNotEqualsIgnoreCaseIfExists` operator.
pub const StringNotEqualsIgnoreCaseIfExists: ConditionOp =
    ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExistsNegated);

/// The `StringLike` operator.
pub const StringLike: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::None);

/// The `StringLikeIfExists` operator.
pub const StringLikeIfExists: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::IfExists);

/// The `StringNotLike` operator.
pub const StringNotLike: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::Negated);

/// The `StringNotLikeIfExists` operator.
pub const StringNotLikeIfExists: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::IfExistsNegated);

impl ConditionOp {
    /// The IAM name of this operator, e.g. `StringNotLikeIfExists`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arn(cmp, variant) => cmp.display_name(variant),
            Self::Binary(variant) => BINARY_DISPLAY_NAMES[variant.as_usize()],
            Self::Bool(variant) => BOOL_DISPLAY_NAMES[variant.as_usize()],
            Self::Date(cmp, variant) => cmp.display_name(variant),
            Self::IpAddress(variant) => IP_ADDRESS_DISPLAY_NAMES[variant.as_usize()],
            Self::Null => NULL_DISPLAY_NAME,
            Self::Numeric(cmp, variant) => cmp.display_name(variant),
            Self::String(cmp, variant) => cmp.display_name(variant),
        }
    }

    /// The kind of value this operator compares. `Null` takes booleans.
    pub fn family(&self) -> ConditionKeyType {
        match self {
            Self::Arn(_, _) => ConditionKeyType::Arn,
            Self::Binary(_) => ConditionKeyType::Binary,
            Self::Bool(_) | Self::Null => ConditionKeyType::Bool,
            Self::Date(_, _) => ConditionKeyType::Date,
            Self::IpAddress(_) => ConditionKeyType::IpAddress,
            Self::Numeric(_, _) => ConditionKeyType::Numeric,
            Self::String(_, _) => ConditionKeyType::String,
        }
    }

    /// Indicates whether this operator carries the `IfExists` suffix.
    pub fn is_if_exists(&self) -> bool {
        match self {
            Self::Arn(_, variant)
            | Self::Binary(variant)
            | Self::Bool(variant)
            | Self::Date(_, variant)
            | Self::IpAddress(variant)
            | Self::Numeric(_, variant)
            | Self::String(_, variant) => variant.if_exists(),
            Self::Null => false,
        }
    }

    /// Indicates whether this is the negated form of its comparison (`StringNotLike`, `DateGreaterThan`, ...).
    pub fn is_negated(&self) -> bool {
        match self {
            Self::Arn(_, variant)
            | Self::Date(_, variant)
            | Self::IpAddress(variant)
            | Self::Numeric(_, variant)
            | Self::String(_, variant) => variant.negated(),
            Self::Binary(_) | Self::Bool(_) | Self::Null => false,
        }
    }

    /// The `IfExists` form of this operator.
    ///
    /// # Errors
    ///
    /// `Null` has no `IfExists` form; [StatementError::InvalidConditionOperator] is returned for it.
    pub fn if_exists(self) -> Result<Self, StatementError> {
        match self {
            Self::Arn(cmp, variant) => Ok(Self::Arn(cmp, variant.with_if_exists())),
            Self::Binary(variant) => Ok(Self::Binary(variant.with_if_exists())),
            Self::Bool(variant) => Ok(Self::Bool(variant.with_if_exists())),
            Self::Date(cmp, variant) => Ok(Self::Date(cmp, variant.with_if_exists())),
            Self::IpAddress(variant) => Ok(Self::IpAddress(variant.with_if_exists())),
            Self::Numeric(cmp, variant) => Ok(Self::Numeric(cmp, variant.with_if_exists())),
            Self::String(cmp, variant) => Ok(Self::String(cmp, variant.with_if_exists())),
            Self::Null => Err(StatementError::InvalidConditionOperator("NullIfExists".to_string())),
        }
    }

    /// Check that a value can be compared by this operator.
    ///
    /// Values containing a policy variable (`${aws:username}`) are only known at evaluation time and are accepted
    /// as-is.
    pub fn validate_value(&self, value: &str) -> Result<(), StatementError> {
        if has_policy_variable(value) {
            return Ok(());
        }

        match self.family() {
            ConditionKeyType::Arn => validate_arn(value),
            ConditionKeyType::Binary => validate_binary(value),
            ConditionKeyType::Bool => validate_bool(value),
            ConditionKeyType::Date => validate_date(value),
            ConditionKeyType::IpAddress => validate_ip_address(value),
            ConditionKeyType::Numeric => validate_numeric(value),
            ConditionKeyType::String => Ok(()),
        }
    }
}

impl PartialEq<str> for ConditionOp {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ConditionOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ConditionOp::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for ConditionOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for ConditionOp {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArnEquals" => Ok(ArnEquals),
            "ArnEqualsIfExists" => Ok(ArnEqualsIfExists),
            "ArnNotEquals" => Ok(ArnNotEquals),
            "ArnNotEqualsIfExists" => Ok(ArnNotEqualsIfExists),
            "ArnLike" => Ok(ArnLike),
            "ArnLikeIfExists" => Ok(ArnLikeIfExists),
            "ArnNotLike" => Ok(ArnNotLike),
            "ArnNotLikeIfExists" => Ok(ArnNotLikeIfExists),
            "BinaryEquals" => Ok(BinaryEquals),
            "BinaryEqualsIfExists" => Ok(BinaryEqualsIfExists),
            "Bool" => Ok(Bool),
            "BoolIfExists" => Ok(BoolIfExists),
            "DateEquals" => Ok(DateEquals),
            "DateEqualsIfExists" => Ok(DateEqualsIfExists),
            "DateNotEquals" => Ok(DateNotEquals),
            "DateNotEqualsIfExists" => Ok(DateNotEqualsIfExists),
            "DateLessThan" => Ok(DateLessThan),
            "DateLessThanIfExists" => Ok(DateLessThanIfExists),
            "DateGreaterThanEquals" => Ok(DateGreaterThanEquals),
            "DateGreaterThanEqualsIfExists" => Ok(DateGreaterThanEqualsIfExists),
            "DateLessThanEquals" => Ok(DateLessThanEquals),
            "DateLessThanEqualsIfExists" => Ok(DateLessThanEqualsIfExists),
            "DateGreaterThan" => Ok(DateGreaterThan),
            "DateGreaterThanIfExists" => Ok(DateGreaterThanIfExists),
            "IpAddress" => Ok(IpAddress),
            "IpAddressIfExists" => Ok(IpAddressIfExists),
            "NotIpAddress" => Ok(NotIpAddress),
            "NotIpAddressIfExists" => Ok(NotIpAddressIfExists),
            "Null" => Ok(Null),
            "NumericEquals" => Ok(NumericEquals),
            "NumericEqualsIfExists" => Ok(NumericEqualsIfExists),
            "NumericNotEquals" => Ok(NumericNotEquals),
            "NumericNotEqualsIfExists" => Ok(NumericNotEqualsIfExists),
            "NumericLessThan" => Ok(NumericLessThan),
            "NumericLessThanIfExists" => Ok(NumericLessThanIfExists),
            "NumericGreaterThanEquals" => Ok(NumericGreaterThanEquals),
            "NumericGreaterThanEqualsIfExists" => Ok(NumericGreaterThanEqualsIfExists),
            "NumericLessThanEquals" => Ok(NumericLessThanEquals),
            "NumericLessThanEqualsIfExists" => Ok(NumericLessThanEqualsIfExists),
            "NumericGreaterThan" => Ok(NumericGreaterThan),
            "NumericGreaterThanIfExists" => Ok(NumericGreaterThanIfExists),
            "StringEquals" => Ok(StringEquals),
            "StringEqualsIfExists" => Ok(StringEqualsIfExists),
            "StringNotEquals" => Ok(StringNotEquals),
            "StringNotEqualsIfExists" => Ok(StringNotEqualsIfExists),
            "StringEqualsIgnoreCase" => Ok(StringEqualsIgnoreCase),
            "StringEqualsIgnoreCaseIfExists" => Ok(StringEqualsIgnoreCaseIfExists),
            "StringNotEqualsIgnoreCase" => Ok(StringNotEqualsIgnoreCase),
            "StringNotEqualsIgnoreCaseIfExists" => Ok(StringNotEqualsIgnoreCaseIfExists),
            "StringLike" => Ok(StringLike),
            "StringLikeIfExists" => Ok(StringLikeIfExists),
            "StringNotLike" => Ok(StringNotLike),
            "StringNotLikeIfExists" => Ok(StringNotLikeIfExists),
            _ => {
                debug!("Unknown condition operator {s}");
                Err(StatementError::InvalidConditionOperator(s.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            condition::{key::ConditionKeyType, op::ConditionOp},
            condop, StatementError,
        },
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    const ALL_NAMES: [&str; 53] = [
        "ArnEquals",
        "ArnEqualsIfExists",
        "ArnLike",
        "ArnLikeIfExists",
        "ArnNotEquals",
        "ArnNotEqualsIfExists",
        "ArnNotLike",
        "ArnNotLikeIfExists",
        "BinaryEquals",
        "BinaryEqualsIfExists",
        "Bool",
        "BoolIfExists",
        "DateEquals",
        "DateEqualsIfExists",
        "DateGreaterThan",
        "DateGreaterThanEquals",
        "DateGreaterThanEqualsIfExists",
        "DateGreaterThanIfExists",
        "DateLessThan",
        "DateLessThanEquals",
        "DateLessThanEqualsIfExists",
        "DateLessThanIfExists",
        "DateNotEquals",
        "DateNotEqualsIfExists",
        "IpAddress",
        "IpAddressIfExists",
        "NotIpAddress",
        "NotIpAddressIfExists",
        "Null",
        "NumericEquals",
        "NumericEqualsIfExists",
        "NumericGreaterThan",
        "NumericGreaterThanEquals",
        "NumericGreaterThanEqualsIfExists",
        "NumericGreaterThanIfExists",
        "NumericLessThan",
        "NumericLessThanEquals",
        "NumericLessThanEqualsIfExists",
        "NumericLessThanIfExists",
        "NumericNotEquals",
        "NumericNotEqualsIfExists",
        "StringEquals",
        "StringEqualsIfExists",
        "StringEqualsIgnoreCase",
        "StringEqualsIgnoreCaseIfExists",
        "StringLike",
        "StringLikeIfExists",
        "StringNotEquals",
        "StringNotEqualsIfExists",
        "StringNotEqualsIgnoreCase",
        "StringNotEqualsIgnoreCaseIfExists",
        "StringNotLike",
        "StringNotLikeIfExists",
    ];

    #[test_log::test]
    fn test_display() {
        for item in ALL_NAMES {
            let op = ConditionOp::from_str(item).unwrap();
            assert_eq!(format!("{}", op), item);
            assert_eq!(&op, item);
            assert_eq!(op.is_if_exists(), item.ends_with("IfExists"));

            if op != condop::Null {
                let ie = op.if_exists().unwrap();
                assert!(ie.is_if_exists());
                assert_eq!(ie.family(), op.family());
                assert_eq!(ie.is_negated(), op.is_negated());
            }
        }
    }

    #[test_log::test]
    fn test_unknown() {
        assert_eq!(
            ConditionOp::from_str("StringSortOf").unwrap_err(),
            StatementError::InvalidConditionOperator("StringSortOf".to_string())
        );
        assert!(condop::Null.if_exists().is_err());
    }

    #[test_log::test]
    fn test_serde() {
        let e = serde_json::from_str::<ConditionOp>("3").unwrap_err();
        assert_eq!(e.to_string(), "invalid type: integer `3`, expected a string at line 1 column 1");

        let c = serde_json::from_str::<ConditionOp>("\"ArnEquals\"").unwrap();
        assert_eq!(c, condop::ArnEquals);
        assert_eq!(serde_json::to_string(&condop::DateGreaterThan).unwrap(), "\"DateGreaterThan\"");

        let e = serde_json::from_str::<ConditionOp>("\"Maybe\"").unwrap_err();
        assert_eq!(e.to_string(), "Invalid condition operator: Maybe");
    }

    #[test_log::test]
    fn test_families() {
        assert_eq!(condop::ArnLike.family(), ConditionKeyType::Arn);
        assert_eq!(condop::Null.family(), ConditionKeyType::Bool);
        assert_eq!(condop::NotIpAddress.family(), ConditionKeyType::IpAddress);
        assert!(condop::NotIpAddress.is_negated());
        assert!(!condop::StringLike.is_negated());
    }

    #[test_log::test]
    fn test_validate_value() {
        assert!(condop::NumericLessThan.validate_value("3600").is_ok());
        assert!(condop::NumericLessThan.validate_value("an hour").is_err());
        assert!(condop::NumericLessThan.validate_value("${aws:MultiFactorAuthAge}").is_ok());
        assert!(condop::Bool.validate_value("true").is_ok());
        assert!(condop::Null.validate_value("maybe").is_err());
        assert!(condop::IpAddress.validate_value("10.0.0.0/8").is_ok());
        assert!(condop::DateLessThan.validate_value("2030-01-01T00:00:00Z").is_ok());
        assert!(condop::ArnLike.validate_value("arn:aws:iam::*:role/admin").is_ok());
        assert!(condop::BinaryEquals.validate_value("QmluYXJ5").is_ok());
        assert!(condop::StringLike.validate_value("anything at all").is_ok());
    }
}
