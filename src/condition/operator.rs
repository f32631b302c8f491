use {
    super::op::ConditionOp,
    crate::StatementError,
    log::debug,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// How a multivalued request key is compared against the condition values.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetOperator {
    ForAllValues,
    ForAnyValue,
}

impl SetOperator {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ForAllValues => "ForAllValues",
            Self::ForAnyValue => "ForAnyValue",
        }
    }
}

impl Display for SetOperator {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.name())
    }
}

/// A full condition operator as it appears in a `Condition` block: `StringLike`, `ForAnyValue:StringEquals`,
/// `ForAllValues:ArnLikeIfExists`, ...
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Operator {
    set: Option<SetOperator>,
    op: ConditionOp,
}

impl Operator {
    #[inline]
    pub fn new(op: ConditionOp) -> Self {
        Self {
            set: None,
            op,
        }
    }

    /// The `ForAnyValue:` form of an operator.
    #[inline]
    pub fn for_any_value(op: ConditionOp) -> Self {
        Self {
            set: Some(SetOperator::ForAnyValue),
            op,
        }
    }

    /// The `ForAllValues:` form of an operator.
    #[inline]
    pub fn for_all_values(op: ConditionOp) -> Self {
        Self {
            set: Some(SetOperator::ForAllValues),
            op,
        }
    }

    #[inline]
    pub fn set_operator(&self) -> Option<SetOperator> {
        self.set
    }

    #[inline]
    pub fn op(&self) -> ConditionOp {
        self.op
    }

    /// This operator with `IfExists` appended.
    pub fn if_exists(self) -> Result<Self, StatementError> {
        Ok(Self {
            set: self.set,
            op: self.op.if_exists()?,
        })
    }
}

impl From<ConditionOp> for Operator {
    fn from(op: ConditionOp) -> Self {
        Self::new(op)
    }
}

impl PartialEq<ConditionOp> for Operator {
    fn eq(&self, other: &ConditionOp) -> bool {
        self.set.is_none() && &self.op == other
    }
}

impl FromStr for Operator {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (set, op) = match s.split_once(':') {
            None => (None, s),
            Some(("ForAnyValue", op)) => (Some(SetOperator::ForAnyValue), op),
            Some(("ForAllValues", op)) => (Some(SetOperator::ForAllValues), op),
            Some(_) => {
                debug!("Unknown set operator in {s}");
                return Err(StatementError::InvalidConditionOperator(s.to_string()));
            }
        };

        let op = ConditionOp::from_str(op).map_err(|_| StatementError::InvalidConditionOperator(s.to_string()))?;
        Ok(Self {
            set,
            op,
        })
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self.set {
            Some(set) => write!(f, "{}:{}", set, self.op),
            None => write!(f, "{}", self.op),
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Operator::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{Operator, SetOperator},
        crate::{condop, StatementError},
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_parse() {
        let op = Operator::from_str("ForAnyValue:StringEquals").unwrap();
        assert_eq!(op, Operator::for_any_value(condop::StringEquals));
        assert_eq!(op.set_operator(), Some(SetOperator::ForAnyValue));
        assert_eq!(op.op(), condop::StringEquals);
        assert_eq!(op.to_string(), "ForAnyValue:StringEquals");

        let op = Operator::from_str("ForAllValues:ArnLikeIfExists").unwrap();
        assert_eq!(op, Operator::for_all_values(condop::ArnLikeIfExists));

        let op = Operator::from_str("StringNotLike").unwrap();
        assert_eq!(op, condop::StringNotLike);
        assert_eq!(op.to_string(), "StringNotLike");

        for bad in ["ForSomeValues:StringEquals", "ForAnyValue:Maybe", "", "StringLike:"] {
            assert_eq!(Operator::from_str(bad).unwrap_err(), StatementError::InvalidConditionOperator(bad.to_string()));
        }
    }

    #[test_log::test]
    fn test_if_exists() {
        let op = Operator::for_any_value(condop::StringLike).if_exists().unwrap();
        assert_eq!(op.to_string(), "ForAnyValue:StringLikeIfExists");
        assert!(Operator::new(condop::Null).if_exists().is_err());
    }

    #[test_log::test]
    fn test_serde() {
        let op: Operator = serde_json::from_str(r#""ForAllValues:StringLike""#).unwrap();
        assert_eq!(serde_json::to_string(&op).unwrap(), r#""ForAllValues:StringLike""#);
        assert_eq!(Operator::from(condop::Bool).to_string(), "Bool");
    }
}
