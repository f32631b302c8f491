use {
    super::{
        key::{ConditionKey, ConditionKeyType},
        operator::Operator,
        value::ConditionValue,
    },
    crate::StatementError,
    log::{debug, trace},
};

/// A single, validated condition: `operator: { key: values }`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionClause {
    key: String,
    operator: Operator,
    values: ConditionValue,
}

impl ConditionClause {
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[inline]
    pub fn values(&self) -> &ConditionValue {
        &self.values
    }

    pub(crate) fn into_parts(self) -> (String, Operator, ConditionValue) {
        (self.key, self.operator, self.values)
    }
}

/// Build a condition clause from a key template such as `aws:RequestTag/${TagKey}`.
///
/// When `operator` is `None`, the operator is the default for the key's value type; well-known global keys
/// (`aws:SourceIp`, `aws:SecureTransport`, ...) use their documented type and everything else is treated as a
/// string.
///
/// # Errors
///
/// * [StatementError::InvalidCondition] if the tag key is missing, empty, or not expected by the key.
/// * [StatementError::InvalidConditionValue] if no values are given, or a value cannot be compared by the operator.
pub fn build_condition<V: Into<ConditionValue>>(
    key_template: &str,
    tag_key: Option<&str>,
    value: V,
    operator: Option<Operator>,
) -> Result<ConditionClause, StatementError> {
    let key_type = ConditionKeyType::of_global_key(key_template);
    build_typed_condition(key_template, tag_key, value, operator, key_type)
}

/// Build a condition clause when the key's value type is already known, e.g. from a service catalog.
pub fn build_typed_condition<V: Into<ConditionValue>>(
    key_template: &str,
    tag_key: Option<&str>,
    value: V,
    operator: Option<Operator>,
    key_type: Option<ConditionKeyType>,
) -> Result<ConditionClause, StatementError> {
    let key = ConditionKey::new(key_template).resolve(tag_key)?;
    let operator = match operator {
        Some(operator) => operator,
        None => Operator::new(key_type.unwrap_or_default().default_operator()),
    };
    let values = value.into();

    if values.is_empty() {
        debug!("Condition on {key} has no values");
        return Err(StatementError::InvalidConditionValue(format!("{key} requires at least one value")));
    }

    for v in values.iter() {
        operator.op().validate_value(v)?;
    }

    trace!("Built condition {operator}: {key} = {:?}", values);
    Ok(ConditionClause {
        key,
        operator,
        values,
    })
}
