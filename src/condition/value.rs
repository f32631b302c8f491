use {
    super::{binary::encode_binary, date::format_date},
    crate::serutil::StringLikeList,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// The right-hand side of a condition clause: one value or a list of values, held in their IAM string form.
///
/// Booleans and numbers are written as strings, dates as RFC 3339 UTC timestamps, and binary data as base64.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConditionValue(StringLikeList<String>);

impl ConditionValue {
    /// A base64-encoded binary value.
    pub fn binary<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self(StringLikeList::Single(encode_binary(bytes)))
    }

    #[inline]
    pub fn values(&self) -> &StringLikeList<String> {
        &self.0
    }

    #[inline]
    pub fn into_values(self) -> StringLikeList<String> {
        self.0
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<StringLikeList<String>> for ConditionValue {
    fn from(v: StringLikeList<String>) -> Self {
        Self(v)
    }
}

impl From<&str> for ConditionValue {
    fn from(v: &str) -> Self {
        Self(StringLikeList::Single(v.to_string()))
    }
}

impl From<String> for ConditionValue {
    fn from(v: String) -> Self {
        Self(StringLikeList::Single(v))
    }
}

impl From<&String> for ConditionValue {
    fn from(v: &String) -> Self {
        Self(StringLikeList::Single(v.clone()))
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(v: Vec<&str>) -> Self {
        Self(StringLikeList::List(v.into_iter().map(String::from).collect()))
    }
}

impl From<Vec<String>> for ConditionValue {
    fn from(v: Vec<String>) -> Self {
        Self(StringLikeList::List(v))
    }
}

impl<const N: usize> From<[&str; N]> for ConditionValue {
    fn from(v: [&str; N]) -> Self {
        Self(StringLikeList::List(v.iter().map(|s| s.to_string()).collect()))
    }
}

impl From<bool> for ConditionValue {
    fn from(v: bool) -> Self {
        Self(StringLikeList::Single(v.to_string()))
    }
}

impl From<i64> for ConditionValue {
    fn from(v: i64) -> Self {
        Self(StringLikeList::Single(v.to_string()))
    }
}

impl From<i32> for ConditionValue {
    fn from(v: i32) -> Self {
        Self(StringLikeList::Single(v.to_string()))
    }
}

impl From<u64> for ConditionValue {
    fn from(v: u64) -> Self {
        Self(StringLikeList::Single(v.to_string()))
    }
}

impl From<f64> for ConditionValue {
    fn from(v: f64) -> Self {
        Self(StringLikeList::Single(v.to_string()))
    }
}

impl From<DateTime<Utc>> for ConditionValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self(StringLikeList::Single(format_date(&v)))
    }
}

impl From<Vec<DateTime<Utc>>> for ConditionValue {
    fn from(v: Vec<DateTime<Utc>>) -> Self {
        Self(StringLikeList::List(v.iter().map(format_date).collect()))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::ConditionValue,
        crate::serutil::StringLikeList,
        chrono::{TimeZone, Utc},
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_conversions() {
        assert_eq!(ConditionValue::from("eng").values(), &StringLikeList::Single("eng".to_string()));
        assert_eq!(ConditionValue::from(true).values()[0], "true");
        assert_eq!(ConditionValue::from(3600i64).values()[0], "3600");
        assert_eq!(ConditionValue::from(1.5).values()[0], "1.5");
        assert_eq!(
            ConditionValue::from(vec!["a", "b"]).iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(ConditionValue::from(["x"]).into_values(), StringLikeList::List(vec!["x".to_string()]));
        assert_eq!(ConditionValue::binary(b"hi").values()[0], "aGk=");

        let dt = Utc.with_ymd_and_hms(2030, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(ConditionValue::from(dt).values()[0], "2030-06-01T12:30:00Z");
        assert!(ConditionValue::from(Vec::<String>::new()).is_empty());
    }

    #[test_log::test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&ConditionValue::from("x")).unwrap(), r#""x""#);
        assert_eq!(serde_json::to_string(&ConditionValue::from(vec!["x", "y"])).unwrap(), r#"["x","y"]"#);
        let v: ConditionValue = serde_json::from_str("false").unwrap();
        assert_eq!(v, ConditionValue::from(false));
    }
}
