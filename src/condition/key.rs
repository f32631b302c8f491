use {
    super::op::{self as condop, ConditionOp},
    crate::StatementError,
    lazy_static::lazy_static,
    log::debug,
    regex::Regex,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        collections::HashMap,
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

lazy_static! {
    static ref KEY_PARAMETER: Regex = Regex::new(r"\$\{[A-Za-z0-9_-]+\}|<[A-Za-z0-9_-]+>").unwrap();
    static ref GLOBAL_KEY_TYPES: HashMap<&'static str, ConditionKeyType> = HashMap::from([
        ("aws:calledvia", ConditionKeyType::String),
        ("aws:calledviafirst", ConditionKeyType::String),
        ("aws:calledvialast", ConditionKeyType::String),
        ("aws:currenttime", ConditionKeyType::Date),
        ("aws:epochtime", ConditionKeyType::Date),
        ("aws:multifactorauthage", ConditionKeyType::Numeric),
        ("aws:multifactorauthpresent", ConditionKeyType::Bool),
        ("aws:principalaccount", ConditionKeyType::String),
        ("aws:principalarn", ConditionKeyType::Arn),
        ("aws:principalisawsservice", ConditionKeyType::Bool),
        ("aws:principalorgid", ConditionKeyType::String),
        ("aws:principalservicename", ConditionKeyType::String),
        ("aws:principaltype", ConditionKeyType::String),
        ("aws:referer", ConditionKeyType::String),
        ("aws:requestedregion", ConditionKeyType::String),
        ("aws:resourceaccount", ConditionKeyType::String),
        ("aws:securetransport", ConditionKeyType::Bool),
        ("aws:sourceaccount", ConditionKeyType::String),
        ("aws:sourcearn", ConditionKeyType::Arn),
        ("aws:sourceip", ConditionKeyType::IpAddress),
        ("aws:sourcevpc", ConditionKeyType::String),
        ("aws:sourcevpce", ConditionKeyType::String),
        ("aws:tagkeys", ConditionKeyType::String),
        ("aws:tokenissuetime", ConditionKeyType::Date),
        ("aws:useragent", ConditionKeyType::String),
        ("aws:userid", ConditionKeyType::String),
        ("aws:username", ConditionKeyType::String),
        ("aws:viaawsservice", ConditionKeyType::Bool),
        ("aws:vpcsourceip", ConditionKeyType::IpAddress),
    ]);
}

/// The kind of value a condition key holds.
///
/// Catalogs also use `ArrayOfString`, `ArrayOfARN` and so on for multivalued keys; these map to their element type.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionKeyType {
    String,
    Arn,
    Numeric,
    Date,
    IpAddress,
    Binary,
    Bool,
}

impl ConditionKeyType {
    /// The operator used when the caller does not name one.
    pub fn default_operator(&self) -> ConditionOp {
        match self {
            Self::String => condop::StringLike,
            Self::Arn => condop::ArnLike,
            Self::Numeric => condop::NumericEquals,
            Self::Date => condop::DateEquals,
            Self::IpAddress => condop::IpAddress,
            Self::Binary => condop::BinaryEquals,
            Self::Bool => condop::Bool,
        }
    }

    /// The value type of a well-known global `aws:` key, if it is one.
    pub fn of_global_key(key: &str) -> Option<Self> {
        GLOBAL_KEY_TYPES.get(key.to_ascii_lowercase().as_str()).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Arn => "ARN",
            Self::Numeric => "Numeric",
            Self::Date => "Date",
            Self::IpAddress => "IPAddress",
            Self::Binary => "Binary",
            Self::Bool => "Bool",
        }
    }
}

impl Default for ConditionKeyType {
    fn default() -> Self {
        Self::String
    }
}

impl FromStr for ConditionKeyType {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let base = lower.strip_prefix("arrayof").unwrap_or(&lower);

        match base {
            "string" => Ok(Self::String),
            "arn" => Ok(Self::Arn),
            "numeric" | "number" | "long" => Ok(Self::Numeric),
            "date" => Ok(Self::Date),
            "ipaddress" | "ip" => Ok(Self::IpAddress),
            "binary" => Ok(Self::Binary),
            "bool" | "boolean" => Ok(Self::Bool),
            _ => {
                debug!("Unknown condition key type {s}");
                Err(StatementError::InvalidCatalog(format!("unknown condition key type {s}")))
            }
        }
    }
}

impl Display for ConditionKeyType {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ConditionKeyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ConditionKeyType::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for ConditionKeyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A condition key name, possibly parameterized by a tag key: `aws:RequestTag/${TagKey}`,
/// `kinesis:<stream-tag>`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ConditionKey {
    template: String,
    parameter: Option<(usize, usize)>,
}

impl ConditionKey {
    pub fn new<S: Into<String>>(template: S) -> Self {
        let template = template.into();
        let parameter = KEY_PARAMETER.find(&template).map(|m| (m.start(), m.end()));

        Self {
            template,
            parameter,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Indicates whether this key needs a tag key to be usable.
    #[inline]
    pub fn is_parameterized(&self) -> bool {
        self.parameter.is_some()
    }

    /// The key up to its parameter: `aws:RequestTag/` for `aws:RequestTag/${TagKey}`.
    pub fn prefix(&self) -> &str {
        match self.parameter {
            Some((start, _)) => &self.template[..start],
            None => &self.template,
        }
    }

    /// The service prefix of the key, `aws` for `aws:SourceIp`. Keys without one have none.
    pub fn service(&self) -> Option<&str> {
        self.template.split_once(':').map(|(service, _)| service)
    }

    /// Produce the concrete key name, substituting the tag key into the parameter.
    ///
    /// # Errors
    ///
    /// [StatementError::InvalidCondition] is returned if the key is parameterized and no (or an empty) tag key is
    /// given, if a tag key is given for a key without a parameter, or if the key has more than one parameter.
    pub fn resolve(&self, tag_key: Option<&str>) -> Result<String, StatementError> {
        if KEY_PARAMETER.find_iter(&self.template).count() > 1 {
            debug!("Condition key {} has more than one parameter", self.template);
            return Err(StatementError::InvalidCondition(format!(
                "{} has more than one parameter",
                self.template
            )));
        }

        match (self.parameter, tag_key) {
            (None, None) => Ok(self.template.clone()),
            (None, Some(tag_key)) => {
                debug!("Condition key {} does not take a tag key (got {tag_key})", self.template);
                Err(StatementError::InvalidCondition(format!("{} does not take a tag key", self.template)))
            }
            (Some(_), None) => {
                debug!("Condition key {} requires a tag key", self.template);
                Err(StatementError::InvalidCondition(format!("{} requires a tag key", self.template)))
            }
            (Some(_), Some("")) => {
                debug!("Condition key {} was given an empty tag key", self.template);
                Err(StatementError::InvalidCondition(format!("{} requires a non-empty tag key", self.template)))
            }
            (Some((start, end)), Some(tag_key)) => {
                let mut result = String::with_capacity(self.template.len() + tag_key.len());
                result.push_str(&self.template[..start]);
                result.push_str(tag_key);
                result.push_str(&self.template[end..]);
                Ok(result)
            }
        }
    }
}

impl From<&str> for ConditionKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Display for ConditionKey {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{ConditionKey, ConditionKeyType},
        crate::{condop, StatementError},
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_key_types() {
        assert_eq!(ConditionKeyType::from_str("String").unwrap(), ConditionKeyType::String);
        assert_eq!(ConditionKeyType::from_str("ArrayOfString").unwrap(), ConditionKeyType::String);
        assert_eq!(ConditionKeyType::from_str("ARN").unwrap(), ConditionKeyType::Arn);
        assert_eq!(ConditionKeyType::from_str("ArrayOfARN").unwrap(), ConditionKeyType::Arn);
        assert_eq!(ConditionKeyType::from_str("IPAddress").unwrap(), ConditionKeyType::IpAddress);
        assert_eq!(ConditionKeyType::from_str("Boolean").unwrap(), ConditionKeyType::Bool);
        assert_eq!(
            ConditionKeyType::from_str("Tuple").unwrap_err(),
            StatementError::InvalidCatalog("unknown condition key type Tuple".to_string())
        );

        let t: ConditionKeyType = serde_json::from_str(r#""ArrayOfNumeric""#).unwrap();
        assert_eq!(t, ConditionKeyType::Numeric);
        assert_eq!(serde_json::to_string(&ConditionKeyType::IpAddress).unwrap(), r#""IPAddress""#);
    }

    #[test_log::test]
    fn test_default_operators() {
        assert_eq!(ConditionKeyType::String.default_operator(), condop::StringLike);
        assert_eq!(ConditionKeyType::Arn.default_operator(), condop::ArnLike);
        assert_eq!(ConditionKeyType::Numeric.default_operator(), condop::NumericEquals);
        assert_eq!(ConditionKeyType::Date.default_operator(), condop::DateEquals);
        assert_eq!(ConditionKeyType::IpAddress.default_operator(), condop::IpAddress);
        assert_eq!(ConditionKeyType::Binary.default_operator(), condop::BinaryEquals);
        assert_eq!(ConditionKeyType::Bool.default_operator(), condop::Bool);
        assert_eq!(ConditionKeyType::default(), ConditionKeyType::String);
    }

    #[test_log::test]
    fn test_global_keys() {
        assert_eq!(ConditionKeyType::of_global_key("aws:SourceIp"), Some(ConditionKeyType::IpAddress));
        assert_eq!(ConditionKeyType::of_global_key("aws:SecureTransport"), Some(ConditionKeyType::Bool));
        assert_eq!(ConditionKeyType::of_global_key("aws:PrincipalArn"), Some(ConditionKeyType::Arn));
        assert_eq!(ConditionKeyType::of_global_key("firehose:Unknown"), None);
    }

    #[test_log::test]
    fn test_resolve() {
        let key = ConditionKey::new("aws:RequestTag/${TagKey}");
        assert!(key.is_parameterized());
        assert_eq!(key.prefix(), "aws:RequestTag/");
        assert_eq!(key.service(), Some("aws"));
        assert_eq!(key.resolve(Some("Team")).unwrap(), "aws:RequestTag/Team");
        assert_eq!(
            key.resolve(None).unwrap_err(),
            StatementError::InvalidCondition("aws:RequestTag/${TagKey} requires a tag key".to_string())
        );
        assert!(key.resolve(Some("")).is_err());

        let key = ConditionKey::new("kinesis:<stream-tag>/owner");
        assert_eq!(key.resolve(Some("env")).unwrap(), "kinesis:env/owner");

        let key = ConditionKey::from("aws:SourceIp");
        assert!(!key.is_parameterized());
        assert_eq!(key.prefix(), "aws:SourceIp");
        assert_eq!(key.resolve(None).unwrap(), "aws:SourceIp");
        assert_eq!(
            key.resolve(Some("Team")).unwrap_err().to_string(),
            "Invalid condition: aws:SourceIp does not take a tag key"
        );

        assert_eq!(ConditionKey::new("TagKeys").service(), None);
    }

    #[test_log::test]
    fn test_resolve_multiple_parameters() {
        let key = ConditionKey::new("svc:${A}/${B}");
        assert_eq!(
            key.resolve(Some("x")).unwrap_err(),
            StatementError::InvalidCondition("svc:${A}/${B} has more than one parameter".to_string())
        );
        assert!(key.resolve(None).is_err());

        let key = ConditionKey::new("svc:<a>/${B}");
        assert!(key.resolve(Some("x")).is_err());
    }
}
