use {
    crate::{ResourceArn, StatementError},
    lazy_static::lazy_static,
    log::debug,
    regex::Regex,
    serde::{
        de::{self, Deserializer, Unexpected, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

lazy_static! {
    static ref AWS_ACCOUNT_ID: Regex = Regex::new(r"^\d{12}$").unwrap();
}

/// An entry under the `AWS` key of a principal: an account ID, an IAM ARN, or `*`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum AwsPrincipal {
    Account(String),
    Any,
    Arn(ResourceArn),
}

impl AwsPrincipal {
    /// The root principal of an account: `arn:<partition>:iam::<account>:root`.
    pub fn root(partition: &str, account_id: &str) -> Result<Self, StatementError> {
        Self::iam(partition, account_id, "root")
    }

    /// An IAM user: `arn:<partition>:iam::<account>:user/<name>`.
    pub fn user(partition: &str, account_id: &str, user_name: &str) -> Result<Self, StatementError> {
        Self::iam(partition, account_id, &format!("user/{user_name}"))
    }

    /// An IAM role: `arn:<partition>:iam::<account>:role/<name>`.
    pub fn role(partition: &str, account_id: &str, role_name: &str) -> Result<Self, StatementError> {
        Self::iam(partition, account_id, &format!("role/{role_name}"))
    }

    fn iam(partition: &str, account_id: &str, resource: &str) -> Result<Self, StatementError> {
        if !AWS_ACCOUNT_ID.is_match(account_id) {
            debug!("Principal account {account_id} is not a 12-digit account ID");
            return Err(StatementError::InvalidPrincipal(account_id.to_string()));
        }

        if partition.is_empty() || resource.ends_with('/') {
            debug!("Principal arn:{partition}:iam::{account_id}:{resource} is incomplete");
            return Err(StatementError::InvalidPrincipal(format!("arn:{partition}:iam::{account_id}:{resource}")));
        }

        Ok(Self::Arn(ResourceArn::new(partition, "iam", "", account_id, resource)))
    }
}

impl Display for AwsPrincipal {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Account(account_id) => f.write_str(account_id),
            Self::Any => f.write_str("*"),
            Self::Arn(arn) => f.write_str(arn.as_str()),
        }
    }
}

impl FromStr for AwsPrincipal {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, StatementError> {
        if s == "*" {
            Ok(Self::Any)
        } else if AWS_ACCOUNT_ID.is_match(s) {
            Ok(AwsPrincipal::Account(s.to_string()))
        } else {
            match ResourceArn::from_str(s) {
                Ok(arn) => Ok(AwsPrincipal::Arn(arn)),
                Err(_) => Err(StatementError::InvalidPrincipal(s.to_string())),
            }
        }
    }
}

struct AwsPrincipalVisitor {}

impl<'de> Visitor<'de> for AwsPrincipalVisitor {
    type Value = AwsPrincipal;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "AWS account ID or ARN pattern")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match AwsPrincipal::from_str(v) {
            Ok(principal) => Ok(principal),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for AwsPrincipal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(AwsPrincipalVisitor {})
    }
}

impl Serialize for AwsPrincipal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{AwsPrincipal, StatementError},
        pretty_assertions::{assert_eq, assert_ne},
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_derived() {
        let ap1 = AwsPrincipal::Any;
        let ap2 = AwsPrincipal::from_str("123456789012").unwrap();
        let ap3a = AwsPrincipal::from_str("arn:aws:iam::123456789012:root").unwrap();
        let ap3b = AwsPrincipal::root("aws", "123456789012").unwrap();

        assert_eq!(ap2, AwsPrincipal::Account("123456789012".to_string()));
        assert_eq!(ap3a, ap3b);
        assert_ne!(ap1, ap2);
        assert_ne!(ap2, ap3a);
        assert_eq!(ap3a.clone(), ap3a);
    }

    #[test_log::test]
    fn test_constructors() {
        assert_eq!(
            AwsPrincipal::user("aws", "123456789012", "alice").unwrap().to_string(),
            "arn:aws:iam::123456789012:user/alice"
        );
        assert_eq!(
            AwsPrincipal::role("aws-cn", "123456789012", "deployer").unwrap().to_string(),
            "arn:aws-cn:iam::123456789012:role/deployer"
        );
        assert_eq!(
            AwsPrincipal::root("aws", "1234").unwrap_err(),
            StatementError::InvalidPrincipal("1234".to_string())
        );
        assert!(AwsPrincipal::role("aws", "123456789012", "").is_err());
    }

    #[test_log::test]
    fn test_serde() {
        let ap: AwsPrincipal = serde_json::from_str(r#""*""#).unwrap();
        assert_eq!(ap, AwsPrincipal::Any);
        assert_eq!(serde_json::to_string(&AwsPrincipal::root("aws", "123456789012").unwrap()).unwrap(), r#""arn:aws:iam::123456789012:root""#);

        let e = serde_json::from_str::<AwsPrincipal>(r#""alice""#).unwrap_err();
        assert!(e.to_string().starts_with(r#"invalid value: string "alice", expected AWS account ID or ARN pattern"#));
    }
}
