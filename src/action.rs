use {
    crate::{serutil::StringLikeList, StatementError},
    log::debug,
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

pub type ActionList = StringLikeList<Action>;

/// A fully-qualified IAM action, `service:ActionName`, or the global wildcard `*`.
///
/// The action name may contain `*` wildcards (`ec2:Describe*`); the service prefix may not.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Any,
    Specific {
        service: String,
        action: String,
    },
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, StatementError> {
        let service = service.into();
        let action = action.into();

        if service.is_empty() {
            debug!("Action '{service}:{action}' has an empty service.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        if action.is_empty() {
            debug!("Action '{service}:{action}' has an empty action.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        if !service.is_ascii() || !action.is_ascii() {
            debug!("Action '{service}:{action}' is not ASCII.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        for (i, c) in service.bytes().enumerate() {
            if !c.is_ascii_alphanumeric() && !(i > 0 && i < service.len() - 1 && (c == b'-' || c == b'_')) {
                debug!("Action '{service}:{action}' has an invalid service.");
                return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
            }
        }

        for (i, c) in action.bytes().enumerate() {
            if !c.is_ascii_alphanumeric() && c != b'*' && !(i > 0 && i < action.len() - 1 && (c == b'-' || c == b'_')) {
                debug!("Action '{service}:{action}' has an invalid action.");
                return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
            }
        }

        Ok(Action::Specific {
            service,
            action,
        })
    }

    /// Every action of a service: `service:*`.
    pub fn all<S: Into<String>>(service: S) -> Result<Self, StatementError> {
        Self::new(service, "*")
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    #[inline]
    pub fn is_specific(&self) -> bool {
        matches!(self, Self::Specific { .. })
    }

    /// Indicates whether the action name contains a wildcard.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.action().contains('*')
    }

    #[inline]
    pub fn service(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Specific {
                service,
                ..
            } => service,
        }
    }

    #[inline]
    pub fn action(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Specific {
                action,
                ..
            } => action,
        }
    }
}

impl FromStr for Action {
    type Err = StatementError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        if v == "*" {
            return Ok(Self::Any);
        }

        let parts: Vec<&str> = v.split(':').collect();
        if parts.len() != 2 {
            return Err(StatementError::InvalidAction(v.to_string()));
        }

        Action::new(parts[0], parts[1])
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Specific {
                service,
                action,
            } => write!(f, "{}:{}", service, action),
        }
    }
}

struct ActionVisitor {}

impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "service:action or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match Action::from_str(v) {
            Ok(action) => Ok(action),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ActionVisitor {})
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{Action, ActionList},
        pretty_assertions::{assert_eq, assert_ne},
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_eq() {
        let a1a = ActionList::Single(Action::new("s1", "a1").unwrap());
        let a1b = ActionList::List(vec![Action::new("s1", "a1").unwrap()]);
        let a2 = ActionList::Single(Action::new("s2", "a1").unwrap());
        let a3 = ActionList::List(vec![]);

        assert_eq!(a1a, a1b);
        assert_eq!(a1b, a1a);
        assert_ne!(a1a, a2);
        assert_ne!(a1b, a3);
        assert_eq!(a1a.len(), 1);
        assert!(a3.is_empty());
        assert_eq!(a1b[0].to_string(), "s1:a1");
    }

    #[test_log::test]
    fn test_serde() {
        let list = ActionList::List(vec![Action::new("firehose", "PutRecord").unwrap(), Action::Any]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["firehose:PutRecord","*"]"#);

        let parsed: ActionList = serde_json::from_str(r#""kinesis:Get*""#).unwrap();
        assert_eq!(parsed[0], Action::new("kinesis", "Get*").unwrap());
        assert!(parsed[0].is_wildcard());

        let e = serde_json::from_str::<ActionList>(r#"["kinesis:"]"#).unwrap_err();
        assert!(e.to_string().starts_with(r#"invalid value: string "kinesis:", expected service:action or "*""#));
    }

    #[test_log::test]
    fn test_all() {
        let a = Action::all("firehose").unwrap();
        assert_eq!(a.to_string(), "firehose:*");
        assert!(a.is_wildcard());
        assert!(Action::all("").is_err());
    }

    #[test_log::test]
    fn test_bad_strings() {
        assert_eq!(Action::from_str("").unwrap_err().to_string(), "Invalid action: ");
        assert_eq!(Action::from_str("ec2:").unwrap_err().to_string(), "Invalid action: ec2:");
        assert_eq!(
            Action::from_str(":DescribeInstances").unwrap_err().to_string(),
            "Invalid action: :DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2:Describe:Instances").unwrap_err().to_string(),
            "Invalid action: ec2:Describe:Instances"
        );
        assert_eq!(
            Action::from_str("-ec2:DescribeInstances").unwrap_err().to_string(),
            "Invalid action: -ec2:DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2_:DescribeInstances").unwrap_err().to_string(),
            "Invalid action: ec2_:DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2:DescribeInstances-").unwrap_err().to_string(),
            "Invalid action: ec2:DescribeInstances-"
        );
        assert_eq!(Action::from_str("ec2:Déscribe").unwrap_err().to_string(), "Invalid action: ec2:Déscribe");

        assert_eq!(Action::from_str("e_c-2:De-scribe_Instances").unwrap().service(), "e_c-2");
        assert_eq!(Action::from_str("e_c-2:De-scribe_Instances").unwrap().action(), "De-scribe_Instances");
        assert!(Action::from_str("e_c-2:De-scribe_Instances").unwrap().is_specific());
        assert!(Action::from_str("*").unwrap().is_any());
        assert_eq!(Action::from_str("*").unwrap().service(), "*");
    }
}
