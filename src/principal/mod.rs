mod aws;
mod specified;

pub use {
    aws::AwsPrincipal,
    specified::{SpecifiedPrincipal, SpecifiedPrincipalBuilder, SpecifiedPrincipalBuilderError},
};

use {
    crate::{display_json, serutil::StringLikeList, StatementError},
    log::debug,
    serde::{
        de::{self, value::MapAccessDeserializer, Deserializer, MapAccess, Unexpected, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

/// The `Principal` (or `NotPrincipal`) element of a statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Principal {
    Any,
    Specified(SpecifiedPrincipal),
}

impl Principal {
    /// The root principal of an account.
    pub fn account(partition: &str, account_id: &str) -> Result<Self, StatementError> {
        Ok(Self::from_aws(AwsPrincipal::root(partition, account_id)?))
    }

    pub fn user(partition: &str, account_id: &str, user_name: &str) -> Result<Self, StatementError> {
        Ok(Self::from_aws(AwsPrincipal::user(partition, account_id, user_name)?))
    }

    pub fn role(partition: &str, account_id: &str, role_name: &str) -> Result<Self, StatementError> {
        Ok(Self::from_aws(AwsPrincipal::role(partition, account_id, role_name)?))
    }

    /// A service principal such as `firehose.amazonaws.com`.
    pub fn service(service: &str) -> Result<Self, StatementError> {
        if service.is_empty() || service.contains(char::is_whitespace) {
            debug!("Invalid service principal '{service}'");
            return Err(StatementError::InvalidPrincipal(service.to_string()));
        }

        Ok(Self::Specified(SpecifiedPrincipal::from_service(service.to_string())))
    }

    /// A federated identity provider: a SAML provider ARN or a web identity domain like `cognito-identity.amazonaws.com`.
    pub fn federated(provider: &str) -> Result<Self, StatementError> {
        if provider.is_empty() {
            debug!("Empty federated principal");
            return Err(StatementError::InvalidPrincipal(provider.to_string()));
        }

        Ok(Self::Specified(SpecifiedPrincipal::from_federated(provider.to_string())))
    }

    pub fn canonical_user(canonical_user_id: &str) -> Result<Self, StatementError> {
        if canonical_user_id.len() != 64 || !canonical_user_id.bytes().all(|c| c.is_ascii_hexdigit()) {
            debug!("Canonical user ID '{canonical_user_id}' is not 64 hex digits");
            return Err(StatementError::InvalidPrincipal(canonical_user_id.to_string()));
        }

        Ok(Self::Specified(SpecifiedPrincipal::from_canonical_user(canonical_user_id.to_string())))
    }

    fn from_aws(aws: AwsPrincipal) -> Self {
        Self::Specified(SpecifiedPrincipal::from_aws(StringLikeList::Single(aws)))
    }

    /// Combine two principal elements. `*` absorbs everything else.
    pub fn merge(self, other: Principal) -> Principal {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => Self::Any,
            (Self::Specified(mut a), Self::Specified(b)) => {
                a.merge(b);
                Self::Specified(a)
            }
        }
    }
}

impl From<SpecifiedPrincipal> for Principal {
    fn from(sp: SpecifiedPrincipal) -> Self {
        Self::Specified(sp)
    }
}

struct PrincipalVisitor {}

impl<'de> Visitor<'de> for PrincipalVisitor {
    type Value = Principal;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "map of principal types to values or \"*\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v == "*" {
            Ok(Principal::Any)
        } else {
            Err(E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let deserializer = MapAccessDeserializer::new(access);
        match SpecifiedPrincipal::deserialize(deserializer) {
            Ok(pm) => Ok(Principal::Specified(pm)),
            Err(e) => {
                debug!("Failed to deserialize principal: {:?}", e);
                Err(e)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PrincipalVisitor {})
    }
}

impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Any => serializer.serialize_str("*"),
            Self::Specified(specified) => specified.serialize(serializer),
        }
    }
}

display_json!(Principal);
