mod arn;

use {
    crate::{
        serutil::{invalid_str, StringLikeList},
        StatementError,
    },
    serde::{
        de::{self, Deserializer, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

pub use arn::ResourceArn;

pub type ResourceList = StringLikeList<Resource>;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Resource {
    Any,
    Arn(ResourceArn),
}

impl Resource {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<ResourceArn> for Resource {
    fn from(arn: ResourceArn) -> Self {
        Self::Arn(arn)
    }
}

impl FromStr for Resource {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::Any);
        }

        let arn = ResourceArn::from_str(s)?;
        Ok(Self::Arn(arn))
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Arn(arn) => f.write_str(arn.as_str()),
        }
    }
}

struct ResourceVisitor {}

impl<'de> Visitor<'de> for ResourceVisitor {
    type Value = Resource;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "an ARN or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Resource::from_str(v).map_err(|_| invalid_str(v, &self))
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ResourceVisitor {})
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{serutil::ListKind, Resource, ResourceArn, ResourceList},
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn deserialize_resource_list_star() {
        let resource_list: ResourceList = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(resource_list.kind(), ListKind::Single);
        assert_eq!(resource_list.to_vec(), vec![&Resource::Any]);
    }

    #[test_log::test]
    fn check_from() {
        let arn = ResourceArn::from_str("arn:aws:kinesis:*:*:stream/orders").unwrap();
        let rl1: ResourceList = Resource::from(arn.clone()).into();
        let rl2: ResourceList = vec![Resource::Arn(arn.clone())].into();

        assert_eq!(rl1, rl2);
        assert_eq!(rl1[0], Resource::Arn(arn));
        assert_eq!(serde_json::to_string(&rl1).unwrap(), r#""arn:aws:kinesis:*:*:stream/orders""#);
        assert_eq!(serde_json::to_string(&rl2).unwrap(), r#"["arn:aws:kinesis:*:*:stream/orders"]"#);
    }

    #[test_log::test]
    fn check_bad() {
        let e = Resource::from_str("arn:aws").unwrap_err();
        assert_eq!(e.to_string(), "Invalid resource: arn:aws");

        let e = serde_json::from_str::<ResourceList>(r#"["foo-bar-baz"]"#).unwrap_err();
        assert!(e.to_string().starts_with(r#"invalid value: string "foo-bar-baz", expected an ARN or "*""#));
    }

    #[test_log::test]
    fn check_derived() {
        let r1a = Resource::from_str("arn:aws:ec2:us-east-2:123456789012:instance/*").unwrap();
        let r1b = Resource::from_str("arn:aws:ec2:us-east-2:123456789012:instance/*").unwrap();
        let r2 = Resource::Any;

        assert_eq!(r1a, r1b);
        assert!(r1a != r2);
        assert!(r2.is_any());
        assert_eq!(r1a.to_string(), "arn:aws:ec2:us-east-2:123456789012:instance/*");
        assert_eq!(r2.to_string(), "*");
    }
}
