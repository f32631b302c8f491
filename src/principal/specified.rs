use {
    super::AwsPrincipal,
    crate::{display_json, serutil::StringLikeList},
    derive_builder::Builder,
    serde::{Deserialize, Serialize},
};

#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpecifiedPrincipal {
    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "AWS", skip_serializing_if = "Option::is_none")]
    aws: Option<StringLikeList<AwsPrincipal>>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "CanonicalUser", skip_serializing_if = "Option::is_none")]
    canonical_user: Option<StringLikeList<String>>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "Federated", skip_serializing_if = "Option::is_none")]
    federated: Option<StringLikeList<String>>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "Service", skip_serializing_if = "Option::is_none")]
    service: Option<StringLikeList<String>>,
}

display_json!(SpecifiedPrincipal);

impl SpecifiedPrincipal {
    #[inline]
    pub fn builder() -> SpecifiedPrincipalBuilder {
        SpecifiedPrincipalBuilder::default()
    }

    #[inline]
    pub fn aws(&self) -> Option<&StringLikeList<AwsPrincipal>> {
        self.aws.as_ref()
    }

    #[inline]
    pub fn canonical_user(&self) -> Option<&StringLikeList<String>> {
        self.canonical_user.as_ref()
    }

    #[inline]
    pub fn federated(&self) -> Option<&StringLikeList<String>> {
        self.federated.as_ref()
    }

    #[inline]
    pub fn service(&self) -> Option<&StringLikeList<String>> {
        self.service.as_ref()
    }

    pub(super) fn from_aws(aws: StringLikeList<AwsPrincipal>) -> Self {
        Self {
            aws: Some(aws),
            ..Default::default()
        }
    }

    pub(super) fn from_canonical_user(canonical_user: String) -> Self {
        Self {
            canonical_user: Some(StringLikeList::Single(canonical_user)),
            ..Default::default()
        }
    }

    pub(super) fn from_federated(federated: String) -> Self {
        Self {
            federated: Some(StringLikeList::Single(federated)),
            ..Default::default()
        }
    }

    pub(super) fn from_service(service: String) -> Self {
        Self {
            service: Some(StringLikeList::Single(service)),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.aws.is_none() && self.canonical_user.is_none() && self.federated.is_none() && self.service.is_none()
    }

    /// Fold another principal block into this one. Each entry appears once, in the order first added.
    pub fn merge(&mut self, other: SpecifiedPrincipal) {
        merge_list(&mut self.aws, other.aws);
        merge_list(&mut self.canonical_user, other.canonical_user);
        merge_list(&mut self.federated, other.federated);
        merge_list(&mut self.service, other.service);
    }
}

fn merge_list<T: Clone + PartialEq>(target: &mut Option<StringLikeList<T>>, source: Option<StringLikeList<T>>) {
    let source = match source {
        Some(source) => source,
        None => return,
    };

    let mut merged: Vec<T> = match target.take() {
        Some(existing) => existing.iter().cloned().collect(),
        None => Vec::new(),
    };

    for item in source.iter() {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }

    *target = Some(if merged.len() == 1 {
        StringLikeList::Single(merged.remove(0))
    } else {
        StringLikeList::List(merged)
    });
}
