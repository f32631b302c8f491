use {
    crate::StatementError,
    derive_builder::Builder,
    lazy_static::lazy_static,
    log::{debug, trace},
    regex::Regex,
    std::{
        collections::HashMap,
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([^${}]*)\}").unwrap();
}

/// Fallback values for the standard ARN placeholders `${Partition}`, `${Region}` and `${Account}`.
///
/// The defaults produce ARNs that match any region and any account in the commercial partition:
/// `arn:aws:<service>:*:*:<resource>`.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ArnDefaults {
    #[builder(setter(into), default = "\"aws\".to_string()")]
    partition: String,

    #[builder(setter(into), default = "\"*\".to_string()")]
    region: String,

    #[builder(setter(into), default = "\"*\".to_string()")]
    account: String,
}

impl ArnDefaults {
    /// Create a [ArnDefaultsBuilder] to construct a custom set of defaults.
    #[inline]
    pub fn builder() -> ArnDefaultsBuilder {
        ArnDefaultsBuilder::default()
    }

    #[inline]
    pub fn partition(&self) -> &str {
        &self.partition
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[inline]
    pub fn account(&self) -> &str {
        &self.account
    }

    fn get(&self, placeholder: &str) -> Option<&str> {
        match placeholder {
            "Partition" => Some(&self.partition),
            "Region" => Some(&self.region),
            "Account" | "AccountId" => Some(&self.account),
            _ => None,
        }
    }
}

impl ArnDefaultsBuilder {
    fn validate(&self) -> Result<(), ArnDefaultsBuilderError> {
        let mut errors = Vec::with_capacity(3);

        if let Some(partition) = &self.partition {
            if partition.is_empty() {
                errors.push("${Partition} must not be empty.".to_string());
            }
        }

        for (name, value) in [("Partition", &self.partition), ("Region", &self.region), ("Account", &self.account)] {
            if let Some(value) = value {
                if value.contains(':') {
                    debug!("ARN default for {name} contains ':': {value}");
                    errors.push(format!("${{{name}}} must not contain ':': {value}"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ArnDefaultsBuilderError::ValidationError(errors.join(" ")))
        }
    }
}

impl Default for ArnDefaults {
    fn default() -> Self {
        Self {
            partition: "aws".to_string(),
            region: "*".to_string(),
            account: "*".to_string(),
        }
    }
}

/// Indicates whether a placeholder is one of the standard ARN components rather than resource-specific.
pub fn is_standard_placeholder(name: &str) -> bool {
    matches!(name, "Partition" | "Region" | "Account" | "AccountId")
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed ARN template such as `arn:${Partition}:firehose:${Region}:${Account}:deliverystream/${DeliveryStreamName}`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArnTemplate {
    template: String,
    segments: Vec<Segment>,
}

impl ArnTemplate {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Every placeholder name, in template order.
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// The resource-specific placeholders, in template order with duplicates removed.
    ///
    /// These are the positional identifiers a caller supplies when naming a resource of this type.
    pub fn resource_placeholders(&self) -> Vec<&str> {
        let mut result: Vec<&str> = Vec::new();
        for name in self.placeholders() {
            if !is_standard_placeholder(name) && !result.contains(&name) {
                result.push(name);
            }
        }
        result
    }

    /// Substitute every placeholder, failing on the first one without a value.
    pub fn resolve(&self, values: &HashMap<&str, &str>, defaults: &ArnDefaults) -> Result<String, StatementError> {
        let mut result = String::with_capacity(self.template.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => result.push_str(s),
                Segment::Placeholder(name) => match lookup(name, values, defaults) {
                    Some(value) => result.push_str(value),
                    None => {
                        debug!("ARN template {} has no value for ${{{}}}", self.template, name);
                        return Err(StatementError::UnresolvedPlaceholder(format!("${{{}}}", name)));
                    }
                },
            }
        }

        trace!("Resolved {} to {}", self.template, result);
        Ok(result)
    }

    /// Substitute the placeholders that have values, leaving the rest in place as `${Name}`.
    pub fn resolve_partial(&self, values: &HashMap<&str, &str>, defaults: &ArnDefaults) -> String {
        let mut result = String::with_capacity(self.template.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => result.push_str(s),
                Segment::Placeholder(name) => match lookup(name, values, defaults) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("${");
                        result.push_str(name);
                        result.push('}');
                    }
                },
            }
        }

        result
    }
}

fn lookup<'a>(name: &str, values: &HashMap<&str, &'a str>, defaults: &'a ArnDefaults) -> Option<&'a str> {
    if let Some(value) = values.get(name) {
        return Some(*value);
    }

    // Account and AccountId name the same component.
    let alias = match name {
        "Account" => values.get("AccountId"),
        "AccountId" => values.get("Account"),
        _ => None,
    };

    match alias {
        Some(value) => Some(*value),
        None => defaults.get(name),
    }
}

impl FromStr for ArnTemplate {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut last = 0;

        let push_literal = |segments: &mut Vec<Segment>, literal: &str| {
            if literal.contains("${") {
                debug!("ARN template {s} has an unterminated or nested placeholder");
                return Err(StatementError::InvalidTemplate(s.to_string()));
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_string()));
            }
            Ok(())
        };

        for cap in PLACEHOLDER.captures_iter(s) {
            let (m, name) = match (cap.get(0), cap.get(1)) {
                (Some(m), Some(name)) => (m, name.as_str()),
                _ => continue,
            };

            if name.is_empty() {
                debug!("ARN template {s} has an empty placeholder");
                return Err(StatementError::InvalidTemplate(s.to_string()));
            }

            push_literal(&mut segments, &s[last..m.start()])?;
            segments.push(Segment::Placeholder(name.to_string()));
            last = m.end();
        }

        push_literal(&mut segments, &s[last..])?;

        Ok(Self {
            template: s.to_string(),
            segments,
        })
    }
}

impl Display for ArnTemplate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.template)
    }
}

/// Resolve an ARN template string in one step. See [ArnTemplate::resolve].
pub fn resolve(template: &str, values: &HashMap<&str, &str>, defaults: &ArnDefaults) -> Result<String, StatementError> {
    ArnTemplate::from_str(template)?.resolve(values, defaults)
}

/// Resolve an ARN template string in one step, leaving unknown placeholders in place. See
/// [ArnTemplate::resolve_partial].
pub fn resolve_partial(
    template: &str,
    values: &HashMap<&str, &str>,
    defaults: &ArnDefaults,
) -> Result<String, StatementError> {
    Ok(ArnTemplate::from_str(template)?.resolve_partial(values, defaults))
}
