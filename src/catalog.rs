use {
    crate::{Action, ArnTemplate, ConditionKey, ConditionKeyType, StatementError},
    log::debug,
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The access level AWS assigns to an action.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum AccessLevel {
    List,
    Read,
    Tagging,
    Write,
    #[serde(rename = "Permissions management")]
    PermissionsManagement,
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::List => f.write_str("List"),
            Self::Read => f.write_str("Read"),
            Self::Tagging => f.write_str("Tagging"),
            Self::Write => f.write_str("Write"),
            Self::PermissionsManagement => f.write_str("Permissions management"),
        }
    }
}

/// How an action relates to one of the service's resource types.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceTypeOnAction {
    #[serde(default)]
    required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<String>,
}

impl ResourceTypeOnAction {
    #[inline]
    pub fn required(&self) -> bool {
        self.required
    }

    #[inline]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActionDescriptor {
    #[serde(default)]
    url: String,

    #[serde(default)]
    description: String,

    access_level: AccessLevel,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    resource_types: BTreeMap<String, ResourceTypeOnAction>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependent_actions: Vec<String>,
}

impl ActionDescriptor {
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    #[inline]
    pub fn resource_types(&self) -> &BTreeMap<String, ResourceTypeOnAction> {
        &self.resource_types
    }

    /// Condition keys the action supports independently of any resource type.
    #[inline]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    #[inline]
    pub fn dependent_actions(&self) -> &[String] {
        &self.dependent_actions
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceTypeDescriptor {
    name: String,

    #[serde(default)]
    url: String,

    arn: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    condition_keys: Vec<String>,
}

impl ResourceTypeDescriptor {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The ARN template, e.g. `arn:${Partition}:firehose:${Region}:${Account}:deliverystream/${DeliveryStreamName}`.
    #[inline]
    pub fn arn(&self) -> &str {
        &self.arn
    }

    pub fn template(&self) -> Result<ArnTemplate, StatementError> {
        ArnTemplate::from_str(&self.arn)
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionKeyDescriptor {
    key: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    url: String,

    #[serde(rename = "type")]
    key_type: ConditionKeyType,
}

impl ConditionKeyDescriptor {
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn key_type(&self) -> ConditionKeyType {
        self.key_type
    }
}

/// Everything known about one AWS service: its actions, resource types and condition keys.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceCatalog {
    service_prefix: String,

    #[serde(default)]
    name: String,

    #[serde(default)]
    url: String,

    actions: BTreeMap<String, ActionDescriptor>,

    #[serde(default)]
    resource_types: BTreeMap<String, ResourceTypeDescriptor>,

    #[serde(default)]
    conditions: BTreeMap<String, ConditionKeyDescriptor>,
}

impl ServiceCatalog {
    /// Parse and validate a catalog from its JSON form.
    pub fn from_json(s: &str) -> Result<Self, StatementError> {
        let catalog: Self = serde_json::from_str(s).map_err(|e| {
            debug!("Failed to parse service catalog: {e}");
            StatementError::InvalidCatalog(e.to_string())
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the internal consistency of the catalog.
    ///
    /// The service prefix must be usable in an action name, every ARN template must parse, and every resource type
    /// and condition key named by an action must be one the catalog describes (global `aws:` keys excepted).
    pub fn validate(&self) -> Result<(), StatementError> {
        if Action::all(self.service_prefix.as_str()).is_err() {
            return Err(StatementError::InvalidCatalog(format!("invalid service prefix {:?}", self.service_prefix)));
        }

        for (name, rt) in &self.resource_types {
            if name != &rt.name {
                return Err(StatementError::InvalidCatalog(format!(
                    "resource type {name} is described as {}",
                    rt.name
                )));
            }

            rt.template().map_err(|_| {
                StatementError::InvalidCatalog(format!("resource type {name} has an invalid ARN template: {}", rt.arn))
            })?;
        }

        for (key, descriptor) in &self.conditions {
            if key != &descriptor.key {
                return Err(StatementError::InvalidCatalog(format!(
                    "condition key {key} is described as {}",
                    descriptor.key
                )));
            }
        }

        for (action_name, action) in &self.actions {
            if Action::new(self.service_prefix.as_str(), action_name.as_str()).is_err() {
                return Err(StatementError::InvalidCatalog(format!("invalid action name {action_name}")));
            }

            for rt_name in action.resource_types.keys() {
                if !self.resource_types.contains_key(rt_name) {
                    return Err(StatementError::InvalidCatalog(format!(
                        "action {action_name} refers to unknown resource type {rt_name}"
                    )));
                }
            }

            let rt_conditions = action.resource_types.values().flat_map(|rt| rt.conditions.iter());
            for key in action.conditions.iter().chain(rt_conditions) {
                if !key.starts_with("aws:") && !self.conditions.contains_key(key) {
                    return Err(StatementError::InvalidCatalog(format!(
                        "action {action_name} refers to unknown condition key {key}"
                    )));
                }
            }
        }

        Ok(())
    }

    #[inline]
    pub fn service_prefix(&self) -> &str {
        &self.service_prefix
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn actions(&self) -> &BTreeMap<String, ActionDescriptor> {
        &self.actions
    }

    #[inline]
    pub fn resource_types(&self) -> &BTreeMap<String, ResourceTypeDescriptor> {
        &self.resource_types
    }

    #[inline]
    pub fn conditions(&self) -> &BTreeMap<String, ConditionKeyDescriptor> {
        &self.conditions
    }

    /// Look up an action by name (without the service prefix).
    pub fn action(&self, name: &str) -> Result<&ActionDescriptor, StatementError> {
        self.actions.get(name).ok_or_else(|| {
            debug!("Service {} has no action {name}", self.service_prefix);
            StatementError::UnknownAction(format!("{}:{name}", self.service_prefix))
        })
    }

    pub fn resource_type(&self, name: &str) -> Result<&ResourceTypeDescriptor, StatementError> {
        self.resource_types.get(name).ok_or_else(|| {
            debug!("Service {} has no resource type {name}", self.service_prefix);
            StatementError::UnknownResourceType(format!("{}:{name}", self.service_prefix))
        })
    }

    /// The positional identifiers a resource of this type takes, in ARN order.
    pub fn resource_parameters(&self, resource_type: &str) -> Result<Vec<String>, StatementError> {
        let template = self.resource_type(resource_type)?.template()?;
        Ok(template.resource_placeholders().into_iter().map(String::from).collect())
    }

    /// Names of every action with the given access level, in name order.
    pub fn actions_with_access_level(&self, level: AccessLevel) -> Vec<&str> {
        self.actions.iter().filter(|(_, a)| a.access_level == level).map(|(name, _)| name.as_str()).collect()
    }

    /// The value type of a concrete condition key, e.g. `aws:RequestTag/Team` matches the
    /// `aws:RequestTag/${TagKey}` descriptor.
    pub fn condition_key_type(&self, key: &str) -> Option<ConditionKeyType> {
        if let Some(descriptor) = self.conditions.get(key) {
            return Some(descriptor.key_type);
        }

        self.conditions.values().find_map(|descriptor| {
            let template = ConditionKey::new(descriptor.key.as_str());
            if template.is_parameterized() && key.starts_with(template.prefix()) {
                Some(descriptor.key_type)
            } else {
                None
            }
        })
    }
}

impl FromStr for ServiceCatalog {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{AccessLevel, ServiceCatalog},
        crate::{ConditionKeyType, StatementError},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    const WIDGETS: &str = indoc! { r#"
        {
            "servicePrefix": "widgets",
            "name": "Widget Service",
            "actions": {
                "CreateWidget": {
                    "accessLevel": "Write",
                    "resourceTypes": {"widget": {"required": true}},
                    "conditions": ["aws:RequestTag/${TagKey}", "widgets:Color"],
                    "dependentActions": ["iam:PassRole"]
                },
                "ListWidgets": {"accessLevel": "List"},
                "PutWidgetPolicy": {"accessLevel": "Permissions management"}
            },
            "resourceTypes": {
                "widget": {
                    "name": "widget",
                    "arn": "arn:${Partition}:widgets:${Region}:${Account}:widget/${WidgetId}"
                }
            },
            "conditions": {
                "widgets:Color": {"key": "widgets:Color", "type": "String"},
                "widgets:Size": {"key": "widgets:Size", "type": "Numeric"},
                "widgets:Label/${LabelKey}": {"key": "widgets:Label/${LabelKey}", "type": "ArrayOfString"}
            }
        }"# };

    #[test_log::test]
    fn test_parse() {
        let catalog = ServiceCatalog::from_str(WIDGETS).unwrap();
        assert_eq!(catalog.service_prefix(), "widgets");
        assert_eq!(catalog.name(), "Widget Service");
        assert_eq!(catalog.url(), "");
        assert_eq!(catalog.actions().len(), 3);

        let create = catalog.action("CreateWidget").unwrap();
        assert_eq!(create.access_level(), AccessLevel::Write);
        assert!(create.resource_types()["widget"].required());
        assert_eq!(create.dependent_actions(), &["iam:PassRole".to_string()]);
        assert_eq!(create.conditions().len(), 2);

        assert_eq!(catalog.resource_parameters("widget").unwrap(), vec!["WidgetId".to_string()]);
        assert_eq!(catalog.actions_with_access_level(AccessLevel::PermissionsManagement), vec!["PutWidgetPolicy"]);
        assert_eq!(catalog.actions_with_access_level(AccessLevel::Tagging), Vec::<&str>::new());
        assert_eq!(AccessLevel::PermissionsManagement.to_string(), "Permissions management");

        assert_eq!(catalog.condition_key_type("widgets:Size"), Some(ConditionKeyType::Numeric));
        assert_eq!(catalog.condition_key_type("widgets:Label/shape"), Some(ConditionKeyType::String));
        assert_eq!(catalog.condition_key_type("widgets:Weight"), None);
    }

    #[test_log::test]
    fn test_unknown_lookups() {
        let catalog = ServiceCatalog::from_str(WIDGETS).unwrap();
        assert_eq!(
            catalog.action("DeleteWidget").unwrap_err(),
            StatementError::UnknownAction("widgets:DeleteWidget".to_string())
        );
        assert_eq!(
            catalog.resource_type("gadget").unwrap_err(),
            StatementError::UnknownResourceType("widgets:gadget".to_string())
        );
        assert!(catalog.resource_parameters("gadget").is_err());
    }

    #[test_log::test]
    fn test_invalid_catalogs() {
        let e = ServiceCatalog::from_str(r#"{"servicePrefix": "x"}"#).unwrap_err();
        assert!(matches!(e, StatementError::InvalidCatalog(_)));

        let e = ServiceCatalog::from_str(r#"{"servicePrefix": "-x", "actions": {}}"#).unwrap_err();
        assert_eq!(e.to_string(), r#"Invalid service catalog: invalid service prefix "-x""#);

        let bad_rt = WIDGETS.replace(r#""resourceTypes": {"widget": {"required": true}}"#, r#""resourceTypes": {"gizmo": {}}"#);
        assert_eq!(
            ServiceCatalog::from_str(&bad_rt).unwrap_err(),
            StatementError::InvalidCatalog("action CreateWidget refers to unknown resource type gizmo".to_string())
        );

        let bad_arn = WIDGETS.replace("widget/${WidgetId}", "widget/${WidgetId");
        assert!(ServiceCatalog::from_str(&bad_arn).unwrap_err().to_string().contains("invalid ARN template"));

        let bad_key = WIDGETS.replace(r#""widgets:Color", "type""#, r#""widgets:Colour", "type""#);
        assert_eq!(
            ServiceCatalog::from_str(&bad_key).unwrap_err(),
            StatementError::InvalidCatalog("condition key widgets:Color is described as widgets:Colour".to_string())
        );

        let bad_type = WIDGETS.replace(r#""type": "Numeric""#, r#""type": "Tuple""#);
        assert!(ServiceCatalog::from_str(&bad_type).is_err());
    }
}
