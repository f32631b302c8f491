use {
    crate::{
        build_typed_condition, catalogs, AccessLevel, Action, ArnDefaults, ArnTemplate, ConditionClause,
        ConditionKeyType, ConditionValue, Effect, GlobalConditions, Operator, PolicyStatement, Principal, Resource,
        ServiceCatalog, Statement, StatementError,
    },
    log::{debug, trace},
    regex::{Regex, RegexBuilder},
    std::{collections::HashMap, str::FromStr, sync::Arc},
};

/// Builds one policy statement for one AWS service, checking actions and resource types against the service's
/// catalog.
///
/// ```
/// use scratchstack_floyd::{catalogs, PolicyStatementBuilder};
///
/// let mut builder = PolicyStatementBuilder::new(catalogs::firehose().unwrap());
/// builder.to("CreateDeliveryStream").unwrap().on("deliverystream", &["my-stream"]).unwrap();
/// let statement = builder.finalize().unwrap();
/// assert!(statement.to_string().contains("arn:aws:firehose:*:*:deliverystream/my-stream"));
/// ```
#[derive(Clone, Debug)]
pub struct PolicyStatementBuilder {
    catalog: Arc<ServiceCatalog>,
    defaults: ArnDefaults,
    statement: PolicyStatement,
}

impl PolicyStatementBuilder {
    pub fn new(catalog: Arc<ServiceCatalog>) -> Self {
        Self {
            catalog,
            defaults: ArnDefaults::default(),
            statement: PolicyStatement::new(),
        }
    }

    /// Create a builder for one of the embedded catalogs.
    pub fn for_service_prefix(service_prefix: &str) -> Result<Self, StatementError> {
        Ok(Self::new(catalogs::load(service_prefix)?))
    }

    /// Use different partition, region and account values for resources built with [Self::on].
    pub fn with_defaults(mut self, defaults: ArnDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[inline]
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    #[inline]
    pub fn defaults(&self) -> &ArnDefaults {
        &self.defaults
    }

    /// The statement accumulated so far.
    #[inline]
    pub fn statement(&self) -> &PolicyStatement {
        &self.statement
    }

    pub fn finalize(&mut self) -> Result<Statement, StatementError> {
        self.statement.finalize()
    }

    pub fn sid<S: Into<String>>(&mut self, sid: S) -> Result<&mut Self, StatementError> {
        self.statement.set_sid(sid)?;
        Ok(self)
    }

    pub fn allow(&mut self) -> Result<&mut Self, StatementError> {
        self.statement.set_effect(Effect::Allow)?;
        Ok(self)
    }

    pub fn deny(&mut self) -> Result<&mut Self, StatementError> {
        self.statement.set_effect(Effect::Deny)?;
        Ok(self)
    }

    fn catalog_action(&self, name: &str) -> Result<Action, StatementError> {
        let prefix = self.catalog.service_prefix();
        let name = match name.split_once(':') {
            None => name,
            Some((service, action)) if service == prefix => action,
            Some(_) => {
                debug!("Action {name} does not belong to service {prefix}");
                return Err(StatementError::UnknownAction(name.to_string()));
            }
        };

        self.catalog.action(name)?;
        Action::new(prefix, name)
    }

    /// Add an action by name, with or without the service prefix: `PutRecord` or `firehose:PutRecord`.
    pub fn to(&mut self, action: &str) -> Result<&mut Self, StatementError> {
        let action = self.catalog_action(action)?;
        self.statement.add_action(action)?;
        Ok(self)
    }

    pub fn not_to(&mut self, action: &str) -> Result<&mut Self, StatementError> {
        let action = self.catalog_action(action)?;
        self.statement.add_not_action(action)?;
        Ok(self)
    }

    /// Every action of the service, as `prefix:*`.
    pub fn all_actions(&mut self) -> Result<&mut Self, StatementError> {
        let action = Action::all(self.catalog.service_prefix())?;
        self.statement.add_action(action)?;
        Ok(self)
    }

    /// Add every catalog action whose name matches `pattern`.
    ///
    /// A pattern written as `/regex/` (or `/regex/i` for case-insensitive matching) is a regular expression;
    /// anything else is a glob where `*` matches any run of characters and `?` matches one character.
    pub fn all_matching_actions(&mut self, pattern: &str) -> Result<&mut Self, StatementError> {
        let regex = action_pattern(pattern)?;
        let names: Vec<String> = self.catalog.actions().keys().filter(|name| regex.is_match(name)).cloned().collect();

        if names.is_empty() {
            debug!("No {} action matches {pattern}", self.catalog.service_prefix());
        }

        for name in names {
            self.add_catalog_action(&name)?;
        }
        Ok(self)
    }

    fn add_catalog_action(&mut self, name: &str) -> Result<(), StatementError> {
        let action = Action::new(self.catalog.service_prefix(), name)?;
        self.statement.add_action(action)?;
        Ok(())
    }

    fn add_access_level(&mut self, level: AccessLevel) -> Result<&mut Self, StatementError> {
        let names: Vec<String> =
            self.catalog.actions_with_access_level(level).into_iter().map(String::from).collect();
        trace!("Adding {} {level} actions", names.len());

        for name in names {
            self.add_catalog_action(&name)?;
        }
        Ok(self)
    }

    pub fn all_list_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level(AccessLevel::List)
    }

    pub fn all_read_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level(AccessLevel::Read)
    }

    pub fn all_write_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level(AccessLevel::Write)
    }

    pub fn all_tagging_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level(AccessLevel::Tagging)
    }

    pub fn all_permission_management_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level(AccessLevel::PermissionsManagement)
    }

    /// The positional identifiers [Self::on] expects for a resource type.
    pub fn resource_parameters(&self, resource_type: &str) -> Result<Vec<String>, StatementError> {
        self.catalog.resource_parameters(resource_type)
    }

    fn resource_arn(
        &self,
        resource_type: &str,
        ids: &[&str],
        defaults: &ArnDefaults,
    ) -> Result<Resource, StatementError> {
        let template = ArnTemplate::from_str(self.catalog.resource_type(resource_type)?.arn())?;
        let parameters = template.resource_placeholders();

        if parameters.len() != ids.len() {
            debug!("Resource type {resource_type} expects {parameters:?}, got {ids:?}");
            return Err(StatementError::InvalidResource(format!(
                "{}:{resource_type} expects {} identifier(s): {}",
                self.catalog.service_prefix(),
                parameters.len(),
                parameters.join(", ")
            )));
        }

        if let Some((parameter, _)) = parameters.iter().zip(ids).find(|(_, id)| id.is_empty()) {
            debug!("Resource type {resource_type} was given an empty {parameter}");
            return Err(StatementError::InvalidResource(format!(
                "{}:{resource_type} requires a non-empty ${{{parameter}}}",
                self.catalog.service_prefix()
            )));
        }

        let values: HashMap<&str, &str> = parameters.into_iter().zip(ids.iter().copied()).collect();
        let arn = template.resolve(&values, defaults)?;
        Resource::from_str(&arn)
    }

    /// Add a resource of the given type, identified by the type's positional parameters in ARN order.
    ///
    /// Partition, region and account come from the builder's [ArnDefaults].
    pub fn on(&mut self, resource_type: &str, ids: &[&str]) -> Result<&mut Self, StatementError> {
        let resource = self.resource_arn(resource_type, ids, &self.defaults)?;
        self.statement.add_resource(resource)?;
        Ok(self)
    }

    /// Like [Self::on], overriding the builder's account, region or partition for this resource.
    pub fn on_in(
        &mut self,
        resource_type: &str,
        ids: &[&str],
        account: Option<&str>,
        region: Option<&str>,
        partition: Option<&str>,
    ) -> Result<&mut Self, StatementError> {
        let defaults = ArnDefaults::builder()
            .partition(partition.unwrap_or_else(|| self.defaults.partition()))
            .region(region.unwrap_or_else(|| self.defaults.region()))
            .account(account.unwrap_or_else(|| self.defaults.account()))
            .build()
            .map_err(|e| StatementError::InvalidResource(e.to_string()))?;

        let resource = self.resource_arn(resource_type, ids, &defaults)?;
        self.statement.add_resource(resource)?;
        Ok(self)
    }

    pub fn not_on(&mut self, resource_type: &str, ids: &[&str]) -> Result<&mut Self, StatementError> {
        let resource = self.resource_arn(resource_type, ids, &self.defaults)?;
        self.statement.add_not_resource(resource)?;
        Ok(self)
    }

    /// Add a resource by its ARN, which may contain wildcards.
    pub fn on_arn(&mut self, arn: &str) -> Result<&mut Self, StatementError> {
        self.statement.add_resource(Resource::from_str(arn)?)?;
        Ok(self)
    }

    pub fn not_on_arn(&mut self, arn: &str) -> Result<&mut Self, StatementError> {
        self.statement.add_not_resource(Resource::from_str(arn)?)?;
        Ok(self)
    }

    pub fn on_all_resources(&mut self) -> Result<&mut Self, StatementError> {
        self.statement.add_resource(Resource::Any)?;
        Ok(self)
    }

    /// Add a condition on a key, e.g. `aws:RequestTag/${TagKey}` with tag key `Team`.
    ///
    /// A key without a service prefix belongs to this service. With no operator, the default for the key's type
    /// in the catalog is used.
    pub fn if_key<V: Into<ConditionValue>>(
        &mut self,
        key: &str,
        tag_key: Option<&str>,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let key = if key.contains(':') {
            key.to_string()
        } else {
            format!("{}:{key}", self.catalog.service_prefix())
        };

        let key_type = self.catalog.condition_key_type(&key).or_else(|| ConditionKeyType::of_global_key(&key));
        let clause = build_typed_condition(&key, tag_key, value, operator, key_type)?;
        self.statement.add_condition(clause)?;
        Ok(self)
    }

    pub fn if_condition(&mut self, clause: ConditionClause) -> Result<&mut Self, StatementError> {
        self.statement.add_condition(clause)?;
        Ok(self)
    }

    fn add_principal(&mut self, principal: Principal) -> Result<&mut Self, StatementError> {
        self.statement.add_principal(principal)?;
        Ok(self)
    }

    /// The root principal of an account, in the builder's partition.
    pub fn for_account(&mut self, account_id: &str) -> Result<&mut Self, StatementError> {
        let principal = Principal::account(self.defaults.partition(), account_id)?;
        self.add_principal(principal)
    }

    pub fn for_user(&mut self, account_id: &str, user_name: &str) -> Result<&mut Self, StatementError> {
        let principal = Principal::user(self.defaults.partition(), account_id, user_name)?;
        self.add_principal(principal)
    }

    pub fn for_role(&mut self, account_id: &str, role_name: &str) -> Result<&mut Self, StatementError> {
        let principal = Principal::role(self.defaults.partition(), account_id, role_name)?;
        self.add_principal(principal)
    }

    pub fn for_service(&mut self, service: &str) -> Result<&mut Self, StatementError> {
        self.add_principal(Principal::service(service)?)
    }

    pub fn for_federated(&mut self, provider: &str) -> Result<&mut Self, StatementError> {
        self.add_principal(Principal::federated(provider)?)
    }

    pub fn for_canonical_user(&mut self, canonical_user_id: &str) -> Result<&mut Self, StatementError> {
        self.add_principal(Principal::canonical_user(canonical_user_id)?)
    }

    /// Everyone: `"Principal": "*"`.
    pub fn for_public(&mut self) -> Result<&mut Self, StatementError> {
        self.add_principal(Principal::Any)
    }

    /// Write the principals as `NotPrincipal`.
    pub fn not_principals(&mut self) -> Result<&mut Self, StatementError> {
        self.statement.set_not_principal(true)?;
        Ok(self)
    }
}

impl GlobalConditions for PolicyStatementBuilder {
    #[inline]
    fn add_clause(&mut self, clause: ConditionClause) -> Result<&mut Self, StatementError> {
        self.if_condition(clause)
    }
}

fn action_pattern(pattern: &str) -> Result<Regex, StatementError> {
    let builder = if let Some(re) = pattern.strip_prefix('/').and_then(|p| p.strip_suffix("/i")) {
        let mut builder = RegexBuilder::new(re);
        builder.case_insensitive(true);
        builder
    } else if let Some(re) = pattern.strip_prefix('/').and_then(|p| p.strip_suffix('/')) {
        RegexBuilder::new(re)
    } else {
        regex_from_glob(pattern)
    };

    builder.build().map_err(|e| {
        debug!("Invalid action pattern {pattern}: {e}");
        StatementError::InvalidAction(pattern.to_string())
    })
}

fn regex_from_glob(s: &str) -> RegexBuilder {
    let mut pattern = String::with_capacity(2 + s.len());
    pattern.push('^');

    for c in s.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => {
                let escaped: String = regex::escape(&String::from(c));
                pattern.push_str(&escaped);
            }
        }
    }
    pattern.push('$');
    RegexBuilder::new(&pattern)
}

#[cfg(test)]
mod tests {
    use {
        super::PolicyStatementBuilder,
        crate::{catalogs, condop, ArnDefaults, GlobalConditions, Operator, Statement, StatementError},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    fn firehose() -> PolicyStatementBuilder {
        PolicyStatementBuilder::new(catalogs::firehose().unwrap())
    }

    fn action_names(builder: &PolicyStatementBuilder) -> Vec<String> {
        builder.statement().actions().iter().map(|a| a.to_string()).collect()
    }

    #[test_log::test]
    fn test_firehose_end_to_end() {
        let mut b = firehose();
        b.to("CreateDeliveryStream").unwrap().on("deliverystream", &["my-stream"]).unwrap();
        let statement = b.finalize().unwrap();

        let expected = indoc! { r#"
            {
                "Effect": "Allow",
                "Action": [
                    "firehose:CreateDeliveryStream"
                ],
                "Resource": [
                    "arn:aws:firehose:*:*:deliverystream/my-stream"
                ]
            }"# };
        assert_eq!(statement.to_string(), expected);
        assert_eq!(Statement::from_str(expected).unwrap(), statement);

        assert!(matches!(b.to("PutRecord").unwrap_err(), StatementError::InvalidState(_)));
    }

    #[test_log::test]
    fn test_multi_action() {
        let mut b = firehose();
        b.to("PutRecord")
            .unwrap()
            .to("firehose:PutRecordBatch")
            .unwrap()
            .to("PutRecord")
            .unwrap()
            .on_arn("arn:aws:firehose:us-west-2:123456789012:deliverystream/*")
            .unwrap()
            .if_aws_secure_transport(None)
            .unwrap();

        let statement = b.finalize().unwrap();
        assert_eq!(
            statement.to_string(),
            indoc! { r#"
            {
                "Effect": "Allow",
                "Action": [
                    "firehose:PutRecord",
                    "firehose:PutRecordBatch"
                ],
                "Resource": [
                    "arn:aws:firehose:us-west-2:123456789012:deliverystream/*"
                ],
                "Condition": {
                    "Bool": {
                        "aws:SecureTransport": "true"
                    }
                }
            }"# }
        );
    }

    #[test_log::test]
    fn test_unknown_names() {
        let mut b = firehose();
        assert_eq!(b.to("Frobnicate").unwrap_err(), StatementError::UnknownAction("firehose:Frobnicate".to_string()));
        assert_eq!(b.to("kinesis:PutRecord").unwrap_err(), StatementError::UnknownAction("kinesis:PutRecord".to_string()));
        assert_eq!(
            b.on("stream", &["x"]).unwrap_err(),
            StatementError::UnknownResourceType("firehose:stream".to_string())
        );
        assert_eq!(
            b.on("deliverystream", &[]).unwrap_err(),
            StatementError::InvalidResource("firehose:deliverystream expects 1 identifier(s): DeliveryStreamName".to_string())
        );
        assert!(b.on_arn("not-an-arn").is_err());
        assert!(b.statement().actions().is_empty());
        assert!(b.statement().resources().is_empty());
    }

    #[test_log::test]
    fn test_action_selection() {
        let mut b = firehose();
        b.all_matching_actions("Put*").unwrap();
        assert_eq!(action_names(&b), vec!["firehose:PutRecord", "firehose:PutRecordBatch"]);

        let mut b = firehose();
        b.all_matching_actions("/^(start|stop)deliverystream/i").unwrap();
        assert_eq!(
            action_names(&b),
            vec!["firehose:StartDeliveryStreamEncryption", "firehose:StopDeliveryStreamEncryption"]
        );

        let mut b = firehose();
        b.all_matching_actions("/Describe.*/").unwrap().all_matching_actions("?elete*").unwrap();
        assert_eq!(action_names(&b), vec!["firehose:DescribeDeliveryStream", "firehose:DeleteDeliveryStream"]);
        assert_eq!(b.all_matching_actions("/(/").unwrap_err(), StatementError::InvalidAction("/(/".to_string()));

        let mut b = firehose();
        b.all_list_actions().unwrap().all_tagging_actions().unwrap().all_permission_management_actions().unwrap();
        assert_eq!(
            action_names(&b),
            vec![
                "firehose:ListDeliveryStreams",
                "firehose:ListTagsForDeliveryStream",
                "firehose:TagDeliveryStream",
                "firehose:UntagDeliveryStream"
            ]
        );

        let mut b = firehose();
        b.all_read_actions().unwrap();
        assert_eq!(action_names(&b), vec!["firehose:DescribeDeliveryStream"]);
        b.all_write_actions().unwrap();
        assert_eq!(action_names(&b).len(), 8);

        let mut b = firehose();
        b.all_actions().unwrap().not_to("DeleteDeliveryStream").unwrap();
        assert_eq!(action_names(&b), vec!["firehose:*"]);
        assert_eq!(b.statement().not_actions().len(), 1);
    }

    #[test_log::test]
    fn test_resources() {
        let defaults = ArnDefaults::builder().region("us-east-1").account("123456789012").build().unwrap();
        let mut b = PolicyStatementBuilder::new(catalogs::kinesis().unwrap()).with_defaults(defaults);
        assert_eq!(b.defaults().region(), "us-east-1");
        assert_eq!(
            b.resource_parameters("consumer").unwrap(),
            vec!["StreamType", "StreamName", "ConsumerName", "ConsumerCreationTimpstamp"]
        );

        b.to("SubscribeToShard")
            .unwrap()
            .on("stream", &["orders"])
            .unwrap()
            .on_in("stream", &["audit"], Some("210987654321"), Some("eu-west-1"), Some("aws-cn"))
            .unwrap()
            .on("consumer", &["stream", "orders", "reader", "1700000000"])
            .unwrap()
            .on("stream", &["orders"])
            .unwrap();

        let resources: Vec<String> = b.statement().resources().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            resources,
            vec![
                "arn:aws:kinesis:us-east-1:123456789012:stream/orders",
                "arn:aws-cn:kinesis:eu-west-1:210987654321:stream/audit",
                "arn:aws:kinesis:us-east-1:123456789012:stream/orders/consumer/reader:1700000000",
            ]
        );

        let mut b = PolicyStatementBuilder::for_service_prefix("kinesis").unwrap();
        b.to("DeleteStream").unwrap().not_on("stream", &["keep"]).unwrap().not_on_arn("arn:aws:kinesis:*:*:stream/safe-*").unwrap();
        let statement = b.finalize().unwrap();
        assert!(statement.resource().is_none());
        assert_eq!(statement.not_resource().unwrap().len(), 2);

        let mut b = firehose();
        b.to("ListDeliveryStreams").unwrap().on_all_resources().unwrap();
        assert_eq!(b.finalize().unwrap().resource().unwrap()[0].to_string(), "*");

        assert_eq!(
            PolicyStatementBuilder::for_service_prefix("s3").unwrap_err(),
            StatementError::UnknownService("s3".to_string())
        );
    }

    #[test_log::test]
    fn test_bad_resource_arguments() {
        let mut b = firehose();
        assert_eq!(
            b.on("deliverystream", &[""]).unwrap_err(),
            StatementError::InvalidResource("firehose:deliverystream requires a non-empty ${DeliveryStreamName}".to_string())
        );

        assert_eq!(
            b.on_in("deliverystream", &["s"], None, Some("us-east-1:999"), None).unwrap_err(),
            StatementError::InvalidResource("${Region} must not contain ':': us-east-1:999".to_string())
        );
        assert_eq!(
            b.on_in("deliverystream", &["s"], Some("1:2"), None, None).unwrap_err(),
            StatementError::InvalidResource("${Account} must not contain ':': 1:2".to_string())
        );
        assert!(b.on_in("deliverystream", &["s"], None, None, Some("aws:cn")).is_err());
        assert!(b.on_in("deliverystream", &["s"], None, None, Some("")).is_err());
        assert!(b.statement().resources().is_empty());

        let mut b = PolicyStatementBuilder::new(catalogs::kinesis().unwrap());
        assert!(b.on("consumer", &["stream", "", "reader", "1700000000"]).unwrap_err().to_string().contains("${StreamName}"));
    }

    #[test_log::test]
    fn test_conditions_and_principals() {
        let mut b = firehose();
        b.sid("TagOnCreate")
            .unwrap()
            .deny()
            .unwrap()
            .to("CreateDeliveryStream")
            .unwrap()
            .if_key("aws:RequestTag/${TagKey}", Some("Team"), "eng", None)
            .unwrap()
            .if_key("aws:TagKeys", None, vec!["Team"], Some(Operator::for_all_values(condop::StringEquals)))
            .unwrap()
            .if_key("DeliveryStreamEncryption", None, "on", Some(Operator::new(condop::StringEquals)))
            .unwrap()
            .for_account("123456789012")
            .unwrap()
            .for_role("123456789012", "deployer")
            .unwrap()
            .for_service("firehose.amazonaws.com")
            .unwrap();

        assert!(b.statement().condition().get_key("firehose:DeliveryStreamEncryption").is_some());
        assert!(b.if_key("aws:RequestTag/${TagKey}", None, "eng", None).is_err());

        let statement = b.finalize().unwrap();
        assert_eq!(
            statement.to_string(),
            indoc! { r#"
            {
                "Sid": "TagOnCreate",
                "Effect": "Deny",
                "Principal": {
                    "AWS": [
                        "arn:aws:iam::123456789012:root",
                        "arn:aws:iam::123456789012:role/deployer"
                    ],
                    "Service": "firehose.amazonaws.com"
                },
                "Action": [
                    "firehose:CreateDeliveryStream"
                ],
                "Resource": "*",
                "Condition": {
                    "StringEquals": {
                        "firehose:DeliveryStreamEncryption": "on"
                    },
                    "StringLike": {
                        "aws:RequestTag/Team": "eng"
                    },
                    "ForAllValues:StringEquals": {
                        "aws:TagKeys": [
                            "Team"
                        ]
                    }
                }
            }"# }
        );

        let mut b = firehose();
        b.to("PutRecord").unwrap().for_public().unwrap().for_user("123456789012", "alice").unwrap().not_principals().unwrap();
        assert_eq!(b.finalize().unwrap().not_principal().unwrap().to_string(), r#""*""#);

        let mut b = firehose();
        b.for_federated("cognito-identity.amazonaws.com").unwrap();
        assert!(b.for_canonical_user("nope").is_err());
        assert!(b.statement().principal().is_some());
        assert!(b.allow().is_ok());
    }
}
