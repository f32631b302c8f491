use {
    crate::{
        display_json, from_str_json, serutil::StringLikeList, Action, ActionList, Condition, ConditionClause, Effect,
        Principal, Resource, ResourceList, StatementError,
    },
    derive_builder::Builder,
    log::{debug, trace},
    serde::{
        de::{Deserializer, MapAccess, Visitor},
        Deserialize, Serialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

/// A finished IAM policy statement, as it appears in a policy document.
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct Statement {
    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    sid: Option<String>,

    effect: Effect,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<Principal>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    not_principal: Option<Principal>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<ActionList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    not_action: Option<ActionList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<ResourceList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    not_resource: Option<ResourceList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
}

impl Statement {
    pub fn builder() -> StatementBuilder {
        StatementBuilder::default()
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    #[inline]
    pub fn action(&self) -> Option<&ActionList> {
        self.action.as_ref()
    }

    #[inline]
    pub fn not_action(&self) -> Option<&ActionList> {
        self.not_action.as_ref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&ResourceList> {
        self.resource.as_ref()
    }

    #[inline]
    pub fn not_resource(&self) -> Option<&ResourceList> {
        self.not_resource.as_ref()
    }

    #[inline]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    #[inline]
    pub fn not_principal(&self) -> Option<&Principal> {
        self.not_principal.as_ref()
    }

    #[inline]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

display_json!(Statement);
from_str_json!(Statement);

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatementVisitor {})
    }
}

struct StatementVisitor;
impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
        formatter.write_str("a map of statement properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Statement, A::Error> {
        let mut builder = Statement::builder();
        let mut sid_seen = false;
        let mut effect_seen = false;
        let mut action_seen = false;
        let mut not_action_seen = false;
        let mut resource_seen = false;
        let mut not_resource_seen = false;
        let mut principal_seen = false;
        let mut not_principal_seen = false;
        let mut condition_seen = false;

        while let Some(key) = access.next_key::<&str>()? {
            match key {
                "Sid" => {
                    if sid_seen {
                        return Err(serde::de::Error::duplicate_field("Sid"));
                    }

                    sid_seen = true;
                    builder.sid(access.next_value::<&str>()?);
                }
                "Effect" => {
                    if effect_seen {
                        return Err(serde::de::Error::duplicate_field("Effect"));
                    }

                    effect_seen = true;
                    builder.effect(access.next_value::<Effect>()?);
                }
                "Action" => {
                    if action_seen {
                        return Err(serde::de::Error::duplicate_field("Action"));
                    }

                    action_seen = true;
                    builder.action(access.next_value::<ActionList>()?);
                }
                "NotAction" => {
                    if not_action_seen {
                        return Err(serde::de::Error::duplicate_field("NotAction"));
                    }

                    not_action_seen = true;
                    builder.not_action(access.next_value::<ActionList>()?);
                }
                "Resource" => {
                    if resource_seen {
                        return Err(serde::de::Error::duplicate_field("Resource"));
                    }

                    resource_seen = true;
                    builder.resource(access.next_value::<ResourceList>()?);
                }
                "NotResource" => {
                    if not_resource_seen {
                        return Err(serde::de::Error::duplicate_field("NotResource"));
                    }

                    not_resource_seen = true;
                    builder.not_resource(access.next_value::<ResourceList>()?);
                }
                "Principal" => {
                    if principal_seen {
                        return Err(serde::de::Error::duplicate_field("Principal"));
                    }

                    principal_seen = true;
                    builder.principal(access.next_value::<Principal>()?);
                }
                "NotPrincipal" => {
                    if not_principal_seen {
                        return Err(serde::de::Error::duplicate_field("NotPrincipal"));
                    }

                    not_principal_seen = true;
                    builder.not_principal(access.next_value::<Principal>()?);
                }
                "Condition" => {
                    if condition_seen {
                        return Err(serde::de::Error::duplicate_field("Condition"));
                    }

                    condition_seen = true;
                    builder.condition(access.next_value::<Condition>()?);
                }
                _ => {
                    return Err(serde::de::Error::unknown_field(
                        key,
                        &[
                            "Sid",
                            "Effect",
                            "Principal",
                            "NotPrincipal",
                            "Action",
                            "NotAction",
                            "Resource",
                            "NotResource",
                            "Condition",
                        ],
                    ));
                }
            }
        }

        builder.build().map_err(|e| match e {
            StatementBuilderError::ValidationError(s) => {
                let msg2 = s.replace('.', ";").trim_end_matches(|c| c == ';').to_string();
                serde::de::Error::custom(StatementBuilderError::ValidationError(msg2))
            }
            _ => serde::de::Error::custom(e),
        })
    }
}

impl StatementBuilder {
    fn validate(&self) -> Result<(), StatementBuilderError> {
        let mut errors = Vec::with_capacity(5);
        if self.effect.is_none() {
            errors.push("Effect must be set.");
        }

        match (&self.action, &self.not_action) {
            (Some(Some(_)), Some(Some(_))) => errors.push("Action and NotAction cannot both be set."),
            (Some(Some(_)), _) | (_, Some(Some(_))) => (),
            _ => errors.push("Either Action or NotAction must be set."),
        }

        match (&self.resource, &self.not_resource) {
            (Some(Some(_)), Some(Some(_))) => errors.push("Resource and NotResource cannot both be set."),
            (Some(Some(_)), _) | (_, Some(Some(_))) => (),
            _ => errors.push("Either Resource or NotResource must be set."),
        }

        if let (Some(Some(_)), Some(Some(_))) = (&self.principal, &self.not_principal) {
            errors.push("Principal and NotPrincipal cannot both be set.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StatementBuilderError::ValidationError(errors.join(" ")))
        }
    }
}

pub type StatementList = Vec<Statement>;

/// Lifecycle of a [PolicyStatement].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatementState {
    Building,
    Finalized,
}

impl Default for StatementState {
    fn default() -> Self {
        Self::Building
    }
}

/// Accumulates the parts of a single statement, then emits it once with [PolicyStatement::finalize].
///
/// Actions and resources keep their insertion order and ignore repeats. A condition key added again replaces its
/// earlier value, even under a different operator. Once finalized, every mutator fails with
/// [StatementError::InvalidState].
#[derive(Clone, Debug, Default)]
pub struct PolicyStatement {
    sid: Option<String>,
    effect: Effect,
    actions: Vec<Action>,
    not_actions: Vec<Action>,
    resources: Vec<Resource>,
    not_resources: Vec<Resource>,
    principal: Option<Principal>,
    not_principal: bool,
    condition: Condition,
    state: StatementState,
}

impl PolicyStatement {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_building(&self, operation: &str) -> Result<(), StatementError> {
        match self.state {
            StatementState::Building => Ok(()),
            StatementState::Finalized => {
                debug!("Attempted to {operation} on a finalized statement");
                Err(StatementError::InvalidState(format!("cannot {operation} after the statement is finalized")))
            }
        }
    }

    pub fn add_action(&mut self, action: Action) -> Result<&mut Self, StatementError> {
        self.ensure_building("add an action")?;
        push_unique(&mut self.actions, action);
        Ok(self)
    }

    pub fn add_not_action(&mut self, action: Action) -> Result<&mut Self, StatementError> {
        self.ensure_building("add a not-action")?;
        push_unique(&mut self.not_actions, action);
        Ok(self)
    }

    pub fn add_resource(&mut self, resource: Resource) -> Result<&mut Self, StatementError> {
        self.ensure_building("add a resource")?;
        push_unique(&mut self.resources, resource);
        Ok(self)
    }

    pub fn add_not_resource(&mut self, resource: Resource) -> Result<&mut Self, StatementError> {
        self.ensure_building("add a not-resource")?;
        push_unique(&mut self.not_resources, resource);
        Ok(self)
    }

    pub fn add_condition(&mut self, clause: ConditionClause) -> Result<&mut Self, StatementError> {
        self.ensure_building("add a condition")?;
        self.condition.insert_clause(clause);
        Ok(self)
    }

    /// Add a principal; principals accumulate into one `Principal` block.
    pub fn add_principal(&mut self, principal: Principal) -> Result<&mut Self, StatementError> {
        self.ensure_building("add a principal")?;
        self.principal = Some(match self.principal.take() {
            Some(existing) => existing.merge(principal),
            None => principal,
        });
        trace!("Statement principal is now {:?}", self.principal);
        Ok(self)
    }

    /// Emit the principals as `NotPrincipal` instead of `Principal`.
    pub fn set_not_principal(&mut self, not_principal: bool) -> Result<&mut Self, StatementError> {
        self.ensure_building("change the principal element")?;
        self.not_principal = not_principal;
        Ok(self)
    }

    pub fn set_effect(&mut self, effect: Effect) -> Result<&mut Self, StatementError> {
        self.ensure_building("set the effect")?;
        self.effect = effect;
        Ok(self)
    }

    pub fn set_sid<S: Into<String>>(&mut self, sid: S) -> Result<&mut Self, StatementError> {
        self.ensure_building("set the sid")?;
        self.sid = Some(sid.into());
        Ok(self)
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[inline]
    pub fn not_actions(&self) -> &[Action] {
        &self.not_actions
    }

    #[inline]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[inline]
    pub fn not_resources(&self) -> &[Resource] {
        &self.not_resources
    }

    #[inline]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    #[inline]
    pub fn is_not_principal(&self) -> bool {
        self.not_principal
    }

    #[inline]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    #[inline]
    pub fn state(&self) -> StatementState {
        self.state
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.state == StatementState::Finalized
    }

    /// Produce the statement. With no resources given, the statement applies to `"Resource": "*"`.
    ///
    /// # Errors
    ///
    /// * [StatementError::InvalidState] if the statement was already finalized.
    /// * [StatementError::InvalidStatement] if no action was added, or the parts contradict each other. The
    ///   statement stays in the building state so it can be completed.
    pub fn finalize(&mut self) -> Result<Statement, StatementError> {
        self.ensure_building("finalize")?;

        if self.actions.is_empty() && self.not_actions.is_empty() {
            debug!("Statement has no actions");
            return Err(StatementError::InvalidStatement("a statement requires at least one action".to_string()));
        }

        let mut builder = Statement::builder();
        builder.effect(self.effect);

        if let Some(sid) = &self.sid {
            builder.sid(sid.clone());
        }

        if !self.actions.is_empty() {
            builder.action(StringLikeList::List(self.actions.clone()));
        }

        if !self.not_actions.is_empty() {
            builder.not_action(StringLikeList::List(self.not_actions.clone()));
        }

        match (self.resources.is_empty(), self.not_resources.is_empty()) {
            (true, true) => {
                builder.resource(StringLikeList::Single(Resource::Any));
            }
            _ => {
                if !self.resources.is_empty() {
                    builder.resource(StringLikeList::List(self.resources.clone()));
                }
                if !self.not_resources.is_empty() {
                    builder.not_resource(StringLikeList::List(self.not_resources.clone()));
                }
            }
        }

        if let Some(principal) = &self.principal {
            if self.not_principal {
                builder.not_principal(principal.clone());
            } else {
                builder.principal(principal.clone());
            }
        }

        if !self.condition.is_empty() {
            builder.condition(self.condition.clone());
        }

        let statement = builder.build().map_err(|e| {
            debug!("Statement is inconsistent: {e}");
            StatementError::InvalidStatement(e.to_string())
        })?;

        self.state = StatementState::Finalized;
        trace!("Finalized statement: {statement}");
        Ok(statement)
    }
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}
