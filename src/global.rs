use crate::{build_condition, condop, ConditionClause, ConditionValue, Operator, PolicyStatement, StatementError};

/// Helpers for the global `aws:` condition keys, available on anything that accepts condition clauses.
///
/// Each helper takes an optional operator. When it is `None`, the operator IAM documents as the natural one for the
/// key is used, e.g. `ForAnyValue:StringEquals` for `aws:CalledVia` and `IpAddress` for `aws:SourceIp`.
pub trait GlobalConditions {
    /// Add a validated clause to the underlying statement.
    fn add_clause(&mut self, clause: ConditionClause) -> Result<&mut Self, StatementError>;

    fn if_aws_called_via<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::for_any_value(condop::StringEquals));
        self.add_clause(build_condition("aws:CalledVia", None, value, Some(operator))?)
    }

    fn if_aws_called_via_first<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:CalledViaFirst", None, value, operator)?)
    }

    fn if_aws_called_via_last<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:CalledViaLast", None, value, operator)?)
    }

    /// Compare the request time. Defaults to `DateLessThanEquals`.
    fn if_aws_current_time<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::DateLessThanEquals));
        self.add_clause(build_condition("aws:CurrentTime", None, value, Some(operator))?)
    }

    /// Compare the request time as epoch seconds. Defaults to `DateLessThanEquals`.
    fn if_aws_epoch_time<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::DateLessThanEquals));
        self.add_clause(build_condition("aws:EpochTime", None, value, Some(operator))?)
    }

    /// Seconds since MFA authentication. Defaults to `NumericLessThan`.
    fn if_aws_multi_factor_auth_age<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::NumericLessThan));
        self.add_clause(build_condition("aws:MultiFactorAuthAge", None, value, Some(operator))?)
    }

    /// Require (or forbid) MFA. `None` means `true`.
    fn if_aws_multi_factor_auth_present(&mut self, value: Option<bool>) -> Result<&mut Self, StatementError> {
        let value = value.unwrap_or(true);
        self.add_clause(build_condition("aws:MultiFactorAuthPresent", None, value, Some(Operator::new(condop::Bool)))?)
    }

    fn if_aws_principal_account<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:PrincipalAccount", None, value, operator)?)
    }

    /// Compare the ARN of the calling principal. Defaults to `ArnLike`.
    fn if_aws_principal_arn<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::ArnLike));
        self.add_clause(build_condition("aws:PrincipalArn", None, value, Some(operator))?)
    }

    fn if_aws_principal_org_id<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:PrincipalOrgID", None, value, operator)?)
    }

    fn if_aws_principal_org_paths<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:PrincipalOrgPaths", None, value, operator)?)
    }

    fn if_aws_principal_tag<V: Into<ConditionValue>>(
        &mut self,
        tag_key: &str,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:PrincipalTag/${TagKey}", Some(tag_key), value, operator)?)
    }

    fn if_aws_principal_type<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:PrincipalType", None, value, operator)?)
    }

    fn if_aws_referer<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:Referer", None, value, operator)?)
    }

    fn if_aws_requested_region<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:RequestedRegion", None, value, operator)?)
    }

    /// Compare a tag passed in the request.
    fn if_aws_request_tag<V: Into<ConditionValue>>(
        &mut self,
        tag_key: &str,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:RequestTag/${TagKey}", Some(tag_key), value, operator)?)
    }

    /// Compare a tag already attached to the resource.
    fn if_aws_resource_tag<V: Into<ConditionValue>>(
        &mut self,
        tag_key: &str,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:ResourceTag/${TagKey}", Some(tag_key), value, operator)?)
    }

    /// Require (or forbid) TLS. `None` means `true`.
    fn if_aws_secure_transport(&mut self, value: Option<bool>) -> Result<&mut Self, StatementError> {
        let value = value.unwrap_or(true);
        self.add_clause(build_condition("aws:SecureTransport", None, value, Some(Operator::new(condop::Bool)))?)
    }

    fn if_aws_source_account<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:SourceAccount", None, value, operator)?)
    }

    /// Compare the ARN of the resource making a service-to-service request. Defaults to `ArnLike`.
    fn if_aws_source_arn<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::ArnLike));
        self.add_clause(build_condition("aws:SourceArn", None, value, Some(operator))?)
    }

    fn if_aws_source_ip<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::IpAddress));
        self.add_clause(build_condition("aws:SourceIp", None, value, Some(operator))?)
    }

    fn if_aws_source_vpc<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:SourceVpc", None, value, operator)?)
    }

    fn if_aws_source_vpce<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:SourceVpce", None, value, operator)?)
    }

    /// Compare the tag keys in the request. Usually paired with `ForAllValues:` or `ForAnyValue:`.
    fn if_aws_tag_keys<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:TagKeys", None, value, operator)?)
    }

    /// Compare when temporary credentials were issued. Defaults to `DateGreaterThanEquals`.
    fn if_aws_token_issue_time<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::DateGreaterThanEquals));
        self.add_clause(build_condition("aws:TokenIssueTime", None, value, Some(operator))?)
    }

    fn if_aws_user_agent<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:UserAgent", None, value, operator)?)
    }

    fn if_aws_userid<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:userid", None, value, operator)?)
    }

    fn if_aws_username<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        self.add_clause(build_condition("aws:username", None, value, operator)?)
    }

    /// Whether an AWS service made the request on the principal's behalf. `None` means `true`.
    fn if_aws_via_aws_service(&mut self, value: Option<bool>) -> Result<&mut Self, StatementError> {
        let value = value.unwrap_or(true);
        self.add_clause(build_condition("aws:ViaAWSService", None, value, Some(Operator::new(condop::Bool)))?)
    }

    fn if_aws_vpc_source_ip<V: Into<ConditionValue>>(
        &mut self,
        value: V,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError> {
        let operator = operator.unwrap_or_else(|| Operator::new(condop::IpAddress));
        self.add_clause(build_condition("aws:VpcSourceIp", None, value, Some(operator))?)
    }
}

impl GlobalConditions for PolicyStatement {
    #[inline]
    fn add_clause(&mut self, clause: ConditionClause) -> Result<&mut Self, StatementError> {
        self.add_condition(clause)
    }
}
