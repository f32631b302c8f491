use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatementError {
    InvalidAction(String),
    InvalidCatalog(String),
    InvalidCondition(String),
    InvalidConditionOperator(String),
    InvalidConditionValue(String),
    InvalidPolicyVersion(String),
    InvalidPrincipal(String),
    InvalidResource(String),
    InvalidState(String),
    InvalidStatement(String),
    InvalidTemplate(String),
    UnknownAction(String),
    UnknownResourceType(String),
    UnknownService(String),
    UnresolvedPlaceholder(String),
}

impl Display for StatementError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidCatalog(msg) => write!(f, "Invalid service catalog: {}", msg),
            Self::InvalidCondition(msg) => write!(f, "Invalid condition: {}", msg),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::InvalidConditionValue(msg) => write!(f, "Invalid condition value: {}", msg),
            Self::InvalidPolicyVersion(version) => write!(f, "Invalid policy version: {}", version),
            Self::InvalidPrincipal(principal) => write!(f, "Invalid principal: {}", principal),
            Self::InvalidResource(resource) => write!(f, "Invalid resource: {}", resource),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::InvalidStatement(msg) => write!(f, "Invalid statement: {}", msg),
            Self::InvalidTemplate(template) => write!(f, "Invalid ARN template: {}", template),
            Self::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            Self::UnknownResourceType(resource_type) => write!(f, "Unknown resource type: {}", resource_type),
            Self::UnknownService(service) => write!(f, "Unknown service: {}", service),
            Self::UnresolvedPlaceholder(placeholder) => write!(f, "Unresolved placeholder: {}", placeholder),
        }
    }
}

impl Error for StatementError {}
