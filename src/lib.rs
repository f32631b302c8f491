#![warn(clippy::all)]

//! Typed builders for AWS IAM policy statements.
//!
//! Actions, resource types and condition keys come from a [ServiceCatalog]; a [PolicyStatementBuilder] checks each
//! call against it and accumulates a [PolicyStatement], which is finalized into a serializable [Statement].

pub(crate) mod action;
pub(crate) mod builder;
pub(crate) mod catalog;
pub mod catalogs;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod global;
pub(crate) mod policy;
pub(crate) mod principal;
pub(crate) mod resource;
pub(crate) mod statement;
pub(crate) mod template;

#[macro_use]
pub(crate) mod serutil;

pub use {
    action::{Action, ActionList},
    builder::PolicyStatementBuilder,
    catalog::{
        AccessLevel, ActionDescriptor, ConditionKeyDescriptor, ResourceTypeDescriptor, ResourceTypeOnAction,
        ServiceCatalog,
    },
    condition::{
        build_condition, build_typed_condition, format_date, op as condop, parse_date, Condition, ConditionClause,
        ConditionKey, ConditionKeyType, ConditionMap, ConditionOp, ConditionValue, Operator, SetOperator,
    },
    effect::Effect,
    error::StatementError,
    global::GlobalConditions,
    policy::{Policy, PolicyBuilder, PolicyBuilderError, PolicyVersion},
    principal::{
        AwsPrincipal, Principal, SpecifiedPrincipal, SpecifiedPrincipalBuilder, SpecifiedPrincipalBuilderError,
    },
    resource::{Resource, ResourceArn, ResourceList},
    serutil::{ListKind, StringLikeList},
    statement::{
        PolicyStatement, Statement, StatementBuilder, StatementBuilderError, StatementList, StatementState,
    },
    template::{
        is_standard_placeholder, resolve as resolve_arn, resolve_partial as resolve_arn_partial, ArnDefaults,
        ArnDefaultsBuilder, ArnDefaultsBuilderError, ArnTemplate,
    },
};
