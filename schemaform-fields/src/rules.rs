//! Default field resolution.
//!
//! A [`RuleTable`] maps a base schema type to an ordered list of
//! [`DefaultRule`]s. Resolution walks the list for the node's base type and
//! the first rule that claims the node builds the descriptor. Order matters:
//! a string with an `enum` must reach the select rule before the free-text
//! rule, which would also accept it.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::trace;

use crate::schema::SchemaNode;
use crate::types::{FieldDescriptor, FieldKey};

/// Stringified field key → default descriptor.
pub type FieldLookup = HashMap<String, FieldDescriptor>;

/// Per-property inputs to resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Path of the produced field.
    pub path: FieldKey,
    /// Force the field to be required regardless of the node.
    pub required: bool,
}

/// Everything a rule sees when building a descriptor.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub name: &'a str,
    pub node: &'a SchemaNode,
    pub options: &'a ResolveOptions,
}

/// A predicate + constructor pair that may claim a schema node.
#[derive(Debug, Clone, Copy)]
pub struct DefaultRule {
    pub name: &'static str,
    pub claims: fn(&SchemaNode) -> bool,
    pub build: fn(&RuleContext<'_>) -> FieldDescriptor,
}

/// Enumerated choice: a string with `enum` becomes a select.
pub const SELECT_RULE: DefaultRule = DefaultRule {
    name: "select",
    claims: has_enum,
    build: build_select,
};

/// Free text: any string without `enum`.
pub const TEXT_RULE: DefaultRule = DefaultRule {
    name: "text",
    claims: lacks_enum,
    build: build_text,
};

fn has_enum(node: &SchemaNode) -> bool {
    node.enum_values.is_some()
}

fn lacks_enum(node: &SchemaNode) -> bool {
    node.enum_values.is_none()
}

fn build_select(ctx: &RuleContext<'_>) -> FieldDescriptor {
    let mut descriptor = base_descriptor(ctx).with_type("select");
    descriptor.options = ctx.node.enum_values.clone();
    descriptor
}

fn build_text(ctx: &RuleContext<'_>) -> FieldDescriptor {
    base_descriptor(ctx).with_type("text")
}

/// Attributes every default descriptor shares, without a `type`.
///
/// Custom rules call this and then set their own type and extras.
pub fn base_descriptor(ctx: &RuleContext<'_>) -> FieldDescriptor {
    let node = ctx.node;
    FieldDescriptor {
        key: Some(ctx.options.path.clone()),
        field_type: None,
        title: Some(node.title.clone().unwrap_or_else(|| ctx.name.to_string())),
        description: Some(
            node.description
                .clone()
                .unwrap_or_else(|| ctx.name.to_string()),
        ),
        required: Some(ctx.options.required || node.is_flagged_required()),
        readonly: node.read_only,
        min_length: node.min_length,
        max_length: node.max_length,
        minimum: node.inclusive_minimum(),
        maximum: node.inclusive_maximum(),
        options: None,
        extra: Default::default(),
    }
}

/// Ordered rule lists per base type.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: IndexMap<String, Vec<DefaultRule>>,
}

impl RuleTable {
    /// An empty table: nothing resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped rules: select before text for strings.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register("string", SELECT_RULE);
        table.register("string", TEXT_RULE);
        table
    }

    /// Append a rule; it is tried after the existing rules for `base_type`.
    pub fn register(&mut self, base_type: impl Into<String>, rule: DefaultRule) -> &mut Self {
        self.rules.entry(base_type.into()).or_default().push(rule);
        self
    }

    /// Prepend a rule; it is tried before the existing rules for `base_type`.
    pub fn register_first(
        &mut self,
        base_type: impl Into<String>,
        rule: DefaultRule,
    ) -> &mut Self {
        self.rules.entry(base_type.into()).or_default().insert(0, rule);
        self
    }

    /// The rules tried for `base_type`, in order.
    pub fn rules_for(&self, base_type: &str) -> &[DefaultRule] {
        self.rules.get(base_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve one property into a default descriptor.
    ///
    /// Returns `None` when the node's base type has no rules or no rule
    /// claims it. A produced descriptor is also registered in `lookup`
    /// under its stringified key.
    pub fn resolve(
        &self,
        name: &str,
        node: &SchemaNode,
        options: &ResolveOptions,
        lookup: &mut FieldLookup,
    ) -> Option<FieldDescriptor> {
        let base_type = node.base_type()?;
        let rule = self
            .rules_for(base_type)
            .iter()
            .find(|rule| (rule.claims)(node));

        let Some(rule) = rule else {
            trace!(name, base_type, "no default rule claims property");
            return None;
        };

        let ctx = RuleContext {
            name,
            node,
            options,
        };
        let descriptor = (rule.build)(&ctx);
        trace!(name, base_type, rule = rule.name, "resolved default field");

        lookup.insert(options.path.to_string(), descriptor.clone());
        Some(descriptor)
    }
}
