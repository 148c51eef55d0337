//! Bounded snapshots of runtime values.
//!
//! A [`Value`] is what a failure report shows for one evaluated
//! sub-expression: its description, its type and, for structured values,
//! the descriptions of its children.
//!
//! # Cycles
//!
//! Shared objects (`Rc`, `Arc`) report an [`ObjectId`]. While a shared
//! object's children are being described its identity sits in a seen set;
//! reaching it again on the same descent path yields a childless value.
//! The identity is removed once the descent returns, so the same object
//! reached through two siblings is described twice.

use std::fmt;

use attest_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::{ObjectId, Reflect, ReflectOptions, TypeInfo};

/// Description of values that are functions, which carry no useful text.
pub const FUNCTION_PLACEHOLDER: &str = "(Function)";

/// Snapshot of an evaluated runtime value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Value {
    /// Human-readable description.
    pub description: String,
    /// Verbose description.
    pub debug_description: String,
    /// Dynamic type of the value.
    pub type_info: TypeInfo,
    /// Name of this value within its parent, if it has one.
    pub label: Option<String>,
    /// Whether the value is a collection, set or dictionary.
    pub is_collection: bool,
    /// Described children, `None` when there are none or descent stopped.
    pub children: Option<Vec<Value>>,
    /// Whether children were left out because of a limit.
    pub is_truncated: bool,
}

impl Value {
    /// Snapshot `subject` within the limits in `options`.
    pub fn reflecting(subject: &dyn Reflect, options: &ReflectOptions) -> Self {
        Reflector {
            options,
            seen: FxHashSet::default(),
        }
        .reflect(subject, None, 0)
    }

    /// A boolean value.
    pub fn from_bool(value: bool) -> Self {
        let description = value.to_string();
        Value {
            debug_description: description.clone(),
            description,
            type_info: TypeInfo::of::<bool>(),
            label: None,
            is_collection: false,
            children: None,
            is_truncated: false,
        }
    }

    /// A value standing for a type, described by its unqualified name.
    pub fn for_type(type_info: TypeInfo) -> Self {
        Value {
            description: type_info.unqualified_name(),
            debug_description: type_info.fully_qualified_name().to_owned(),
            type_info,
            label: None,
            is_collection: false,
            children: None,
            is_truncated: false,
        }
    }

    /// The boolean this value describes, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        if !self.type_info.is_bool() {
            return None;
        }
        match self.description.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of described children.
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }

    fn shallow(subject: &dyn Reflect, label: Option<&str>) -> Self {
        Value {
            description: subject.test_description(),
            debug_description: subject.debug_description(),
            type_info: subject.type_info(),
            label: label.map(str::to_owned),
            is_collection: subject.display_style().is_collection(),
            children: None,
            is_truncated: false,
        }
    }

    fn elided(omitted: usize, total: usize) -> Self {
        let description = format!("({omitted} out of {total} elements omitted for brevity)");
        Value {
            debug_description: description.clone(),
            description,
            type_info: TypeInfo::of::<()>(),
            label: None,
            is_collection: false,
            children: None,
            is_truncated: false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

struct Reflector<'o> {
    options: &'o ReflectOptions,
    seen: FxHashSet<ObjectId>,
}

impl Reflector<'_> {
    fn reflect(&mut self, subject: &dyn Reflect, label: Option<&str>, depth: usize) -> Value {
        let mut value = Value::shallow(subject, label);

        let object_id = subject.object_id();
        if let Some(id) = object_id {
            if self.seen.contains(&id) {
                trace!(?id, "cycle reached, not descending");
                return value;
            }
        }

        if depth >= self.options.max_child_depth {
            value.is_truncated = has_children(subject);
            if value.is_truncated {
                trace!(depth, "child depth limit reached");
            }
            return value;
        }

        let limit = if value.is_collection {
            self.options.max_collection_count
        } else {
            usize::MAX
        };

        if let Some(id) = object_id {
            self.seen.insert(id);
        }
        let mut children = Vec::new();
        let mut total = 0usize;
        subject.for_each_child(&mut |child_label: Option<&str>, child: &dyn Reflect| {
            total += 1;
            if children.len() < limit {
                let child = ensure_sufficient_stack(|| self.reflect(child, child_label, depth + 1));
                children.push(child);
            }
        });
        if let Some(id) = object_id {
            self.seen.remove(&id);
        }

        if total > children.len() {
            children.push(Value::elided(total - children.len(), total));
            value.is_truncated = true;
        }
        if !children.is_empty() {
            value.children = Some(children);
        }
        value
    }
}

fn has_children(subject: &dyn Reflect) -> bool {
    let mut found = false;
    subject.for_each_child(&mut |_: Option<&str>, _: &dyn Reflect| found = true);
    found
}

#[cfg(test)]
mod tests;
