//! Resource graph extraction.
//!
//! DESIGN
//! ======
//! Resources are visited in document order (`serde_yaml::Mapping` preserves
//! insertion order), so the same template always yields the same node and
//! edge order.
//!
//! A node exists only for a resource whose `Type` is in the registry. An edge
//! `A -> B` is recorded for every `{Ref: B}` found in `A`'s `Properties`,
//! where `B` is another declared resource. Edges whose target has no node are
//! dropped before the graph is returned, so every edge endpoint is a node.
//!
//! Detection is deliberately shallow: `{Ref: B}` is found anywhere in nested
//! plain mappings and sequences, but never inside the payload of another
//! intrinsic (`Join`, `Sub`, `Fn::If`, ...). Computed references are not edges.
//!
//! ERROR HANDLING
//! ==============
//! Unknown types, malformed resource entries and unresolved references
//! degrade to a smaller graph and are logged at debug level. Only a template
//! whose root or `Resources` section has the wrong shape is an error.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

use super::TemplateError;
use super::registry::{ResourceKind, ResourceRegistry};
use super::tags::Intrinsic;

// =============================================================================
// TYPES
// =============================================================================

/// A recognized resource, drawn as one diagram node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub resource_type: String,
    pub kind: ResourceKind,
}

/// `source` references `target` through a `Ref`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    fn new(source: &str, target: &str) -> Self {
        Self { source: source.to_owned(), target: target.to_owned() }
    }
}

/// Nodes in declaration order plus the edges between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ResourceGraph {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// EXTRACTION
// =============================================================================

/// Derive the drawable resource graph from a loaded template.
///
/// # Errors
///
/// Returns [`TemplateError::Parse`] when the document root is not a mapping
/// or `Resources` is present but neither a mapping nor null.
pub fn extract(template: &Value, registry: &ResourceRegistry) -> Result<ResourceGraph, TemplateError> {
    let Some(root) = template.as_mapping() else {
        return Err(TemplateError::Parse(format!(
            "template root must be a mapping, found {}",
            describe(template)
        )));
    };

    let resources = match root.get("Resources") {
        None | Some(Value::Null) => return Ok(ResourceGraph::default()),
        Some(Value::Mapping(resources)) => resources,
        Some(other) => {
            return Err(TemplateError::Parse(format!(
                "Resources must be a mapping, found {}",
                describe(other)
            )));
        }
    };

    let declared: HashSet<&str> = resources.iter().filter_map(|(id, _)| id.as_str()).collect();
    let mut graph = ResourceGraph::default();

    for (key, entry) in resources {
        let Some(id) = key.as_str() else {
            tracing::debug!(key = ?key, "skipping resource with non-string identifier");
            continue;
        };
        let Some(entry) = entry.as_mapping() else {
            tracing::debug!(resource = id, "skipping malformed resource entry");
            continue;
        };
        let Some((resource_type, kind)) = recognized_type(entry, registry) else {
            tracing::debug!(resource = id, "skipping resource with unrecognized type");
            continue;
        };

        graph.nodes.push(Node { id: id.to_owned(), resource_type: resource_type.to_owned(), kind });

        let mut targets = Vec::new();
        if let Some(properties) = entry.get("Properties") {
            collect_refs(properties, &mut targets);
        }
        for target in targets {
            if declared.contains(target) {
                graph.edges.push(Edge::new(id, target));
            } else {
                tracing::debug!(resource = id, referenced = target, "ignoring Ref to undeclared resource");
            }
        }
    }

    let node_ids: HashSet<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
    let (kept, dropped): (Vec<Edge>, Vec<Edge>) = graph
        .edges
        .drain(..)
        .partition(|edge| node_ids.contains(edge.target.as_str()));
    for edge in &dropped {
        tracing::debug!(source = %edge.source, referenced = %edge.target, "dropping edge to undrawn resource");
    }
    graph.edges = kept;

    tracing::debug!(nodes = graph.nodes.len(), edges = graph.edges.len(), "resource graph extracted");
    Ok(graph)
}

fn recognized_type<'a>(entry: &'a Mapping, registry: &ResourceRegistry) -> Option<(&'a str, ResourceKind)> {
    let resource_type = entry.get("Type")?.as_str()?;
    registry.get(resource_type).map(|kind| (resource_type, kind))
}

/// Push the target of every `{Ref: <name>}` reachable from `value`.
fn collect_refs<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Mapping(map) => {
            if let Some((key, payload)) = single_entry(map) {
                if key == Intrinsic::Ref.name() {
                    if let Some(target) = payload.as_str() {
                        out.push(target);
                    }
                    return;
                }
                if is_intrinsic_key(key) {
                    return;
                }
            }
            for (_, item) in map {
                collect_refs(item, out);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect_refs(item, out);
            }
        }
        _ => {}
    }
}

fn single_entry(map: &Mapping) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    Some((key.as_str()?, value))
}

fn is_intrinsic_key(key: &str) -> bool {
    key.starts_with("Fn::") || Intrinsic::from_tag(key).is_some()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
