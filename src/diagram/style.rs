//! Diagram styling and Graphviz DOT emission.
//!
//! DESIGN
//! ======
//! Layout is left entirely to Graphviz. This module only decides *what* the
//! engine is asked to draw: one image node per resource, one dashed thin
//! edge per reference, and the graph-wide attributes that keep icons apart
//! (orthogonal splines, wide node/rank separation, transparent background).

use std::path::Path;
use std::str::FromStr;

use dot_structures::{Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Vertex};
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use crate::cfn::ResourceGraph;

use super::label::simplify_label;

const FONT: &str = "Liberation Sans";
const FONT_COLOR: &str = "#2D3436";

/// Graph title, also used as the DOT graph name.
pub const DIAGRAM_TITLE: &str = "AWS Architecture";

// =============================================================================
// DIRECTION
// =============================================================================

/// Graphviz `rankdir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopToBottom),
            "BT" => Ok(Self::BottomToTop),
            "LR" => Ok(Self::LeftToRight),
            "RL" => Ok(Self::RightToLeft),
            other => Err(format!("unknown diagram direction '{other}' (expected TB, BT, LR or RL)")),
        }
    }
}

// =============================================================================
// STYLE
// =============================================================================

type Attrs = Vec<(&'static str, String)>;

fn attrs(pairs: &[(&'static str, &str)]) -> Attrs {
    pairs.iter().map(|&(key, value)| (key, value.to_owned())).collect()
}

/// Attribute sets handed to Graphviz. Built once at startup.
#[derive(Debug, Clone)]
pub struct DiagramStyle {
    pub graph: Attrs,
    pub node: Attrs,
    pub edge: Attrs,
    /// Applied to every reference edge on top of `edge`.
    pub reference: Attrs,
    /// Height of an icon node including room for its label.
    pub icon_node_height: &'static str,
}

impl DiagramStyle {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        let mut graph = attrs(&[
            ("label", DIAGRAM_TITLE),
            ("labelloc", "t"),
            ("fontsize", "30"),
            ("fontcolor", FONT_COLOR),
            ("splines", "ortho"),
            ("fontname", FONT),
            ("bgcolor", "transparent"),
            ("pad", "3.0"),
            ("nodesep", "2.0"),
            ("ranksep", "2.0"),
            ("overlap", "false"),
            ("sep", "+35"),
        ]);
        graph.push(("rankdir", direction.as_str().to_owned()));

        Self {
            graph,
            node: attrs(&[
                ("fontname", FONT),
                ("fontsize", "14"),
                ("fontcolor", FONT_COLOR),
                ("imagescale", "false"),
                ("fixedsize", "true"),
                ("width", "0.8"),
                ("height", "0.8"),
                ("shape", "none"),
                ("margin", "0.6"),
                ("labelloc", "b"),
                ("labeljust", "c"),
            ]),
            edge: attrs(&[
                ("fontsize", "12"),
                ("fontname", FONT),
                ("penwidth", "1.0"),
                ("minlen", "3"),
            ]),
            reference: attrs(&[
                ("color", "#707070"),
                ("style", "dashed"),
                ("penwidth", "0.5"),
                ("constraint", "true"),
                ("weight", "1"),
            ]),
            icon_node_height: "1.9",
        }
    }
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self::new(Direction::default())
    }
}

// =============================================================================
// DOT GRAPH
// =============================================================================

/// Build the Graphviz graph for `graph`: one image node per resource and one
/// reference edge per `Ref`, on top of the style's default attributes.
#[must_use]
pub fn dot_graph(graph: &ResourceGraph, style: &DiagramStyle, icon_root: &Path) -> Graph {
    let mut stmts = vec![
        Stmt::GAttribute(GraphAttributes::Graph(attributes(&style.graph))),
        Stmt::GAttribute(GraphAttributes::Node(attributes(&style.node))),
        Stmt::GAttribute(GraphAttributes::Edge(attributes(&style.edge))),
    ];

    for node in &graph.nodes {
        let icon = icon_root.join(node.kind.icon_path());
        stmts.push(Stmt::Node(Node {
            id: node_id(&node.id),
            attributes: vec![
                attribute("label", &simplify_label(&node.id)),
                attribute("image", &icon.to_string_lossy()),
                attribute("height", style.icon_node_height),
                attribute("tooltip", &node.resource_type),
            ],
        }));
    }

    for edge in &graph.edges {
        stmts.push(Stmt::Edge(Edge {
            ty: EdgeTy::Pair(Vertex::N(node_id(&edge.source)), Vertex::N(node_id(&edge.target))),
            attributes: attributes(&style.reference),
        }));
    }

    Graph::DiGraph { id: escaped(DIAGRAM_TITLE), strict: false, stmts }
}

/// DOT source text for `graph`, ready for the layout engine.
#[must_use]
pub fn dot_source(graph: &ResourceGraph, style: &DiagramStyle, icon_root: &Path) -> String {
    dot_graph(graph, style, icon_root).print(&mut PrinterContext::default())
}

fn attributes(attrs: &[(&'static str, String)]) -> Vec<Attribute> {
    attrs.iter().map(|(key, value)| attribute(key, value)).collect()
}

fn attribute(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_owned()), escaped(value))
}

fn node_id(id: &str) -> NodeId {
    NodeId(escaped(id), None)
}

/// A quoted DOT ID. `dot_structures` prints escaped IDs verbatim, so quotes
/// and backslashes inside the value are escaped here.
fn escaped(raw: &str) -> Id {
    Id::Escaped(format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\"")))
}

#[cfg(test)]
#[path = "style_test.rs"]
mod tests;
