use std::path::Path;

use super::*;
use crate::cfn::{ResourceRegistry, extract, load_template};

fn sample_graph() -> ResourceGraph {
    let template = load_template(
        "\
Resources:
  DB1:
    Type: AWS::RDS::DBInstance
  OrdersServiceFunction:
    Type: AWS::Lambda::Function
    Properties:
      Target: !Ref DB1
",
    )
    .unwrap();
    extract(&template, &ResourceRegistry::aws()).unwrap()
}

#[test]
fn direction_parses_case_insensitively() {
    assert_eq!("lr".parse::<Direction>(), Ok(Direction::LeftToRight));
    assert_eq!(" TB ".parse::<Direction>(), Ok(Direction::TopToBottom));
    assert_eq!("BT".parse::<Direction>(), Ok(Direction::BottomToTop));
    assert_eq!("rl".parse::<Direction>(), Ok(Direction::RightToLeft));
    assert!("sideways".parse::<Direction>().is_err());
}

#[test]
fn style_carries_rank_direction() {
    let style = DiagramStyle::new(Direction::LeftToRight);
    assert!(style.graph.contains(&("rankdir", "LR".to_owned())));
    assert!(style.graph.contains(&("splines", "ortho".to_owned())));
    assert!(style.graph.contains(&("bgcolor", "transparent".to_owned())));
}

#[test]
fn reference_edges_are_dashed_and_thin() {
    let style = DiagramStyle::default();
    assert!(style.reference.contains(&("style", "dashed".to_owned())));
    assert!(style.reference.contains(&("penwidth", "0.5".to_owned())));
}

fn node_stmts(graph: &Graph) -> Vec<&Node> {
    let Graph::DiGraph { stmts, .. } = graph else {
        panic!("expected a digraph");
    };
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Node(node) => Some(node),
            _ => None,
        })
        .collect()
}

fn edge_stmts(graph: &Graph) -> Vec<&Edge> {
    let Graph::DiGraph { stmts, .. } = graph else {
        panic!("expected a digraph");
    };
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Edge(edge) => Some(edge),
            _ => None,
        })
        .collect()
}

fn attr<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a Id> {
    attributes
        .iter()
        .find(|Attribute(name, _)| *name == Id::Plain(key.to_owned()))
        .map(|Attribute(_, value)| value)
}

fn quoted(raw: &str) -> Id {
    Id::Escaped(format!("\"{raw}\""))
}

#[test]
fn escaped_ids_escape_quotes_and_backslashes() {
    assert_eq!(escaped("plain"), quoted("plain"));
    assert_eq!(escaped("a\"b"), quoted("a\\\"b"));
    assert_eq!(escaped("a\\b"), quoted("a\\\\b"));
}

#[test]
fn dot_graph_has_one_statement_per_node_and_edge() {
    let graph = sample_graph();
    let dot = dot_graph(&graph, &DiagramStyle::default(), Path::new("/opt/icons"));

    let Graph::DiGraph { id, strict, .. } = &dot else {
        panic!("expected a digraph");
    };
    assert_eq!(*id, quoted(DIAGRAM_TITLE));
    assert!(!strict);

    let nodes = node_stmts(&dot);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, NodeId(quoted("DB1"), None));
    assert_eq!(attr(&nodes[0].attributes, "image"), Some(&quoted("/opt/icons/database/rds.png")));
    assert_eq!(nodes[1].id, NodeId(quoted("OrdersServiceFunction"), None));
    assert_eq!(attr(&nodes[1].attributes, "label"), Some(&quoted("OrdersFunction")));
    assert_eq!(attr(&nodes[1].attributes, "image"), Some(&quoted("/opt/icons/compute/lambda.png")));
    assert_eq!(attr(&nodes[1].attributes, "tooltip"), Some(&quoted("AWS::Lambda::Function")));

    let edges = edge_stmts(&dot);
    assert_eq!(edges.len(), 1);
    assert_eq!(
        edges[0].ty,
        EdgeTy::Pair(
            Vertex::N(NodeId(quoted("OrdersServiceFunction"), None)),
            Vertex::N(NodeId(quoted("DB1"), None))
        )
    );
    assert_eq!(attr(&edges[0].attributes, "style"), Some(&quoted("dashed")));
    assert_eq!(attr(&edges[0].attributes, "color"), Some(&quoted("#707070")));
}

#[test]
fn dot_source_is_printed_digraph() {
    let graph = sample_graph();
    let source = dot_source(&graph, &DiagramStyle::new(Direction::LeftToRight), Path::new("/opt/icons"));

    assert!(source.starts_with("digraph \"AWS Architecture\""), "{source}");
    assert!(source.trim_end().ends_with('}'));
    assert!(source.contains("\"/opt/icons/database/rds.png\""));
    assert!(source.contains("\"LR\""));
    assert_eq!(source.matches("->").count(), 1);
}

#[test]
fn empty_graph_is_still_a_valid_document() {
    let graph = ResourceGraph::default();
    let dot = dot_graph(&graph, &DiagramStyle::default(), Path::new("/icons"));
    assert!(node_stmts(&dot).is_empty());
    assert!(edge_stmts(&dot).is_empty());

    let source = dot_source(&graph, &DiagramStyle::default(), Path::new("/icons"));
    assert!(source.starts_with("digraph"));
    assert!(!source.contains("->"));
    assert!(!source.contains(".png"));
}
