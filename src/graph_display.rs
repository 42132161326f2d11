//! Graphviz rendering of a compiled NFA, for the `svg` CLI subcommand and
//! for any embedding playground driving the same introspection API.

use graphviz_rust::attributes::{arrowhead, shape, EdgeAttributes, NodeAttributes};
use graphviz_rust::cmd::{Format, Layout};
use graphviz_rust::dot_generator::{edge, graph, id, node, node_id};
use graphviz_rust::dot_structures::{Edge, EdgeTy, Graph, Id, Node, NodeId, Vertex};
use graphviz_rust::exec_dot;
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use crate::nfa::{Nfa, State, Transition};

pub struct DiGraph(graphviz_rust::dot_structures::Graph);

impl From<&Nfa> for DiGraph {
    fn from(nfa: &Nfa) -> Self {
        let mut nodes = vec![];
        let mut edges = vec![];

        for (state, transition) in nfa.transitions.iter().enumerate() {
            let state = State(state);
            if state == nfa.accept {
                nodes.push(node!(state; NodeAttributes::shape(shape::doublecircle)));
            } else if state == nfa.start {
                nodes.push(node!(state));
                nodes.push(node!("start"; NodeAttributes::shape(shape::none)));
                edges.push(edge!(node_id!("start") => node_id!(state);
                                 EdgeAttributes::arrowhead(arrowhead::normal)));
            } else {
                nodes.push(node!(state));
            }

            match transition {
                Transition::Symbol(pred, e) => {
                    edges.push(edge!(node_id!(state) => node_id!(e);
                            EdgeAttributes::arrowhead(arrowhead::normal),
                            EdgeAttributes::label(format!("\"{pred}\""))
                    ));
                }
                Transition::Split(e1, e2) => {
                    if let Some(e1) = e1 {
                        edges.push(edge!(node_id!(state) => node_id!(e1)));
                    }
                    if let Some(e2) = e2 {
                        edges.push(edge!(node_id!(state) => node_id!(e2)));
                    }
                }
                Transition::GroupEnter(g, e) => {
                    edges.push(edge!(node_id!(state) => node_id!(e);
                                EdgeAttributes::arrowhead(arrowhead::normal),
                                EdgeAttributes::label(format!("\"enter {g}\""))));
                }
                Transition::GroupExit(g, e) => {
                    edges.push(edge!(node_id!(state) => node_id!(e);
                                EdgeAttributes::arrowhead(arrowhead::normal),
                                EdgeAttributes::label(format!("\"exit {g}\""))));
                }
                Transition::Accept => {}
            }
        }

        let mut graph: graphviz_rust::dot_structures::Graph = graph!(strict di id!("G"));
        for node in nodes {
            graph.add_stmt(node.into());
        }

        for edge in edges {
            graph.add_stmt(edge.into());
        }

        Self(graph)
    }
}

impl std::fmt::Display for DiGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dot = self.0.print(&mut PrinterContext::default());

        match exec_dot(dot, vec![Format::Svg.into(), Layout::Dot.into()]) {
            Ok(s) => s.fmt(f),
            Err(e) => {
                eprintln!("{e}");
                Err(std::fmt::Error)
            }
        }
    }
}
