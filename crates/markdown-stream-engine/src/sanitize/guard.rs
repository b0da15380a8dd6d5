use std::sync::Arc;

use log::debug;

use crate::{
    error::Degradation,
    tree::{Node, NodeRef, RenderTree},
};

use super::{
    decision::{
        DecisionReason, DestinationKind, Outcome, SanitizationDecision, Subject, Verdict, decide,
    },
    policy::SanitizationPolicy,
};

/// Rewrites one node into `out`: zero, one or several nodes.
pub(super) type Visit = fn(&mut Guard<'_>, Node, &mut Vec<Node>);

/// A rewriting walk over a render tree that records what it decided.
pub(super) struct Guard<'p> {
    pub(super) policy: &'p SanitizationPolicy,
    block: usize,
    path: Vec<usize>,
    decisions: Vec<SanitizationDecision>,
    diagnostics: Vec<Degradation>,
}

impl<'p> Guard<'p> {
    /// Runs `visit` over every block holding a node `touches` selects.
    /// Blocks that come out unchanged keep their `Arc`.
    pub(super) fn run(
        mut tree: RenderTree,
        policy: &'p SanitizationPolicy,
        touches: fn(&Node) -> bool,
        visit: Visit,
    ) -> RenderTree {
        let mut guard = Guard {
            policy,
            block: 0,
            path: vec![],
            decisions: vec![],
            diagnostics: vec![],
        };
        for (b, block) in tree.blocks.iter_mut().enumerate() {
            if !any_node(&block.nodes, touches) {
                continue;
            }
            guard.block = b;
            let nodes = guard.rewrite(block.nodes.clone(), visit);
            if nodes != block.nodes {
                Arc::make_mut(block).nodes = nodes;
            }
        }
        tree.decisions.append(&mut guard.decisions);
        tree.diagnostics.append(&mut guard.diagnostics);
        tree
    }

    pub(super) fn rewrite(&mut self, nodes: Vec<Node>, visit: Visit) -> Vec<Node> {
        let mut out = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.into_iter().enumerate() {
            self.path.push(i);
            visit(self, node, &mut out);
            self.path.pop();
        }
        out
    }

    /// Keeps `node`, rewriting its children.
    pub(super) fn descend(&mut self, mut node: Node, visit: Visit) -> Node {
        if let Some(children) = node.children_mut() {
            let taken = std::mem::take(children);
            *children = self.rewrite(taken, visit);
        }
        node
    }

    /// Records a decision about the current node and returns its outcome.
    pub(super) fn record(&mut self, subject: Subject, verdict: Verdict) -> Outcome {
        let node = NodeRef::new(self.block, self.path.clone());
        if verdict.outcome == Outcome::Stripped {
            debug!("Stripping {subject:?} at {node:?}: {:?}", verdict.reason);
            match &verdict.reason {
                DecisionReason::Violation(v) => {
                    self.diagnostics.push(Degradation::PolicyViolation(v.clone()))
                }
                DecisionReason::Unresolvable => {
                    self.diagnostics.push(Degradation::UnresolvableReference {
                        destination: subject.value().to_string(),
                    })
                }
                _ => {}
            }
        }
        self.decisions.push(SanitizationDecision {
            node,
            subject,
            outcome: verdict.outcome.clone(),
            reason: verdict.reason,
        });
        verdict.outcome
    }
}

fn any_node(nodes: &[Node], touches: fn(&Node) -> bool) -> bool {
    nodes
        .iter()
        .any(|n| touches(n) || any_node(n.children(), touches))
}

/// Appends text, joining it onto a preceding text node.
pub(super) fn push_text(out: &mut Vec<Node>, text: String) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Node::Text { text: prev }) => prev.push_str(&text),
        _ => out.push(Node::Text { text }),
    }
}

/// Checks every link and image destination against the policy.
///
/// A stripped link leaves its label behind as plain text; a stripped image
/// is removed. Allowed relative destinations are replaced by their resolved
/// form.
pub fn guard_destinations(tree: RenderTree, policy: &SanitizationPolicy) -> RenderTree {
    Guard::run(
        tree,
        policy,
        |n| matches!(n, Node::Link { .. } | Node::Image { .. }),
        visit_destination,
    )
}

fn visit_destination(g: &mut Guard<'_>, node: Node, out: &mut Vec<Node>) {
    match node {
        Node::Link {
            destination,
            title,
            children,
        } => {
            let verdict = decide(DestinationKind::Link, &destination, g.policy);
            let subject = Subject::destination(DestinationKind::Link, &destination);
            let outcome = g.record(subject, verdict);
            let children = g.rewrite(children, visit_destination);
            match outcome {
                Outcome::Stripped => push_text(out, children.iter().map(Node::plain_text).collect()),
                outcome => out.push(Node::Link {
                    destination: kept(outcome, destination),
                    title,
                    children,
                }),
            }
        }
        Node::Image {
            destination,
            title,
            alt,
        } => {
            let verdict = decide(DestinationKind::Image, &destination, g.policy);
            let subject = Subject::destination(DestinationKind::Image, &destination);
            match g.record(subject, verdict) {
                Outcome::Stripped => {}
                outcome => out.push(Node::Image {
                    destination: kept(outcome, destination),
                    title,
                    alt,
                }),
            }
        }
        Node::Text { text } => push_text(out, text),
        other => out.push(g.descend(other, visit_destination)),
    }
}

fn kept(outcome: Outcome, destination: String) -> String {
    match outcome {
        Outcome::Rewritten(to) => to,
        _ => destination,
    }
}
