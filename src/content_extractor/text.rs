//! Text collection from a DOM subtree.

use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use scraper::ElementRef;
use std::collections::HashSet;

/// Elements that start a new line when rendered; their edges act as word breaks
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "details", "dialog",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "hr", "li", "main", "ol", "option", "p", "pre", "section", "summary", "table", "tbody",
    "td", "tfoot", "th", "thead", "tr", "ul",
];

enum Step<'a> {
    Enter(NodeRef<'a, Node>),
    Leave,
}

/// Concatenated text of `root` and its descendants, skipping excluded subtrees.
///
/// Block-level element boundaries are emitted as spaces so that adjacent
/// paragraphs do not fuse. Traversal uses an explicit stack, so deeply nested
/// documents cannot overflow the call stack.
#[must_use]
pub fn element_text(root: ElementRef<'_>, excluded: &HashSet<NodeId>) -> String {
    let mut output = String::new();
    let mut stack = vec![Step::Enter(*root)];

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Enter(node) => node,
            Step::Leave => {
                output.push(' ');
                continue;
            }
        };

        if excluded.contains(&node.id()) {
            continue;
        }

        match node.value() {
            Node::Text(text) => output.push_str(text),
            Node::Element(element) => {
                if BLOCK_ELEMENTS.contains(&element.name()) {
                    output.push(' ');
                    stack.push(Step::Leave);
                }
                push_children(&mut stack, node);
            }
            Node::Document | Node::Fragment => push_children(&mut stack, node),
            _ => {}
        }
    }

    output
}

fn push_children<'a>(stack: &mut Vec<Step<'a>>, node: NodeRef<'a, Node>) {
    // Reversed so the first child is popped first
    let children: Vec<_> = node.children().collect();
    stack.extend(children.into_iter().rev().map(Step::Enter));
}

/// Collapse every whitespace run to a single space and trim both ends
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
