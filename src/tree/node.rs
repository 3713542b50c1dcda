use crate::constants::SEGMENT_SEPARATOR;
use crate::helpers::{canonical_segment, is_dynamic_segment};
use std::fmt::{self, Debug, Formatter};

/// A single trie vertex: one path segment at one depth.
///
/// A node is terminal iff it holds a handler. Children keep registration order,
/// which is also the order they are visited in during lookup.
pub(crate) struct Node<H> {
    pub(crate) segment: String,
    pub(crate) handler: Option<H>,
    pub(crate) children: Vec<Node<H>>,
}

impl<H> Node<H> {
    pub(crate) fn root() -> Node<H> {
        Node::new(String::new())
    }

    pub(crate) fn new(segment: String) -> Node<H> {
        Node {
            segment,
            handler: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.handler.is_some()
    }

    pub(crate) fn is_dynamic(&self) -> bool {
        is_dynamic_segment(&self.segment)
    }

    /// Parameter name without the marker, for dynamic nodes only.
    pub(crate) fn param_name(&self) -> Option<&str> {
        if self.is_dynamic() {
            Some(&self.segment[1..])
        } else {
            None
        }
    }

    /// Whether this node is a lookup candidate for an already canonicalized request segment.
    fn accepts(&self, segment: &str, any_child: bool) -> bool {
        any_child || self.is_dynamic() || self.segment == segment
    }

    /// Returns the child whose stored segment is exactly `segment`, creating and appending it if absent.
    pub(crate) fn child_or_insert(&mut self, segment: &str) -> &mut Node<H> {
        let idx = match self.children.iter().position(|child| child.segment == segment) {
            Some(idx) => idx,
            None => {
                self.children.push(Node::new(segment.to_owned()));
                self.children.len() - 1
            }
        };

        &mut self.children[idx]
    }

    /// Follows stored segments by exact equality, no wildcard expansion.
    pub(crate) fn find_exact(&self, path: &str) -> Option<&Node<H>> {
        path.split(SEGMENT_SEPARATOR).try_fold(self, |node, segment| {
            let segment = canonical_segment(segment);
            node.children.iter().find(|child| child.segment == segment)
        })
    }

    /// Depth-first, first-success descent over the children in registration order.
    ///
    /// Dynamic children match any request segment; the bindings of the branch that
    /// succeeds are left in `params`, the bindings of abandoned branches are removed.
    pub(crate) fn match_path<'n, 'p>(
        &'n self,
        path: &'p str,
        params: &mut Vec<(&'n str, &'p str)>,
    ) -> Option<&'n Node<H>> {
        let (head, rest) = match path.split_once(SEGMENT_SEPARATOR) {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        // A marker-shaped request segment can only come from probing with a pattern.
        let any_child = is_dynamic_segment(head);
        let segment = canonical_segment(head);

        for child in self.children.iter().filter(|child| child.accepts(&segment, any_child)) {
            match rest {
                None => {
                    if child.is_terminal() {
                        child.bind(head, params);
                        return Some(child);
                    }
                }
                Some(rest) => {
                    let mark = params.len();
                    child.bind(head, params);

                    if let Some(found) = child.match_path(rest, params) {
                        return Some(found);
                    }

                    params.truncate(mark);
                }
            }
        }

        None
    }

    fn bind<'n, 'p>(&'n self, value: &'p str, params: &mut Vec<(&'n str, &'p str)>) {
        if let Some(name) = self.param_name() {
            params.push((name, value));
        }
    }

    pub(crate) fn count_terminals(&self) -> usize {
        let own = usize::from(self.is_terminal());
        own + self.children.iter().map(Node::count_terminals).sum::<usize>()
    }

    fn fmt_indented(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        for child in &self.children {
            writeln!(
                f,
                "{:indent$}{:?}{}",
                "",
                child.segment,
                if child.is_terminal() { " *" } else { "" },
                indent = depth * 2
            )?;
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl<H> Debug for Node<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
