//! The per-method segment trie.
//!
//! Patterns are split on `/` and stored one segment per level. Literal segments are
//! upper-cased (Unicode-aware) on the way in and on lookup, so they match case-insensitively.
//! Segments starting with `:` are named dynamic segments and match any single
//! request segment.
//!
//! Lookup is a depth-first search that returns the first terminal node it reaches,
//! visiting siblings in registration order. It does not rank literal segments above
//! dynamic ones: with `/book/:id` registered before `/book/detail`, a request for
//! `/book/detail` is served by `/book/:id`. Register the more specific route first
//! when that matters.

use crate::types::RouteParams;
use crate::Error;
use http::Method;
use std::fmt::{self, Debug, Formatter};

use self::node::Node;

mod node;

/// A successful lookup: the handler of the matched route and the values bound to its dynamic segments.
#[derive(Debug)]
pub struct Match<'a, H> {
    pub handler: &'a H,
    pub params: RouteParams,
}

/// The route trie for a single HTTP method.
///
/// A tree is filled during startup and only read afterwards, so lookups need no locking.
pub struct Tree<H> {
    method: Method,
    root: Node<H>,
}

impl<H> Tree<H> {
    pub fn new(method: Method) -> Tree<H> {
        Tree {
            method,
            root: Node::root(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Registers `handler` under `path`.
    ///
    /// Fails with [`Error::DuplicateRoute`] if the very same pattern (compared after
    /// upper-casing its literal segments) is already registered. Patterns that only
    /// differ in a parameter name, like `/user/:id` and `/user/:name`, are distinct
    /// and become sibling nodes.
    ///
    /// No other validation happens: leading, trailing and doubled slashes produce
    /// empty literal segments.
    pub fn add_route(&mut self, path: &str, handler: H) -> crate::Result<()> {
        if self.root.find_exact(path).is_some_and(Node::is_terminal) {
            return Err(Error::DuplicateRoute {
                method: self.method.clone(),
                path: path.to_owned(),
            });
        }

        let mut node = &mut self.root;
        for segment in path.split(crate::constants::SEGMENT_SEPARATOR) {
            let segment = crate::helpers::canonical_segment(segment);
            node = node.child_or_insert(&segment);
        }
        node.handler = Some(handler);

        tracing::debug!(method = %self.method, path, "route added");

        Ok(())
    }

    /// Finds the handler serving `path`, if any.
    pub fn find_handler(&self, path: &str) -> Option<&H> {
        self.find(path).map(|m| m.handler)
    }

    /// Finds the handler serving `path` together with its route parameters.
    pub fn find(&self, path: &str) -> Option<Match<'_, H>> {
        let mut bindings = Vec::new();
        let node = self.root.match_path(path, &mut bindings)?;
        let handler = node.handler.as_ref()?;

        Some(Match {
            handler,
            params: bindings.into_iter().collect(),
        })
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.root.count_terminals()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

impl<H> Debug for Tree<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        Debug::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(routes: &[(&str, &'static str)]) -> Tree<&'static str> {
        let mut tree = Tree::new(Method::GET);
        for (path, handler) in routes {
            tree.add_route(path, *handler).unwrap();
        }
        tree
    }

    #[test]
    fn should_find_registered_routes() {
        let tree = tree(&[("/", "root"), ("/about", "about"), ("/book/:id", "book"), ("/book/:id/pages/:page", "page")]);

        assert_eq!(tree.find_handler("/"), Some(&"root"));
        assert_eq!(tree.find_handler("/about"), Some(&"about"));
        assert_eq!(tree.find_handler("/book/123"), Some(&"book"));
        assert_eq!(tree.find_handler("/book/abc/pages/7"), Some(&"page"));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn should_match_literal_segments_case_insensitively() {
        let tree = tree(&[("/Book/:id", "book")]);

        assert_eq!(tree.find_handler("/book/123"), Some(&"book"));
        assert_eq!(tree.find_handler("/BOOK/123"), Some(&"book"));
        assert_eq!(tree.find_handler("/bOoK/x"), Some(&"book"));
    }

    #[test]
    fn should_match_non_ascii_literals_case_insensitively() {
        let tree = tree(&[("/café/:id", "cafe"), ("/Ärzte", "doctors")]);

        assert_eq!(tree.find_handler("/CAFÉ/1"), Some(&"cafe"));
        assert_eq!(tree.find_handler("/Café/1"), Some(&"cafe"));
        assert_eq!(tree.find_handler("/ärzte"), Some(&"doctors"));
        assert_eq!(tree.find_handler("/cafe/1"), None);
        assert_eq!(tree.find("/CAFÉ/Crème").unwrap().params.get("id").unwrap(), "Crème");
    }

    #[test]
    fn should_bind_params_with_their_original_case() {
        let tree = tree(&[("/users/:userName/books/:bookName", "books")]);

        let found = tree.find("/USERS/Alice/books/HarryPotter").unwrap();
        assert_eq!(found.handler, &"books");
        assert_eq!(found.params.get("userName").unwrap(), "Alice");
        assert_eq!(found.params.get("bookName").unwrap(), "HarryPotter");
        assert_eq!(found.params.len(), 2);
    }

    #[test]
    fn should_reject_duplicate_routes() {
        let mut tree = tree(&[("/book/:id", "first")]);

        let err = tree.add_route("/book/:id", "second").unwrap_err();
        assert!(err.is_duplicate_route());
        assert_eq!(err.to_string(), "route already registered: GET /book/:id");

        assert!(tree.add_route("/BOOK/:id", "third").unwrap_err().is_duplicate_route());
        assert_eq!(tree.find_handler("/book/1"), Some(&"first"));
    }

    #[test]
    fn should_allow_a_route_below_an_existing_prefix() {
        let mut tree = tree(&[("/a/b/c", "deep")]);

        tree.add_route("/a/b", "shallow").unwrap();
        assert_eq!(tree.find_handler("/a/b"), Some(&"shallow"));
        assert_eq!(tree.find_handler("/a/b/c"), Some(&"deep"));
        assert_eq!(tree.find_handler("/a"), None);
    }

    #[test]
    fn should_keep_differently_named_params_as_siblings() {
        let tree = tree(&[("/user/:id", "by_id"), ("/user/:name", "by_name")]);

        let found = tree.find("/user/42").unwrap();
        assert_eq!(found.handler, &"by_id");
        assert_eq!(found.params.get("id").unwrap(), "42");
        assert!(!found.params.has("name"));
    }

    #[test]
    fn should_share_nodes_for_identical_param_names() {
        let tree = tree(&[("/user/:id", "user"), ("/user/:id/posts", "posts")]);

        assert_eq!(tree.root.children[0].children[0].children.len(), 1);
        assert_eq!(tree.find_handler("/user/7/posts"), Some(&"posts"));
    }

    #[test]
    fn should_prefer_the_earlier_registered_sibling() {
        let tree = tree(&[("/book/:id", "wildcard"), ("/book/detail", "literal")]);
        assert_eq!(tree.find_handler("/book/detail"), Some(&"wildcard"));
        assert_eq!(tree.find_handler("/book/9"), Some(&"wildcard"));

        let tree = self::tree(&[("/book/detail", "literal"), ("/book/:id", "wildcard")]);
        assert_eq!(tree.find_handler("/book/detail"), Some(&"literal"));
        assert_eq!(tree.find_handler("/book/9"), Some(&"wildcard"));
    }

    #[test]
    fn should_backtrack_out_of_a_failed_branch() {
        let tree = tree(&[("/a/:x/c", "dynamic"), ("/a/b/d", "literal")]);

        assert_eq!(tree.find_handler("/a/b/d"), Some(&"literal"));
        assert_eq!(tree.find_handler("/a/b/c"), Some(&"dynamic"));
        assert_eq!(tree.find_handler("/a/b/e"), None);
    }

    #[test]
    fn should_drop_params_of_abandoned_branches() {
        let tree = tree(&[("/a/:x/c", "first"), ("/a/:y/d", "second")]);

        let found = tree.find("/a/1/d").unwrap();
        assert_eq!(found.handler, &"second");
        assert_eq!(found.params.get("y").unwrap(), "1");
        assert!(!found.params.has("x"));
    }

    #[test]
    fn should_return_none_when_nothing_matches() {
        let tree = tree(&[("/book/:id", "book")]);

        assert_eq!(tree.find_handler("/book"), None);
        assert_eq!(tree.find_handler("/book/1/2"), None);
        assert_eq!(tree.find_handler("/books/1"), None);
        assert!(tree.find("/nothing").is_none());
    }

    #[test]
    fn should_treat_empty_segments_as_literals() {
        let tree = tree(&[("/book", "no_slash"), ("", "empty"), ("//x", "double")]);

        assert_eq!(tree.find_handler("/book"), Some(&"no_slash"));
        assert_eq!(tree.find_handler("/book/"), None);
        assert_eq!(tree.find_handler(""), Some(&"empty"));
        assert_eq!(tree.find_handler("/"), None);
        assert_eq!(tree.find_handler("//x"), Some(&"double"));
        assert_eq!(tree.find_handler("/x"), None);
    }

    #[test]
    fn should_match_a_trailing_slash_route_only_with_the_slash() {
        let tree = tree(&[("/book/", "slash")]);

        assert_eq!(tree.find_handler("/book/"), Some(&"slash"));
        assert_eq!(tree.find_handler("/book"), None);
    }

    #[test]
    fn should_match_an_empty_request_segment_against_a_param() {
        let tree = tree(&[("/book/:id/x", "book")]);

        assert_eq!(tree.find_handler("/book//x"), Some(&"book"));
        assert_eq!(tree.find("/book//x").unwrap().params.get("id").unwrap(), "");
    }

    #[test]
    fn should_try_every_child_for_marker_shaped_segments() {
        let tree = tree(&[("/user/me", "me")]);

        assert_eq!(tree.find_handler("/user/:anything"), Some(&"me"));
    }

    #[test]
    fn should_accept_the_same_pattern_in_separate_trees() {
        let mut get = Tree::new(Method::GET);
        let mut post = Tree::new(Method::POST);

        get.add_route("/book/:id", 1).unwrap();
        post.add_route("/book/:id", 2).unwrap();

        assert_eq!(get.find_handler("/book/1"), Some(&1));
        assert_eq!(post.find_handler("/book/1"), Some(&2));
    }

    #[test]
    fn should_start_empty() {
        let tree: Tree<()> = Tree::new(Method::PUT);

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.method(), &Method::PUT);
        assert!(tree.find_handler("/").is_none());
    }
}
