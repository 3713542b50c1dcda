use super::{RouteMatching, RouteRegister};
use crate::constants::SUPPORTED_METHODS;
use crate::handler::BoxedHandler;
use crate::helpers::{canonical_method, canonical_path};
use crate::tree::Match;
use crate::types::RouteParams;
use crate::{Error, RouteError};
use http::Method;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

/// A router without dynamic segments: one hash map per method, keyed by the upper-cased path.
///
/// Lookups are a single map access. A pattern like `/book/:id` is stored and matched
/// literally, so it only serves the path `/book/:id` itself.
pub struct SimpleRouter<E> {
    routes: HashMap<Method, HashMap<String, BoxedHandler<E>>>,
}

impl<E: Into<RouteError> + 'static> SimpleRouter<E> {
    pub fn new() -> SimpleRouter<E> {
        SimpleRouter {
            routes: SUPPORTED_METHODS
                .iter()
                .map(|method| (method.clone(), HashMap::new()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.values().all(HashMap::is_empty)
    }
}

impl<E: Into<RouteError> + 'static> Default for SimpleRouter<E> {
    fn default() -> Self {
        SimpleRouter::new()
    }
}

impl<E: 'static> RouteRegister<E> for SimpleRouter<E> {
    fn add_route(&mut self, method: Method, path: &str, handler: BoxedHandler<E>) -> crate::Result<()> {
        let (method, routes) = canonical_method(&method)
            .and_then(|method| self.routes.get_mut(&method).map(|routes| (method, routes)))
            .ok_or_else(|| Error::UnsupportedMethod(method.clone()))?;

        let key = canonical_path(path);
        if routes.contains_key(&key) {
            return Err(Error::DuplicateRoute {
                method,
                path: path.to_owned(),
            });
        }

        tracing::debug!(%method, path, "route added");
        routes.insert(key, handler);

        Ok(())
    }
}

impl<E: 'static> RouteMatching for SimpleRouter<E> {
    type Error = E;

    fn find_route(&self, method: &Method, path: &str) -> Option<Match<'_, BoxedHandler<E>>> {
        let routes = canonical_method(method).and_then(|method| self.routes.get(&method))?;

        routes.get(&canonical_path(path)).map(|handler| Match {
            handler,
            params: RouteParams::new(),
        })
    }
}

impl<E> Debug for SimpleRouter<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for method in SUPPORTED_METHODS.iter() {
            if let Some(routes) = self.routes.get(method) {
                let mut paths: Vec<_> = routes.keys().collect();
                paths.sort();
                map.entry(method, &paths);
            }
        }
        map.finish()
    }
}
