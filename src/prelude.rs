//! The traits needed to register and look up routes.
//!
//! ```
//! use routerify_tree::prelude::*;
//! ```

pub use crate::router::{RouteMatching, RouteRegister};
