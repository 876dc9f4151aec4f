//! # Needles
//!
//! A small dependency injection container that maps names to dependencies.
//!
//! A dependency is either a **parameter**, a value stored as-is, or a
//! **service**, a value produced by a builder the first time it is requested
//! and memoized afterwards. A **factory** is a service whose builder runs on
//! every request. **Extensions** decorate services and factories right after
//! they are built.
//!
//! The container is `Send + Sync`. Every operation takes `&self`, and
//! builders receive the container so they can resolve what they depend on.
//!
//! ## Quick Start
//!
//! ```
//! use needles::{Container, Dependency};
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! let container = Container::new();
//!
//! container
//!   .set("database_url", Dependency::parameter(String::from("postgres://localhost/app")))
//!   .set(
//!     "database",
//!     Dependency::try_service(|c: &Container, _: &str| {
//!       Ok(Database {
//!         url: c.get::<String>("database_url")?.to_string(),
//!       })
//!     }),
//!   );
//!
//! let db = container.get::<Database>("database").unwrap();
//! assert_eq!(db.url, "postgres://localhost/app");
//!
//! // Services are memoized.
//! assert!(Arc::ptr_eq(&db, &container.get::<Database>("database").unwrap()));
//! ```

mod container;
mod core;
mod dependency;
mod error;
mod macros;

pub use crate::container::Container;
pub use crate::core::{BoxedValue, Builder, Value};
pub use crate::dependency::{Dependency, Raw};
pub use crate::error::{Error, Result};
