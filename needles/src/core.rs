//! Core, type-erased callables stored by the container.

use crate::container::Container;
use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A resolved dependency, shared between the container and its callers.
pub type Value = Arc<dyn Any + Send + Sync>;

/// A value while it is being built and extended, before it is shared.
pub type BoxedValue = Box<dyn Any + Send + Sync>;

type BuildFn = dyn Fn(&Container, &str) -> Result<BoxedValue> + Send + Sync;
type ExtendFn = dyn Fn(BoxedValue, &Container, &str) -> Result<BoxedValue> + Send + Sync;

/// A registered service builder with its output type erased.
///
/// This is what [`Container::raw`] hands back for services and factories.
/// Cloning is cheap and keeps pointer identity, see [`Builder::ptr_eq`].
#[derive(Clone)]
pub struct Builder {
  build: Arc<BuildFn>,
}

impl Builder {
  pub(crate) fn new<T, F>(build: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &str) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      build: Arc::new(move |container: &Container, name: &str| {
        build(container, name).map(|value| Box::new(value) as BoxedValue)
      }),
    }
  }

  /// Invokes the builder directly. Nothing is memoized and no extensions run.
  pub fn build(&self, container: &Container, name: &str) -> Result<BoxedValue> {
    (self.build)(container, name)
  }

  /// Returns `true` if both handles point at the same registered builder.
  pub fn ptr_eq(&self, other: &Builder) -> bool {
    Arc::ptr_eq(&self.build, &other.build)
  }
}

impl fmt::Debug for Builder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Builder({:p})", Arc::as_ptr(&self.build))
  }
}

/// A decorator applied to a freshly built value.
#[derive(Clone)]
pub(crate) struct Extension {
  apply: Arc<ExtendFn>,
}

impl Extension {
  pub(crate) fn new<T, F>(extend: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(T, &Container, &str) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      apply: Arc::new(move |value: BoxedValue, container: &Container, name: &str| {
        let value = value
          .downcast::<T>()
          .map_err(|_| Error::type_mismatch::<T>(name))?;
        extend(*value, container, name).map(|value| Box::new(value) as BoxedValue)
      }),
    }
  }

  pub(crate) fn apply(&self, value: BoxedValue, container: &Container, name: &str) -> Result<BoxedValue> {
    (self.apply)(value, container, name)
  }
}

/// How a registered builder is turned into a value.
#[derive(Clone)]
pub(crate) enum Definition {
  /// Built once. The cell makes concurrent first resolutions share one build.
  Service {
    cell: Arc<OnceCell<Value>>,
    builder: Builder,
  },
  /// Built again on every resolution.
  Factory { builder: Builder },
}

impl Definition {
  pub(crate) fn service(builder: Builder) -> Self {
    Definition::Service {
      cell: Arc::new(OnceCell::new()),
      builder,
    }
  }

  pub(crate) fn factory(builder: Builder) -> Self {
    Definition::Factory { builder }
  }

  pub(crate) fn builder(&self) -> &Builder {
    match self {
      Definition::Service { builder, .. } | Definition::Factory { builder } => builder,
    }
  }
}
