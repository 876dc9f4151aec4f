//! The tagged forms a dependency takes on its way into and out of a container.

use crate::container::Container;
use crate::core::{Builder, Value};
use crate::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dependency ready to be registered with [`Container::set`].
///
/// The variant decides how the container treats it: parameters are stored
/// as-is, services are built once on first resolution and factories are
/// built on every resolution.
#[derive(Clone)]
pub enum Dependency {
  Parameter(Value),
  Service(Builder),
  Factory(Builder),
}

impl Dependency {
  /// A plain value. Callables stored this way are returned, never invoked.
  pub fn parameter<T: Any + Send + Sync>(value: T) -> Self {
    Self::Parameter(Arc::new(value))
  }

  /// A service built once, on first resolution.
  pub fn service<T, F>(builder: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &str) -> T + Send + Sync + 'static,
  {
    Self::Service(Builder::new(move |container: &Container, name: &str| {
      Ok(builder(container, name))
    }))
  }

  /// A service whose builder may fail, e.g. when it resolves other dependencies.
  pub fn try_service<T, F>(builder: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &str) -> Result<T> + Send + Sync + 'static,
  {
    Self::Service(Builder::new(builder))
  }

  /// A service rebuilt every time it is resolved.
  pub fn factory<T, F>(builder: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &str) -> T + Send + Sync + 'static,
  {
    Self::Factory(Builder::new(move |container: &Container, name: &str| {
      Ok(builder(container, name))
    }))
  }

  pub fn try_factory<T, F>(builder: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &str) -> Result<T> + Send + Sync + 'static,
  {
    Self::Factory(Builder::new(builder))
  }

  /// Turns a service into a factory.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidArgument`] for a parameter, which has no builder
  /// to run.
  pub fn into_factory(self) -> Result<Self> {
    match self {
      Self::Service(builder) | Self::Factory(builder) => Ok(Self::Factory(builder)),
      Self::Parameter(_) => Err(Error::InvalidArgument {
        argument: "service",
        reason: "a parameter is not callable",
      }),
    }
  }

  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Self::Parameter(_) => "parameter",
      Self::Service(_) => "service",
      Self::Factory(_) => "factory",
    }
  }
}

impl fmt::Debug for Dependency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Dependency::Parameter(_) => write!(f, "Dependency::Parameter(..)"),
      Dependency::Service(builder) => write!(f, "Dependency::Service({:?})", builder),
      Dependency::Factory(builder) => write!(f, "Dependency::Factory({:?})", builder),
    }
  }
}

/// An unprocessed definition, as returned by [`Container::raw`].
#[derive(Clone)]
pub enum Raw {
  /// The registered builder of a service or factory.
  Builder(Builder),
  /// A value stored without a builder, i.e. a parameter.
  Value(Value),
}

impl Raw {
  pub fn as_builder(&self) -> Option<&Builder> {
    match self {
      Raw::Builder(builder) => Some(builder),
      Raw::Value(_) => None,
    }
  }

  pub fn as_value(&self) -> Option<&Value> {
    match self {
      Raw::Value(value) => Some(value),
      Raw::Builder(_) => None,
    }
  }

  /// Returns the stored value if it is a `T`.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self
      .as_value()
      .and_then(|value| Arc::clone(value).downcast::<T>().ok())
  }
}

impl fmt::Debug for Raw {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Raw::Builder(builder) => write!(f, "Raw::Builder({:?})", builder),
      Raw::Value(_) => write!(f, "Raw::Value(..)"),
    }
  }
}
