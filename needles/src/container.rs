//! The main `Container` struct and its associated methods.

use crate::core::{BoxedValue, Builder, Definition, Extension, Value};
use crate::dependency::{Dependency, Raw};
use crate::error::{Error, Result};
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A registry of named dependencies.
///
/// Parameters are stored as given. Services are built lazily on first
/// resolution and memoized, factories are rebuilt on every resolution.
/// Extensions decorate a service or factory each time it is built.
///
/// All operations take `&self`, so builders and extensions receive the
/// container and can resolve (or register) other dependencies through it.
#[derive(Default)]
pub struct Container {
  values: DashMap<String, Value>,
  builders: DashMap<String, Definition>,
  extensions: DashMap<String, Vec<Extension>>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a container seeded with `dependencies`, see [`Container::set_many`].
  pub fn with_dependencies<I, K>(dependencies: I) -> Self
  where
    I: IntoIterator<Item = (K, Dependency)>,
    K: Into<String>,
  {
    let container = Self::new();
    container.set_many(dependencies);
    container
  }

  // --- Registration ---

  /// Registers `dependency` under `name`, replacing any earlier definition
  /// of the same kind.
  ///
  /// Registering a builder does not evict a value already resolved for
  /// `name`; that value keeps being returned by [`Container::get`].
  pub fn set(&self, name: impl Into<String>, dependency: Dependency) -> &Self {
    let name = name.into();
    debug!(name = %name, kind = dependency.kind(), "registering dependency");
    match dependency {
      Dependency::Parameter(value) => {
        self.values.insert(name, value);
      }
      Dependency::Service(builder) => {
        self.builders.insert(name, Definition::service(builder));
      }
      Dependency::Factory(builder) => {
        self.builders.insert(name, Definition::factory(builder));
      }
    }
    self
  }

  /// Registers every `(name, dependency)` pair in iteration order, exactly
  /// as repeated calls to [`Container::set`] would.
  pub fn set_many<I, K>(&self, dependencies: I) -> &Self
  where
    I: IntoIterator<Item = (K, Dependency)>,
    K: Into<String>,
  {
    for (name, dependency) in dependencies {
      self.set(name, dependency);
    }
    self
  }

  /// Adds a decorator that runs after the builder for `name`, before the
  /// value is memoized. Decorators run in registration order, each one
  /// receiving the output of the previous one.
  ///
  /// Parameters are never decorated, and neither is a service that was
  /// already resolved.
  pub fn extend<T, F>(&self, name: impl Into<String>, extension: F) -> &Self
  where
    T: Any + Send + Sync,
    F: Fn(T, &Container, &str) -> T + Send + Sync + 'static,
  {
    self.try_extend(name, move |value: T, container: &Container, name: &str| {
      Ok(extension(value, container, name))
    })
  }

  /// Like [`Container::extend`], for decorators that can fail.
  pub fn try_extend<T, F>(&self, name: impl Into<String>, extension: F) -> &Self
  where
    T: Any + Send + Sync,
    F: Fn(T, &Container, &str) -> Result<T> + Send + Sync + 'static,
  {
    let name = name.into();
    debug!(name = %name, ty = std::any::type_name::<T>(), "registering extension");
    self
      .extensions
      .entry(name)
      .or_default()
      .push(Extension::new(extension));
    self
  }

  /// Marks `value` as a plain parameter, even if it is callable.
  pub fn protect<T: Any + Send + Sync>(value: T) -> Dependency {
    Dependency::parameter(value)
  }

  /// Marks `builder` to be re-run on every resolution instead of once.
  pub fn factory<T, F>(builder: F) -> Dependency
  where
    T: Any + Send + Sync,
    F: Fn(&Container, &str) -> T + Send + Sync + 'static,
  {
    Dependency::factory(builder)
  }

  // --- Resolution ---

  /// Resolves `name` and downcasts it to `T`.
  ///
  /// # Errors
  ///
  /// - [`Error::NotFound`] if nothing is registered under `name`.
  /// - [`Error::TypeMismatch`] if the value, or the input of one of its
  ///   extensions, is not a `T`.
  /// - Any error returned by a fallible builder or extension.
  pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self
      .get_any(name)?
      .downcast::<T>()
      .map_err(|_| Error::type_mismatch::<T>(name))
  }

  /// Resolves `name` without downcasting.
  pub fn get_any(&self, name: &str) -> Result<Value> {
    if let Some(value) = self.values.get(name) {
      trace!(name, "resolved stored value");
      return Ok(Arc::clone(value.value()));
    }

    // Clone the definition out so no shard lock is held while user code runs.
    let definition = self.builders.get(name).map(|entry| entry.value().clone());

    match definition {
      None => {
        debug!(name, "unknown dependency");
        Err(Error::not_found(name))
      }
      Some(Definition::Factory { builder }) => self.construct(name, &builder).map(Value::from),
      Some(Definition::Service { cell, builder }) => {
        let value = cell.get_or_try_init(|| self.construct(name, &builder).map(Value::from))?;
        self.values.insert(name.to_owned(), Arc::clone(value));
        debug!(name, "memoized service");
        Ok(Arc::clone(value))
      }
    }
  }

  /// Returns the builder registered for `name`, or failing that its stored
  /// value. Never builds anything.
  pub fn raw(&self, name: &str) -> Option<Raw> {
    if let Some(definition) = self.builders.get(name) {
      return Some(Raw::Builder(definition.builder().clone()));
    }
    self
      .values
      .get(name)
      .map(|value| Raw::Value(Arc::clone(value.value())))
  }

  fn construct(&self, name: &str, builder: &Builder) -> Result<BoxedValue> {
    trace!(name, "building dependency");
    let mut value = builder.build(self, name)?;

    let extensions = self
      .extensions
      .get(name)
      .map(|entry| entry.value().clone())
      .unwrap_or_default();
    trace!(name, extensions = extensions.len(), "applying extensions");
    for extension in &extensions {
      value = extension.apply(value, self, name)?;
    }
    Ok(value)
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("values", &self.values.len())
      .field("builders", &self.builders.len())
      .field("extensions", &self.extensions.len())
      .finish()
  }
}
