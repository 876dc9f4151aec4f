//! Errors raised while registering or resolving dependencies.

use std::error::Error as StdError;
use std::sync::Arc;

/// An error raised by [`Container`](crate::Container) operations.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// Neither a value nor a builder is registered under `name`.
  #[error("unknown dependency `{name}`")]
  NotFound { name: String },

  /// An argument could not be used for the requested operation.
  #[error("invalid argument `{argument}`: {reason}")]
  InvalidArgument {
    argument: &'static str,
    reason: &'static str,
  },

  /// The dependency resolved to a value of a different type than requested.
  #[error("dependency `{name}` is not of type `{expected}`")]
  TypeMismatch { name: String, expected: &'static str },

  /// An error raised by a user-supplied builder or extension.
  #[error(transparent)]
  Other(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Error {
  pub(crate) fn not_found(name: &str) -> Self {
    Self::NotFound {
      name: name.to_owned(),
    }
  }

  pub(crate) fn type_mismatch<T: ?Sized>(name: &str) -> Self {
    Self::TypeMismatch {
      name: name.to_owned(),
      expected: std::any::type_name::<T>(),
    }
  }

  /// Wraps an arbitrary error so it can be returned from a fallible builder
  /// or extension.
  pub fn other<E>(err: E) -> Self
  where
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    Self::Other(Arc::from(err.into()))
  }

  pub const fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }

  pub const fn is_invalid_argument(&self) -> bool {
    matches!(self, Self::InvalidArgument { .. })
  }

  pub const fn is_type_mismatch(&self) -> bool {
    matches!(self, Self::TypeMismatch { .. })
  }
}

/// [`Result`] is an alias to [`core::result::Result`] with [`Error`] as the
/// default error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
