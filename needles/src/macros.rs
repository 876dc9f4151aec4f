//! Public macros for ergonomic registration and resolution.

/// Resolves a dependency from a container, panicking if it cannot be resolved.
///
/// For a non-panicking version, call [`Container::get`](crate::Container::get)
/// directly.
///
/// # Examples
///
/// ```
/// use needles::{resolve, Container, Dependency};
///
/// let container = Container::new();
/// container.set("greeting", Dependency::parameter(String::from("hello")));
///
/// let greeting = resolve!(container, String, "greeting");
/// assert_eq!(*greeting, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  ($container:expr, $type:ty, $name:expr) => {{
    let name = $name;
    match $container.get::<$type>(name) {
      ::std::result::Result::Ok(value) => value,
      ::std::result::Result::Err(err) => panic!(
        "Failed to resolve required dependency '{}' as {}: {}",
        name,
        ::std::any::type_name::<$type>(),
        err
      ),
    }
  }};
}

/// Builds a list of named dependencies for
/// [`Container::set_many`](crate::Container::set_many) or
/// [`Container::with_dependencies`](crate::Container::with_dependencies).
///
/// # Examples
///
/// ```
/// use needles::{dependencies, Container, Dependency};
///
/// let container = Container::with_dependencies(dependencies! {
///   "port" => Dependency::parameter(8080_u16),
///   "address" => Dependency::try_service(|c: &Container, _: &str| {
///     Ok(format!("127.0.0.1:{}", c.get::<u16>("port")?))
///   }),
/// });
///
/// assert_eq!(*container.get::<String>("address").unwrap(), "127.0.0.1:8080");
/// ```
#[macro_export]
macro_rules! dependencies {
  ($($name:expr => $dependency:expr),* $(,)?) => {{
    let dependencies: ::std::vec::Vec<(::std::string::String, $crate::Dependency)> =
      ::std::vec![$((::std::string::String::from($name), $dependency)),*];
    dependencies
  }};
}
