use needles::{Container, Dependency, Raw};
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};
use std::thread;

const NAME: &str = "test";

fn greet() -> &'static str {
  "hello"
}

// --- Factories ---

#[test]
fn test_factory_is_rebuilt_on_every_get() {
  // Arrange
  let values = Arc::new(Mutex::new(VecDeque::from(["a", "b", "c"])));
  let queue = Arc::clone(&values);
  let container = Container::new();
  container.set(
    NAME,
    Container::factory(move |_, _| queue.lock().unwrap().pop_front()),
  );

  // Act & Assert
  for expected in ["a", "b", "c"] {
    assert_eq!(*container.get::<Option<&'static str>>(NAME).unwrap(), Some(expected));
  }
  assert!(values.lock().unwrap().is_empty());
}

#[test]
fn test_factory_value_is_never_stored() {
  let container = Container::new();
  container.set(NAME, Container::factory(|_, _| String::from("fresh")));

  let r1 = container.get::<String>(NAME).unwrap();
  let r2 = container.get::<String>(NAME).unwrap();

  assert!(!Arc::ptr_eq(&r1, &r2));
  assert!(container.raw(NAME).unwrap().as_builder().is_some());
}

#[test]
fn test_into_factory_rejects_parameters() {
  let err = Dependency::parameter(5_i32).into_factory().unwrap_err();

  assert!(err.is_invalid_argument());
  assert_eq!(
    err.to_string(),
    "invalid argument `service`: a parameter is not callable"
  );
}

#[test]
fn test_into_factory_converts_services() {
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&calls);
  let dependency = Dependency::service(move |_, _| counter.fetch_add(1, Ordering::SeqCst))
    .into_factory()
    .unwrap();
  let container = Container::new();
  container.set(NAME, dependency);

  container.get::<usize>(NAME).unwrap();
  container.get::<usize>(NAME).unwrap();

  assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_plain_service_after_factory_is_memoized() {
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&calls);
  let container = Container::new();
  container.set(NAME, Container::factory(|_, _| 0_usize));

  container.set(
    NAME,
    Dependency::service(move |_, _| counter.fetch_add(1, Ordering::SeqCst)),
  );
  container.get::<usize>(NAME).unwrap();
  container.get::<usize>(NAME).unwrap();

  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// --- Protected values ---

#[test]
fn test_protected_function_is_returned_uncalled() {
  let container = Container::new();

  container.set(NAME, Container::protect(greet as fn() -> &'static str));

  let f = container.get::<fn() -> &'static str>(NAME).unwrap();
  assert_eq!((*f)(), "hello");
}

#[test]
fn test_protected_closure_is_never_invoked() {
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&calls);
  let callback: Arc<dyn Fn() -> usize + Send + Sync> =
    Arc::new(move || counter.fetch_add(1, Ordering::SeqCst));
  let container = Container::new();

  container.set(NAME, Container::protect(Arc::clone(&callback)));
  let resolved = container.get::<Arc<dyn Fn() -> usize + Send + Sync>>(NAME).unwrap();

  assert_eq!(calls.load(Ordering::SeqCst), 0);
  assert!(Arc::ptr_eq(&callback, &*resolved));
}

// --- Raw definitions ---

#[test]
fn test_raw_returns_builder_without_calling_it() {
  // Arrange
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&calls);
  let dependency = Dependency::service(move |_, _| {
    counter.fetch_add(1, Ordering::SeqCst);
    String::from("built")
  });
  let original = match &dependency {
    Dependency::Service(builder) => builder.clone(),
    other => panic!("unexpected dependency: {:?}", other),
  };
  let container = Container::new();
  container.set(NAME, dependency);

  // Act
  let raw = container.raw(NAME).unwrap();

  // Assert
  let builder = raw.as_builder().expect("raw should be a builder");
  assert!(builder.ptr_eq(&original));
  assert_eq!(calls.load(Ordering::SeqCst), 0);

  // Invoking it by hand builds a value but stores nothing.
  let built = builder.build(&container, NAME).unwrap();
  assert_eq!(built.downcast_ref::<String>().map(String::as_str), Some("built"));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
  container.get::<String>(NAME).unwrap();
  assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_raw_returns_builder_even_after_resolution() {
  let container = Container::new();
  container.set(NAME, Dependency::service(|_, _| 1_i32));
  container.get::<i32>(NAME).unwrap();

  assert!(matches!(container.raw(NAME), Some(Raw::Builder(_))));
}

#[test]
fn test_raw_returns_parameter_value() {
  let container = Container::new();
  container.set(NAME, Dependency::parameter(9_u8));

  let raw = container.raw(NAME).unwrap();

  assert_eq!(raw.downcast::<u8>().as_deref(), Some(&9));
  assert!(container.raw("missing").is_none());
}

// --- Nesting ---

#[test]
fn test_nested_containers_chain() {
  let container = Container::new();
  container.set(
    "nested",
    Dependency::service(|_, _| {
      let subcontainer = Container::new();
      subcontainer.set("subvalue", Dependency::parameter(String::from("example")));
      subcontainer
    }),
  );

  let value = container
    .get::<Container>("nested")
    .unwrap()
    .get::<String>("subvalue")
    .unwrap();

  assert_eq!(*value, "example");
}

// --- Overwriting ---

#[test]
fn test_overwriting_parameter_replaces_value() {
  let container = Container::new();
  container.set(NAME, Dependency::parameter("first value"));
  container.set(NAME, Dependency::parameter("second value"));

  assert_eq!(*container.get::<&'static str>(NAME).unwrap(), "second value");
}

#[test]
fn test_overwriting_resolved_service_keeps_memoized_value() {
  // Re-registering a builder does not evict what was already resolved.
  let container = Container::new();
  container.set(NAME, Dependency::service(|_, _| "first"));
  assert_eq!(*container.get::<&'static str>(NAME).unwrap(), "first");

  container.set(NAME, Dependency::service(|_, _| "second"));

  assert_eq!(*container.get::<&'static str>(NAME).unwrap(), "first");
}

#[test]
fn test_overwriting_unresolved_service_uses_new_builder() {
  let container = Container::new();
  container.set(NAME, Dependency::service(|_, _| "first"));
  container.set(NAME, Dependency::service(|_, _| "second"));

  assert_eq!(*container.get::<&'static str>(NAME).unwrap(), "second");
}

// --- Concurrency ---

#[test]
fn test_service_is_built_once_under_concurrency() {
  static BUILD_COUNT: AtomicUsize = AtomicUsize::new(0);
  struct ConcurrentService;

  let container = Container::new();
  container.set(
    NAME,
    Dependency::service(|_, _| {
      BUILD_COUNT.fetch_add(1, Ordering::SeqCst);
      thread::sleep(std::time::Duration::from_millis(50));
      ConcurrentService
    }),
  );

  let resolved: Vec<Arc<ConcurrentService>> = thread::scope(|s| {
    let handles: Vec<_> = (0..20)
      .map(|_| s.spawn(|| container.get::<ConcurrentService>(NAME).unwrap()))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  assert_eq!(BUILD_COUNT.load(Ordering::SeqCst), 1);
  assert!(resolved.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn test_container_is_shareable_across_threads() {
  let container = Arc::new(Container::new());
  container.set("counter", Container::factory(|_, _| 1_u32));

  let sum: u32 = thread::scope(|s| {
    let handles: Vec<_> = (0..4)
      .map(|i| {
        let container = Arc::clone(&container);
        s.spawn(move || {
          container.set(format!("worker_{}", i), Dependency::parameter(i as u32));
          let own = container.get::<u32>(&format!("worker_{}", i)).unwrap();
          *container.get::<u32>("counter").unwrap() + *own
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).sum()
  });

  assert_eq!(sum, 4 + (0 + 1 + 2 + 3));
}
