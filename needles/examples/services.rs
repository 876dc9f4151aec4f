use needles::{resolve, Container, Dependency};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing_subscriber::EnvFilter;

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("needles=trace")))
    .init();

  let id_counter = Arc::new(AtomicUsize::new(0));
  let container = Container::new();

  // --- Service Registration ---
  // This builder will only be called ONCE.
  let counter = Arc::clone(&id_counter);
  container.set(
    "service_tracker",
    Dependency::service(move |_, _| {
      println!("Creating SERVICE RequestTracker...");
      RequestTracker {
        id: counter.fetch_add(1, Ordering::SeqCst),
      }
    }),
  );

  // --- Factory Registration ---
  // This builder will be called EVERY time the dependency is resolved.
  let counter = Arc::clone(&id_counter);
  container.set(
    "factory_tracker",
    Container::factory(move |_, _| {
      println!("Creating FACTORY RequestTracker...");
      RequestTracker {
        id: counter.fetch_add(1, Ordering::SeqCst),
      }
    }),
  );

  println!("--- Resolving Services ---");
  let s1 = resolve!(container, RequestTracker, "service_tracker");
  let s2 = resolve!(container, RequestTracker, "service_tracker");
  println!("Service 1 ID: {}, Service 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Service instances should be identical");
  println!("Service instances are the same pointer, as expected.\n");

  println!("--- Resolving Factories ---");
  let f1 = resolve!(container, RequestTracker, "factory_tracker");
  let f2 = resolve!(container, RequestTracker, "factory_tracker");
  println!("Factory 1 ID: {}, Factory 2 ID: {}", f1.id, f2.id);
  assert_eq!(f1.id, 1);
  assert_eq!(f2.id, 2);
  assert!(!Arc::ptr_eq(&f1, &f2), "Factory instances should be different");
  println!("Factory instances are different pointers, as expected.");
}
