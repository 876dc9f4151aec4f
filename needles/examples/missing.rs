use needles::{resolve, Container};
use std::panic::{self, AssertUnwindSafe};

struct UnregisteredService;

fn main() {
  let container = Container::new();

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a dependency that was never registered...");

  let result = panic::catch_unwind(AssertUnwindSafe(|| {
    // This line will panic!
    let _service = resolve!(container, UnregisteredService, "unregistered");
  }));

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get()` method ---
  println!("\nNow, attempting to resolve using the fallible `get()` method...");

  match container.get::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the dependency!"),
    Err(err) => println!("Correctly received an error: {}", err),
  }
}
