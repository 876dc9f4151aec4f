use needles::{Container, Dependency};

// A function that resolves its data from whichever container it is given.
// Accepting a `&Container` lets it run against a controlled environment.
fn process_data(container: &Container) -> needles::Result<String> {
  let data = container.get::<String>("data")?;
  Ok(format!("Processed: {}", data.to_uppercase()))
}

fn main() -> needles::Result<()> {
  let app = Container::new();

  // The "storage" service builds a whole container of its own.
  app.set(
    "storage",
    Dependency::service(|_, _| {
      let storage = Container::new();
      storage.set("data", Dependency::parameter(String::from("test data")));
      storage
    }),
  );

  println!("--- Resolving through the nested container ---");
  let storage = app.get::<Container>("storage")?;
  let result = process_data(&storage)?;
  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Verify Isolation ---
  // "data" lives only in the nested container.
  assert!(app.get::<String>("data").is_err());
  println!("\nVerified that the outer container does not see nested dependencies.");
  Ok(())
}
