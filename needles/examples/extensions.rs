use needles::{Container, Dependency};
use std::sync::Arc;

trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello".to_string()
  }
}

// Decorates any greeter with a suffix.
struct Excited(Arc<dyn Greeter>);
impl Greeter for Excited {
  fn greet(&self) -> String {
    format!("{}!", self.0.greet())
  }
}

fn main() {
  let container = Container::new();
  container
    .set(
      "greeter",
      Dependency::service(|_, _| Arc::new(EnglishGreeter) as Arc<dyn Greeter>),
    )
    // Extensions run in order, each wrapping the previous result.
    .extend("greeter", |inner: Arc<dyn Greeter>, _: &Container, _: &str| {
      Arc::new(Excited(inner)) as Arc<dyn Greeter>
    })
    .extend("greeter", |inner: Arc<dyn Greeter>, _: &Container, _: &str| {
      Arc::new(Excited(inner)) as Arc<dyn Greeter>
    });

  let greeter = container
    .get::<Arc<dyn Greeter>>("greeter")
    .expect("greeter is registered");
  println!("{}", greeter.greet());
  assert_eq!(greeter.greet(), "Hello!!");
}
