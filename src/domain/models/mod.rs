pub mod types;

pub use types::{Event, Product};
