pub mod templates;

pub use templates::{get, DEFAULT_TEMPLATE, EXAMPLE_PAIRS, TEMPLATES};
