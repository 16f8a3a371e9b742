mod config_gen;
mod links;
mod questions;

pub use config_gen::config_generate;
pub use links::{mark_used, show_link};
pub use questions::{list_questions, seed_questions};
