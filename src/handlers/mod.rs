pub mod generation_handler;

pub use generation_handler::{generate_quiz, health_check};
