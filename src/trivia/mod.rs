//! The question source: domain types, the source trait, and the Open
//! Trivia DB HTTP client.

pub mod category;
pub mod client;
pub mod error;
pub mod question;
pub mod source;

pub use category::{builtin_categories, Category, CategoryId};
pub use client::TriviaClient;
pub use error::{ClientError, FetchError};
pub use question::{Difficulty, Question};
pub use source::{load_categories, QuestionSource};
