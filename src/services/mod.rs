pub mod chat;
pub mod polarity;
pub mod providers;
pub mod recommendations;
pub mod sentiment;
pub mod summarize;
pub mod title_index;
pub mod vectorizer;

pub use polarity::{LexiconAnalyzer, PolarityAnalyzer};
pub use providers::{OpenAiGenerator, TextGenerator};
pub use title_index::GameTitleIndex;
pub use vectorizer::{TfIdfVectorizer, Vectorizer};
