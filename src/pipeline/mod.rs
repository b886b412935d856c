// Pipeline — candidate generation through ranked suggestion output.

pub mod analyze;

pub use analyze::{page_corpus_text, Analyzer};
