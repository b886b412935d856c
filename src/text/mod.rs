// Text processing — normalization, tokenization, and n-gram candidates.

pub mod ngrams;
pub mod normalize;
pub mod stopwords;
