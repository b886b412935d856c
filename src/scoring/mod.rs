// Keyword scoring — the four ranking signals and their weighted aggregation.

pub mod ranker;
pub mod signals;
