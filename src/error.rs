// Structured validation failures the pipeline surfaces to its caller.
//
// Almost every degenerate input degrades to an empty result instead of
// erroring (empty pages, empty keywords, weight-sum drift). The one
// exception is a page that carries content the tokenizer cannot turn
// into a single token: silently returning an empty suggestion list
// would hide a caller-supplied data defect, so it gets its own error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The page has non-empty textual fields, but none of them yield a
    /// single token — binary or otherwise non-linguistic content.
    #[error("page {url} cannot be tokenized: content is not analyzable text")]
    MalformedPage { url: String },
}
