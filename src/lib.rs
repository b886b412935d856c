// Balise: SEO keyword suggestions and topic clusters for French sites.
//
// Library root. Each module is one stage of the analysis engine: text
// processing, signal scoring, topic discovery, and the pipeline that
// composes them.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod text;
pub mod topics;

#[cfg(feature = "web")]
pub mod web;
