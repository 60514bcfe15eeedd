//! Post-processing hook for rendered markup.

use crate::options::RenderOptions;
use crate::source::SourceType;

/// What a filter sees alongside the markup.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub url: &'a str,
    pub source: SourceType,
    pub options: &'a RenderOptions,
}

/// Rewrites or augments the final markup of every descriptor.
///
/// Filters run in registration order; each receives the previous
/// filter's output.
pub trait EmbedFilter: Send + Sync {
    fn filter(&self, markup: String, ctx: &FilterContext<'_>) -> String;
}

impl<F> EmbedFilter for F
where
    F: Fn(String, &FilterContext<'_>) -> String + Send + Sync,
{
    fn filter(&self, markup: String, ctx: &FilterContext<'_>) -> String {
        self(markup, ctx)
    }
}
