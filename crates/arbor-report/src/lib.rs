//! Arbor Report — markdown rendering of snapshot diffs for CI comments

pub mod markdown;

pub use markdown::render_markdown;
