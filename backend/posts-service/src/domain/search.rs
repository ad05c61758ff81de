//! Title/tag search predicate.
//!
//! A post matches when its title contains the query (case-insensitive, unanchored)
//! or when any of its tags is in the requested tag list. The query is taken
//! literally: regex metacharacters are escaped before the pattern is compiled.

use super::models::Post;
use crate::error::{AppError, Result};
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct SearchPredicate {
    title: Regex,
    title_pattern: String,
    tags: Vec<String>,
}

impl SearchPredicate {
    /// Build from the raw `searchQuery` and comma-separated `tags` parameters.
    ///
    /// Empty tag segments are dropped, so `""` and `"a,,b"` never match untagged
    /// posts through the tag branch.
    pub fn build(search_query: &str, tags_csv: &str) -> Result<Self> {
        let title_pattern = regex::escape(search_query);
        let title = RegexBuilder::new(&title_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::Validation(format!("Invalid search query: {}", e)))?;

        let tags = tags_csv
            .split(',')
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            title,
            title_pattern,
            tags,
        })
    }

    /// Escaped pattern, suitable for PostgreSQL's `~*` operator.
    pub fn title_pattern(&self) -> &str {
        &self.title_pattern
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.title.is_match(&post.title) || post.tags.iter().any(|tag| self.tags.contains(tag))
    }
}
