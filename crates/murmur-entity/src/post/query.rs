//! Base filters and orderings understood by post stores.

use std::fmt;

use murmur_core::types::{PostId, UserId};

/// Which posts a query selects before the author join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    /// A single post.
    Id(PostId),
    /// Every post by one author.
    Author(UserId),
    /// Every post by any of the given authors.
    Authors(Vec<UserId>),
    /// Full-text match over title and body.
    Text(String),
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    /// Descending by creation time.
    #[default]
    Newest,
    /// Descending by text-match score. Only meaningful with [`PostFilter::Text`].
    Relevance,
}

impl fmt::Display for PostFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Author(id) => write!(f, "author={id}"),
            Self::Authors(ids) => write!(f, "authors[{}]", ids.len()),
            Self::Text(term) => write!(f, "text={term:?}"),
        }
    }
}
