//! Context tag store.
//!
//! A [`TagContext`] is an immutable, append-only list of tags threaded through
//! a call chain by value. Appending returns a new context that shares the
//! parent's nodes; the parent is never touched, so branches forked from the
//! same context never see each other's tags.

use crate::{Level, Tag, TagValue};
use logwire_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

struct Node {
    tag: Tag,
    previous: Option<Arc<Node>>,
}

/// Execution-scoped tag carrier with level-aware deduplication.
///
/// ```
/// use logwire_domain::{Level, TagContext};
///
/// let request = TagContext::new().append_info("requestId", "req_1");
/// let detailed = request.append_error("payload", "{...}");
///
/// assert_eq!(request.len(), 1);
/// assert_eq!(detailed.tags_at_or_below(Level::WARN).len(), 1);
/// assert_eq!(detailed.tags_at_or_below(Level::ERROR).len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct TagContext {
    head: Option<Arc<Node>>,
    len: usize,
}

impl TagContext {
    /// Empty root context.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of stored tags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no tags are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Derive a context carrying one more tag.
    ///
    /// When a tag with the same key and value is already stored at the same
    /// or a lower level, the append is a no-op and an equivalent context is
    /// returned.
    #[must_use]
    pub fn append(&self, level: Level, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        let tag = Tag::new(key, level, value);
        if self.iter_newest_first().any(|existing| supersedes(existing, &tag)) {
            return self.clone();
        }
        Self {
            head: Some(Arc::new(Node {
                tag,
                previous: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Serialize `value` to JSON and append it as a raw tag.
    pub fn append_serialized<T: Serialize + ?Sized>(
        &self,
        level: Level,
        key: &str,
        value: &T,
    ) -> Result<Self, ErrorEnvelope> {
        let value = TagValue::serialized(value).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("domain", "tag_not_serializable"),
                format!("cannot append tag {key:?}: {error}"),
            )
            .with_metadata("key", key)
        })?;
        Ok(self.append(level, key, value))
    }

    /// Append at [`Level::TRACE`].
    #[must_use]
    pub fn append_trace(&self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.append(Level::TRACE, key, value)
    }

    /// Append at [`Level::DEBUG`].
    #[must_use]
    pub fn append_debug(&self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.append(Level::DEBUG, key, value)
    }

    /// Append at [`Level::INFO`].
    #[must_use]
    pub fn append_info(&self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.append(Level::INFO, key, value)
    }

    /// Append at [`Level::WARN`].
    #[must_use]
    pub fn append_warn(&self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.append(Level::WARN, key, value)
    }

    /// Append at [`Level::ERROR`].
    #[must_use]
    pub fn append_error(&self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.append(Level::ERROR, key, value)
    }

    /// Append at [`Level::FATAL`].
    #[must_use]
    pub fn append_fatal(&self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.append(Level::FATAL, key, value)
    }

    /// Tags recorded at or below `level`, oldest first.
    #[must_use]
    pub fn tags_at_or_below(&self, level: Level) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .iter_newest_first()
            .filter(|tag| tag.level <= level)
            .cloned()
            .collect();
        tags.reverse();
        tags
    }

    /// Every stored tag, oldest first.
    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.iter_newest_first().cloned().collect();
        tags.reverse();
        tags
    }

    fn iter_newest_first(&self) -> impl Iterator<Item = &Tag> {
        std::iter::successors(self.head.as_deref(), |node| node.previous.as_deref())
            .map(|node| &node.tag)
    }
}

fn supersedes(existing: &Tag, candidate: &Tag) -> bool {
    existing.key == candidate.key
        && existing.level <= candidate.level
        && existing.value.same_serialized(&candidate.value)
}

impl fmt::Debug for TagContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TagContext")
            .field("tags", &self.tags())
            .finish()
    }
}

// Unlink uniquely owned nodes iteratively so long chains cannot overflow the stack.
impl Drop for TagContext {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.previous.take(),
                Err(_) => break,
            }
        }
    }
}
