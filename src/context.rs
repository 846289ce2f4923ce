//! # Schema Context
//!
//! Schema metadata is read once and then borrowed by every resolver invocation. All of it is
//! allocated into a single arena owned by a [`SchemaContext`], which defines the lifetime `'a`
//! that the [Schema](crate::schema::Schema) and its types carry.

use bumpalo::Bump;

/// A context for a GraphQL schema which holds an arena allocator.
///
/// Parsing type definitions allocates many small, immutable values (types, fields, argument
/// declarations, type references). The context keeps them in one chunk of memory that's dropped
/// all at once when the context goes away. Unlike a request-scoped context, a schema context is
/// typically created on startup and kept alive for as long as the server runs.
pub struct SchemaContext {
    /// An arena allocator that holds the memory allocated for the context's lifetime
    pub arena: Bump,
}

impl SchemaContext {
    /// Create a new schema context with a preallocated arena.
    pub fn new() -> Self {
        SchemaContext { arena: Bump::new() }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Puts a `String` onto the arena and returns a reference to it to tie the `String`'s lifetime
    /// to this context without reallocating or copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for SchemaContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for creating empty, arena-backed values.
///
/// This mirrors [Default] for structures whose collections must be allocated in an arena.
pub trait DefaultIn<'a>: Sized {
    fn default_in(arena: &'a Bump) -> Self;
}
