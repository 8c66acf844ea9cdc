//! Linear collections used by the maze and the game engine.
//!
//! Two stacks (array-backed and linked), a linked queue and an
//! insertion-ordered list. All of them report misuse through
//! [`CollectionError`] instead of handing back placeholder values.

pub mod array_stack;
pub mod error;
pub mod linked_queue;
pub mod linked_stack;
pub mod unordered_list;

pub use array_stack::ArrayStack;
pub use error::CollectionError;
pub use linked_queue::LinkedQueue;
pub use linked_stack::LinkedStack;
pub use unordered_list::UnorderedList;

/// Operations shared by both stack variants.
pub trait Stack<T> {
    fn push(&mut self, element: T);
    fn pop(&mut self) -> Result<T, CollectionError>;
    fn peek(&self) -> Result<&T, CollectionError>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Writes `[a, b, c]` for the given elements.
pub(crate) fn write_sequence<'a, T, I>(f: &mut std::fmt::Formatter<'_>, items: I) -> std::fmt::Result
where
    T: std::fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    write!(f, "[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}
