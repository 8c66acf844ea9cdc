use std::fmt;

use super::{write_sequence, CollectionError, Stack};

#[derive(Debug)]
struct Node<T> {
    element: T,
    next: Option<Box<Node<T>>>,
}

/// Stack built from a chain of nodes; each push links to the old top.
#[derive(Debug)]
pub struct LinkedStack<T> {
    top: Option<Box<Node<T>>>,
    count: usize,
}

impl<T> LinkedStack<T> {
    pub fn new() -> Self {
        LinkedStack {
            top: None,
            count: 0,
        }
    }

    /// Elements from top to bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.top.as_deref(),
        }
    }
}

impl<T> Stack<T> for LinkedStack<T> {
    fn push(&mut self, element: T) {
        let node = Box::new(Node {
            element,
            next: self.top.take(),
        });
        self.top = Some(node);
        self.count += 1;
    }

    fn pop(&mut self) -> Result<T, CollectionError> {
        let node = self.top.take().ok_or(CollectionError::empty("stack"))?;
        self.top = node.next;
        self.count -= 1;
        Ok(node.element)
    }

    fn peek(&self) -> Result<&T, CollectionError> {
        self.top
            .as_ref()
            .map(|node| &node.element)
            .ok_or(CollectionError::empty("stack"))
    }

    fn len(&self) -> usize {
        self.count
    }
}

impl<T> Default for LinkedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink iteratively so long histories don't recurse through Box drops.
impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        let mut current = self.top.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

impl<T: Clone> Clone for LinkedStack<T> {
    fn clone(&self) -> Self {
        let items: Vec<&T> = self.iter().collect();
        let mut copy = LinkedStack::new();
        for item in items.into_iter().rev() {
            copy.push(item.clone());
        }
        copy
    }
}

impl<T: fmt::Display> fmt::Display for LinkedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, self.iter())
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.element
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_peek() {
        let mut stack = LinkedStack::new();
        stack.push("a");
        stack.push("b");
        assert_eq!(stack.peek(), Ok(&"b"));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok("b"));
        assert_eq!(stack.pop(), Ok("a"));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), Err(CollectionError::empty("stack")));
        assert_eq!(stack.peek(), Err(CollectionError::empty("stack")));
    }

    #[test]
    fn renders_top_to_bottom() {
        let mut stack = LinkedStack::new();
        stack.push("E1");
        stack.push("S1");
        stack.push("C1");
        assert_eq!(stack.to_string(), "[C1, S1, E1]");
    }

    #[test]
    fn clone_keeps_order() {
        let mut stack = LinkedStack::new();
        stack.push(1);
        stack.push(2);
        let mut copy = stack.clone();
        assert_eq!(copy.pop(), Ok(2));
        assert_eq!(copy.pop(), Ok(1));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn dropping_a_long_chain_is_fine() {
        let mut stack = LinkedStack::new();
        for n in 0..200_000 {
            stack.push(n);
        }
        drop(stack);
    }
}
