use std::fmt;

use super::{write_sequence, CollectionError, Stack};

const DEFAULT_CAPACITY: usize = 100;

/// Stack over a fixed block of slots that doubles when full.
#[derive(Debug, Clone)]
pub struct ArrayStack<T> {
    slots: Box<[Option<T>]>,
    top: usize,
}

impl<T> ArrayStack<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ArrayStack {
            slots: empty_slots(capacity.max(1)),
            top: 0,
        }
    }

    /// Elements from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.top].iter().rev().flatten()
    }

    /// Elements from bottom to top, i.e. in push order.
    pub fn iter_from_bottom(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.top].iter().flatten()
    }

    pub fn peek_mut(&mut self) -> Result<&mut T, CollectionError> {
        if self.top == 0 {
            return Err(CollectionError::empty("stack"));
        }
        self.slots[self.top - 1]
            .as_mut()
            .ok_or(CollectionError::empty("stack"))
    }

    fn expand_capacity(&mut self) {
        let mut larger = empty_slots(self.slots.len() * 2);
        for (dst, src) in larger.iter_mut().zip(self.slots.iter_mut()) {
            *dst = src.take();
        }
        self.slots = larger;
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T> Stack<T> for ArrayStack<T> {
    fn push(&mut self, element: T) {
        if self.top == self.slots.len() {
            self.expand_capacity();
        }
        self.slots[self.top] = Some(element);
        self.top += 1;
    }

    fn pop(&mut self) -> Result<T, CollectionError> {
        if self.top == 0 {
            return Err(CollectionError::empty("stack"));
        }
        self.top -= 1;
        self.slots[self.top]
            .take()
            .ok_or(CollectionError::empty("stack"))
    }

    fn peek(&self) -> Result<&T, CollectionError> {
        if self.top == 0 {
            return Err(CollectionError::empty("stack"));
        }
        self.slots[self.top - 1]
            .as_ref()
            .ok_or(CollectionError::empty("stack"))
    }

    fn len(&self) -> usize {
        self.top
    }
}

impl<T> Default for ArrayStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut stack = ArrayStack::new();
        for n in 1..=5 {
            stack.push(n);
        }
        let popped: Vec<_> = std::iter::from_fn(|| stack.pop().ok()).collect();
        assert_eq!(popped, vec![5, 4, 3, 2, 1]);
        assert!(stack.is_empty());
    }

    #[test]
    fn doubles_capacity_only_when_full() {
        let mut stack = ArrayStack::with_capacity(2);
        stack.push('a');
        stack.push('b');
        assert_eq!(stack.capacity(), 2);
        stack.push('c');
        assert_eq!(stack.capacity(), 4);
        stack.push('d');
        assert_eq!(stack.capacity(), 4);
        stack.push('e');
        assert_eq!(stack.capacity(), 8);
        assert_eq!(stack.len(), 5);
        assert_eq!(stack.peek(), Ok(&'e'));
    }

    #[test]
    fn zero_capacity_still_grows() {
        let mut stack = ArrayStack::with_capacity(0);
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn pop_releases_the_slot() {
        let mut stack = ArrayStack::with_capacity(4);
        stack.push(String::from("x"));
        stack.pop().unwrap();
        assert!(stack.slots.iter().all(Option::is_none));
    }

    #[test]
    fn empty_stack_refuses_pop_and_peek() {
        let mut stack: ArrayStack<u8> = ArrayStack::new();
        assert_eq!(stack.pop(), Err(CollectionError::empty("stack")));
        assert_eq!(stack.peek(), Err(CollectionError::empty("stack")));
    }

    #[test]
    fn renders_top_to_bottom() {
        let mut stack = ArrayStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.to_string(), "[3, 2, 1]");
        assert_eq!(ArrayStack::<i32>::new().to_string(), "[]");
    }
}
