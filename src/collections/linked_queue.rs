use std::fmt;

use super::{write_sequence, CollectionError};

struct Node<T> {
    element: T,
    next: Option<usize>,
}

/// FIFO queue over singly linked nodes with O(1) access at both ends.
///
/// Nodes live in a slot arena and link to each other by index. `rear` names
/// the last node of the chain and is `None` exactly when the queue is empty.
/// Slots freed by `dequeue` are reused by later `enqueue` calls.
pub struct LinkedQueue<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    front: Option<usize>,
    rear: Option<usize>,
    count: usize,
}

impl<T> LinkedQueue<T> {
    pub fn new() -> Self {
        LinkedQueue {
            nodes: Vec::new(),
            free: Vec::new(),
            front: None,
            rear: None,
            count: 0,
        }
    }

    pub fn enqueue(&mut self, element: T) {
        let node = Node {
            element,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        match self.rear.and_then(|rear| self.nodes[rear].as_mut()) {
            Some(last) => last.next = Some(slot),
            None => self.front = Some(slot),
        }
        self.rear = Some(slot);
        self.count += 1;
    }

    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        let node = self
            .front
            .and_then(|slot| self.nodes[slot].take().map(|node| (slot, node)));
        let (slot, node) = node.ok_or(CollectionError::empty("queue"))?;
        self.free.push(slot);
        self.front = node.next;
        self.count -= 1;
        if self.front.is_none() {
            self.rear = None;
            self.nodes.clear();
            self.free.clear();
        }
        Ok(node.element)
    }

    pub fn first(&self) -> Result<&T, CollectionError> {
        self.node(self.front)
            .map(|node| &node.element)
            .ok_or(CollectionError::empty("queue"))
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Elements from front to rear.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            next: self.front,
        }
    }

    fn node(&self, slot: Option<usize>) -> Option<&Node<T>> {
        slot.and_then(|slot| self.nodes.get(slot)?.as_ref())
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = LinkedQueue::new();
        for element in iter {
            queue.enqueue(element);
        }
        queue
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, self.iter())
    }
}

pub struct Iter<'a, T> {
    queue: &'a LinkedQueue<T>,
    next: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.node(self.next)?;
        self.next = node.next;
        Some(&node.element)
    }
}
