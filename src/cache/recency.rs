//! Recency List Module
//!
//! Doubly-linked access order for LRU eviction, stored as an arena of nodes
//! linked by index instead of pointers.

/// Stable handle to a node in a [`RecencyList`].
pub type NodeId = usize;

/// Null link.
const NIL: NodeId = usize::MAX;

#[derive(Debug)]
struct Node<K> {
    /// None while the slot sits on the free list
    key: Option<K>,
    prev: NodeId,
    next: NodeId,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Removed slots are recycled through a free list, so a `NodeId` stays valid
/// until its node is removed.
#[derive(Debug)]
pub struct RecencyList<K> {
    nodes: Vec<Node<K>>,
    head: NodeId,
    tail: NodeId,
    free: Vec<NodeId>,
    len: usize,
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RecencyList<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a key as the most recently used and returns its node.
    pub fn push_front(&mut self, key: K) -> NodeId {
        let node = Node {
            key: Some(key),
            prev: NIL,
            next: NIL,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(id);
        self.len += 1;
        id
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    ///
    /// Ids of removed or never-allocated nodes are ignored.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == id || self.key_at(id).is_none() {
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    // == Remove ==
    /// Unlinks a node, frees its slot, and returns its key.
    ///
    /// Returns None if the id does not refer to a live node.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        let key = self.nodes.get_mut(id)?.key.take()?;
        self.unlink(id);
        self.free.push(id);
        self.len -= 1;
        Some(key)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<K> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    // == Back ==
    /// Returns the least recently used key without removing it.
    pub fn back(&self) -> Option<&K> {
        self.key_at(self.tail)
    }

    /// Returns the most recently used key.
    pub fn front(&self) -> Option<&K> {
        self.key_at(self.head)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn key_at(&self, id: NodeId) -> Option<&K> {
        self.nodes.get(id).and_then(|node| node.key.as_ref())
    }

    fn link_front(&mut self, id: NodeId) {
        self.nodes[id].prev = NIL;
        self.nodes[id].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = id;
        }
        self.head = id;
        if self.tail == NIL {
            self.tail = id;
        }
    }

    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = (self.nodes[id].prev, self.nodes[id].next);
        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.nodes[id].prev = NIL;
        self.nodes[id].next = NIL;
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    cursor: NodeId,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        node.key.as_ref()
    }
}
