//! A doubly linked list that flattens all its nodes onto a Vec for storage,
//! gaining data locality and O(1) random access to any node whose handle you
//! hold.

/// A handle to a node in the list: the node's position in the storage vec
/// plus the generation of that slot when the node was pushed.
///
/// Slots are recycled, so a handle outlives its node whenever the node is
/// removed. The generation tells the two apart; a stale handle never resolves
/// to whatever node moved into the slot afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle {
    slot: usize,
    generation: u32,
}

impl NodeHandle {
    /// The position of the node in the storage vec.
    pub(crate) fn slot(&self) -> usize {
        self.slot
    }
}

/// A node that lives in a linked list.
#[derive(Clone)]
struct Node<T> {
    /// The value being stored.
    value: T,

    /// The slot of the node previous to this one.
    prev: Option<usize>,

    /// The slot of the next node in the list.
    next: Option<usize>,
}

/// One position in the storage vec.
#[derive(Clone)]
struct Slot<T> {
    /// Bumped every time the slot is freed.
    generation: u32,

    node: Option<Node<T>>,
}

/// A single contiguous Vec of nodes, which are addressed by their position in
/// the Vec. Removed slots are freelisted and reused by later pushes. There is
/// no compaction.
///
/// Handing NodeHandles out of the list is the whole point: the map keeps the
/// slot of every entry in its hash index, and cursors keep handles to walk the
/// list without borrowing it.
#[derive(Clone)]
pub(crate) struct LinkedList<T> {
    /// The nodes in the list.
    store: Vec<Slot<T>>,

    /// Slots in the store which aren't in use anymore. These will be reused.
    free: Vec<usize>,

    /// The first node in the list.
    head: Option<usize>,

    /// The last node in the list.
    tail: Option<usize>,

    len: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> LinkedList<T> {
    /// Creates a new linked list with a specific capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// The length of this linked list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.store
            .reserve(additional.saturating_sub(self.free.len()));
    }

    /// Pushes t onto the back of the list and returns a handle to the node.
    pub(crate) fn push_back(&mut self, t: T) -> NodeHandle {
        let node = Node {
            value: t,
            prev: self.tail,
            next: None,
        };

        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        let slot = match self.free.pop() {
            Some(slot) => {
                log::trace!("reusing freed list slot {slot}");
                self.store[slot].node = Some(node);
                slot
            }
            None => {
                self.store.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.store.len() - 1
            }
        };

        // link this node into the chain
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;

        NodeHandle {
            slot,
            generation: self.store[slot].generation,
        }
    }

    /// Removes the node behind `handle`, returning its value. Returns None if
    /// the handle is stale.
    pub(crate) fn remove(&mut self, handle: NodeHandle) -> Option<T> {
        if !self.is_live(handle) {
            return None;
        }

        self.remove_slot(handle.slot)
    }

    /// Removes whatever node occupies `slot`.
    pub(crate) fn remove_slot(&mut self, slot: usize) -> Option<T> {
        let entry = self.store.get_mut(slot)?;
        let node = entry.node.take()?;
        entry.generation = entry.generation.wrapping_add(1);

        // link prev to next and next to prev so node doesn't exist in the
        // chain anymore
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(slot);
        self.len -= 1;

        Some(node.value)
    }

    /// Whether `handle` still refers to a node in the list.
    pub(crate) fn is_live(&self, handle: NodeHandle) -> bool {
        self.store
            .get(handle.slot)
            .map_or(false, |s| s.generation == handle.generation && s.node.is_some())
    }

    /// The current handle for the node in `slot`, if the slot is occupied.
    pub(crate) fn handle_at(&self, slot: usize) -> Option<NodeHandle> {
        let entry = self.store.get(slot)?;
        entry.node.as_ref().map(|_| NodeHandle {
            slot,
            generation: entry.generation,
        })
    }

    pub(crate) fn get(&self, handle: NodeHandle) -> Option<&T> {
        if self.is_live(handle) {
            self.get_at(handle.slot)
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        if self.is_live(handle) {
            self.get_at_mut(handle.slot)
        } else {
            None
        }
    }

    /// Gets the value in `slot` without a generation check.
    pub(crate) fn get_at(&self, slot: usize) -> Option<&T> {
        self.store
            .get(slot)
            .and_then(|s| s.node.as_ref())
            .map(|n| &n.value)
    }

    pub(crate) fn get_at_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.store
            .get_mut(slot)
            .and_then(|s| s.node.as_mut())
            .map(|n| &mut n.value)
    }

    /// The first node in the list.
    pub(crate) fn head(&self) -> Option<NodeHandle> {
        self.head.and_then(|slot| self.handle_at(slot))
    }

    /// The last node in the list.
    pub(crate) fn tail(&self) -> Option<NodeHandle> {
        self.tail.and_then(|slot| self.handle_at(slot))
    }

    /// The node after `handle`. None if `handle` is the tail or is stale.
    pub(crate) fn next_of(&self, handle: NodeHandle) -> Option<NodeHandle> {
        if !self.is_live(handle) {
            return None;
        }
        self.node(handle.slot)
            .next
            .and_then(|slot| self.handle_at(slot))
    }

    /// The node before `handle`. None if `handle` is the head or is stale.
    pub(crate) fn prev_of(&self, handle: NodeHandle) -> Option<NodeHandle> {
        if !self.is_live(handle) {
            return None;
        }
        self.node(handle.slot)
            .prev
            .and_then(|slot| self.handle_at(slot))
    }

    /// Clears this linked list. Does not free the underlying buffer.
    ///
    /// Every outstanding handle goes stale, since the slots themselves are
    /// kept (with bumped generations) and pushed onto the freelist.
    pub(crate) fn clear(&mut self) {
        log::trace!("clearing linked list of {} nodes", self.len);
        self.free.clear();
        for (slot, entry) in self.store.iter_mut().enumerate() {
            if entry.node.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
            }
            self.free.push(slot);
        }
        // pop hands slots out from the back; keep low slots first
        self.free.reverse();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// The node in `slot`. Only called for slots reached through the chain,
    /// which are always occupied.
    fn node(&self, slot: usize) -> &Node<T> {
        match self.store[slot].node.as_ref() {
            Some(node) => node,
            None => panic!("linked list chain reaches vacant slot {slot}"),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match self.store[slot].node.as_mut() {
            Some(node) => node,
            None => panic!("linked list chain reaches vacant slot {slot}"),
        }
    }

    #[cfg(test)]
    pub(crate) fn continuity_test(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;

        // walk the chain, making sure every back link points where we came
        // from and that it ends at the tail
        while let Some(slot) = cursor {
            let node = self.node(slot);
            assert_eq!(prev, node.prev);
            count += 1;
            assert!(count <= self.len);
            prev = Some(slot);
            cursor = node.next;
        }

        assert_eq!(prev, self.tail);
        assert_eq!(self.len, count);
        assert_eq!(self.store.len(), self.len + self.free.len());
    }
}

/// Walks the list in order, front to back.
pub(crate) struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front?;
        let node = self.list.node(slot);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back?;
        let node = self.list.node(slot);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Drains the list front to back, taking ownership of the values.
pub(crate) struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.list.head?;
        self.list.remove_slot(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
