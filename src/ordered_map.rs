//! [`OrderedMap`], a string-keyed hash map that remembers the order in which
//! keys were first inserted.

use hashbrown::hash_table::HashTable;
use std::{
    collections::hash_map::RandomState,
    fmt,
    hash::BuildHasher,
    iter::FusedIterator,
};

use crate::linked_list::{self, LinkedList, NodeHandle};

/// One key-value pair, living as a node in the insertion-order list.
#[derive(Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

/// A layer on top of a hash table that links entries together so they can
/// be iterated over in insertion order.
///
/// The entries live in an arena-backed doubly linked list. The hash table
/// only stores the arena slot of each entry; keys are stored once, in the
/// list, and rehashed from there whenever the table needs them. Setting,
/// getting and deleting a key are all O(1), as is asking for the length.
///
/// Updating the value of a key which is already present leaves it where it
/// was in the iteration order.
///
/// ```
/// use orderedmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("a", 1);
/// map.set("b", 2);
/// map.set("a", 3);
///
/// assert_eq!(Some(&3), map.get("a"));
/// assert!(map.iter().eq([("a", &3), ("b", &2)]));
/// ```
#[derive(Clone)]
pub struct OrderedMap<V, S = RandomState> {
    hash_builder: S,
    index: HashTable<usize>,
    entries: LinkedList<Entry<V>>,
}

impl<V> OrderedMap<V, RandomState> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<V, S> OrderedMap<V, S> {
    /// Creates an empty map which hashes keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty map with room for `capacity` entries, hashing keys
    /// with `hash_builder`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            hash_builder,
            index: HashTable::with_capacity(capacity),
            entries: LinkedList::with_capacity(capacity),
        }
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry. Keeps the allocated storage.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();

        #[cfg(test)]
        {
            assert_eq!(0, self.len());
            self.entries.continuity_test();
        }
    }

    /// Iterates over the entries, oldest first.
    ///
    /// Every call starts a new, independent walk from the head.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Iterates over the keys, oldest first.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over the values, in the insertion order of their keys.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// The oldest entry.
    pub fn front(&self) -> Option<(&str, &V)> {
        self.iter().next()
    }

    /// The newest entry.
    pub fn back(&self) -> Option<(&str, &V)> {
        self.iter().next_back()
    }

    /// A cursor positioned before the oldest entry. See [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor::new()
    }

    /// Moves `cursor` to the next entry and returns it, or returns None once
    /// the end of the map has been reached.
    ///
    /// The cursor doesn't borrow the map, so entries may be deleted (or set)
    /// between calls. Deleting the entry the cursor is positioned at is fine:
    /// the cursor captured the entry after it when it moved there.
    ///
    /// ```
    /// use orderedmap::OrderedMap;
    ///
    /// let mut map: OrderedMap<u32> = ["a", "b", "c"].into_iter().zip(0..).collect();
    /// let mut cursor = map.cursor();
    /// let mut seen = vec![];
    ///
    /// while let Some((key, _)) = map.advance(&mut cursor) {
    ///     let key = key.to_owned();
    ///     map.delete(&key);
    ///     seen.push(key);
    /// }
    ///
    /// assert_eq!(vec!["a", "b", "c"], seen);
    /// assert!(map.is_empty());
    /// ```
    pub fn advance(&self, cursor: &mut Cursor) -> Option<(&str, &V)> {
        let target = match cursor.state {
            CursorState::Start => self.entries.head(),
            CursorState::At { current, next } => {
                if self.entries.is_live(current) {
                    // follow the live chain; this picks up deletions of the
                    // old next entry and anything appended since
                    self.entries.next_of(current)
                } else {
                    next.filter(|next| self.entries.is_live(*next))
                }
            }
            CursorState::Done => None,
        };

        match target {
            Some(current) => {
                cursor.state = CursorState::At {
                    current,
                    next: self.entries.next_of(current),
                };
                self.entries.get(current).map(|e| (e.key.as_str(), &e.value))
            }
            None => {
                cursor.state = CursorState::Done;
                None
            }
        }
    }

    /// The oldest entry as an [`Element`], from which the rest of the map can
    /// be walked.
    pub fn first(&self) -> Option<Element<'_, V, S>> {
        self.entries.head().map(|handle| Element { map: self, handle })
    }

    /// The newest entry as an [`Element`].
    pub fn last(&self) -> Option<Element<'_, V, S>> {
        self.entries.tail().map(|handle| Element { map: self, handle })
    }

    #[cfg(test)]
    pub(crate) fn continuity_test(&self)
    where
        S: BuildHasher,
    {
        self.entries.continuity_test();
        assert_eq!(self.entries.len(), self.index.len());

        // every entry in the list can be found through the index, and lands
        // on its own slot
        let mut handle = self.entries.head();
        while let Some(h) = handle {
            let key = self.entries.get(h).map(|e| e.key.as_str()).unwrap();
            assert_eq!(Some(h.slot()), self.find_slot(key));
            handle = self.entries.next_of(h);
        }
    }
}

impl<V, S> OrderedMap<V, S>
where
    S: BuildHasher,
{
    /// Sets the value for `key`, returning the previous value if the key was
    /// already present.
    ///
    /// A new key is appended to the end of the iteration order. An existing
    /// key keeps its position; only its value changes.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        #[cfg(test)]
        let original_len = self.len();
        let hash = self.hash_builder.hash_one(key.as_str());

        let previous = match self.index.entry(
            hash,
            |&slot| entry_at(&self.entries, slot).key == key,
            |&slot| {
                self.hash_builder
                    .hash_one(entry_at(&self.entries, slot).key.as_str())
            },
        ) {
            hashbrown::hash_table::Entry::Occupied(occupied) => {
                let slot = *occupied.get();
                self.entries
                    .get_at_mut(slot)
                    .map(|e| std::mem::replace(&mut e.value, value))
            }
            hashbrown::hash_table::Entry::Vacant(vacant) => {
                let handle = self.entries.push_back(Entry { key, value });
                vacant.insert(handle.slot());
                None
            }
        };

        #[cfg(test)]
        {
            let expected = original_len + usize::from(previous.is_none());
            assert_eq!(expected, self.len());
            self.continuity_test();
        }

        previous
    }

    /// Gets the value for `key`. None means the key isn't present, which is
    /// not an error.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find_slot(key)
            .map(|slot| &entry_at(&self.entries, slot).value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let slot = self.find_slot(key)?;
        self.entries.get_at_mut(slot).map(|e| &mut e.value)
    }

    /// Gets the stored key and value for `key`.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        self.find_slot(key).map(|slot| {
            let entry = entry_at(&self.entries, slot);
            (entry.key.as_str(), &entry.value)
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_slot(key).is_some()
    }

    /// Deletes `key` from the map, returning its value. Deleting a key which
    /// isn't present does nothing.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Deletes `key` from the map, returning the stored key and its value.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        #[cfg(test)]
        let original_len = self.len();
        let hash = self.hash_builder.hash_one(key);

        let slot = match self
            .index
            .find_entry(hash, |&slot| entry_at(&self.entries, slot).key == key)
        {
            Ok(occupied) => occupied.remove().0,
            Err(_) => return None,
        };
        let removed = self.entries.remove_slot(slot);

        #[cfg(test)]
        {
            assert_eq!(original_len - 1, self.len());
            self.continuity_test();
        }

        removed.map(|e| (e.key, e.value))
    }

    /// Removes the oldest entry and returns it.
    pub fn pop_front(&mut self) -> Option<(String, V)> {
        let head = self.entries.head()?;
        self.unlink(head)
    }

    /// Keeps only the entries for which `f` returns true, visiting them in
    /// order. Removal keeps the order of the survivors intact.
    pub fn retain(&mut self, mut f: impl FnMut(&str, &mut V) -> bool) {
        let mut removed = 0usize;
        let mut handle = self.entries.head();

        while let Some(current) = handle {
            // grab next before current might go away
            handle = self.entries.next_of(current);

            let keep = match self.entries.get_mut(current) {
                Some(entry) => f(entry.key.as_str(), &mut entry.value),
                None => true,
            };
            if !keep {
                self.unlink(current);
                removed += 1;
            }
        }

        if removed > 0 {
            log::trace!("retain removed {removed} entries, {} left", self.len());
        }
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        let entries = &self.entries;
        let hash_builder = &self.hash_builder;
        self.index.reserve(additional, |&slot| {
            hash_builder.hash_one(entry_at(entries, slot).key.as_str())
        });
        self.entries.reserve(additional);
    }

    /// The arena slot of `key`, if present.
    fn find_slot(&self, key: &str) -> Option<usize> {
        let hash = self.hash_builder.hash_one(key);
        self.index
            .find(hash, |&slot| entry_at(&self.entries, slot).key == key)
            .copied()
    }

    /// Removes the entry behind `handle` from both the index and the list.
    fn unlink(&mut self, handle: NodeHandle) -> Option<(String, V)> {
        let hash = self
            .hash_builder
            .hash_one(self.entries.get(handle)?.key.as_str());
        if let Ok(occupied) = self.index.find_entry(hash, |&slot| slot == handle.slot()) {
            occupied.remove();
        }
        let removed = self.entries.remove(handle);

        #[cfg(test)]
        self.continuity_test();

        removed.map(|e| (e.key, e.value))
    }
}

/// The entry in an index slot. The index only ever holds occupied slots.
fn entry_at<V>(entries: &LinkedList<Entry<V>>, slot: usize) -> &Entry<V> {
    match entries.get_at(slot) {
        Some(entry) => entry,
        None => panic!("index references vacant slot {slot}"),
    }
}

impl<V> Default for OrderedMap<V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> fmt::Debug for OrderedMap<V, S>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal if they hold the same entries in the same order.
impl<V, S> PartialEq for OrderedMap<V, S>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V, S> Eq for OrderedMap<V, S> where V: Eq {}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<V, S>
where
    K: Into<String>,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<V, S>
where
    K: Into<String>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, V, S> IntoIterator for &'a OrderedMap<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, S> IntoIterator for OrderedMap<V, S> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

/// Borrowing iterator over a map's entries, oldest first.
pub struct Iter<'a, V> {
    inner: linked_list::Iter<'a, Entry<V>>,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (e.key.as_str(), &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| (e.key.as_str(), &e.value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

/// Owning iterator over a map's entries, oldest first.
pub struct IntoIter<V> {
    inner: linked_list::IntoIter<Entry<V>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CursorState {
    Start,
    At {
        current: NodeHandle,
        next: Option<NodeHandle>,
    },
    Done,
}

/// A detached position in an [`OrderedMap`], moved along with
/// [`OrderedMap::advance`].
///
/// Unlike [`Iter`], a cursor doesn't borrow the map, so the map can be
/// changed in between steps. Every time the cursor moves to an entry it
/// captures the entry after it. When it next advances:
///
/// - if its current entry is still in the map, it follows the map's live
///   order, so deleting any other entry (including the captured one) and
///   appending new ones are both seen;
/// - if its current entry was deleted, it continues from the captured entry.
///
/// Deleting both the current entry and the captured next entry between two
/// steps leaves the cursor nowhere to go, and it ends early. It never
/// revisits an entry and never yields one that was deleted.
///
/// Cursors are cheap and independent; any number can walk the same map.
/// Using a cursor with a map other than the one that created it yields
/// meaningless results.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    state: CursorState,
}

impl Cursor {
    /// A cursor positioned before the oldest entry of whatever map it is
    /// used with.
    pub fn new() -> Self {
        Cursor {
            state: CursorState::Start,
        }
    }

    /// Whether the cursor has run off the end of its map.
    pub fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of a map, with a way to reach its neighbours.
pub struct Element<'a, V, S = RandomState> {
    map: &'a OrderedMap<V, S>,
    handle: NodeHandle,
}

impl<V, S> Clone for Element<'_, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, S> Copy for Element<'_, V, S> {}

impl<'a, V, S> Element<'a, V, S> {
    pub fn key(&self) -> &'a str {
        &self.entry().key
    }

    pub fn value(&self) -> &'a V {
        &self.entry().value
    }

    /// The element after this one, or None at the end of the map.
    pub fn next(&self) -> Option<Element<'a, V, S>> {
        self.map.entries.next_of(self.handle).map(|handle| Element {
            map: self.map,
            handle,
        })
    }

    /// The element before this one, or None at the start of the map.
    pub fn prev(&self) -> Option<Element<'a, V, S>> {
        self.map.entries.prev_of(self.handle).map(|handle| Element {
            map: self.map,
            handle,
        })
    }

    fn entry(&self) -> &'a Entry<V> {
        // the element borrows the map, so its entry can't have gone away
        entry_at(&self.map.entries, self.handle.slot())
    }
}

impl<V, S> fmt::Debug for Element<'_, V, S>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element")
            .field(&self.key())
            .field(self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;

    fn keys<V>(map: &OrderedMap<V>) -> Vec<&str> {
        map.keys().collect()
    }

    fn abc() -> OrderedMap<u32> {
        let mut map = OrderedMap::new();
        map.set("a", 1);
        map.set("b", 2);
        map.set("c", 3);
        map
    }

    #[test]
    fn test_insertion_order() {
        let mut map = abc();
        assert_eq!(vec!["a", "b", "c"], keys(&map));

        // updating values leaves the order alone
        assert_eq!(Some(1), map.set("a", 10));
        assert_eq!(Some(3), map.set("c", 30));
        assert_eq!(vec!["a", "b", "c"], keys(&map));
        assert_eq!(3, map.len());
    }

    #[test]
    fn test_update_in_place() {
        let mut map = OrderedMap::new();
        assert_eq!(None, map.set("k", "v1"));
        map.set("other", "x");
        assert_eq!(Some("v1"), map.set("k", "v2"));

        assert_eq!(Some(&"v2"), map.get("k"));
        assert_eq!(Some("k"), map.first().map(|e| e.key()));
    }

    #[test]
    fn test_missing_key() {
        let mut map = abc();
        assert_eq!(None, map.get("z"));
        assert!(!map.contains_key("z"));

        assert_eq!(None, map.delete("z"));
        assert_eq!(3, map.len());
    }

    #[test]
    fn test_delete() {
        let mut map = abc();
        assert_eq!(Some(2), map.delete("b"));
        assert_eq!(vec!["a", "c"], keys(&map));
        assert_eq!(2, map.len());
        assert_eq!(None, map.get("b"));

        // a deleted key comes back at the end
        map.set("b", 4);
        assert_eq!(vec!["a", "c", "b"], keys(&map));
    }

    #[test]
    fn test_hundred_keys() {
        let mut map = OrderedMap::new();
        for i in 0..100 {
            map.set(i.to_string(), i);
        }

        assert_eq!(100, map.len());
        for (i, (key, value)) in map.iter().enumerate() {
            assert_eq!(i.to_string(), key);
            assert_eq!(i, *value);
        }
        assert_eq!(100, map.iter().count());
    }

    #[test]
    fn test_delete_current_while_iterating() {
        let mut map = abc();
        let mut cursor = map.cursor();
        let mut seen = vec![];

        while let Some((key, _)) = map.advance(&mut cursor) {
            let key = key.to_owned();
            if key == "a" {
                map.delete(&key);
            }
            seen.push(key);
        }

        assert_eq!(vec!["a", "b", "c"], seen);
        assert_eq!(vec!["b", "c"], keys(&map));
        assert!(cursor.is_done());
    }

    #[test]
    fn test_delete_captured_next_while_iterating() {
        let mut map = abc();
        map.set("d", 4);
        let mut cursor = map.cursor();

        assert_eq!(Some("a"), map.advance(&mut cursor).map(|(k, _)| k));
        // the cursor captured "b", but "a" is still around, so the live
        // order wins
        map.delete("b");
        assert_eq!(Some("c"), map.advance(&mut cursor).map(|(k, _)| k));

        // current and captured next both gone: the walk ends early
        map.delete("c");
        map.delete("d");
        assert_eq!(None, map.advance(&mut cursor));
        assert!(cursor.is_done());
    }

    #[test]
    fn test_cursor_sees_appended_entries() {
        let mut map = abc();
        let mut cursor = map.cursor();
        while map.advance(&mut cursor).map(|(k, _)| k) != Some("c") {}

        map.set("d", 4);
        assert_eq!(Some(("d", &4)), map.advance(&mut cursor));
        assert_eq!(None, map.advance(&mut cursor));
    }

    #[test]
    fn test_cursor_ignores_reused_slot() {
        let mut map = abc();
        let mut cursor = map.cursor();
        map.advance(&mut cursor);
        map.advance(&mut cursor);

        // "b" and its captured next "c" go away; "d" takes over one of their
        // slots but must not be mistaken for either
        map.delete("b");
        map.delete("c");
        map.set("d", 4);
        assert_eq!(None, map.advance(&mut cursor));
    }

    #[test]
    fn test_independent_walks() {
        let map = abc();
        let mut outer = map.cursor();
        let mut pairs = vec![];

        while let Some((a, _)) = map.advance(&mut outer) {
            for (b, _) in &map {
                pairs.push(format!("{a}{b}"));
            }
        }

        assert_eq!(9, pairs.len());
        assert_eq!("aa", pairs[0]);
        assert_eq!("cc", pairs[8]);
    }

    #[test]
    fn test_elements() {
        let map = abc();
        let mut walked = vec![];
        let mut element = map.first();
        while let Some(e) = element {
            walked.push((e.key(), *e.value()));
            element = e.next();
        }
        assert_eq!(vec![("a", 1), ("b", 2), ("c", 3)], walked);

        let last = map.last().unwrap();
        assert_eq!("c", last.key());
        assert_eq!(Some("b"), last.prev().map(|e| e.key()));
        assert!(map.first().unwrap().prev().is_none());

        let empty: OrderedMap<u32> = OrderedMap::new();
        assert!(empty.first().is_none());
    }

    #[test]
    fn test_retain_and_pop() {
        let mut map: OrderedMap<u32> = (0..10).map(|i| (i.to_string(), i)).collect();
        map.retain(|_, v| {
            *v *= 10;
            *v % 20 == 0
        });
        assert_eq!(vec!["0", "2", "4", "6", "8"], keys(&map));
        assert_eq!(Some(&40), map.get("4"));

        assert_eq!(Some(("0".to_owned(), 0)), map.pop_front());
        assert_eq!(Some(("2", &20)), map.front());
        assert_eq!(Some(("8", &80)), map.back());
        assert_eq!(4, map.len());
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut map = abc();
        let mut cursor = map.cursor();
        map.advance(&mut cursor);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(None, map.advance(&mut cursor));

        map.set("x", 1);
        map.set("a", 2);
        assert_eq!(vec!["x", "a"], keys(&map));
        assert_eq!(Some(&2), map.get("a"));
    }

    #[test]
    fn test_into_iter_and_eq() {
        let map = abc();
        let copy = map.clone();
        assert_eq!(map, copy);

        let mut reordered = OrderedMap::new();
        reordered.set("b", 2);
        reordered.set("a", 1);
        reordered.set("c", 3);
        assert_ne!(map, reordered);

        let owned: Vec<(String, u32)> = map.into_iter().collect();
        assert_eq!(
            vec![("a".to_owned(), 1), ("b".to_owned(), 2), ("c".to_owned(), 3)],
            owned
        );
        assert_eq!(r#"{"a": 1, "b": 2, "c": 3}"#, format!("{copy:?}"));
    }

    #[test]
    fn test_get_mut() {
        let mut map = abc();
        if let Some(v) = map.get_mut("b") {
            *v += 40;
        }
        assert_eq!(Some(("b", &42)), map.get_key_value("b"));
        assert_eq!(None, map.get_mut("q"));
    }
}
