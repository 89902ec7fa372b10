//! A string-keyed map that remembers the order in which its keys were first
//! inserted.
//!
//! [`OrderedMap`] is an unholy union of a hash table and a linked list: the
//! table finds entries, the list remembers their order. Set, get, delete and
//! len are all O(1).
//!
//! To walk the map while deleting from it, use a [`Cursor`] rather than
//! [`OrderedMap::iter`], which borrows the map for as long as it lives:
//!
//! ```
//! use orderedmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.set("keep", 1);
//! map.set("drop", 2);
//! map.set("also keep", 3);
//!
//! let mut cursor = map.cursor();
//! while let Some((key, value)) = map.advance(&mut cursor) {
//!     if *value % 2 == 0 {
//!         let key = key.to_owned();
//!         map.delete(&key);
//!     }
//! }
//!
//! assert_eq!(vec!["keep", "also keep"], map.keys().collect::<Vec<_>>());
//! ```
//!
//! The map does no locking of its own. [`SharedOrderedMap`] (feature
//! `shared_map`) puts one behind a lock for sharing between threads, and
//! [`SharedOrderedMap::stream`] (feature `stream`) walks a shared map from an
//! async task.

mod linked_list;
pub mod ordered_map;
#[cfg(feature = "shared_map")]
mod shared_map;
#[cfg(feature = "stream")]
pub mod stream;

#[cfg(test)]
mod test_map;

pub use ordered_map::{Cursor, Element, OrderedMap};
#[cfg(feature = "shared_map")]
pub use shared_map::SharedOrderedMap;
#[cfg(feature = "stream")]
pub use stream::{EntryStream, StreamCanceller};
