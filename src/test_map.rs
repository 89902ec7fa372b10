//! Randomized checks of OrderedMap against IndexMap, which keeps insertion
//! order as long as removals go through `shift_remove`.

use crate::{Cursor, OrderedMap};
use indexmap::IndexMap;
use rand::prelude::*;
use std::fmt::Debug;

struct CheckedMap<V> {
    dut: OrderedMap<V>,
    ref_map: IndexMap<String, V>,
}

impl<V: Eq + Clone + Debug> CheckedMap<V> {
    fn new() -> Self {
        CheckedMap {
            dut: OrderedMap::new(),
            ref_map: IndexMap::new(),
        }
    }

    fn set(&mut self, key: &str, value: V) -> Option<V> {
        let ref_result = self.ref_map.insert(key.to_owned(), value.clone());
        let dut_result = self.dut.set(key, value);
        assert_eq!(ref_result, dut_result);
        ref_result
    }

    fn get(&self, key: &str) -> Option<&V> {
        let ref_result = self.ref_map.get(key);
        let dut_result = self.dut.get(key);
        assert_eq!(ref_result, dut_result);
        ref_result
    }

    fn delete(&mut self, key: &str) -> Option<V> {
        let ref_result = self.ref_map.shift_remove(key);
        let dut_result = self.dut.delete(key);
        assert_eq!(ref_result, dut_result);
        ref_result
    }

    fn pop_front(&mut self) {
        let ref_result = self.ref_map.shift_remove_index(0);
        let dut_result = self.dut.pop_front();
        assert_eq!(ref_result, dut_result);
    }

    fn retain(&mut self, f: impl Fn(&str, &V) -> bool) {
        let mut ref_iter = self.ref_map.iter();
        self.dut.retain(|k, v| {
            // make sure that retain visits in the correct order
            assert_eq!(ref_iter.next().map(|(k, v)| (k.as_str(), v)), Some((k, &*v)));
            f(k, &*v)
        });
        assert_eq!(ref_iter.next(), None);
        self.ref_map.retain(|k, v| f(k.as_str(), &*v));
        self.check();
    }

    fn check(&self) {
        self.dut.continuity_test();
        assert_eq!(self.ref_map.len(), self.dut.len());
        assert!(Iterator::eq(
            self.ref_map.iter().map(|(k, v)| (k.as_str(), v)),
            self.dut.iter()
        ));
        assert!(Iterator::eq(
            self.ref_map.iter().rev().map(|(k, v)| (k.as_str(), v)),
            self.dut.iter().rev()
        ));
    }

    /// Walks with a cursor, deleting a random subset of entries on the way,
    /// sometimes the current one and sometimes the one after it.
    fn delete_while_walking(&mut self, rng: &mut impl Rng) {
        let mut expected: Vec<String> = self.ref_map.keys().cloned().collect();
        let mut cursor = Cursor::new();

        while let Some((key, _)) = self.dut.advance(&mut cursor) {
            let key = key.to_owned();
            assert_eq!(Some(&key), expected.first());
            expected.remove(0);

            match rng.gen_range(0..4) {
                0 => {
                    self.delete(&key);
                }
                1 => {
                    if let Some(next) = expected.first().cloned() {
                        self.delete(&next);
                        expected.remove(0);
                    }
                }
                _ => (),
            }
        }

        assert!(expected.is_empty());
        assert!(cursor.is_done());
        self.check();
    }
}

#[test]
fn random_ops_match_indexmap() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = rand_pcg::Pcg64::seed_from_u64(0x0dde_12ed);

    for size in [4, 16, 64] {
        let mut map = CheckedMap::new();

        for _ in 0..2000 {
            let key = rng.gen_range(0..size).to_string();
            match rng.gen_range(0..100) {
                0..=44 => {
                    let value: u32 = rng.gen();
                    map.set(&key, value);
                }
                45..=69 => {
                    map.get(&key);
                }
                70..=94 => {
                    map.delete(&key);
                }
                95..=96 => map.pop_front(),
                97 => {
                    let parity = rng.gen_range(0..2);
                    map.retain(|_, v| v % 2 == parity);
                }
                98 => map.delete_while_walking(&mut rng),
                _ => map.check(),
            }
        }
        map.check();

        map.dut.clear();
        map.ref_map.clear();
        map.check();
    }
}

#[test]
fn len_tracks_distinct_keys() {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(7);
    let mut map = CheckedMap::new();

    for _ in 0..500 {
        let key = rng.gen_range(0..32).to_string();
        if rng.gen_bool(0.6) {
            map.set(&key, ());
        } else {
            map.delete(&key);
        }
        assert_eq!(map.ref_map.len(), map.dut.len());
    }
    map.check();
}
