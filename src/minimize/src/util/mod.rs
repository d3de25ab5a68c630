/* ************************************************************************ **
** This file is part of springnet, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of springnet is provided under this permissive     **
** license, and that the project as a whole is licensed under the GPL 3.0.  **
** ************************************************************************ */

/// General-use empty type, until `!` gets stabilized.
///
/// This doesn't come with the implicit conversions.
/// For now, you'll need to explicitly `match` on it.
#[derive(Debug, Copy, Clone, Hash, PartialOrd, Ord, PartialEq, Eq)]
pub(crate) enum Never { }

/// Remembers the probe with the lowest value among all those it is shown.
#[derive(Debug, Clone)]
pub(crate) struct MinCache<K, V> {
    best: Option<(K, f64, V)>,
}

impl<K: PartialEq, V> MinCache<K, V> {
    pub(crate) fn new() -> Self { MinCache { best: None } }

    /// Keep the pair if `value` is strictly lower than the best so far.
    pub(crate) fn put(&mut self, key: K, value: f64, data: V) {
        if let Some((_, best, _)) = &self.best {
            if !(value < *best) { return; }
        }
        self.best = Some((key, value, data));
    }

    /// Consumes self to look up the data for a key.
    pub(crate) fn get_consume(self, key: &K) -> Option<V> {
        self.best.and_then(|(k, _, v)| if &k == key { Some(v) } else { None })
    }
}


#[cfg(test)]
mod tests {
    use super::MinCache;

    #[test]
    fn min_cache() {
        let mut cache = MinCache::new();
        cache.put(0.5, 3.0, "a");
        cache.put(1.0, 1.0, "b");
        cache.put(2.0, 1.0, "c"); // ties keep the earlier probe
        cache.put(4.0, 7.0, "d");
        assert_eq!(cache.clone().get_consume(&1.0), Some("b"));
        assert_eq!(cache.get_consume(&2.0), None);
    }
}
