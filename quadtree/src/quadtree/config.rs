/// Tuning knobs for the quadtree. These only affect performance, never which
/// values a query can return.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Node slots reserved up front in the arena.
    pub pool_size: usize,
    /// A childless node holding more values than this splits.
    pub node_capacity: usize,
    /// Nodes at this level never split, they just accumulate values.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            // Room for the root plus four full levels of splits.
            pool_size: 64,
            node_capacity: 8,
            max_depth: 10,
        }
    }
}
