//! Union-find over `0..n`, rebuilt from scratch every frame.
//!
//! Only merging is supported. Representatives are found with path
//! compression and sets are joined by rank.

/// Disjoint-set forest.
pub struct DisjointSet {
    parents: Vec<usize>,
    ranks: Vec<u8>,
}

impl DisjointSet {
    /// Create `size` singleton sets.
    pub fn new(size: usize) -> Self {
        Self {
            parents: (0..size).collect(),
            ranks: vec![0; size],
        }
    }

    /// Merge the sets containing `i` and `j`.
    ///
    /// Returns `true` if they were in different sets, `false` (and does
    /// nothing) otherwise. On equal ranks the root of `i` survives.
    pub fn merge_sets(&mut self, i: usize, j: usize) -> bool {
        let repr_i = self.find(i);
        let repr_j = self.find(j);
        if repr_i == repr_j {
            return false;
        }
        match self.ranks[repr_i].cmp(&self.ranks[repr_j]) {
            std::cmp::Ordering::Less => self.parents[repr_i] = repr_j,
            std::cmp::Ordering::Greater => self.parents[repr_j] = repr_i,
            std::cmp::Ordering::Equal => {
                self.parents[repr_j] = repr_i;
                self.ranks[repr_i] = self.ranks[repr_i].saturating_add(1);
            }
        }
        true
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parents[root] != root {
            root = self.parents[root];
        }
        // Point every node on the path straight at the root
        let mut cur = i;
        while self.parents[cur] != root {
            let next = self.parents[cur];
            self.parents[cur] = root;
            cur = next;
        }
        root
    }
}
