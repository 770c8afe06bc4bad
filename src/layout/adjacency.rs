use super::*;

/// Symmetric neighbor map over node indices.
///
/// Node ids are interned in first-seen order; neighbor sets are ordered so
/// every traversal over the index is reproducible.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    ids: Vec<String>,
    lookup: HashMap<String, usize>,
    neighbors: Vec<BTreeSet<usize>>,
}

impl AdjacencyIndex {
    pub fn build<'a, N, E>(node_ids: N, edges: E) -> Self
    where
        N: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut index = Self::default();
        for id in node_ids {
            if index.lookup.contains_key(id) {
                continue;
            }
            index.lookup.insert(id.to_string(), index.ids.len());
            index.ids.push(id.to_string());
            index.neighbors.push(BTreeSet::new());
        }

        for (source, target) in edges {
            let (Some(&from), Some(&to)) = (index.lookup.get(source), index.lookup.get(target))
            else {
                warn!(
                    "ignoring edge {} -> {}: endpoint missing from node set",
                    source, target
                );
                continue;
            };
            if from == to {
                continue;
            }
            index.neighbors[from].insert(to);
            index.neighbors[to].insert(from);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn degree(&self, index: usize) -> usize {
        self.neighbors[index].len()
    }

    pub fn degree_of(&self, id: &str) -> Option<usize> {
        self.index_of(id).map(|index| self.degree(index))
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[index].iter().copied()
    }

    pub fn neighbor_ids(&self, id: &str) -> Option<Vec<&str>> {
        let index = self.index_of(id)?;
        Some(self.neighbors(index).map(|n| self.id(n)).collect())
    }
}
