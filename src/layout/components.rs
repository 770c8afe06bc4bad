use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub index: usize,
    /// Node indices in discovery order.
    pub members: Vec<usize>,
}

impl Component {
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn ids<'a>(&self, adjacency: &'a AdjacencyIndex) -> Vec<&'a str> {
        self.members.iter().map(|&n| adjacency.id(n)).collect()
    }
}

/// Partitions the node set into connected components.
///
/// Seeds are taken in node order; the traversal uses an explicit stack so
/// long chains cannot overflow the call stack.
pub fn find_components(adjacency: &AdjacencyIndex) -> Vec<Component> {
    let mut visited = vec![false; adjacency.len()];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..adjacency.len() {
        if visited[seed] {
            continue;
        }
        let mut members = Vec::new();
        stack.push(seed);
        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            members.push(node);
            stack.extend(adjacency.neighbors(node).filter(|&n| !visited[n]));
        }
        components.push(Component {
            index: components.len(),
            members,
        });
    }
    components
}

/// Component index for every node index.
pub fn component_membership(components: &[Component], node_count: usize) -> Vec<usize> {
    let mut membership = vec![0; node_count];
    for component in components {
        for &node in &component.members {
            membership[node] = component.index;
        }
    }
    membership
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_ids(component: &Component, adjacency: &AdjacencyIndex) -> Vec<String> {
        let mut ids: Vec<String> = component
            .ids(adjacency)
            .into_iter()
            .map(str::to_string)
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn splits_connected_and_isolated_nodes() {
        let adjacency =
            AdjacencyIndex::build(["A", "B", "C", "D"], [("A", "B"), ("B", "C")]);
        let components = find_components(&adjacency);
        assert_eq!(components.len(), 2);
        assert_eq!(sorted_ids(&components[0], &adjacency), vec!["A", "B", "C"]);
        assert_eq!(sorted_ids(&components[1], &adjacency), vec!["D"]);
        assert!(components[1].is_singleton());
    }

    #[test]
    fn components_partition_the_node_set() {
        let ids: Vec<String> = (0..40).map(|i| format!("n{i}")).collect();
        let edges: Vec<(String, String)> = (0..40)
            .filter(|i| i % 3 != 0)
            .map(|i| (format!("n{i}"), format!("n{}", (i * 7) % 40)))
            .collect();
        let adjacency = AdjacencyIndex::build(
            ids.iter().map(String::as_str),
            edges.iter().map(|(a, b)| (a.as_str(), b.as_str())),
        );
        let components = find_components(&adjacency);

        let mut seen = vec![0usize; adjacency.len()];
        for component in &components {
            for &member in &component.members {
                seen[member] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let ids: Vec<String> = (0..20_000).map(|i| i.to_string()).collect();
        let adjacency = AdjacencyIndex::build(
            ids.iter().map(String::as_str),
            ids.windows(2).map(|pair| (pair[0].as_str(), pair[1].as_str())),
        );
        let components = find_components(&adjacency);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].members.len(), 20_000);
    }

    #[test]
    fn membership_maps_back_to_component_index() {
        let adjacency = AdjacencyIndex::build(["A", "B", "C"], [("A", "C")]);
        let components = find_components(&adjacency);
        let membership = component_membership(&components, adjacency.len());
        assert_eq!(membership, vec![0, 1, 0]);
    }
}
