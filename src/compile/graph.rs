//! Cycle detection over the resource dependency graph.
//!
//! Depth-first traversal with a recursion stack: a back edge to a node
//! already on the stack reports the cycle as the stack slice from the first
//! occurrence of that node to the back edge. Every component is visited
//! exactly once, so all independent cycles are reported, not just the first
//! one found.

use crate::model::Resource;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Find every independent dependency cycle among `resources`.
///
/// Dependencies naming unknown identifiers are ignored here; the reference
/// checks report those separately.
pub fn find_cycles(resources: &[Resource]) -> Vec<Vec<String>> {
    // First occurrence wins: a duplicate identifier (itself a violation
    // reported elsewhere) must not redirect edges away from a cycle
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(resources.len());
    for (i, r) in resources.iter().enumerate() {
        index.entry(r.identifier.as_str()).or_insert(i);
    }

    let adjacency: Vec<Vec<usize>> = resources
        .iter()
        .map(|r| {
            r.dependencies
                .iter()
                .filter_map(|dep| index.get(dep.as_str()).copied())
                .collect()
        })
        .collect();

    let mut color = vec![Color::White; resources.len()];
    let mut stack = Vec::new();
    let mut cycles = Vec::new();

    for start in 0..resources.len() {
        if color[start] == Color::White {
            visit(start, resources, &adjacency, &mut color, &mut stack, &mut cycles);
        }
    }
    cycles
}

fn visit(
    node: usize,
    resources: &[Resource],
    adjacency: &[Vec<usize>],
    color: &mut [Color],
    stack: &mut Vec<usize>,
    cycles: &mut Vec<Vec<String>>,
) {
    color[node] = Color::Gray;
    stack.push(node);

    for &next in &adjacency[node] {
        match color[next] {
            Color::White => visit(next, resources, adjacency, color, stack, cycles),
            Color::Gray => {
                // Back edge: the cycle is the stack slice starting at `next`
                if let Some(pos) = stack.iter().position(|&n| n == next) {
                    cycles.push(
                        stack[pos..]
                            .iter()
                            .map(|&i| resources[i].identifier.clone())
                            .collect(),
                    );
                }
            },
            Color::Black => {},
        }
    }

    stack.pop();
    color[node] = Color::Black;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: &str, deps: &[&str]) -> Resource {
        let mut r = Resource::new(id, "webcontent", format!("{id}.html"));
        for dep in deps {
            r = r.with_dependency(*dep);
        }
        r
    }

    #[test]
    fn test_acyclic_graph_reports_nothing() {
        let resources = vec![
            resource("a", &["b", "c"]),
            resource("b", &["c"]),
            resource("c", &[]),
        ];
        assert!(find_cycles(&resources).is_empty());
    }

    #[test]
    fn test_two_node_cycle() {
        let resources = vec![resource("a", &["b"]), resource("b", &["a"])];
        let cycles = find_cycles(&resources);
        assert_eq!(cycles.len(), 1);
        let mut members = cycles[0].clone();
        members.sort();
        assert_eq!(members, vec!["a", "b"]);
    }

    #[test]
    fn test_self_loop() {
        let resources = vec![resource("a", &["a"])];
        let cycles = find_cycles(&resources);
        assert_eq!(cycles, vec![vec!["a".to_string()]]);
    }

    #[test]
    fn test_independent_cycles_all_reported() {
        let resources = vec![
            resource("a", &["b"]),
            resource("b", &["a"]),
            resource("c", &["d"]),
            resource("d", &["c"]),
            resource("e", &[]),
        ];
        let cycles = find_cycles(&resources);
        assert_eq!(cycles.len(), 2);
    }

    #[test]
    fn test_duplicate_identifier_does_not_mask_cycle() {
        let resources = vec![
            resource("a", &["b"]),
            resource("b", &["a"]),
            resource("b", &[]),
        ];
        let cycles = find_cycles(&resources);
        assert_eq!(cycles.len(), 1);
        let mut members = cycles[0].clone();
        members.sort();
        assert_eq!(members, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_dependency_ignored() {
        let resources = vec![resource("a", &["ghost"])];
        assert!(find_cycles(&resources).is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let resources = vec![
            resource("a", &["b", "c"]),
            resource("b", &["d"]),
            resource("c", &["d"]),
            resource("d", &[]),
        ];
        assert!(find_cycles(&resources).is_empty());
    }
}
