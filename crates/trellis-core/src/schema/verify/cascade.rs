use super::*;
use crate::schema::app::RelationType;

use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// On the current DFS path
    InProgress,

    /// Fully explored; no cycle reachable from here
    Done,
}

/// Directed graph of `ON DELETE CASCADE` edges, from the referencing table
/// to the referenced table. Nodes are table names.
#[derive(Default)]
struct CascadeGraph {
    edges: IndexMap<String, Vec<String>>,
}

impl CascadeGraph {
    fn node(&mut self, name: &str) {
        self.edges.entry(name.to_string()).or_default();
    }

    /// Self edges are dropped: a table cascading into itself is a tree.
    fn edge(&mut self, from: &str, to: &str) {
        self.node(to);
        let edges = self.edges.entry(from.to_string()).or_default();
        if from != to && !edges.iter().any(|e| e == to) {
            edges.push(to.to_string());
        }
    }
}

impl Verify<'_> {
    /// Rejects schemas where deleting a row could cascade back to its own
    /// table through other tables.
    pub(super) fn verify_no_cascade_cycles(&self) -> Result<()> {
        let graph = self.cascade_graph();
        let mut visits = HashMap::new();
        let mut path = vec![];

        for node in graph.edges.keys() {
            if let Some(cycle) = visit(&graph, node, &mut visits, &mut path) {
                return Err(Error::cascade_cycle(
                    cycle.into_iter().map(str::to_string).collect(),
                ));
            }
        }

        Ok(())
    }

    fn cascade_graph(&self) -> CascadeGraph {
        let mut graph = CascadeGraph::default();

        for table in &self.schema.tables {
            graph.node(&table.name);

            for field in &table.fields {
                let Some(rel) = field.ty.as_relationship() else {
                    continue;
                };

                if rel.relation_type == RelationType::ManyToMany {
                    // The junction table cascades from both sides. Nothing
                    // references it, so it never closes a cycle.
                    let junction = rel
                        .junction_table
                        .clone()
                        .unwrap_or_else(|| format!("{}_{}", table.name, field.name));
                    graph.edge(&junction, &table.name);
                    graph.edge(&junction, &rel.related_table);
                } else if rel.on_delete.is_cascade() {
                    graph.edge(&table.name, &rel.related_table);
                }
            }

            for fk in &table.foreign_keys {
                if fk.on_delete.is_cascade() {
                    graph.edge(&table.name, &fk.related_table);
                }
            }
        }

        graph
    }
}

/// Depth-first search with an explicit path. Returns the cycle, first node
/// repeated at the end, when `node` reaches a node still on the path.
fn visit<'a>(
    graph: &'a CascadeGraph,
    node: &'a str,
    visits: &mut HashMap<&'a str, Visit>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<&'a str>> {
    match visits.get(node) {
        Some(Visit::Done) => return None,
        Some(Visit::InProgress) => {
            let start = path.iter().position(|n| *n == node)?;
            let mut cycle = path[start..].to_vec();
            cycle.push(node);
            return Some(cycle);
        }
        None => {}
    }

    visits.insert(node, Visit::InProgress);
    path.push(node);

    for next in graph.edges.get(node).into_iter().flatten() {
        if let Some(cycle) = visit(graph, next, visits, path) {
            return Some(cycle);
        }
    }

    path.pop();
    visits.insert(node, Visit::Done);
    None
}
