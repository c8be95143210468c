// Module d'implémentation de l'algorithme de Dijkstra pour OSPF
// Calcul des plus courts chemins et reconstruction du prochain saut

use std::collections::BTreeMap;
use crate::types::{Graph, Route};

/// Résultat d'un calcul depuis une source : distances finies et prédécesseurs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortestPaths {
    pub distances: BTreeMap<String, u64>,
    pub predecessors: BTreeMap<String, String>,
}

/// Dijkstra par sélection linéaire du minimum parmi les nœuds non visités.
///
/// Les nœuds sont parcourus dans l'ordre lexicographique et seul un candidat
/// strictement plus proche remplace le minimum courant : à distance égale, le
/// plus petit nom est choisi. La relaxation n'accepte qu'une distance
/// strictement inférieure, donc le premier prédécesseur trouvé est conservé.
/// Les nœuds inaccessibles n'apparaissent pas dans `distances`.
pub fn shortest_paths<'a>(source: &'a str, graph: &'a Graph) -> ShortestPaths {
    let mut unvisited: BTreeMap<&'a str, Option<u64>> =
        graph.keys().map(|router| (router.as_str(), None)).collect();
    unvisited.insert(source, Some(0));

    let mut result = ShortestPaths::default();

    while let Some((current, distance)) = closest_unvisited(&unvisited) {
        unvisited.remove(current);
        result.distances.insert(current.to_string(), distance);

        let Some(links) = graph.get(current) else {
            continue;
        };
        for (neighbor, cost) in links {
            // Voisin déjà visité ou absent de l'instantané
            let Some(known) = unvisited.get_mut(neighbor.as_str()) else {
                continue;
            };
            let candidate = distance + u64::from(*cost);
            if known.map_or(true, |best| candidate < best) {
                *known = Some(candidate);
                result.predecessors.insert(neighbor.clone(), current.to_string());
            }
        }
    }

    result
}

/// Nœud non visité de plus petite distance finie, `None` s'il n'en reste aucun
fn closest_unvisited<'a>(unvisited: &BTreeMap<&'a str, Option<u64>>) -> Option<(&'a str, u64)> {
    let mut best: Option<(&'a str, u64)> = None;
    for (router, distance) in unvisited {
        if let Some(distance) = *distance {
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((*router, distance));
            }
        }
    }
    best
}

impl ShortestPaths {
    /// Remonte la chaîne des prédécesseurs depuis `destination` jusqu'au voisin
    /// direct de `source`. S'arrête aussi quand la chaîne est interrompue.
    pub fn next_hop<'a>(&'a self, source: &str, destination: &'a str) -> &'a str {
        let mut hop = destination;
        let mut remaining = self.distances.len();
        while let Some(predecessor) = self.predecessors.get(hop) {
            if predecessor == source || remaining == 0 {
                break;
            }
            hop = predecessor;
            remaining -= 1;
        }
        hop
    }

    /// Table de routage : une entrée par destination accessible autre que la source
    pub fn into_routing_table(self, source: &str) -> BTreeMap<String, Route> {
        self.distances
            .iter()
            .filter(|(destination, _)| destination.as_str() != source)
            .map(|(destination, cost)| {
                let route = Route {
                    next_hop: self.next_hop(source, destination).to_string(),
                    cost: *cost,
                };
                (destination.clone(), route)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(links: &[(&str, &str, u32)], isolated: &[&str]) -> Graph {
        let mut graph = Graph::new();
        for (a, b, cost) in links {
            graph.entry(a.to_string()).or_default().insert(b.to_string(), *cost);
            graph.entry(b.to_string()).or_default().insert(a.to_string(), *cost);
        }
        for name in isolated {
            graph.entry(name.to_string()).or_default();
        }
        graph
    }

    #[test]
    fn test_chain_next_hop() {
        let g = graph(&[("A", "B", 1), ("B", "C", 1)], &[]);
        let table = shortest_paths("A", &g).into_routing_table("A");

        assert_eq!(table["B"], Route { next_hop: "B".into(), cost: 1 });
        assert_eq!(table["C"], Route { next_hop: "B".into(), cost: 2 });
        assert!(!table.contains_key("A"));
    }

    #[test]
    fn test_ring_tie_is_broken_by_name() {
        let g = graph(&[("A", "B", 1), ("B", "C", 1), ("C", "D", 1), ("D", "A", 1)], &[]);
        let table = shortest_paths("A", &g).into_routing_table("A");

        assert_eq!(table["C"], Route { next_hop: "B".into(), cost: 2 });
        assert_eq!(table["D"], Route { next_hop: "D".into(), cost: 1 });

        // Même résultat d'un calcul à l'autre
        let again = shortest_paths("A", &g).into_routing_table("A");
        assert_eq!(table, again);
    }

    #[test]
    fn test_cheaper_indirect_path_wins() {
        let g = graph(&[("A", "B", 10), ("A", "C", 1), ("C", "B", 2)], &[]);
        let table = shortest_paths("A", &g).into_routing_table("A");

        assert_eq!(table["B"], Route { next_hop: "C".into(), cost: 3 });
    }

    #[test]
    fn test_unreachable_destinations_are_excluded() {
        let g = graph(&[("A", "B", 1), ("X", "Y", 1)], &["Z"]);
        let paths = shortest_paths("A", &g);

        assert!(!paths.distances.contains_key("X"));
        assert!(!paths.distances.contains_key("Z"));

        let table = paths.into_routing_table("A");
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("B"));
    }

    #[test]
    fn test_zero_cost_links() {
        let g = graph(&[("A", "B", 0), ("B", "C", 0)], &[]);
        let table = shortest_paths("A", &g).into_routing_table("A");

        assert_eq!(table["C"], Route { next_hop: "B".into(), cost: 0 });
    }

    #[test]
    fn test_source_missing_from_graph() {
        let g = graph(&[("A", "B", 1)], &[]);
        let table = shortest_paths("Q", &g).into_routing_table("Q");

        assert!(table.is_empty());
    }

    #[test]
    fn test_neighbor_missing_from_graph_is_ignored() {
        let mut g = graph(&[], &["A"]);
        g.get_mut("A").unwrap().insert("GHOST".into(), 1);
        let table = shortest_paths("A", &g).into_routing_table("A");

        assert!(table.is_empty());
    }

    #[test]
    fn test_next_hop_walk_is_bounded_on_cyclic_predecessors() {
        let paths = ShortestPaths {
            distances: BTreeMap::from([("A".to_string(), 0), ("B".to_string(), 1), ("C".to_string(), 2)]),
            predecessors: BTreeMap::from([("B".to_string(), "C".to_string()), ("C".to_string(), "B".to_string())]),
        };

        // B et C se désignent mutuellement : la remontée s'arrête après 3 pas
        assert_eq!(paths.next_hop("A", "C"), "B");
        assert_eq!(paths.next_hop("A", "B"), "C");
    }

    #[test]
    fn test_large_costs_do_not_overflow() {
        let g = graph(&[("A", "B", u32::MAX), ("B", "C", u32::MAX)], &[]);
        let table = shortest_paths("A", &g).into_routing_table("A");

        assert_eq!(table["C"].cost, 2 * u64::from(u32::MAX));
    }
}
