// Représentation d'un routeur simulé : table des voisins, LSDB et table de routage

use std::collections::BTreeMap;
use log::trace;
use crate::dijkstra;
use crate::types::{Graph, LinkKey, LinkUpdate, Route};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Router {
    name: String,
    neighbors: BTreeMap<String, u32>,
    link_state_database: BTreeMap<LinkKey, u32>,
    routing_table: BTreeMap<String, Route>,
}

impl Router {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coûts des liens directs, triés par nom de voisin
    pub fn neighbors(&self) -> &BTreeMap<String, u32> {
        &self.neighbors
    }

    /// Vue du routeur sur l'ensemble des liens du réseau, triée par paire
    pub fn link_state_database(&self) -> &BTreeMap<LinkKey, u32> {
        &self.link_state_database
    }

    pub fn routing_table(&self) -> &BTreeMap<String, Route> {
        &self.routing_table
    }

    /// Ajoute, modifie ou supprime un lien direct. Supprimer un lien absent ne fait rien.
    pub fn update_neighbor(&mut self, neighbor: &str, update: LinkUpdate) {
        match update {
            LinkUpdate::Set(cost) => {
                self.neighbors.insert(neighbor.to_string(), cost);
            }
            LinkUpdate::Remove => {
                self.neighbors.remove(neighbor);
            }
        }
    }

    /// Met à jour la paire canonique `(min(a, b), max(a, b))` dans la LSDB
    pub fn update_link_state_database(&mut self, router_1: &str, router_2: &str, update: LinkUpdate) {
        let key = LinkKey::new(router_1, router_2);
        match update {
            LinkUpdate::Set(cost) => {
                self.link_state_database.insert(key, cost);
            }
            LinkUpdate::Remove => {
                self.link_state_database.remove(&key);
            }
        }
    }

    /// Remplace entièrement la LSDB (diffusion depuis un autre routeur)
    pub fn replace_link_state_database(&mut self, lsdb: BTreeMap<LinkKey, u32>) {
        self.link_state_database = lsdb;
    }

    /// Recalcule toute la table de routage à partir d'un instantané global
    pub fn compute_routing_table(&mut self, graph: &Graph) {
        let shortest = dijkstra::shortest_paths(&self.name, graph);
        self.routing_table = shortest.into_routing_table(&self.name);
        trace!("{}: {} routes computed", self.name, self.routing_table.len());
    }
}
