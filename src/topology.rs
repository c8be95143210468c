// Topologie simulée : ensemble des routeurs et vue d'adjacence globale

use std::collections::BTreeMap;
use log::{debug, info};
use crate::lsa::{self, LinkChange, SyncPolicy};
use crate::router::Router;
use crate::types::{Graph, LinkUpdate};

/// Tous les routeurs de la simulation, indexés par nom
#[derive(Debug, Clone, Default)]
pub struct Topology {
    routers: BTreeMap<String, Router>,
    sync_policy: SyncPolicy,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync_policy(sync_policy: SyncPolicy) -> Self {
        Self {
            routers: BTreeMap::new(),
            sync_policy,
        }
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        self.sync_policy
    }

    /// Crée le routeur s'il n'existe pas encore. Renvoie `true` s'il a été créé.
    pub fn add_router(&mut self, name: &str) -> bool {
        if self.routers.contains_key(name) {
            return false;
        }
        debug!("Router {} created", name);
        self.routers.insert(name.to_string(), Router::new(name));
        true
    }

    pub fn get(&self, name: &str) -> Option<&Router> {
        self.routers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routers.contains_key(name)
    }

    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.routers.values()
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Applique un lien des deux côtés (voisins puis LSDB) et synchronise les LSDB.
    /// `router_1` est le routeur dont la LSDB est diffusée.
    pub fn apply_link(&mut self, router_1: &str, router_2: &str, update: LinkUpdate) {
        self.add_router(router_1);
        self.add_router(router_2);

        for (local, remote) in [(router_1, router_2), (router_2, router_1)] {
            if let Some(router) = self.routers.get_mut(local) {
                router.update_neighbor(remote, update);
            }
        }
        for name in [router_1, router_2] {
            if let Some(router) = self.routers.get_mut(name) {
                router.update_link_state_database(router_1, router_2, update);
            }
        }

        match update {
            LinkUpdate::Set(cost) => info!("Link {}-{} set to {}", router_1, router_2, cost),
            LinkUpdate::Remove => info!("Link {}-{} removed", router_1, router_2),
        }

        self.synchronize_lsdb(&LinkChange {
            origin: router_1.to_string(),
            peer: router_2.to_string(),
            update,
        });
    }

    /// Propage la LSDB après un changement de lien, selon la politique configurée
    pub fn synchronize_lsdb(&mut self, change: &LinkChange) {
        lsa::flood(&mut self.routers, change, self.sync_policy);
    }

    /// Instantané de l'adjacence construit à partir des tables de voisins
    pub fn graph_snapshot(&self) -> Graph {
        self.routers
            .iter()
            .map(|(name, router)| (name.clone(), router.neighbors().clone()))
            .collect()
    }

    /// Recalcule la table de routage de chaque routeur sur le même instantané
    pub fn recompute_all(&mut self) {
        let graph = self.graph_snapshot();
        debug!("Recomputing routing tables for {} routers", self.routers.len());
        for router in self.routers.values_mut() {
            router.compute_routing_table(&graph);
        }
    }
}
