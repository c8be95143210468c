// Fonctions liées à la propagation de la LSDB entre routeurs

use std::collections::BTreeMap;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::router::Router;
use crate::types::LinkUpdate;

/// Politique de synchronisation des LSDB après un changement de lien
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// La LSDB du premier routeur du lien remplace celle de tous les routeurs.
    /// Une entrée connue seulement d'un tiers est perdue.
    #[default]
    Broadcast,
    /// Le lien modifié est appliqué à la LSDB de chaque routeur, sans rien écraser.
    Merge,
}

/// Lien qui vient d'être modifié, tel qu'écrit dans le script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkChange {
    pub origin: String,
    pub peer: String,
    pub update: LinkUpdate,
}

/// Diffuse `change` à tous les routeurs selon `policy`.
pub fn flood(routers: &mut BTreeMap<String, Router>, change: &LinkChange, policy: SyncPolicy) {
    match policy {
        SyncPolicy::Broadcast => {
            let Some(lsdb) = routers.get(&change.origin).map(|r| r.link_state_database().clone()) else {
                return;
            };
            debug!("Broadcasting LSDB of {} ({} links) to {} routers", change.origin, lsdb.len(), routers.len());
            for router in routers.values_mut() {
                router.replace_link_state_database(lsdb.clone());
            }
        }
        SyncPolicy::Merge => {
            debug!("Merging {}-{} {} into {} LSDBs", change.origin, change.peer, change.update, routers.len());
            for router in routers.values_mut() {
                router.update_link_state_database(&change.origin, &change.peer, change.update);
            }
        }
    }
}
