// Définitions des structures et enums partagées

use std::collections::BTreeMap;
use std::fmt;

/// Vue d'adjacence globale : routeur -> (voisin -> coût).
/// `BTreeMap` garantit un parcours dans l'ordre lexicographique des noms.
pub type Graph = BTreeMap<String, BTreeMap<String, u32>>;

/// Sentinelle du script signifiant "supprimer ce lien".
pub const REMOVE_LINK_COST: i64 = -1;

/// Clé d'un lien dans la LSDB, toujours rangée (plus petit nom, plus grand nom).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkKey(String, String);

impl LinkKey {
    pub fn new(router_1: &str, router_2: &str) -> Self {
        if router_1 < router_2 {
            LinkKey(router_1.to_string(), router_2.to_string())
        } else {
            LinkKey(router_2.to_string(), router_1.to_string())
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.0, self.1)
    }
}

/// Changement appliqué à un lien : nouveau coût ou suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkUpdate {
    Set(u32),
    Remove,
}

impl LinkUpdate {
    /// Convertit le coût brut du script. `-1` supprime le lien, les autres
    /// valeurs négatives ou trop grandes sont refusées.
    pub fn from_raw(cost: i64) -> Option<Self> {
        if cost == REMOVE_LINK_COST {
            Some(LinkUpdate::Remove)
        } else {
            u32::try_from(cost).ok().map(LinkUpdate::Set)
        }
    }
}

impl fmt::Display for LinkUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkUpdate::Set(cost) => write!(f, "{}", cost),
            LinkUpdate::Remove => write!(f, "{}", REMOVE_LINK_COST),
        }
    }
}

/// Entrée de la table de routage calculée
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub next_hop: String,
    pub cost: u64,
}
