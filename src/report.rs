// Affichage des tables d'un routeur (voisins, LSDB, routage)

use std::io::Write;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::router::Router;

/// Format de sortie des rapports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `<name> Neighbour Table:` / `<name> LSDB:` / `<name> Routing Table:`
    #[default]
    Text,
    /// Un objet JSON par ligne
    Json,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct NeighborEntry<'a> {
    neighbor: &'a str,
    cost: u32,
}

#[derive(Debug, Serialize)]
struct LsdbEntry<'a> {
    router_a: &'a str,
    router_b: &'a str,
    cost: u32,
}

#[derive(Debug, Serialize)]
struct RouteEntry<'a> {
    destination: &'a str,
    next_hop: &'a str,
    cost: u64,
}

#[derive(Debug, Serialize)]
struct RouterReport<'a> {
    router: &'a str,
    neighbors: Vec<NeighborEntry<'a>>,
    lsdb: Vec<LsdbEntry<'a>>,
    routing_table: Vec<RouteEntry<'a>>,
}

impl<'a> RouterReport<'a> {
    fn new(name: &'a str, router: Option<&'a Router>) -> Self {
        let Some(router) = router else {
            return Self { router: name, neighbors: Vec::new(), lsdb: Vec::new(), routing_table: Vec::new() };
        };
        Self {
            router: name,
            neighbors: router
                .neighbors()
                .iter()
                .map(|(neighbor, cost)| NeighborEntry { neighbor, cost: *cost })
                .collect(),
            lsdb: router
                .link_state_database()
                .iter()
                .map(|(key, cost)| LsdbEntry { router_a: key.first(), router_b: key.second(), cost: *cost })
                .collect(),
            routing_table: router
                .routing_table()
                .iter()
                .map(|(destination, route)| RouteEntry {
                    destination,
                    next_hop: &route.next_hop,
                    cost: route.cost,
                })
                .collect(),
        }
    }
}

/// Écrit les trois tables de `name`. Un routeur inconnu (`None`) donne trois
/// en-têtes sans contenu.
pub fn write_report<W: Write>(out: &mut W, format: ReportFormat, name: &str, router: Option<&Router>) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(out, name, router),
        ReportFormat::Json => {
            let report = RouterReport::new(name, router);
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_text<W: Write>(out: &mut W, name: &str, router: Option<&Router>) -> Result<()> {
    writeln!(out, "{} Neighbour Table:", name)?;
    if let Some(router) = router {
        for (neighbor, cost) in router.neighbors() {
            writeln!(out, "{}|{}", neighbor, cost)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "{} LSDB:", name)?;
    if let Some(router) = router {
        for (key, cost) in router.link_state_database() {
            writeln!(out, "{}|{}", key, cost)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "{} Routing Table:", name)?;
    if let Some(router) = router {
        for (destination, route) in router.routing_table() {
            writeln!(out, "{}|{}|{}", destination, route.next_hop, route.cost)?;
        }
    }
    writeln!(out)?;
    Ok(())
}
