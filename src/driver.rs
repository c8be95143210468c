// Machine à états qui rejoue le script d'événements sur la topologie

use std::io::{BufRead, Write};
use std::mem;
use log::{debug, info, warn};
use crate::error::Result;
use crate::read_config::SimulationConfig;
use crate::report::{write_report, ReportFormat};
use crate::script::{parse_line, LinkRecord, Mode, ScriptLine};
use crate::topology::Topology;

/// Compteurs d'une exécution complète
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub lines: usize,
    pub links_applied: usize,
    pub recomputes: usize,
    pub reports: usize,
}

/// Rejoue un script `LINKSTATE` / `UPDATE` / `END` et écrit les rapports dans `out`.
///
/// Les noms isolés lus en `LINKSTATE` ou `UPDATE` sont rapportés à l'entrée du
/// prochain `UPDATE`. Ceux lus en `END` sont rapportés au mot-clé suivant ou
/// en fin de flux.
pub struct Driver<W: Write> {
    topology: Topology,
    mode: Option<Mode>,
    pending_update: Vec<String>,
    pending_end: Vec<String>,
    out: W,
    format: ReportFormat,
    strict: bool,
    stats: SimulationStats,
}

impl<W: Write> Driver<W> {
    pub fn new(out: W, config: &SimulationConfig) -> Self {
        Self {
            topology: Topology::with_sync_policy(config.lsdb_sync),
            mode: None,
            pending_update: Vec::new(),
            pending_end: Vec::new(),
            out,
            format: config.output_format,
            strict: config.strict,
            stats: SimulationStats::default(),
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Lit tout le flux, ligne par ligne, puis termine la simulation
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<SimulationStats> {
        for line in input.lines() {
            self.process_line(&line?)?;
        }
        self.finish()
    }

    /// Traite une ligne brute du script
    pub fn process_line(&mut self, raw: &str) -> Result<()> {
        self.stats.lines += 1;
        let line_no = self.stats.lines;

        let parsed = match parse_line(line_no, raw) {
            Ok(parsed) => parsed,
            Err(e) if !self.strict => {
                warn!("Skipping line: {}", e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match parsed {
            None => Ok(()),
            Some(ScriptLine::Control(mode)) => self.enter_mode(mode),
            Some(ScriptLine::RouterName(name)) => {
                self.queue_name(line_no, name);
                Ok(())
            }
            Some(ScriptLine::Link(record)) => self.handle_link(line_no, record),
        }
    }

    /// Fin du flux : si le dernier mot-clé était `END`, on vide sa file
    pub fn finish(&mut self) -> Result<SimulationStats> {
        if self.mode == Some(Mode::End) {
            self.flush_end_batch()?;
        }
        self.out.flush()?;
        Ok(self.stats)
    }

    fn enter_mode(&mut self, mode: Mode) -> Result<()> {
        if self.mode == Some(Mode::End) {
            self.flush_end_batch()?;
        }
        info!("Entering {} mode", mode);
        self.mode = Some(mode);

        if mode == Mode::Update {
            // Tables calculées avec la topologie d'avant ce lot
            self.recompute();
            let names = mem::take(&mut self.pending_update);
            for name in &names {
                if self.topology.add_router(name) {
                    debug!("Router {} materialised on UPDATE", name);
                }
            }
            self.report(&names)?;
        }
        Ok(())
    }

    fn queue_name(&mut self, line_no: usize, name: String) {
        match self.mode {
            Some(Mode::LinkState) | Some(Mode::Update) => self.pending_update.push(name),
            Some(Mode::End) => self.pending_end.push(name),
            None => warn!("Line {}: router name '{}' before any control keyword, ignored", line_no, name),
        }
    }

    fn handle_link(&mut self, line_no: usize, record: LinkRecord) -> Result<()> {
        match self.mode {
            Some(Mode::LinkState) | Some(Mode::Update) => {}
            Some(Mode::End) | None => {
                warn!(
                    "Line {}: link {}-{} outside LINKSTATE/UPDATE, ignored",
                    line_no, record.router_1, record.router_2
                );
                return Ok(());
            }
        }

        self.topology.apply_link(&record.router_1, &record.router_2, record.update);
        self.stats.links_applied += 1;

        if let Some(names) = record.report {
            self.recompute();
            self.report(&names)?;
        }
        Ok(())
    }

    fn flush_end_batch(&mut self) -> Result<()> {
        self.recompute();
        let names = mem::take(&mut self.pending_end);
        self.report(&names)
    }

    fn recompute(&mut self) {
        self.topology.recompute_all();
        self.stats.recomputes += 1;
    }

    fn report(&mut self, names: &[String]) -> Result<()> {
        for name in names {
            write_report(&mut self.out, self.format, name, self.topology.get(name))?;
            self.stats.reports += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver<Vec<u8>> {
        Driver::new(Vec::new(), &SimulationConfig::default())
    }

    fn feed(driver: &mut Driver<Vec<u8>>, lines: &[&str]) {
        for line in lines {
            driver.process_line(line).unwrap();
        }
    }

    #[test]
    fn test_names_are_queued_per_mode() {
        let mut d = driver();
        feed(&mut d, &["LINKSTATE", "A-B 1", "A", "END", "B"]);

        assert_eq!(d.pending_update, vec!["A".to_string()]);
        assert_eq!(d.pending_end, vec!["B".to_string()]);
        assert_eq!(d.mode(), Some(Mode::End));
        assert!(d.out.is_empty());
    }

    #[test]
    fn test_update_materialises_queued_routers() {
        let mut d = driver();
        feed(&mut d, &["LINKSTATE", "A-B 1", "NEW", "UPDATE"]);

        assert!(d.topology().contains("NEW"));
        assert!(d.pending_update.is_empty());
        let text = String::from_utf8(d.out.clone()).unwrap();
        assert_eq!(text, "NEW Neighbour Table:\n\nNEW LSDB:\n\nNEW Routing Table:\n\n");
    }

    #[test]
    fn test_link_in_end_mode_is_ignored() {
        let mut d = driver();
        feed(&mut d, &["LINKSTATE", "END", "A-B 1"]);

        assert!(d.topology().is_empty());
        assert_eq!(d.stats().links_applied, 0);
    }

    #[test]
    fn test_lines_before_keyword_are_ignored() {
        let mut d = driver();
        feed(&mut d, &["A", "A-B 3"]);

        assert!(d.topology().is_empty());
        assert!(d.pending_update.is_empty());
        assert_eq!(d.mode(), None);
    }

    #[test]
    fn test_mid_batch_report_recomputes() {
        let mut d = driver();
        feed(&mut d, &["LINKSTATE", "A-B 2", "B-C 3 A"]);

        let route = d.topology().get("A").unwrap().routing_table().get("C").cloned().unwrap();
        assert_eq!(route.next_hop, "B");
        assert_eq!(route.cost, 5);
        assert_eq!(d.stats().recomputes, 1);
        assert_eq!(d.stats().reports, 1);
    }

    #[test]
    fn test_strict_mode_fails_fast() {
        let mut d = driver();
        d.process_line("LINKSTATE").unwrap();
        assert!(d.process_line("A-B oops").is_err());
    }

    #[test]
    fn test_lenient_mode_skips_bad_lines() {
        let config = SimulationConfig { strict: false, ..SimulationConfig::default() };
        let mut d = Driver::new(Vec::new(), &config);
        feed(&mut d, &["LINKSTATE", "A-B oops", "A-B 4"]);

        assert_eq!(d.stats().links_applied, 1);
        assert_eq!(d.stats().lines, 3);
        assert_eq!(d.topology().get("B").unwrap().neighbors().get("A"), Some(&4));
    }

    #[test]
    fn test_finish_flushes_end_batch_once() {
        let mut d = driver();
        feed(&mut d, &["LINKSTATE", "A-B 5", "END", "A"]);
        let stats = d.finish().unwrap();

        assert_eq!(stats.reports, 1);
        assert_eq!(stats.recomputes, 1);
        assert!(d.pending_end.is_empty());
    }

    #[test]
    fn test_removal_through_driver() {
        let mut d = driver();
        feed(&mut d, &["LINKSTATE", "A-B 5", "A-B -1"]);

        let a = d.topology().get("A").unwrap();
        assert!(a.neighbors().is_empty());
        assert!(a.link_state_database().is_empty());
    }
}
