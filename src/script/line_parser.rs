use crate::error::{AppError, Result};
use crate::script::line_types::{LinkRecord, Mode, ScriptLine};
use crate::types::LinkUpdate;

/// Parses one line of the event script. `line_no` starts at 1 and is only
/// used for error messages. Blank lines yield `Ok(None)`.
pub fn parse_line(line_no: usize, raw: &str) -> Result<Option<ScriptLine>> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(mode) = Mode::from_keyword(line) {
        return Ok(Some(ScriptLine::Control(mode)));
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [name] => Ok(Some(ScriptLine::RouterName(name.to_string()))),
        [link, cost] => parse_link(line_no, link, cost, None).map(Some),
        [link, cost, report] => parse_link(line_no, link, cost, Some(*report)).map(Some),
        _ => Err(AppError::parse(line_no, format!("expected at most 3 fields, got {}", parts.len()))),
    }
}

fn parse_link(line_no: usize, link: &str, cost: &str, report: Option<&str>) -> Result<ScriptLine> {
    let (router_1, router_2) = match link.split('-').collect::<Vec<_>>().as_slice() {
        [a, b] if !a.is_empty() && !b.is_empty() => (a.to_string(), b.to_string()),
        _ => {
            return Err(AppError::parse(line_no, format!("invalid link '{}', expected <name>-<name>", link)));
        }
    };

    let raw_cost: i64 = cost
        .parse()
        .map_err(|e| AppError::parse(line_no, format!("invalid cost '{}': {}", cost, e)))?;
    let update = LinkUpdate::from_raw(raw_cost)
        .ok_or_else(|| AppError::parse(line_no, format!("cost {} out of range (-1 or 0..={})", raw_cost, u32::MAX)))?;

    let report: Option<Vec<String>> = report.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    });

    Ok(ScriptLine::Link(LinkRecord { router_1, router_2, update, report }))
}
