// This file defines the line types of the event script.

use std::fmt;
use crate::types::LinkUpdate;

/// Mode selected by the last control keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    LinkState,
    Update,
    End,
}

impl Mode {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "LINKSTATE" => Some(Mode::LinkState),
            "UPDATE" => Some(Mode::Update),
            "END" => Some(Mode::End),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Mode::LinkState => "LINKSTATE",
            Mode::Update => "UPDATE",
            Mode::End => "END",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `A-B cost [,report-list]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub router_1: String,
    pub router_2: String,
    pub update: LinkUpdate,
    /// Routers to print right after this change; `Some` whenever the third
    /// field is present, even if it names nobody. A leading comma (`,A,B`)
    /// is accepted and empty names are ignored.
    pub report: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine {
    Control(Mode),
    RouterName(String),
    Link(LinkRecord),
}
