// Lecture du script d'événements : types de lignes et analyseur

pub mod line_types;
pub mod line_parser;

pub use line_parser::parse_line;
pub use line_types::{LinkRecord, Mode, ScriptLine};
