//! Free-text severity classification for study observations.
//!
//! Severity is never stored on an [`Observation`]; it is derived from the
//! note every time it is displayed so the text stays the source of truth.

use super::Observation;

const UNREMARKABLE_KEYWORDS: &[&str] = &[
    "normal",
    "sin hallazgos",
    "conservada",
    "conservados",
    "conservadas",
    "normales",
    "íntegro",
];

const CHANGE_KEYWORDS: &[&str] = &["leve", "moderado", "aumento", "disminución", "ligero"];

const SEVERE_KEYWORDS: &[&str] = &["grave", "sever", "marcado", "significativo", "emergencia"];

const CHIP_MIN_CHARS: usize = 4;
const CHIP_MAX_CHARS: usize = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }
}

/// Keyword groups are checked in order (unremarkable, change, severe) and
/// the first group with a hit decides. Text matching no group is treated
/// as needing attention.
pub fn classify_observation(note: &str) -> Severity {
    let lowered = note.to_lowercase();
    let mentions_any = |keywords: &[&str]| keywords.iter().any(|kw| lowered.contains(kw));

    if mentions_any(UNREMARKABLE_KEYWORDS) {
        Severity::Normal
    } else if mentions_any(CHANGE_KEYWORDS) {
        Severity::Warning
    } else if mentions_any(SEVERE_KEYWORDS) {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeveritySummary {
    pub total: usize,
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl SeveritySummary {
    pub fn from_observations(observations: &[Observation]) -> Self {
        observations
            .iter()
            .fold(Self::default(), |mut summary, observation| {
                summary.total += 1;
                match classify_observation(&observation.note) {
                    Severity::Normal => summary.normal += 1,
                    Severity::Warning => summary.warning += 1,
                    Severity::Critical => summary.critical += 1,
                }
                summary
            })
    }
}

/// Observations grouped under their organ. Groups keep the order in which
/// each organ first appears.
pub fn group_by_organ(observations: &[Observation]) -> Vec<(&str, Vec<&Observation>)> {
    let mut groups: Vec<(&str, Vec<&Observation>)> = Vec::new();
    for observation in observations {
        let organ = observation.organ.as_str();
        match groups.iter_mut().find(|(name, _)| *name == organ) {
            Some((_, items)) => items.push(observation),
            None => groups.push((organ, vec![observation])),
        }
    }
    groups
}

/// Short phrases pulled out of a note for display next to it.
pub fn keyword_chips(note: &str) -> Vec<&str> {
    note.split(['.', ',', ';'])
        .map(str::trim)
        .filter(|phrase| {
            let len = phrase.chars().count();
            (CHIP_MIN_CHARS..=CHIP_MAX_CHARS).contains(&len)
        })
        .collect()
}

#[cfg(test)]
#[path = "severity_test.rs"]
mod tests;
