//! This module contains the human-readable summary of which source locations
//! of the monitored program need double precision.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::graph::{Highlighting, Location};

/// The precision requirements of the monitored program, per source location.
///
/// Entries are kept ordered by location.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PrecisionReport {
    entries: BTreeMap<Location, Highlighting>,
}

impl PrecisionReport {
    /// Constructs a new report with no entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `highlighting` was observed at `location`, merging it with
    /// anything previously recorded there.
    pub fn record(&mut self, location: Location, highlighting: Highlighting) {
        *self.entries.entry(location).or_default() |= highlighting;
    }

    /// Gets the highlighting recorded at `location`, if any.
    #[must_use]
    pub fn get(&self, location: Location) -> Option<Highlighting> {
        self.entries.get(&location).copied()
    }

    /// Iterates over every recorded location in order.
    pub fn entries(&self) -> impl Iterator<Item = (Location, Highlighting)> + '_ {
        self.entries.iter().map(|(l, h)| (*l, *h))
    }

    /// Iterates over the locations where the result or the operator needs
    /// double precision.
    pub fn needing_attention(&self) -> impl Iterator<Item = (Location, Highlighting)> + '_ {
        self.entries().filter(|(_, h)| h.needs_attention())
    }

    /// Gets the number of recorded locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if no locations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One location of a serialized report.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct ReportEntry {
    location:     Location,
    highlighting: Highlighting,
}

/// Reports serialize as an ordered list of entries, as locations cannot be
/// used as map keys in most formats.
impl Serialize for PrecisionReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let entries: Vec<ReportEntry> = self
            .entries()
            .map(|(location, highlighting)| ReportEntry {
                location,
                highlighting,
            })
            .collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrecisionReport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<ReportEntry>::deserialize(deserializer)?;
        let mut report = Self::new();
        entries.into_iter().for_each(|e| report.record(e.location, e.highlighting));
        Ok(report)
    }
}

/// Renders one block per location that needs attention.
impl Display for PrecisionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (location, highlighting) in self.needing_attention() {
            writeln!(f, "\t {location}:")?;
            if highlighting.result {
                writeln!(f, "\t\t Result: double precision")?;
            }
            if highlighting.operator {
                writeln!(f, "\t\t Operator: double precision")?;
            }
        }

        Ok(())
    }
}
