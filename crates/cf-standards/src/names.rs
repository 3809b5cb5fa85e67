//! Canonical name table: standard name to canonical unit.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, StandardsError};

/// Standard names with their resolved canonical units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalNameTable {
    version: Option<String>,
    last_modified: Option<String>,
    entries: BTreeMap<String, String>,
}

impl CanonicalNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_entry(mut self, name: impl Into<String>, units: impl Into<String>) -> Self {
        self.insert(name, units);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, units: impl Into<String>) {
        self.entries.insert(name.into(), units.into());
    }

    /// Canonical unit string of `standard_name`.
    pub fn lookup(&self, standard_name: &str) -> Option<&str> {
        self.entries.get(standard_name).map(String::as_str)
    }

    pub fn contains(&self, standard_name: &str) -> bool {
        self.entries.contains_key(standard_name)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Read the table from a `standard_name.xml` file.
    pub fn from_xml_path(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        let table = Self::from_xml_str(&xml)?;
        debug!(
            path = %path.display(),
            entries = table.len(),
            version = table.version().unwrap_or("unknown"),
            "loaded standard name table"
        );
        Ok(table)
    }

    /// Parse the table document. Aliases are resolved once all entries are
    /// read, so an alias may precede its target or point at another alias.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut table = Self::new();
        let mut aliases: BTreeMap<String, String> = BTreeMap::new();
        let mut current_id = String::new();
        let mut field: Option<Field> = None;
        let mut text = String::new();

        loop {
            let event = reader.read_event().map_err(|source| StandardsError::Xml {
                position: reader.error_position(),
                source,
            })?;
            match event {
                Event::Start(start) => match start.name().as_ref() {
                    b"entry" | b"alias" => current_id = id_attribute(&start)?,
                    name => {
                        field = Field::from_tag(name);
                        text.clear();
                    }
                },
                Event::Empty(empty) => {
                    if empty.name().as_ref() == b"canonical_units" {
                        table.insert(current_id.clone(), String::new());
                    }
                }
                Event::Text(chunk) => {
                    if field.is_some() {
                        text.push_str(&String::from_utf8_lossy(&chunk));
                    }
                }
                Event::CData(chunk) => {
                    if field.is_some() {
                        text.push_str(&String::from_utf8_lossy(&chunk));
                    }
                }
                Event::End(end) => {
                    let Some(open) = field else {
                        continue;
                    };
                    if Field::from_tag(end.name().as_ref()) != Some(open) {
                        continue;
                    }
                    let value = normalize_whitespace(&text);
                    match open {
                        Field::CanonicalUnits => table.insert(current_id.clone(), value),
                        Field::EntryId => {
                            aliases.insert(current_id.clone(), value);
                        }
                        Field::Version => table.version = Some(value),
                        Field::LastModified => table.last_modified = Some(value),
                    }
                    field = None;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        table.resolve_aliases(&aliases)?;
        Ok(table)
    }

    fn resolve_aliases(&mut self, aliases: &BTreeMap<String, String>) -> Result<()> {
        for (alias, target) in aliases {
            let mut seen = BTreeSet::from([alias.as_str()]);
            let mut next = target.as_str();
            let units = loop {
                if let Some(units) = self.entries.get(next) {
                    break units.clone();
                }
                let Some(further) = aliases.get(next) else {
                    return Err(StandardsError::UnresolvedAlias {
                        alias: alias.clone(),
                        target: next.to_string(),
                    });
                };
                if !seen.insert(next) {
                    return Err(StandardsError::AliasCycle {
                        alias: alias.clone(),
                    });
                }
                next = further.as_str();
            };
            self.entries.insert(alias.clone(), units);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    CanonicalUnits,
    EntryId,
    Version,
    LastModified,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"canonical_units" => Some(Self::CanonicalUnits),
            b"entry_id" => Some(Self::EntryId),
            b"version_number" => Some(Self::Version),
            b"last_modified" => Some(Self::LastModified),
            _ => None,
        }
    }
}

fn id_attribute(start: &BytesStart<'_>) -> Result<String> {
    let attribute = start
        .try_get_attribute("id")
        .map_err(|e| StandardsError::invalid(e.to_string()))?;
    let value = attribute
        .map(|attr| normalize_whitespace(&String::from_utf8_lossy(&attr.value)))
        .unwrap_or_default();
    if value.is_empty() {
        return Err(StandardsError::invalid(format!(
            "<{}> without an id attribute",
            String::from_utf8_lossy(start.name().as_ref())
        )));
    }
    Ok(value)
}

/// Collapse runs of whitespace to single blanks and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
