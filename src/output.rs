//! JSON output: the ordered list of rules written at the end of a run.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::{CollectConfig, ContributorsField};
use crate::error::{CollectError, Result};
use crate::rule::RuleRecord;

/// Field layout of each rule object in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub contributors_field: ContributorsField,
    /// `None` omits the documentation field entirely.
    pub doc_link_field: Option<String>,
}

impl OutputLayout {
    pub fn from_config(config: &CollectConfig) -> Self {
        Self {
            contributors_field: config.contributors_field,
            doc_link_field: config
                .include_doc_link
                .then(|| config.doc_link_field.clone()),
        }
    }
}

/// Every loaded rule, in processing order.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub layout: OutputLayout,
    pub rules: Vec<RuleRecord>,
}

impl OutputDocument {
    pub fn new(layout: OutputLayout) -> Self {
        Self {
            layout,
            rules: Vec::new(),
        }
    }

    pub fn push(&mut self, rule: RuleRecord) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Pretty-printed JSON with two-space indentation and unescaped UTF-8.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct RuleEntry<'a> {
    rule: &'a RuleRecord,
    layout: &'a OutputLayout,
}

impl Serialize for RuleEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let fields = if self.layout.doc_link_field.is_some() { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(fields))?;
        map.serialize_entry("name", &self.rule.name)?;
        map.serialize_entry("text", &self.rule.text)?;
        map.serialize_entry(
            self.layout.contributors_field.as_str(),
            &self.rule.contributors,
        )?;
        if let Some(field) = &self.layout.doc_link_field {
            map.serialize_entry(field, &self.rule.documentation_link)?;
        }
        map.end()
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rules.len()))?;
        for rule in &self.rules {
            seq.serialize_element(&RuleEntry {
                rule,
                layout: &self.layout,
            })?;
        }
        seq.end()
    }
}

/// Writes `document` to `path`, replacing any existing file.
pub fn write_document(path: &Path, document: &OutputDocument) -> Result<()> {
    let json = document.to_json()?;
    fs::write(path, json).map_err(|e| CollectError::io(path, e))?;
    info!(
        path = %path.display(),
        rules = document.len(),
        "Wrote rules document"
    );
    Ok(())
}
