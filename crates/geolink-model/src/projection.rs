//! Attribute transfer rules from a matched reference record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One attribute transfer: `source` on the reference record is written as
/// `target` on the linked record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRename {
    pub source: String,
    pub target: String,
}

/// Ordered list of attribute renames.
///
/// Output columns follow the order in which renames were given. Output keys
/// are unique; the same source may feed several outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeProjection {
    renames: Vec<AttributeRename>,
}

impl AttributeProjection {
    pub fn new<I, S, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut renames = Vec::new();
        let mut targets = BTreeSet::new();
        for (source, target) in pairs {
            let source: String = source.into();
            let target: String = target.into();
            let (source, target) = (source.trim().to_string(), target.trim().to_string());
            if source.is_empty() || target.is_empty() {
                return Err(ModelError::InvalidProjection(format!(
                    "empty attribute name in '{source}={target}'"
                )));
            }
            if !targets.insert(target.clone()) {
                return Err(ModelError::InvalidProjection(format!(
                    "output attribute '{target}' is mapped more than once"
                )));
            }
            renames.push(AttributeRename { source, target });
        }
        Ok(Self { renames })
    }

    /// Parses `SOURCE=TARGET` specifications as given on the command line.
    pub fn parse_pairs<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let mut pairs = Vec::with_capacity(specs.len());
        for spec in specs {
            let spec = spec.as_ref();
            let Some((source, target)) = spec.split_once('=') else {
                return Err(ModelError::InvalidProjection(format!(
                    "expected SOURCE=TARGET, got '{spec}'"
                )));
            };
            pairs.push((source.to_string(), target.to_string()));
        }
        Self::new(pairs)
    }

    pub fn renames(&self) -> &[AttributeRename] {
        &self.renames
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.renames.iter().map(|rename| rename.target.as_str())
    }
}
