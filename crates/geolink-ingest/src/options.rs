//! Column configuration for school record ingestion.

use serde::{Deserialize, Serialize};

/// Default attribute columns kept on every record.
pub const DEFAULT_ATTRIBUTE_COLUMNS: &[&str] = &[
    "ind_eib_lengua1",
    "ind_eib_lengua2",
    "ind_lenguaje_ece_prim",
    "ind_mate_ece_prim",
    "ind_lenguaje_ece_sec",
    "ind_mate_ece_sec",
    "eib",
];

/// Keep only rows whose `column` equals `value` (both trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationFilter {
    pub column: String,
    pub value: String,
}

impl Default for PopulationFilter {
    fn default() -> Self {
        Self {
            column: "D_NIV_MOD".to_string(),
            value: "Primaria".to_string(),
        }
    }
}

/// Options controlling how CSV rows become point sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Unique school identifier.
    pub id_column: String,
    pub x_column: String,
    pub y_column: String,
    /// A row participates when this column holds a number.
    pub participation_column: String,
    /// Attribute name under which the 1.0 / 0.0 participation flag is stored.
    pub flag_attribute: String,
    /// Numeric attribute columns carried on each record.
    pub attribute_columns: Vec<String>,
    /// Target population filter; `None` keeps every row.
    pub population: Option<PopulationFilter>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            id_column: "cod_mod_anexo".to_string(),
            x_column: "NLONG_IE".to_string(),
            y_column: "NLAT_IE".to_string(),
            participation_column: "ind_lenguaje_ece_prim".to_string(),
            flag_attribute: "ece".to_string(),
            attribute_columns: DEFAULT_ATTRIBUTE_COLUMNS
                .iter()
                .map(|column| (*column).to_string())
                .collect(),
            population: Some(PopulationFilter::default()),
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_population(mut self, population: Option<PopulationFilter>) -> Self {
        self.population = population;
        self
    }

    #[must_use]
    pub fn with_attribute_columns(mut self, columns: Vec<String>) -> Self {
        self.attribute_columns = columns;
        self
    }
}
