//! Typed views of compound rows used by the HTML pages.
//!
//! Fields deserialize from store column names and serialize under plain
//! lowercase keys, which is what the templates use.

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::shaper::numeric;
use crate::store::Row;

/// One compound as shown on the detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compound {
    #[serde(rename(deserialize = "Name"), default)]
    pub name: Option<String>,

    #[serde(rename(deserialize = "Compound_CID"))]
    pub compound_cid: i64,

    #[serde(rename(deserialize = "Molecular_Formula"), default)]
    pub molecular_formula: Option<String>,

    #[serde(
        rename(deserialize = "Molecular_Weight"),
        default,
        deserialize_with = "lenient_f64"
    )]
    pub molecular_weight: Option<f64>,

    #[serde(rename(deserialize = "XLogP"), default, deserialize_with = "lenient_f64")]
    pub xlogp: Option<f64>,

    #[serde(
        rename(deserialize = "Polar_Area"),
        default,
        deserialize_with = "lenient_f64"
    )]
    pub polar_area: Option<f64>,

    #[serde(rename(deserialize = "Mechanism_of_Action"), default)]
    pub mechanism_of_action: Option<String>,

    #[serde(rename(deserialize = "Main_Medical_Use"), default)]
    pub main_medical_use: Option<String>,

    #[serde(rename(deserialize = "IUPAC_Name"), default)]
    pub iupac_name: Option<String>,

    #[serde(rename(deserialize = "InChIKey"), default)]
    pub inchikey: Option<String>,

    #[serde(default)]
    pub drug_class: Option<String>,

    #[serde(
        rename(deserialize = "H-Bond_Donor_Count"),
        alias = "h_bond_donor_count",
        default,
        deserialize_with = "lenient_i64"
    )]
    pub h_bond_donor_count: Option<i64>,

    #[serde(
        rename(deserialize = "H-Bond_Acceptor_Count"),
        alias = "h_bond_acceptor_count",
        default,
        deserialize_with = "lenient_i64"
    )]
    pub h_bond_acceptor_count: Option<i64>,
}

/// Alternate name of a compound and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    #[serde(default)]
    pub synonym: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Number of compounds in one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCount {
    #[serde(default)]
    pub drug_class: Option<String>,
    pub count: i64,
}

impl Compound {
    /// The InChIKey, if it is present and not blank.
    pub fn synonym_key(&self) -> Option<&str> {
        self.inchikey
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Decode a fetched row into a typed model.
pub fn from_row<T: for<'de> Deserialize<'de>>(row: Row) -> serde_json::Result<T> {
    serde_json::from_value(serde_json::Value::Object(row))
}

/// Decode every fetched row into a typed model.
pub fn from_rows<T: for<'de> Deserialize<'de>>(rows: Vec<Row>) -> serde_json::Result<Vec<T>> {
    rows.into_iter().map(from_row).collect()
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(numeric(&value))
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
