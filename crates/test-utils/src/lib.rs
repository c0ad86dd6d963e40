//! Chemdb test utilities.
//!
//! Fixture builders producing store rows shaped like the
//! `nervous_system_drugs` and `synonyms` tables.

use serde_json::{Map, Value, json};

/// A store row as returned by the gateway.
pub type Row = Map<String, Value>;

/// Create a test compound with default values.
pub fn test_compound(cid: i64, name: &str) -> TestCompound {
    TestCompound {
        cid,
        name: Some(name.to_string()),
        drug_class: Some("Analgesic".to_string()),
        molecular_formula: Some("C8H9NO2".to_string()),
        molecular_weight: json!(151.163),
        xlogp: json!(0.5),
        polar_area: json!(49.3),
        mechanism_of_action: Some("COX inhibitor".to_string()),
        main_medical_use: Some("Pain relief".to_string()),
        inchikey: Some(format!("TESTKEY-{cid}")),
        literature: Value::Null,
        patents: Value::Null,
    }
}

/// A test compound builder for creating table rows.
#[derive(Debug, Clone)]
pub struct TestCompound {
    pub cid: i64,
    pub name: Option<String>,
    pub drug_class: Option<String>,
    pub molecular_formula: Option<String>,
    pub molecular_weight: Value,
    pub xlogp: Value,
    pub polar_area: Value,
    pub mechanism_of_action: Option<String>,
    pub main_medical_use: Option<String>,
    pub inchikey: Option<String>,
    pub literature: Value,
    pub patents: Value,
}

impl TestCompound {
    /// Set the drug class.
    pub fn in_class(mut self, class: &str) -> Self {
        self.drug_class = Some(class.to_string());
        self
    }

    /// Clear the drug class.
    pub fn without_class(mut self) -> Self {
        self.drug_class = None;
        self
    }

    /// Set the mechanism of action.
    pub fn with_mechanism(mut self, mechanism: &str) -> Self {
        self.mechanism_of_action = Some(mechanism.to_string());
        self
    }

    /// Set the linked literature count.
    pub fn with_literature(mut self, count: i64) -> Self {
        self.literature = json!(count);
        self
    }

    /// Set the linked patent count.
    pub fn with_patents(mut self, count: i64) -> Self {
        self.patents = json!(count);
        self
    }

    /// Set the InChIKey; `None` stores NULL.
    pub fn with_inchikey(mut self, key: Option<&str>) -> Self {
        self.inchikey = key.map(str::to_string);
        self
    }

    /// Build the full table row using the store's column names.
    pub fn into_row(self) -> Row {
        let value = json!({
            "Compound_CID": self.cid,
            "Name": self.name,
            "drug_class": self.drug_class,
            "Molecular_Formula": self.molecular_formula,
            "Molecular_Weight": self.molecular_weight,
            "XLogP": self.xlogp,
            "Polar_Area": self.polar_area,
            "Rotatable_Bond_Count": 1,
            "Complexity": 139.0,
            "Total_Atom_Stereo_Count": 0,
            "Charge": 0,
            "H-Bond_Donor_Count": 2,
            "H-Bond_Acceptor_Count": 2,
            "Mechanism_of_Action": self.mechanism_of_action,
            "Main_Medical_Use": self.main_medical_use,
            "IUPAC_Name": format!("compound-{}", self.cid),
            "InChIKey": self.inchikey,
            "Linked_PubChem_Literature_Count": self.literature,
            "Linked_PubChem_Patent_Count": self.patents,
        });
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// A `synonyms` table row.
pub fn synonym_row(synonym: &str, source: Option<&str>) -> Row {
    let mut row = Map::new();
    row.insert("synonym".to_string(), json!(synonym));
    row.insert("source".to_string(), json!(source));
    row
}

/// A class count row as produced by the class summary query.
pub fn class_count_row(class: Option<&str>, count: i64) -> Row {
    let mut row = Map::new();
    row.insert("drug_class".to_string(), json!(class));
    row.insert("count".to_string(), json!(count));
    row
}
