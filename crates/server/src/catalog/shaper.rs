//! In-memory post-processing of fetched rows.

use serde_json::Value;

use crate::store::Row;

/// Length of the derived "top" lists.
pub const TOP_N: usize = 10;

/// Store column name to display key, for columns whose store names are
/// awkward in templates. Matched case-insensitively.
const DISPLAY_KEYS: [(&str, &str); 4] = [
    ("H-Bond_Donor_Count", "h_bond_donor_count"),
    ("H-Bond_Acceptor_Count", "h_bond_acceptor_count"),
    ("Linked_PubChem_Literature_Count", "literature_count"),
    ("Linked_PubChem_Patent_Count", "patent_count"),
];

/// Numeric reading of a cell: JSON numbers, or strings holding a number.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The first `n` rows by `field`, largest first.
///
/// Rows where `field` is missing, null or not numeric are dropped. The sort
/// is stable, so rows with equal values keep their input order.
pub fn top_n(rows: &[Row], field: &str, n: usize) -> Vec<Row> {
    let mut ranked: Vec<(f64, &Row)> = rows
        .iter()
        .filter_map(|row| row.get(field).and_then(numeric).map(|v| (v, row)))
        .collect();

    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.truncate(n);
    ranked.into_iter().map(|(_, row)| row.clone()).collect()
}

/// Display key for a store column; unmapped columns keep their name.
pub fn display_key(column: &str) -> &str {
    DISPLAY_KEYS
        .iter()
        .find(|(store, _)| store.eq_ignore_ascii_case(column))
        .map_or(column, |&(_, display)| display)
}

/// Rename a row's columns to their display keys, keeping column order.
pub fn renderable_columns(row: Row) -> Row {
    row.into_iter()
        .map(|(column, value)| (display_key(&column).to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(name: &str, literature: Value) -> Row {
        let mut row = Row::new();
        row.insert("Name".to_string(), json!(name));
        row.insert("Linked_PubChem_Literature_Count".to_string(), literature);
        row
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter()
            .filter_map(|r| r.get("Name").and_then(Value::as_str))
            .collect()
    }

    const FIELD: &str = "Linked_PubChem_Literature_Count";

    #[test]
    fn top_n_sorts_descending_and_drops_nulls() {
        let rows = vec![
            row("a", json!(5)),
            row("b", Value::Null),
            row("c", json!(90)),
            row("d", json!(12)),
        ];

        let top = top_n(&rows, FIELD, TOP_N);
        assert_eq!(names(&top), ["c", "d", "a"]);
    }

    #[test]
    fn top_n_is_stable_for_ties() {
        let rows = vec![
            row("first", json!(7)),
            row("high", json!(40)),
            row("second", json!(7)),
            row("third", json!(7)),
        ];

        let top = top_n(&rows, FIELD, TOP_N);
        assert_eq!(names(&top), ["high", "first", "second", "third"]);
    }

    #[test]
    fn top_n_truncates_to_n() {
        let rows: Vec<Row> = (0..25).map(|i| row(&format!("r{i}"), json!(i))).collect();

        let top = top_n(&rows, FIELD, TOP_N);
        assert_eq!(top.len(), TOP_N);
        assert_eq!(names(&top)[0], "r24");
        assert_eq!(names(&top)[9], "r15");
    }

    #[test]
    fn top_n_missing_field_yields_empty() {
        let rows = vec![row("a", json!(1))];
        assert!(top_n(&rows, "Linked_PubChem_Patent_Count", TOP_N).is_empty());
    }

    #[test]
    fn top_n_reads_numeric_strings_and_skips_text() {
        let rows = vec![
            row("text", json!("many")),
            row("string", json!("30")),
            row("float", json!(12.5)),
        ];

        let top = top_n(&rows, FIELD, TOP_N);
        assert_eq!(names(&top), ["string", "float"]);
    }

    #[test]
    fn top_n_keeps_zero_values() {
        let rows = vec![row("zero", json!(0)), row("null", Value::Null)];
        assert_eq!(names(&top_n(&rows, FIELD, TOP_N)), ["zero"]);
    }

    #[test]
    fn renderable_columns_renames_known_columns_in_place() {
        let mut input = Row::new();
        input.insert("Name".to_string(), json!("Diazepam"));
        input.insert("H-Bond_Donor_Count".to_string(), json!(0));
        input.insert("H-Bond_Acceptor_Count".to_string(), json!(2));
        input.insert("Linked_PubChem_Literature_count".to_string(), json!(100));
        input.insert("Linked_PubChem_Patent_Count".to_string(), json!(3));

        let output = renderable_columns(input);
        let keys: Vec<&str> = output.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "Name",
                "h_bond_donor_count",
                "h_bond_acceptor_count",
                "literature_count",
                "patent_count"
            ]
        );
        assert_eq!(output["literature_count"], json!(100));
    }

    #[test]
    fn display_key_passes_unmapped_columns_through() {
        assert_eq!(display_key("XLogP"), "XLogP");
        assert_eq!(display_key("drug_class"), "drug_class");
    }
}
