//! Statement construction for the compound catalog using SeaQuery.
//!
//! Every builder returns a [`Statement`]: a MySQL template with `?`
//! placeholders and the bound values in placeholder order. Caller-supplied
//! text only ever reaches the store as a bound value.

use sea_query::{Alias, Asterisk, Cond, Expr, ExprTrait, Order, Query};

use super::schema::{
    DESCRIPTOR_COLUMNS, DETAIL_COLUMNS, Drugs, LISTING_COLUMNS, SEARCH_COLUMNS, Synonyms,
};
use crate::store::Statement;

/// Hard ceiling on rows returned by the listing query.
pub const LISTING_ROW_CAP: u64 = 200;

/// Page size used by the JSON list when `limit` is absent or malformed.
pub const DEFAULT_API_LIMIT: i64 = 100;

/// Offset used by the JSON list when `offset` is absent or malformed.
pub const DEFAULT_API_OFFSET: i64 = 0;

/// Treat `None` and whitespace-only input alike as "no filter".
fn non_blank(input: Option<&str>) -> Option<&str> {
    input.filter(|s| !s.trim().is_empty())
}

/// Clamp a caller-supplied count to zero or more.
pub fn clamp_non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Build the filtered listing query used by `/drugs`.
///
/// - `class_filter` (if non-blank) requires `drug_class` to equal it exactly.
/// - `search_term` (if non-blank) is trimmed, wrapped as `%term%` and bound
///   once per search column; the column matches are OR-ed together.
/// - Both groups are AND-ed. Rows are ordered by class then name and capped
///   at [`LISTING_ROW_CAP`].
pub fn build_listing_query(class_filter: Option<&str>, search_term: Option<&str>) -> Statement {
    let mut select = Query::select();
    select.columns(LISTING_COLUMNS).from(Drugs::Table);

    let class_predicate =
        non_blank(class_filter).map(|class| Expr::col(Drugs::DrugClass).eq(class));
    let search_predicate = non_blank(search_term).map(|term| {
        let pattern = format!("%{}%", term.trim());
        SEARCH_COLUMNS.iter().fold(Cond::any(), |any, column| {
            any.add(Expr::col(*column).like(pattern.as_str()))
        })
    });

    if class_predicate.is_some() || search_predicate.is_some() {
        select.cond_where(
            Cond::all()
                .add_option(class_predicate)
                .add_option(search_predicate),
        );
    }

    select
        .order_by(Drugs::DrugClass, Order::Asc)
        .order_by(Drugs::Name, Order::Asc)
        .limit(LISTING_ROW_CAP);

    Statement::from_select(&select)
}

/// Build the paginated query used by `/api/drugs`.
///
/// Negative `limit`/`offset` are clamped to zero. There is no upper bound
/// on `limit`. Bound values are `(class?, limit, offset)`.
pub fn build_api_query(class_filter: Option<&str>, limit: i64, offset: i64) -> Statement {
    let mut select = Query::select();
    select.column(Asterisk).from(Drugs::Table);

    if let Some(class) = non_blank(class_filter) {
        select.and_where(Expr::col(Drugs::DrugClass).eq(class));
    }

    select
        .order_by(Drugs::CompoundCid, Order::Asc)
        .limit(clamp_non_negative(limit))
        .offset(clamp_non_negative(offset));

    Statement::from_select(&select)
}

/// Compound count per class, ordered by class.
pub fn class_counts() -> Statement {
    let mut select = Query::select();
    select
        .column(Drugs::DrugClass)
        .expr_as(Expr::col(Asterisk).count(), Alias::new("count"))
        .from(Drugs::Table)
        .group_by_col(Drugs::DrugClass)
        .order_by(Drugs::DrugClass, Order::Asc);

    Statement::from_select(&select)
}

/// The `n` compounds with the largest non-null `column`.
pub fn top_by(column: Drugs, n: u64) -> Statement {
    let mut select = Query::select();
    select
        .columns([Drugs::Name, Drugs::CompoundCid, column])
        .from(Drugs::Table)
        .and_where(Expr::col(column).is_not_null())
        .order_by(column, Order::Desc)
        .limit(n);

    Statement::from_select(&select)
}

/// Name, class and physico-chemical descriptors of every compound.
pub fn descriptor_table() -> Statement {
    let mut select = Query::select();
    select.columns(DESCRIPTOR_COLUMNS).from(Drugs::Table);

    Statement::from_select(&select)
}

/// Detail-page columns for one compound.
pub fn compound_by_cid(cid: i64) -> Statement {
    let mut select = Query::select();
    select
        .columns(DETAIL_COLUMNS)
        .from(Drugs::Table)
        .and_where(Expr::col(Drugs::CompoundCid).eq(cid))
        .limit(1);

    Statement::from_select(&select)
}

/// Every column of one compound, for the JSON API.
pub fn raw_compound_by_cid(cid: i64) -> Statement {
    let mut select = Query::select();
    select
        .column(Asterisk)
        .from(Drugs::Table)
        .and_where(Expr::col(Drugs::CompoundCid).eq(cid))
        .limit(1);

    Statement::from_select(&select)
}

/// Synonyms sharing an InChIKey, ordered by source then synonym text.
pub fn synonyms_for(inchikey: &str) -> Statement {
    let mut select = Query::select();
    select
        .columns([Synonyms::Synonym, Synonyms::Source])
        .from(Synonyms::Table)
        .and_where(Expr::col(Synonyms::InChIKey).eq(inchikey))
        .order_by(Synonyms::Source, Order::Asc)
        .order_by(Synonyms::Synonym, Order::Asc);

    Statement::from_select(&select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::Value;

    fn placeholders(statement: &Statement) -> usize {
        statement.sql.matches('?').count()
    }

    #[test]
    fn listing_without_filters_has_no_where_clause() {
        let statement = build_listing_query(None, None);

        assert!(statement.sql.contains("FROM `nervous_system_drugs`"));
        assert!(!statement.sql.contains("WHERE"));
        assert!(statement.sql.contains("ORDER BY `drug_class` ASC, `Name` ASC"));
        assert!(statement.sql.contains("LIMIT ?"));
        assert_eq!(statement.values.0, vec![Value::from(LISTING_ROW_CAP)]);
    }

    #[test]
    fn listing_blank_inputs_are_no_filter() {
        let statement = build_listing_query(Some("   "), Some("\t"));

        assert!(!statement.sql.contains("WHERE"));
        assert_eq!(statement.placeholder_count(), 1);
    }

    #[test]
    fn listing_class_filter_is_bound_equality() {
        let statement = build_listing_query(Some("Benzodiazepine"), None);

        assert!(statement.sql.contains("`drug_class` = ?"));
        assert!(!statement.sql.contains("LIKE"));
        assert_eq!(
            statement.values.0,
            vec![Value::from("Benzodiazepine"), Value::from(LISTING_ROW_CAP)]
        );
    }

    #[test]
    fn listing_search_binds_pattern_once_per_column() {
        let statement = build_listing_query(None, Some("  gaba "));

        assert_eq!(statement.sql.matches("LIKE ?").count(), SEARCH_COLUMNS.len());
        assert_eq!(statement.sql.matches(" OR ").count(), SEARCH_COLUMNS.len() - 1);
        for column in SEARCH_COLUMNS {
            assert!(statement.sql.contains(&format!("`{}` LIKE ?", column.name())));
        }

        let mut expected = vec![Value::from("%gaba%"); SEARCH_COLUMNS.len()];
        expected.push(Value::from(LISTING_ROW_CAP));
        assert_eq!(statement.values.0, expected);
    }

    #[test]
    fn listing_class_and_search_are_anded() {
        let statement = build_listing_query(Some("Opioid"), Some("pain"));

        assert!(statement.sql.contains(" AND "));
        assert_eq!(statement.values.0[0], Value::from("Opioid"));
        assert_eq!(statement.values.0[1], Value::from("%pain%"));
        assert_eq!(statement.placeholder_count(), 1 + SEARCH_COLUMNS.len() + 1);
        assert_eq!(placeholders(&statement), statement.placeholder_count());
    }

    #[test]
    fn listing_hostile_input_never_reaches_sql_text() {
        let hostile = "x'; DROP TABLE synonyms; --";
        let statement = build_listing_query(Some(hostile), Some(hostile));

        assert!(!statement.sql.contains("DROP TABLE"));
        assert_eq!(statement.values.0[0], Value::from(hostile));
        assert_eq!(placeholders(&statement), statement.placeholder_count());
    }

    #[test]
    fn listing_cap_is_constant_across_filters() {
        let combinations = [
            (None, None),
            (Some("A"), None),
            (None, Some("b")),
            (Some("A"), Some("b")),
        ];
        for (class, term) in combinations {
            let statement = build_listing_query(class, term);
            assert_eq!(statement.values.0.last(), Some(&Value::from(200u64)));
        }
    }

    #[test]
    fn api_query_binds_limit_then_offset() {
        let statement = build_api_query(None, 25, 50);

        assert!(statement.sql.starts_with("SELECT * FROM `nervous_system_drugs`"));
        assert!(statement.sql.contains("LIMIT ? OFFSET ?"));
        assert_eq!(statement.values.0, vec![Value::from(25u64), Value::from(50u64)]);
    }

    #[test]
    fn api_query_class_filter_precedes_pagination() {
        let statement = build_api_query(Some("Stimulant"), 10, 0);

        assert!(statement.sql.contains("`drug_class` = ?"));
        assert_eq!(
            statement.values.0,
            vec![Value::from("Stimulant"), Value::from(10u64), Value::from(0u64)]
        );
    }

    #[test]
    fn api_query_clamps_negative_values() {
        let clamped = build_api_query(None, -5, -3);
        let zeroed = build_api_query(None, 0, 0);

        assert_eq!(clamped.sql, zeroed.sql);
        assert_eq!(clamped.values, zeroed.values);
    }

    #[test]
    fn api_query_has_no_upper_limit() {
        let statement = build_api_query(None, 1_000_000, 0);
        assert_eq!(statement.values.0[0], Value::from(1_000_000u64));
    }

    #[test]
    fn clamp_non_negative_values() {
        assert_eq!(clamp_non_negative(-1), 0);
        assert_eq!(clamp_non_negative(0), 0);
        assert_eq!(clamp_non_negative(42), 42);
    }

    #[test]
    fn class_counts_groups_by_class() {
        let statement = class_counts();

        assert!(statement.sql.contains("COUNT(*) AS `count`"));
        assert!(statement.sql.contains("GROUP BY `drug_class`"));
        assert!(statement.values.0.is_empty());
    }

    #[test]
    fn top_by_excludes_nulls_and_sorts_descending() {
        let statement = top_by(Drugs::PatentCount, 10);

        assert!(statement.sql.contains("`Linked_PubChem_Patent_Count` IS NOT NULL"));
        assert!(statement.sql.contains("ORDER BY `Linked_PubChem_Patent_Count` DESC"));
        assert_eq!(statement.values.0, vec![Value::from(10u64)]);
    }

    #[test]
    fn descriptor_table_quotes_hyphenated_columns() {
        let statement = descriptor_table();

        assert!(statement.sql.contains("`H-Bond_Donor_Count`"));
        assert!(statement.sql.contains("`H-Bond_Acceptor_Count`"));
        assert!(!statement.sql.contains("WHERE"));
    }

    #[test]
    fn point_lookups_bind_the_cid() {
        for statement in [compound_by_cid(2244), raw_compound_by_cid(2244)] {
            assert!(statement.sql.contains("`Compound_CID` = ?"));
            assert_eq!(statement.values.0[0], Value::from(2244i64));
            assert_eq!(statement.values.0[1], Value::from(1u64));
        }
        assert!(compound_by_cid(1).sql.contains("`IUPAC_Name`"));
        assert!(raw_compound_by_cid(1).sql.starts_with("SELECT *"));
    }

    #[test]
    fn synonyms_ordered_by_source_then_text() {
        let statement = synonyms_for("RZVAJINKPMORJF-UHFFFAOYSA-N");

        assert!(statement.sql.contains("FROM `synonyms`"));
        assert!(statement.sql.contains("ORDER BY `source` ASC, `synonym` ASC"));
        assert_eq!(
            statement.values.0,
            vec![Value::from("RZVAJINKPMORJF-UHFFFAOYSA-N")]
        );
    }
}
