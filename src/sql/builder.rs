//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from table definitions.

use crate::config::schema::TableDef;
use crate::sql::SqlValue;

/// Quote identifier for PostgreSQL (safe: only from the static schema).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

fn column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT all rows ordered by primary key.
pub fn select_all(table: &TableDef) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(table),
        quoted(table.name),
        quoted(table.primary_key)
    )
}

/// SELECT by primary key. Caller binds the key as $1.
pub fn select_by_key(table: &TableDef) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(table),
        quoted(table.name),
        quoted(table.primary_key)
    )
}

/// SELECT by primary key holding a row lock until the transaction ends.
pub fn select_by_key_for_update(table: &TableDef) -> String {
    format!("{} FOR UPDATE", select_by_key(table))
}

/// SELECT rows where `column = $1`, ordered by primary key.
pub fn select_by_column(table: &TableDef, column: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
        column_list(table),
        quoted(table.name),
        quoted(column),
        quoted(table.primary_key)
    )
}

/// INSERT one row. `values` follow `table.columns`; generated columns are skipped.
pub fn insert(table: &TableDef, values: &[SqlValue]) -> QueryBuf {
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    let mut params = Vec::new();
    for (col, val) in table.columns.iter().zip(values) {
        if col.is_generated() {
            continue;
        }
        params.push(val.clone());
        cols.push(quoted(col.name));
        placeholders.push(format!("${}", params.len()));
    }
    QueryBuf {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(table.name),
            cols.join(", "),
            placeholders.join(", "),
            column_list(table)
        ),
        params,
    }
}

/// UPDATE every non-key column of the row identified by `key` ($1).
pub fn update(table: &TableDef, key: SqlValue, values: &[SqlValue]) -> QueryBuf {
    let mut params = vec![key];
    let mut sets = Vec::new();
    for (col, val) in table.columns.iter().zip(values) {
        if col.name == table.primary_key {
            continue;
        }
        params.push(val.clone());
        sets.push(format!("{} = ${}", quoted(col.name), params.len()));
    }
    QueryBuf {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = $1 RETURNING {}",
            quoted(table.name),
            sets.join(", "),
            quoted(table.primary_key),
            column_list(table)
        ),
        params,
    }
}

/// DELETE by primary key. Caller binds the key as $1.
pub fn delete(table: &TableDef) -> String {
    format!("DELETE FROM {} WHERE {} = $1", quoted(table.name), quoted(table.primary_key))
}

/// DELETE rows of `table` whose `column` references the parent key ($1).
pub fn delete_by_column(table: &TableDef, column: &str) -> String {
    format!("DELETE FROM {} WHERE {} = $1", quoted(table.name), quoted(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{STUDY_TIMES, SUBJECTS};
    use chrono::Utc;

    #[test]
    fn insert_skips_generated_key() {
        let now = Utc::now();
        let q = insert(
            &STUDY_TIMES,
            &[SqlValue::BigInt(Some(0)), "CS101".into(), now.into(), now.into()],
        );
        assert_eq!(
            q.sql,
            "INSERT INTO \"subject_study_times\" (\"subject_id\", \"start_at\", \"end_at\") VALUES ($1, $2, $3) \
             RETURNING \"id\", \"subject_id\", \"start_at\", \"end_at\""
        );
        assert_eq!(q.params.len(), 3);
    }

    #[test]
    fn update_sets_non_key_columns() {
        let q = update(
            &SUBJECTS,
            "CS101".into(),
            &["CS101".into(), "Intro".into(), 3_i32.into(), "CPE".into()],
        );
        assert!(q.sql.starts_with(
            "UPDATE \"subjects\" SET \"subject_name\" = $2, \"credit\" = $3, \"major_id\" = $4 WHERE \"subject_id\" = $1"
        ));
        assert_eq!(q.params[0], SqlValue::from("CS101"));
        assert_eq!(q.params.len(), 4);
    }

    #[test]
    fn lock_and_child_delete() {
        assert!(select_by_key_for_update(&SUBJECTS).ends_with("WHERE \"subject_id\" = $1 FOR UPDATE"));
        assert_eq!(
            delete_by_column(&STUDY_TIMES, "subject_id"),
            "DELETE FROM \"subject_study_times\" WHERE \"subject_id\" = $1"
        );
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
