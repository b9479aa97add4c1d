//! Apply the static schema to the database: tables, keys, foreign keys, FK indexes.
//! Tables are created in dependency order; every statement is idempotent.

use crate::config::schema::{TableDef, TABLES};
use crate::error::AppError;
use crate::sql::quoted;
use sqlx::PgPool;

/// CREATE TABLE IF NOT EXISTS for one table. Foreign keys carry no ON DELETE action; dependent
/// rows are removed by the repository.
pub fn create_table_sql(table: &TableDef) -> String {
    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| {
            let mut def = format!("{} {}", quoted(c.name), c.ty.pg_type());
            if !c.nullable {
                def.push_str(" NOT NULL");
            }
            if c.unique {
                def.push_str(" UNIQUE");
            }
            def
        })
        .collect();
    defs.push(format!("PRIMARY KEY ({})", quoted(table.primary_key)));
    for fk in table.foreign_keys {
        defs.push(format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            quoted(&format!("fk_{}_{}", table.name, fk.column)),
            quoted(fk.column),
            quoted(fk.references),
            quoted(fk.ref_column)
        ));
    }
    format!("CREATE TABLE IF NOT EXISTS {} (\n    {}\n)", quoted(table.name), defs.join(",\n    "))
}

/// One index per foreign key column so cascade cleanup and per-parent listing stay cheap.
pub fn foreign_key_index_sql(table: &TableDef) -> Vec<String> {
    table
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quoted(&format!("idx_{}_{}", table.name, fk.column)),
                quoted(table.name),
                quoted(fk.column)
            )
        })
        .collect()
}

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for table in TABLES {
        let ddl = create_table_sql(table);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
        for sql in foreign_key_index_sql(table) {
            sqlx::query(&sql).execute(pool).await?;
        }
    }
    tracing::info!(tables = TABLES.len(), "schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{STUDY_TIMES, SUBJECTS};

    #[test]
    fn subject_table_ddl() {
        let ddl = create_table_sql(&SUBJECTS);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS \"subjects\""));
        assert!(ddl.contains("\"credit\" INTEGER NOT NULL"));
        assert!(ddl.contains("PRIMARY KEY (\"subject_id\")"));
        assert!(ddl.contains(
            "CONSTRAINT \"fk_subjects_major_id\" FOREIGN KEY (\"major_id\") REFERENCES \"majors\" (\"major_id\")"
        ));
    }

    #[test]
    fn study_time_ddl_has_serial_key_and_index() {
        assert!(create_table_sql(&STUDY_TIMES).contains("\"id\" BIGSERIAL NOT NULL"));
        assert!(!create_table_sql(&STUDY_TIMES).contains("ON DELETE"));
        assert_eq!(
            foreign_key_index_sql(&STUDY_TIMES),
            vec!["CREATE INDEX IF NOT EXISTS \"idx_subject_study_times_subject_id\" ON \"subject_study_times\" (\"subject_id\")"]
        );
    }
}
