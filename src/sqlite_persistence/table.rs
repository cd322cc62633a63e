use rusqlite::{params, Connection};
use thiserror::Error;

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Mutated only when optional field assignments are passed
            #[allow(unused_mut)]
            let mut column = $crate::sqlite_persistence::Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Numeric,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Numeric => "NUMERIC(10,2)",
        }
    }
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
}

/// Describes the subset of a table's columns this crate reads.
///
/// Exported datasets may carry more columns than declared here; validation
/// only checks that the declared ones are present.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

#[derive(Debug, Error)]
pub enum SchemaMismatch {
    #[error("table '{0}' does not exist")]
    MissingTable(String),

    #[error("table '{table}' is missing column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("SQLite error while inspecting schema: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Table {
    pub fn exists(&self, conn: &Connection) -> Result<bool, rusqlite::Error> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            params![self.name],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn create(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let mut definition = format!("{} {}", column.name, column.sql_type.as_sql());
                if column.is_primary_key {
                    definition.push_str(" PRIMARY KEY");
                }
                if column.non_null {
                    definition.push_str(" NOT NULL");
                }
                definition
            })
            .collect::<Vec<_>>()
            .join(", ");
        conn.execute(&format!("CREATE TABLE {} ({});", self.name, columns), [])?;
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<(), SchemaMismatch> {
        if !self.exists(conn)? {
            return Err(SchemaMismatch::MissingTable(self.name.to_string()));
        }

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", self.name))?;
        let actual_columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<String>, _>>()?;

        // Column names are case-insensitive in SQLite
        for column in self.columns {
            let found = actual_columns
                .iter()
                .any(|actual| actual.eq_ignore_ascii_case(column.name));
            if !found {
                return Err(SchemaMismatch::MissingColumn {
                    table: self.name.to_string(),
                    column: column.name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE_TABLE: Table = Table {
        name: "people",
        columns: &[
            sqlite_column!("PersonId", &SqlType::Integer, is_primary_key = true),
            sqlite_column!("Name", &SqlType::Text, non_null = true),
            sqlite_column!("Balance", &SqlType::Numeric),
        ],
    };

    #[test]
    fn creates_and_validates_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!PEOPLE_TABLE.exists(&conn).unwrap());
        PEOPLE_TABLE.create(&conn).unwrap();
        assert!(PEOPLE_TABLE.exists(&conn).unwrap());
        PEOPLE_TABLE.validate(&conn).unwrap();
    }

    #[test]
    fn validate_reports_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let err = PEOPLE_TABLE.validate(&conn).unwrap_err();
        assert!(matches!(err, SchemaMismatch::MissingTable(name) if name == "people"));
    }

    #[test]
    fn validate_reports_missing_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE people (PersonId INTEGER, Name TEXT)", [])
            .unwrap();

        let err = PEOPLE_TABLE.validate(&conn).unwrap_err();
        match err {
            SchemaMismatch::MissingColumn { table, column } => {
                assert_eq!(table, "people");
                assert_eq!(column, "Balance");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn validate_accepts_extra_columns_and_different_case() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE people (personid INTEGER, NAME NVARCHAR(120), balance REAL, Extra TEXT)",
            [],
        )
        .unwrap();

        PEOPLE_TABLE.validate(&conn).unwrap();
    }
}
