mod table;

pub use table::{Column, SchemaMismatch, SqlType, Table};
