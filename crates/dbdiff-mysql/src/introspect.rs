//! Reading `information_schema` through sqlx.

use dbdiff_core::{BuildOutput, TypeMapping};
use futures::TryStreamExt;
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, info};

use crate::catalog::{assemble, CatalogRows, ColumnRow, ForeignKeyRow, IndexRow};
use crate::connection::MySqlConnection;
use crate::error::CatalogError;

const TABLES_SQL: &str = "
    SELECT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME
    FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
    ORDER BY TABLE_NAME";

const COLUMNS_SQL: &str = "
    SELECT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME,
           CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME,
           CAST(COLUMN_TYPE AS CHAR) AS COLUMN_TYPE,
           CAST(IS_NULLABLE AS CHAR) AS IS_NULLABLE,
           CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT,
           CAST(EXTRA AS CHAR) AS EXTRA,
           CAST(COLUMN_COMMENT AS CHAR) AS COLUMN_COMMENT
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ?
    ORDER BY TABLE_NAME, ORDINAL_POSITION";

const INDEXES_SQL: &str = "
    SELECT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME,
           CAST(INDEX_NAME AS CHAR) AS INDEX_NAME,
           CAST(NON_UNIQUE AS SIGNED) AS NON_UNIQUE,
           CAST(INDEX_TYPE AS CHAR) AS INDEX_TYPE,
           CAST(SEQ_IN_INDEX AS SIGNED) AS SEQ_IN_INDEX,
           CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME
    FROM information_schema.STATISTICS
    WHERE TABLE_SCHEMA = ? AND COLUMN_NAME IS NOT NULL
    ORDER BY TABLE_NAME, INDEX_NAME, SEQ_IN_INDEX";

const FOREIGN_KEYS_SQL: &str = "
    SELECT CAST(kcu.TABLE_NAME AS CHAR) AS TABLE_NAME,
           CAST(kcu.CONSTRAINT_NAME AS CHAR) AS CONSTRAINT_NAME,
           CAST(kcu.ORDINAL_POSITION AS SIGNED) AS ORDINAL_POSITION,
           CAST(kcu.COLUMN_NAME AS CHAR) AS COLUMN_NAME,
           CAST(kcu.REFERENCED_TABLE_NAME AS CHAR) AS REFERENCED_TABLE_NAME,
           CAST(kcu.REFERENCED_COLUMN_NAME AS CHAR) AS REFERENCED_COLUMN_NAME,
           CAST(rc.UPDATE_RULE AS CHAR) AS UPDATE_RULE,
           CAST(rc.DELETE_RULE AS CHAR) AS DELETE_RULE
    FROM information_schema.KEY_COLUMN_USAGE kcu
    JOIN information_schema.REFERENTIAL_CONSTRAINTS rc
      ON rc.CONSTRAINT_SCHEMA = kcu.CONSTRAINT_SCHEMA
     AND rc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
     AND rc.TABLE_NAME = kcu.TABLE_NAME
    WHERE kcu.TABLE_SCHEMA = ? AND kcu.REFERENCED_TABLE_NAME IS NOT NULL
    ORDER BY kcu.TABLE_NAME, kcu.CONSTRAINT_NAME, kcu.ORDINAL_POSITION";

/// Reads the schema of one database from a live MySQL server.
#[derive(Debug, Clone)]
pub struct MySqlIntrospector {
    pool: Pool<MySql>,
    database: String,
}

impl MySqlIntrospector {
    /// Connects to the server described by `connection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(connection: &MySqlConnection) -> Result<Self, CatalogError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect_with(connection.connect_options())
            .await?;
        info!(database = %connection.dbname, host = %connection.host(), "connected");
        Ok(Self::from_pool(pool, &connection.dbname))
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: Pool<MySql>, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }

    /// Returns the database being read.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Fetches the catalog rows of the database.
    ///
    /// # Errors
    ///
    /// Returns database errors and rows with unexpected column types.
    pub async fn fetch_rows(&self) -> Result<CatalogRows, CatalogError> {
        let tables = self
            .fetch(TABLES_SQL, |row| row.try_get::<String, _>("TABLE_NAME"))
            .await?;
        let columns = self.fetch(COLUMNS_SQL, column_row).await?;
        let indexes = self.fetch(INDEXES_SQL, index_row).await?;
        let foreign_keys = self.fetch(FOREIGN_KEYS_SQL, foreign_key_row).await?;
        debug!(
            database = %self.database,
            tables = tables.len(),
            columns = columns.len(),
            indexes = indexes.len(),
            foreign_keys = foreign_keys.len(),
            "fetched catalog"
        );
        Ok(CatalogRows {
            tables,
            columns,
            indexes,
            foreign_keys,
        })
    }

    /// Reads the database and builds its schema with `mapping`.
    ///
    /// # Errors
    ///
    /// Returns database errors and inconsistent catalogs.
    pub async fn introspect_schema(
        &self,
        mapping: &TypeMapping,
    ) -> Result<BuildOutput, CatalogError> {
        let rows = self.fetch_rows().await?;
        assemble(&rows, &self.database, mapping)
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch<T>(
        &self,
        sql: &str,
        decode: impl Fn(&MySqlRow) -> Result<T, sqlx::Error>,
    ) -> Result<Vec<T>, CatalogError> {
        let mut rows = sqlx::query(sql).bind(self.database.as_str()).fetch(&self.pool);
        let mut out = Vec::new();
        while let Some(row) = rows.try_next().await? {
            out.push(decode(&row)?);
        }
        Ok(out)
    }
}

fn column_row(row: &MySqlRow) -> Result<ColumnRow, sqlx::Error> {
    let nullable: String = row.try_get("IS_NULLABLE")?;
    Ok(ColumnRow {
        table: row.try_get("TABLE_NAME")?,
        name: row.try_get("COLUMN_NAME")?,
        column_type: row.try_get("COLUMN_TYPE")?,
        nullable: nullable.eq_ignore_ascii_case("YES"),
        default: row.try_get("COLUMN_DEFAULT")?,
        extra: row
            .try_get::<Option<String>, _>("EXTRA")?
            .unwrap_or_default(),
        comment: row
            .try_get::<Option<String>, _>("COLUMN_COMMENT")?
            .unwrap_or_default(),
    })
}

fn index_row(row: &MySqlRow) -> Result<IndexRow, sqlx::Error> {
    Ok(IndexRow {
        table: row.try_get("TABLE_NAME")?,
        name: row.try_get("INDEX_NAME")?,
        non_unique: row.try_get::<i64, _>("NON_UNIQUE")? != 0,
        index_type: row.try_get("INDEX_TYPE")?,
        position: row.try_get("SEQ_IN_INDEX")?,
        column: row.try_get("COLUMN_NAME")?,
    })
}

fn foreign_key_row(row: &MySqlRow) -> Result<ForeignKeyRow, sqlx::Error> {
    Ok(ForeignKeyRow {
        table: row.try_get("TABLE_NAME")?,
        name: row.try_get("CONSTRAINT_NAME")?,
        position: row.try_get("ORDINAL_POSITION")?,
        column: row.try_get("COLUMN_NAME")?,
        referenced_table: row.try_get("REFERENCED_TABLE_NAME")?,
        referenced_column: row.try_get("REFERENCED_COLUMN_NAME")?,
        update_rule: row.try_get("UPDATE_RULE")?,
        delete_rule: row.try_get("DELETE_RULE")?,
    })
}
