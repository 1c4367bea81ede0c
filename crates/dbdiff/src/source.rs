//! Loading one side of a group into a schema.

use std::sync::Arc;

use dbdiff_core::{BuildOutput, Schema, SchemaBuilder, TypeMapping};
use dbdiff_mysql::MySqlIntrospector;
use tracing::{debug, info};

use crate::config::{Config, Connection};
use crate::error::{DiffError, Result};

/// Settings shared by every schema load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub mapping: Arc<TypeMapping>,
    /// Abort on the first malformed statement instead of skipping it.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            mapping: Arc::new(TypeMapping::mysql()),
            strict: false,
        }
    }
}

/// Loads the schema behind `connection`.
///
/// Dumps are read and parsed on the blocking pool; live databases are read
/// through their catalog.
///
/// # Errors
///
/// Returns IO, parse and catalog errors tagged with the group name.
pub async fn load_schema(
    group: &str,
    connection: &Connection,
    config: &Config,
    options: &LoadOptions,
) -> Result<Schema> {
    let source_name = connection.description();
    let output = match connection {
        Connection::File(file) => {
            let path = config.resolve(file);
            let database = file.dbname.clone();
            let options = options.clone();
            let task_group = group.to_string();
            let task_source = source_name.clone();
            tokio::task::spawn_blocking(move || -> Result<BuildOutput> {
                let sql = std::fs::read_to_string(&path).map_err(|source| DiffError::Io {
                    path: path.clone(),
                    source,
                })?;
                let mut builder = SchemaBuilder::new(&options.mapping).strict(options.strict);
                if let Some(database) = database {
                    builder = builder.database(database);
                }
                builder.build(&sql).map_err(|source| DiffError::Load {
                    group: task_group,
                    source_name: task_source,
                    source,
                })
            })
            .await
            .map_err(|source| DiffError::Join {
                group: group.to_string(),
                source,
            })??
        }
        Connection::Mysql(mysql) => {
            let catalog_error = |source| DiffError::Catalog {
                group: group.to_string(),
                source_name: source_name.clone(),
                source,
            };
            let introspector = MySqlIntrospector::connect(mysql)
                .await
                .map_err(catalog_error)?;
            let output = introspector.introspect_schema(&options.mapping).await;
            introspector.close().await;
            output.map_err(catalog_error)?
        }
    };

    if !output.diagnostics.is_empty() {
        info!(
            group,
            source = %source_name,
            diagnostics = output.diagnostics.len(),
            "schema loaded with recovered problems"
        );
    }
    debug!(group, source = %source_name, tables = output.schema.len(), "schema loaded");
    Ok(output.schema)
}
