use crate::error::ExecutionError;
use crate::storage::config::{Config, ConnectionProfile};

/// The connection a statement batch runs against, with its selected database.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveConnection {
    pub id: String,
    pub profile: ConnectionProfile,
    /// Database chosen for the session, overriding the profile default.
    pub database: Option<String>,
}

impl ActiveConnection {
    pub fn new(id: impl Into<String>, profile: ConnectionProfile) -> Self {
        Self {
            id: id.into(),
            profile,
            database: None,
        }
    }

    pub fn with_database(mut self, database: Option<String>) -> Self {
        self.database = database.filter(|db| !db.trim().is_empty());
        self
    }

    /// Resolve the active connection from configuration. `override_id` and
    /// `override_database` win over the stored selection.
    pub fn resolve(
        config: &Config,
        override_id: Option<&str>,
        override_database: Option<&str>,
    ) -> Result<Option<Self>, ExecutionError> {
        let Some(id) = override_id
            .map(str::to_string)
            .or_else(|| config.get_active_connection())
        else {
            return Ok(None);
        };

        let profile = config
            .get_connection(&id)
            .cloned()
            .ok_or_else(|| ExecutionError::ConnectionNotFound { id: id.clone() })?;

        let database = override_database
            .map(str::to_string)
            .or_else(|| config.active_database.clone());

        Ok(Some(Self::new(id, profile).with_database(database)))
    }

    /// `name (server)`
    pub fn connection_label(&self) -> String {
        format!("{} ({})", self.profile.name, self.profile.server)
    }

    pub fn database_label(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| self.profile.database.clone())
    }

    /// SQL actually sent: switches to the selected database first.
    pub fn batch_sql(&self, sql: &str) -> String {
        match &self.database {
            Some(db) => format!("USE [{}];\n{}", db.replace(']', "]]"), sql),
            None => sql.to_string(),
        }
    }
}
