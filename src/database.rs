use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;

/// Where a request gets its database handle from.
pub enum Connector {
    /// Open a fresh connection for every request.
    PerRequest(ConnectOptions),
    /// Hand out an already established connection.
    Shared(Arc<DatabaseConnection>),
}

impl Connector {
    pub fn shared(database: DatabaseConnection) -> Connector {
        Connector::Shared(Arc::new(database))
    }

    pub async fn acquire(&self) -> Result<Arc<DatabaseConnection>, DbErr> {
        match self {
            Connector::PerRequest(options) => Ok(Arc::new(Database::connect(options.clone()).await?)),
            Connector::Shared(database) => Ok(Arc::clone(database)),
        }
    }
}
