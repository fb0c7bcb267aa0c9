pub mod database;
pub mod remote;
pub mod row;
pub mod schema;
pub mod seed;

pub use database::Database;
pub use remote::LibsqlClient;
pub use row::{FromRemoteRow, IdRow, RemoteRow, SqlArg};
