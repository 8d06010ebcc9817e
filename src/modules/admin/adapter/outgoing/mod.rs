mod admin_query_postgres;

pub use admin_query_postgres::AdminQueryPostgres;
