use refinery::embed_migrations;

// Embed migrations from the migrations directory
embed_migrations!("src/storage/migrations");

/// Create or upgrade the survey tables on `conn`.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), refinery::Error> {
    migrations::runner().run(conn).map(|_| ())
}
