use super::SlotStore;
use super::schema::context_slots;
use anyhow::{Result, anyhow};
use chrono::Utc;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_types::{BigInt, Text};
use log::{debug, info};

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Insertable)]
#[diesel(table_name = context_slots)]
struct NewContextSlot<'a> {
    slot_key: &'a str,
    payload: &'a str,
    updated_at: i64,
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = 5000;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Slot storage in a single SQLite table.
pub struct SqliteSlotStore {
    pool: SqlitePool,
}

impl SqliteSlotStore {
    /// Opens (creating if needed) the database at `path` and applies pending
    /// migrations. `":memory:"` gives a private in-process database.
    pub fn open(path: &str) -> Result<Self> {
        // One connection: writes are serialized by the engine anyway, and an
        // in-memory database only lives as long as its connection.
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(ConnectionManager::<SqliteConnection>::new(path))?;

        let mut pooled = pool.get()?;
        init_database(&mut pooled)?;
        debug!("Opened context database at {}", path);
        Ok(Self { pool })
    }
}

impl SlotStore for SqliteSlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let mut pooled = self.pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;
        context_slots::table
            .find(key)
            .select(context_slots::payload)
            .first::<String>(conn)
            .optional()
            .map_err(Into::into)
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        let mut pooled = self.pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;
        diesel::replace_into(context_slots::table)
            .values(&NewContextSlot {
                slot_key: key,
                payload,
                updated_at: Utc::now().timestamp(),
            })
            .execute(conn)?;
        Ok(())
    }
}

struct Migration {
    name: &'static str,
    up_sql: &'static str,
}

const MIGRATION_2026_10_01_000000_CONTEXT_SLOTS: &str =
    include_str!("../../migrations/2026-10-01-000000_context_slots/up.sql");

const MIGRATIONS: &[Migration] = &[Migration {
    name: "2026-10-01-000000_context_slots",
    up_sql: MIGRATION_2026_10_01_000000_CONTEXT_SLOTS,
}];

fn init_migrations_table(conn: &mut SqliteConnection) -> Result<()> {
    diesel::sql_query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER NOT NULL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER))
        )",
    )
    .execute(conn)?;
    Ok(())
}

fn is_migration_applied(conn: &mut SqliteConnection, migration_name: &str) -> Result<bool> {
    let row = diesel::sql_query("SELECT COUNT(*) AS count FROM _migrations WHERE name = ?")
        .bind::<Text, _>(migration_name)
        .get_result::<CountRow>(conn)?;
    Ok(row.count > 0)
}

fn mark_migration_applied(conn: &mut SqliteConnection, migration_name: &str) -> Result<()> {
    diesel::sql_query("INSERT INTO _migrations (name) VALUES (?)")
        .bind::<Text, _>(migration_name)
        .execute(conn)?;
    Ok(())
}

fn parse_sql_statements(sql: &str) -> Vec<String> {
    sql.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("--")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn init_database(conn: &mut SqliteConnection) -> Result<()> {
    init_migrations_table(conn)?;

    for migration in MIGRATIONS {
        if is_migration_applied(conn, migration.name)? {
            debug!("Migration {} already applied, skipping", migration.name);
            continue;
        }

        info!("Applying migration: {}", migration.name);
        conn.transaction::<_, anyhow::Error, _>(|conn| {
            for statement in parse_sql_statements(migration.up_sql) {
                diesel::sql_query(&statement).execute(conn).map_err(|e| {
                    anyhow!(
                        "Failed to execute migration statement in {}: {} - Error: {}",
                        migration.name,
                        statement,
                        e
                    )
                })?;
            }
            mark_migration_applied(conn, migration.name)
        })?;
        info!("Migration {} applied successfully", migration.name);
    }

    Ok(())
}
