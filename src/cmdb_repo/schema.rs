// Table definitions. Timestamps are INTEGER epoch milliseconds.

use sqlx::SqlitePool;

const TABLES: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS cluster_groups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        group_name TEXT NOT NULL,
        cluster_name TEXT NOT NULL,
        department_name TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hosts_pool (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        host_name TEXT NOT NULL,
        host_ip TEXT NOT NULL,
        host_type TEXT NOT NULL DEFAULT '',
        h3c_id TEXT NOT NULL DEFAULT '',
        h3c_status TEXT NOT NULL DEFAULT '',
        disk_size INTEGER,
        ram INTEGER,
        vcpus INTEGER,
        leaf_number TEXT NOT NULL DEFAULT '',
        rack_number TEXT NOT NULL DEFAULT '',
        rack_height INTEGER,
        rack_start_number INTEGER,
        serial_number TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_static INTEGER NOT NULL DEFAULT 0,
        create_time INTEGER NOT NULL,
        update_time INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS hosts_applications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pool_id INTEGER NOT NULL REFERENCES hosts_pool(id) ON DELETE CASCADE,
        server_type TEXT NOT NULL DEFAULT '',
        server_version TEXT NOT NULL DEFAULT '',
        server_subtitle TEXT NOT NULL DEFAULT '',
        cluster_name TEXT NOT NULL DEFAULT '',
        server_protocol TEXT NOT NULL DEFAULT '',
        server_addr TEXT NOT NULL DEFAULT '',
        server_port INTEGER NOT NULL,
        server_role TEXT NOT NULL DEFAULT '',
        server_status TEXT NOT NULL DEFAULT '',
        create_time INTEGER NOT NULL,
        update_time INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS server_resources (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pool_id INTEGER NOT NULL,
        cluster_name TEXT NOT NULL DEFAULT '',
        group_name TEXT NOT NULL DEFAULT '',
        ip TEXT NOT NULL DEFAULT '',
        port INTEGER NOT NULL DEFAULT 0,
        instance_role TEXT NOT NULL DEFAULT '',
        total_memory REAL NOT NULL,
        used_memory REAL NOT NULL,
        total_disk REAL NOT NULL,
        used_disk REAL NOT NULL,
        cpu_cores INTEGER NOT NULL DEFAULT 0,
        cpu_load REAL NOT NULL,
        date_time INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    )
    "#,
];

const INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_cluster_groups_cluster_name ON cluster_groups(cluster_name)",
    "CREATE INDEX IF NOT EXISTS idx_hosts_applications_pool_id ON hosts_applications(pool_id)",
    "CREATE INDEX IF NOT EXISTS idx_server_resources_date_time ON server_resources(date_time)",
    "CREATE INDEX IF NOT EXISTS idx_server_resources_pool_id ON server_resources(pool_id)",
];

/// Creates all tables and indexes if not present.
pub(super) async fn create_tables(pool: &SqlitePool) -> anyhow::Result<()> {
    for ddl in TABLES.iter().chain(INDEXES.iter()) {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Drops all tables, children first.
pub(super) async fn drop_tables(pool: &SqlitePool) -> anyhow::Result<()> {
    for table in [
        "hosts_applications",
        "server_resources",
        "hosts_pool",
        "cluster_groups",
    ] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(pool)
            .await?;
    }
    Ok(())
}
