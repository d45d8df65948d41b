// SQLite inventory store: hosts, applications, cluster groups, usage records.

mod schema;

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::Row;
use tracing::instrument;

use crate::mock_data::MockDataset;
use crate::models::{
    ClusterGroup, HostApplication, HostPool, NewClusterGroup, NewHost, NewHostApplication,
    NewServerResource, ServerResource,
};

/// Department of the row's cluster, last definition wins (as in the cluster_groups listing).
const DEPARTMENT_OF_CLUSTER: &str = "(SELECT cg.department_name FROM cluster_groups cg
      WHERE cg.cluster_name = {alias}.cluster_name ORDER BY cg.id DESC LIMIT 1)";

const HOST_COLUMNS: &str = "id, host_name, host_ip, host_type, h3c_id, h3c_status, disk_size, ram, vcpus,
     leaf_number, rack_number, rack_height, rack_start_number, serial_number,
     is_deleted, is_static, create_time, update_time";

const RESOURCE_COLUMNS: &str = "r.id, r.pool_id, r.cluster_name, r.group_name, r.ip, r.port, r.instance_role,
     r.total_memory, r.used_memory, r.total_disk, r.used_disk, r.cpu_cores, r.cpu_load, r.date_time";

pub struct CmdbRepo {
    pool: SqlitePool,
}

impl CmdbRepo {
    pub async fn connect(path: &str, max_connections: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        schema::create_tables(&self.pool).await
    }

    /// Drops and recreates every table.
    #[instrument(skip(self), fields(repo = "cmdb", operation = "reset"))]
    pub async fn reset(&self) -> anyhow::Result<()> {
        schema::drop_tables(&self.pool).await?;
        schema::create_tables(&self.pool).await
    }

    /// All hosts, each with its applications.
    #[instrument(skip(self), fields(repo = "cmdb", operation = "list_hosts"))]
    pub async fn list_hosts(&self) -> anyhow::Result<Vec<HostPool>> {
        let rows = sqlx::query(&format!("SELECT {HOST_COLUMNS} FROM hosts_pool ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        let mut hosts = rows
            .iter()
            .map(parse_host_row)
            .collect::<anyhow::Result<Vec<_>>>()?;

        let app_rows = sqlx::query(&format!(
            "SELECT a.*, {} AS department_name FROM hosts_applications a ORDER BY a.id",
            DEPARTMENT_OF_CLUSTER.replace("{alias}", "a")
        ))
        .fetch_all(&self.pool)
        .await?;
        let mut by_pool: HashMap<i64, Vec<HostApplication>> = HashMap::new();
        for row in &app_rows {
            let app = parse_application_row(row)?;
            by_pool.entry(app.pool_id).or_default().push(app);
        }
        for host in &mut hosts {
            host.host_applications = by_pool.remove(&host.id).unwrap_or_default();
        }
        Ok(hosts)
    }

    #[instrument(skip(self), fields(repo = "cmdb", operation = "get_host"))]
    pub async fn get_host(&self, id: i64) -> anyhow::Result<Option<HostPool>> {
        let row = sqlx::query(&format!("SELECT {HOST_COLUMNS} FROM hosts_pool WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut host = parse_host_row(&row)?;

        let app_rows = sqlx::query(&format!(
            "SELECT a.*, {} AS department_name FROM hosts_applications a WHERE a.pool_id = $1 ORDER BY a.id",
            DEPARTMENT_OF_CLUSTER.replace("{alias}", "a")
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        host.host_applications = app_rows
            .iter()
            .map(parse_application_row)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Some(host))
    }

    #[instrument(skip(self), fields(repo = "cmdb", operation = "list_cluster_groups"))]
    pub async fn list_cluster_groups(&self) -> anyhow::Result<Vec<ClusterGroup>> {
        let rows = sqlx::query(
            "SELECT id, group_name, cluster_name, department_name, created_at FROM cluster_groups ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> anyhow::Result<ClusterGroup> {
                Ok(ClusterGroup {
                    id: row.try_get("id")?,
                    group_name: row.try_get("group_name")?,
                    cluster_name: row.try_get("cluster_name")?,
                    department_name: row.try_get("department_name")?,
                    created_at: from_millis(row.try_get("created_at")?)?,
                })
            })
            .collect()
    }

    /// Usage records, optionally limited to `from <= date_time < to`. Order: by id.
    #[instrument(skip(self), fields(repo = "cmdb", operation = "list_server_resources"))]
    pub async fn list_server_resources(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> anyhow::Result<Vec<ServerResource>> {
        let department = DEPARTMENT_OF_CLUSTER.replace("{alias}", "r");
        let rows = match range {
            Some((from, to)) => {
                sqlx::query(&format!(
                    "SELECT {RESOURCE_COLUMNS}, {department} AS department_name
                     FROM server_resources r WHERE r.date_time >= $1 AND r.date_time < $2 ORDER BY r.id"
                ))
                .bind(from.timestamp_millis())
                .bind(to.timestamp_millis())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {RESOURCE_COLUMNS}, {department} AS department_name
                     FROM server_resources r ORDER BY r.id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(parse_resource_row).collect()
    }

    /// The newest `limit` usage records, newest first.
    #[instrument(skip(self), fields(repo = "cmdb", operation = "recent_server_resources"))]
    pub async fn recent_server_resources(&self, limit: u32) -> anyhow::Result<Vec<ServerResource>> {
        let rows = sqlx::query(&format!(
            "SELECT {RESOURCE_COLUMNS}, NULL AS department_name
             FROM server_resources r ORDER BY r.date_time DESC, r.id DESC LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(parse_resource_row).collect()
    }

    #[instrument(skip(self, resource), fields(repo = "cmdb", operation = "insert_server_resource", pool_id = resource.pool_id))]
    pub async fn insert_server_resource(
        &self,
        resource: &NewServerResource,
    ) -> anyhow::Result<i64> {
        let mut conn = self.pool.acquire().await?;
        insert_resource(&mut *conn, resource, resource.pool_id, Utc::now()).await
    }

    /// Replaces the whole inventory with `dataset` in one transaction.
    #[instrument(skip(self, dataset), fields(repo = "cmdb", operation = "replace_with_dataset", hosts = dataset.hosts.len()))]
    pub async fn replace_with_dataset(&self, dataset: &MockDataset) -> anyhow::Result<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        for table in [
            "hosts_applications",
            "server_resources",
            "hosts_pool",
            "cluster_groups",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }

        for group in &dataset.cluster_groups {
            insert_cluster_group(&mut *tx, group, now).await?;
        }
        for mock in &dataset.hosts {
            let pool_id = insert_host(&mut *tx, &mock.host, now).await?;
            for app in &mock.applications {
                insert_application(&mut *tx, app, pool_id, now).await?;
            }
            for resource in &mock.resources {
                insert_resource(&mut *tx, resource, pool_id, now).await?;
            }
        }
        tx.commit().await?;
        tracing::info!(
            cluster_groups = dataset.cluster_groups.len(),
            hosts = dataset.hosts.len(),
            "inventory replaced"
        );
        Ok(())
    }
}

async fn insert_cluster_group(
    conn: &mut SqliteConnection,
    group: &NewClusterGroup,
    now: DateTime<Utc>,
) -> anyhow::Result<i64> {
    let r = sqlx::query(
        "INSERT INTO cluster_groups (group_name, cluster_name, department_name, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(&group.group_name)
    .bind(&group.cluster_name)
    .bind(&group.department_name)
    .bind(now.timestamp_millis())
    .execute(&mut *conn)
    .await?;
    Ok(r.last_insert_rowid())
}

async fn insert_host(
    conn: &mut SqliteConnection,
    host: &NewHost,
    now: DateTime<Utc>,
) -> anyhow::Result<i64> {
    let r = sqlx::query(
        r#"
        INSERT INTO hosts_pool
        (host_name, host_ip, host_type, h3c_id, h3c_status, disk_size, ram, vcpus,
         leaf_number, rack_number, rack_height, rack_start_number, serial_number,
         is_deleted, is_static, create_time, update_time)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 0, 0, $14, $15)
        "#,
    )
    .bind(&host.host_name)
    .bind(&host.host_ip)
    .bind(&host.host_type)
    .bind(&host.h3c_id)
    .bind(&host.h3c_status)
    .bind(host.disk_size)
    .bind(host.ram)
    .bind(host.vcpus)
    .bind(&host.leaf_number)
    .bind(&host.rack_number)
    .bind(host.rack_height)
    .bind(host.rack_start_number)
    .bind(&host.serial_number)
    .bind(now.timestamp_millis())
    .bind(now.timestamp_millis())
    .execute(&mut *conn)
    .await?;
    Ok(r.last_insert_rowid())
}

async fn insert_application(
    conn: &mut SqliteConnection,
    app: &NewHostApplication,
    pool_id: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<i64> {
    let r = sqlx::query(
        r#"
        INSERT INTO hosts_applications
        (pool_id, server_type, server_version, server_subtitle, cluster_name, server_protocol,
         server_addr, server_port, server_role, server_status, create_time, update_time)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(pool_id)
    .bind(&app.server_type)
    .bind(&app.server_version)
    .bind(&app.server_subtitle)
    .bind(&app.cluster_name)
    .bind(&app.server_protocol)
    .bind(&app.server_addr)
    .bind(app.server_port)
    .bind(&app.server_role)
    .bind(&app.server_status)
    .bind(now.timestamp_millis())
    .bind(now.timestamp_millis())
    .execute(&mut *conn)
    .await?;
    Ok(r.last_insert_rowid())
}

async fn insert_resource(
    conn: &mut SqliteConnection,
    resource: &NewServerResource,
    pool_id: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<i64> {
    let date_time = resource.date_time.unwrap_or(now);
    let r = sqlx::query(
        r#"
        INSERT INTO server_resources
        (pool_id, cluster_name, group_name, ip, port, instance_role,
         total_memory, used_memory, total_disk, used_disk, cpu_cores, cpu_load,
         date_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(pool_id)
    .bind(&resource.cluster_name)
    .bind(&resource.group_name)
    .bind(&resource.ip)
    .bind(resource.port)
    .bind(&resource.instance_role)
    .bind(resource.total_memory)
    .bind(resource.used_memory)
    .bind(resource.total_disk)
    .bind(resource.used_disk)
    .bind(resource.cpu_cores)
    .bind(resource.cpu_load)
    .bind(date_time.timestamp_millis())
    .bind(now.timestamp_millis())
    .execute(&mut *conn)
    .await?;
    Ok(r.last_insert_rowid())
}

fn from_millis(ms: i64) -> anyhow::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| anyhow::anyhow!("timestamp out of range: {} ms", ms))
}

fn parse_host_row(row: &SqliteRow) -> anyhow::Result<HostPool> {
    Ok(HostPool {
        id: row.try_get("id")?,
        host_name: row.try_get("host_name")?,
        host_ip: row.try_get("host_ip")?,
        host_type: row.try_get("host_type")?,
        h3c_id: row.try_get("h3c_id")?,
        h3c_status: row.try_get("h3c_status")?,
        disk_size: row.try_get("disk_size")?,
        ram: row.try_get("ram")?,
        vcpus: row.try_get("vcpus")?,
        leaf_number: row.try_get("leaf_number")?,
        rack_number: row.try_get("rack_number")?,
        rack_height: row.try_get("rack_height")?,
        rack_start_number: row.try_get("rack_start_number")?,
        serial_number: row.try_get("serial_number")?,
        is_deleted: row.try_get("is_deleted")?,
        is_static: row.try_get("is_static")?,
        create_time: from_millis(row.try_get("create_time")?)?,
        update_time: from_millis(row.try_get("update_time")?)?,
        host_applications: vec![],
    })
}

fn parse_application_row(row: &SqliteRow) -> anyhow::Result<HostApplication> {
    Ok(HostApplication {
        id: row.try_get("id")?,
        pool_id: row.try_get("pool_id")?,
        server_type: row.try_get("server_type")?,
        server_version: row.try_get("server_version")?,
        server_subtitle: row.try_get("server_subtitle")?,
        cluster_name: row.try_get("cluster_name")?,
        server_protocol: row.try_get("server_protocol")?,
        server_addr: row.try_get("server_addr")?,
        server_port: row.try_get("server_port")?,
        server_role: row.try_get("server_role")?,
        server_status: row.try_get("server_status")?,
        department_name: row.try_get("department_name")?,
        create_time: from_millis(row.try_get("create_time")?)?,
        update_time: from_millis(row.try_get("update_time")?)?,
    })
}

fn parse_resource_row(row: &SqliteRow) -> anyhow::Result<ServerResource> {
    Ok(ServerResource {
        id: row.try_get("id")?,
        pool_id: row.try_get("pool_id")?,
        cluster_name: row.try_get("cluster_name")?,
        group_name: row.try_get("group_name")?,
        ip: row.try_get("ip")?,
        port: row.try_get("port")?,
        instance_role: row.try_get("instance_role")?,
        total_memory: row.try_get("total_memory")?,
        used_memory: row.try_get("used_memory")?,
        total_disk: row.try_get("total_disk")?,
        used_disk: row.try_get("used_disk")?,
        cpu_cores: row.try_get("cpu_cores")?,
        cpu_load: row.try_get("cpu_load")?,
        date_time: from_millis(row.try_get("date_time")?)?,
        department_name: row.try_get("department_name")?,
    })
}
