use crate::cache::TtlCache;
use crate::error::Result;
use retc_model::{normalize_region, EmissionRecord};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Emission snapshots are requeried from the database at most once per hour.
pub const EMISSIONS_TTL: Duration = Duration::from_secs(3600);

/// Region normalization happens Rust-side so the spelling table lives in
/// exactly one place; the query only trims and casts.
const EMISSIONS_QUERY: &str = "
SELECT
    CAST(eh.period AS INTEGER) AS period,
    TRIM(eh.region) AS region,
    eh.id_vu,
    eh.nombre_establecimiento,
    eh.rubro_vu,
    eh.contaminantes,
    CAST(eh.cantidad_toneladas AS DOUBLE PRECISION) AS cantidad_toneladas
FROM air_ps.emissions_hist AS eh
WHERE eh.period BETWEEN 2005 AND 2023
  AND eh.cantidad_toneladas IS NOT NULL
  AND eh.region IS NOT NULL
  AND eh.rubro_vu IS NOT NULL
";

#[derive(sqlx::FromRow)]
struct RawEmissionRow {
    period: i32,
    region: String,
    id_vu: Option<String>,
    nombre_establecimiento: Option<String>,
    rubro_vu: String,
    contaminantes: Option<String>,
    cantidad_toneladas: f64,
}

impl From<RawEmissionRow> for EmissionRecord {
    fn from(row: RawEmissionRow) -> Self {
        let region_norm = normalize_region(&row.region);
        Self {
            period: row.period,
            region_raw: row.region,
            region_norm,
            facility_id: row.id_vu.unwrap_or_default(),
            facility_name: row.nombre_establecimiento.unwrap_or_default(),
            category: row.rubro_vu,
            pollutant: row.contaminantes.unwrap_or_default(),
            quantity_tonnes: row.cantidad_toneladas,
        }
    }
}

/// Loads the 2005-2023 emission history once per cache window.
pub struct EmissionsRepository {
    pool: PgPool,
    cache: TtlCache<Vec<EmissionRecord>>,
}

impl EmissionsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_ttl(pool, EMISSIONS_TTL)
    }

    pub fn with_ttl(pool: PgPool, ttl: Duration) -> Self {
        Self {
            pool,
            cache: TtlCache::new(ttl),
        }
    }

    /// Cached snapshot of every emission record in the reporting window,
    /// regions normalized. A failed query propagates; nothing is cached on
    /// failure and there is no empty-table fallback.
    pub async fn load(&self) -> Result<Arc<Vec<EmissionRecord>>> {
        self.cache
            .get_or_load(|| async {
                let rows: Vec<RawEmissionRow> = sqlx::query_as(EMISSIONS_QUERY)
                    .fetch_all(&self.pool)
                    .await?;
                log::info!("Loaded {} emission records", rows.len());
                Ok(rows.into_iter().map(EmissionRecord::from).collect())
            })
            .await
    }
}
