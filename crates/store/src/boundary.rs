use crate::cache::TtlCache;
use crate::error::{Result, StoreError};
use retc_model::{normalize_boundary, RegionGeometry};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Region polygons are static; the file is reread at most once per day.
pub const BOUNDARIES_TTL: Duration = Duration::from_secs(86_400);

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: serde_json::Value,
}

#[derive(Deserialize)]
struct FeatureProperties {
    #[serde(rename = "Region")]
    region: String,
}

/// Loads the regional boundary GeoJSON once per cache window.
///
/// Geometry stays opaque; any display-time transformation (the map view
/// rotates it) belongs to the presentation layer.
pub struct BoundaryRepository {
    path: PathBuf,
    cache: TtlCache<Vec<RegionGeometry>>,
}

impl BoundaryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_ttl(path, BOUNDARIES_TTL)
    }

    pub fn with_ttl(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            cache: TtlCache::new(ttl),
        }
    }

    pub async fn load(&self) -> Result<Arc<Vec<RegionGeometry>>> {
        self.cache.get_or_load(|| read_boundaries(&self.path)).await
    }
}

async fn read_boundaries(path: &Path) -> Result<Vec<RegionGeometry>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| StoreError::BoundaryRead {
            path: path.to_path_buf(),
            source,
        })?;
    let collection: FeatureCollection =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::BoundaryParse {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "Loaded {} boundary features from {}",
        collection.features.len(),
        path.display()
    );

    Ok(collection
        .features
        .into_iter()
        .map(|feature| {
            let region_norm = normalize_boundary(&feature.properties.region);
            RegionGeometry {
                region_raw: feature.properties.region,
                region_norm,
                geometry: feature.geometry,
            }
        })
        .collect())
}
