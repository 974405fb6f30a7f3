// src/manifest/manifest.rs
//! Map manifest + the bounds-to-chunk-indices query.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use serde::Deserialize;
use url::Url;

use super::description::{ChunkDescription, ChunkDescriptionRecord};
use super::error::ManifestError;

/// Decoded (wire) form of a map manifest document.
///
/// Chunk-table keys arrive as strings and are parsed into integer ids by
/// [`ChunkManifest::from_record`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkManifestRecord {
    pub map_width: i64,
    pub map_height: i64,
    pub base_chunk_width: i64,
    pub base_chunk_height: i64,
    /// Informational only; never validated against the chunk table.
    pub chunk_count: i64,
    #[serde(rename = "globalMapURL")]
    pub global_map_url: String,
    pub chunks: HashMap<String, ChunkDescriptionRecord>,
}

/// A decoded map manifest: overall map geometry, the base chunk size used
/// for all grid arithmetic, and the chunk-id → description table.
///
/// Immutable for its lifetime. The index queries are pure functions of the
/// arguments and these fields, so a shared manifest can be queried from any
/// number of places without synchronization.
#[derive(Asset, TypePath, Clone, Debug)]
pub struct ChunkManifest {
    map_width: i64,
    map_height: i64,
    base_chunk_width: i64,
    base_chunk_height: i64,
    global_map_location: Url,
    chunks: HashMap<i64, ChunkDescription>,
}

impl ChunkManifest {
    /// Construct a manifest, rejecting non-positive geometry.
    ///
    /// The chunk table is taken as-is: it may be empty, may leave grid cells
    /// uncovered, and may contain ids outside the grid.
    pub fn new(
        map_width: i64,
        map_height: i64,
        base_chunk_width: i64,
        base_chunk_height: i64,
        global_map_location: Url,
        chunks: HashMap<i64, ChunkDescription>,
    ) -> Result<Self, ManifestError> {
        for (field, value) in [
            ("map_width", map_width),
            ("map_height", map_height),
            ("base_chunk_width", base_chunk_width),
            ("base_chunk_height", base_chunk_height),
        ] {
            if value <= 0 {
                return Err(ManifestError::InvalidDimension { field, value });
            }
        }

        Ok(Self {
            map_width,
            map_height,
            base_chunk_width,
            base_chunk_height,
            global_map_location,
            chunks,
        })
    }

    /// Build a manifest from its decoded wire form: parse the global map
    /// location, parse every chunk key as an integer id, decode every chunk
    /// entry, then validate geometry via [`Self::new`].
    pub fn from_record(record: &ChunkManifestRecord) -> Result<Self, ManifestError> {
        let global_map_location =
            Url::parse(&record.global_map_url).map_err(|source| ManifestError::Decode {
                location: record.global_map_url.clone(),
                source,
            })?;

        let mut chunks = HashMap::with_capacity(record.chunks.len());
        for (key, chunk_record) in &record.chunks {
            let id: i64 = key
                .parse()
                .map_err(|_| ManifestError::MalformedKey { key: key.clone() })?;
            chunks.insert(id, ChunkDescription::from_record(chunk_record)?);
        }

        Self::new(
            record.map_width,
            record.map_height,
            record.base_chunk_width,
            record.base_chunk_height,
            global_map_location,
            chunks,
        )
    }

    pub fn map_width(&self) -> i64 {
        self.map_width
    }

    pub fn map_height(&self) -> i64 {
        self.map_height
    }

    pub fn base_chunk_width(&self) -> i64 {
        self.base_chunk_width
    }

    pub fn base_chunk_height(&self) -> i64 {
        self.base_chunk_height
    }

    /// Overview asset covering the whole map.
    pub fn global_map_location(&self) -> &Url {
        &self.global_map_location
    }

    /// Description for `id`, or `None` if the manifest carries no asset for
    /// it. Ids returned by the index queries are not guaranteed to resolve;
    /// a miss means "nothing to load", not an error.
    pub fn description(&self, id: i64) -> Option<&ChunkDescription> {
        self.chunks.get(&id)
    }

    pub fn chunk_table(&self) -> &HashMap<i64, ChunkDescription> {
        &self.chunks
    }

    /// Grid columns, rounded up so a partial edge column still counts.
    fn h_count(&self) -> i64 {
        (self.map_width + self.base_chunk_width - 1) / self.base_chunk_width
    }

    /// Grid rows, rounded up like [`Self::h_count`].
    fn v_count(&self) -> i64 {
        (self.map_height + self.base_chunk_height - 1) / self.base_chunk_height
    }

    /// Chunk id for the grid cell containing `(x, y)`.
    ///
    /// Note the divisor: coordinates are divided by the per-axis chunk
    /// *count*, not the base chunk size. Chunk ids in existing manifests are
    /// assigned with this exact mapping, so it is kept as-is even though the
    /// two only line up when count and size coincide numerically.
    fn chunk_index_at(&self, x: i64, y: i64) -> i64 {
        let h_count = self.h_count();
        let x_index = x.div_euclid(h_count);
        let y_index = y.div_euclid(self.v_count());
        y_index * h_count + x_index
    }

    /// Chunk ids wanted for the given world-view edges, expanded by one base
    /// chunk on every side so chunks just off screen are pre-loaded.
    ///
    /// Total over all inputs: degenerate or fully out-of-range rectangles
    /// yield an empty or partial set, never an error. Negative ids are
    /// filtered out; ids past the map edge are not (resolve them with
    /// [`Self::description`] and treat a miss as "no asset").
    pub fn chunk_indices_from_bounds(
        &self,
        top: f32,
        left: f32,
        right: f32,
        bottom: f32,
    ) -> HashSet<i64> {
        // Pre-load margin: one base chunk on each side.
        let top = top - self.base_chunk_height as f32;
        let bottom = bottom + self.base_chunk_height as f32;
        let left = left - self.base_chunk_width as f32;
        let right = right + self.base_chunk_width as f32;

        let top_left_index = self.chunk_index_at(left.floor() as i64, top.floor() as i64);
        let top_right_index = self.chunk_index_at(right.floor() as i64, top.floor() as i64);
        // Scan bound, taken from the bottom-RIGHT corner on purpose: every
        // row start below sits a stride-multiple under `top_left_index`, so
        // the largest id the scan may visit lies under the right edge.
        let bottom_index = self.chunk_index_at(right.floor() as i64, bottom.floor() as i64);

        // Ids to emit per row.
        let h_diff = top_right_index - top_left_index;

        // Ids to advance per row. Floored, unlike `h_count`; the two differ
        // when the map width is not a multiple of the base chunk width.
        // Clamped to 1 so a map narrower than one base chunk still advances
        // the cursor instead of scanning the same row forever.
        let row_stride = (self.map_width / self.base_chunk_width).max(1);

        let mut indices = Vec::new();
        let mut current = top_left_index;
        while current <= bottom_index {
            let row_start = current;
            while current <= row_start + h_diff {
                indices.push(current);
                current += 1;
            }
            current = row_start + row_stride;
        }

        // Everything left of or above the map lands on a negative id.
        indices.into_iter().filter(|&id| id >= 0).collect()
    }

    /// Same query, taking the view as a [`Rect`] in map space (y grows
    /// downward, so `min.y` is the top edge). Pure pass-through to
    /// [`Self::chunk_indices_from_bounds`].
    pub fn chunk_indices_from_view(&self, view: Rect) -> HashSet<i64> {
        self.chunk_indices_from_bounds(view.min.y, view.min.x, view.max.x, view.max.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_url() -> Url {
        Url::parse("http://www.example.org/").unwrap()
    }

    fn manifest_10x10() -> ChunkManifest {
        ChunkManifest::new(100, 100, 10, 10, foo_url(), HashMap::new()).unwrap()
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        for (mw, mh, cw, ch) in [
            (0, 0, 0, 0),
            (10, -1, 10, 10),
            (10, 10, -1, 10),
            (10, 10, 10, -1),
            (-1, -1, -1, -1),
        ] {
            let result = ChunkManifest::new(mw, mh, cw, ch, foo_url(), HashMap::new());
            assert!(
                matches!(result, Err(ManifestError::InvalidDimension { .. })),
                "accepted {mw}x{mh} map with {cw}x{ch} chunks"
            );
        }
    }

    #[test]
    fn accepts_positive_dimensions_with_empty_chunk_table() {
        assert!(ChunkManifest::new(1, 1, 1, 1, foo_url(), HashMap::new()).is_ok());
        assert!(manifest_10x10().chunk_table().is_empty());
    }

    fn record_with_key(key: &str) -> ChunkManifestRecord {
        let mut chunks = HashMap::new();
        chunks.insert(
            key.to_string(),
            ChunkDescriptionRecord {
                relative_url: "http://www.example.org/chunk_0.png".into(),
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            },
        );
        ChunkManifestRecord {
            map_width: 100,
            map_height: 100,
            base_chunk_width: 10,
            base_chunk_height: 10,
            chunk_count: 1,
            global_map_url: "http://www.example.org/global.png".into(),
            chunks,
        }
    }

    #[test]
    fn rejects_non_integer_chunk_key() {
        let err = ChunkManifest::from_record(&record_with_key("abc")).unwrap_err();
        assert!(matches!(err, ManifestError::MalformedKey { .. }), "{err:?}");
    }

    #[test]
    fn accepts_integer_chunk_keys() {
        let manifest = ChunkManifest::from_record(&record_with_key("7")).unwrap();
        assert!(manifest.description(7).is_some());
        assert!(manifest.description(8).is_none());
    }

    #[test]
    fn rejects_malformed_global_map_url() {
        let mut record = record_with_key("0");
        record.global_map_url = "::not-a-url::".into();
        let err = ChunkManifest::from_record(&record).unwrap_err();
        assert!(matches!(err, ManifestError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn decodes_a_full_json_document() {
        let doc = r#"{
            "mapWidth": 100,
            "mapHeight": 100,
            "baseChunkWidth": 10,
            "baseChunkHeight": 10,
            "chunkCount": 2,
            "globalMapURL": "https://maps.example.org/overworld/global.png",
            "chunks": {
                "0": { "relativeURL": "https://maps.example.org/overworld/chunk_0.png",
                       "x": 0, "y": 0, "width": 10, "height": 10 },
                "11": { "relativeURL": "https://maps.example.org/overworld/chunk_11.png",
                        "x": 10, "y": 10, "width": 10, "height": 10 }
            }
        }"#;
        let record: ChunkManifestRecord = serde_json::from_str(doc).unwrap();
        let manifest = ChunkManifest::from_record(&record).unwrap();

        assert_eq!(manifest.map_width(), 100);
        assert_eq!(manifest.base_chunk_height(), 10);
        assert_eq!(manifest.global_map_location().as_str(), "https://maps.example.org/overworld/global.png");
        let chunk = manifest.description(11).unwrap();
        assert_eq!((chunk.x, chunk.y), (10, 10));
    }

    #[test]
    fn degenerate_rectangle_still_wants_the_margin() {
        // A zero-sized view at the origin: the one-chunk margin expands it
        // into neighbours on every side, and the negative ones get dropped.
        let got = manifest_10x10().chunk_indices_from_bounds(0.0, 0.0, 0.0, 0.0);
        let expected: HashSet<i64> = [0, 1, 9, 10, 11].into_iter().collect();
        assert_eq!(got, expected);
        assert!(got.contains(&0));
    }

    #[test]
    fn never_returns_negative_ids() {
        let manifest = manifest_10x10();
        for (top, left, right, bottom) in [
            (-500.0, -500.0, -300.0, -300.0),
            (-50.0, -50.0, 50.0, 50.0),
            (0.0, 0.0, 0.0, 0.0),
            (-1.0, -1.0, -1.0, -1.0),
            (250.0, -250.0, 250.0, 900.0),
        ] {
            let got = manifest.chunk_indices_from_bounds(top, left, right, bottom);
            assert!(got.iter().all(|&id| id >= 0), "negative id for ({top},{left},{right},{bottom}): {got:?}");
        }
    }

    #[test]
    fn view_wrapper_matches_raw_bounds() {
        let manifest = manifest_10x10();
        for view in [
            Rect::new(-20.0, -35.0, 120.0, 80.0),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(33.0, 12.0, 78.0, 91.0),
        ] {
            assert_eq!(
                manifest.chunk_indices_from_view(view),
                manifest.chunk_indices_from_bounds(view.min.y, view.min.x, view.max.x, view.max.y),
            );
        }
    }

    #[test]
    fn repeated_queries_are_identical() {
        let manifest = manifest_10x10();
        let first = manifest.chunk_indices_from_bounds(5.0, 5.0, 45.0, 45.0);
        let second = manifest.chunk_indices_from_bounds(5.0, 5.0, 45.0, 45.0);
        assert_eq!(first, second);
    }

    #[test]
    fn widening_the_view_never_drops_ids() {
        let manifest = manifest_10x10();
        let base = manifest.chunk_indices_from_bounds(20.0, 20.0, 40.0, 40.0);
        for (top, left, right, bottom) in [
            (10.0, 20.0, 40.0, 40.0),
            (20.0, 10.0, 40.0, 40.0),
            (20.0, 20.0, 60.0, 40.0),
            (20.0, 20.0, 40.0, 70.0),
            (0.0, 0.0, 90.0, 90.0),
        ] {
            let wider = manifest.chunk_indices_from_bounds(top, left, right, bottom);
            assert!(
                base.is_subset(&wider),
                "({top},{left},{right},{bottom}) lost {:?}",
                base.difference(&wider).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn uneven_map_width_keeps_the_floored_row_stride() {
        // 105-wide map with 10-wide chunks: ids use the ceiled column count
        // (11) while the row scan advances by the floored one (10).
        let manifest = ChunkManifest::new(105, 100, 10, 10, foo_url(), HashMap::new()).unwrap();
        let got = manifest.chunk_indices_from_bounds(5.0, 5.0, 5.0, 5.0);
        let expected: HashSet<i64> = [0, 8, 9, 10].into_iter().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn map_narrower_than_one_chunk_terminates() {
        let manifest = ChunkManifest::new(5, 5, 10, 10, foo_url(), HashMap::new()).unwrap();
        let got = manifest.chunk_indices_from_bounds(0.0, 0.0, 0.0, 0.0);
        assert!(got.contains(&0));
        assert!(got.iter().all(|&id| id >= 0));
    }
}
