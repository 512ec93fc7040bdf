//! Persistence of grid functions together with the grid they live on.

use crate::coords::Chart;
use crate::exact::InitialData;
use crate::field::{GridFunction, GridFunctionStore, ScalarWave};
use crate::grid::GridSpace;
use datasize::DataSize;
use ron::ser::PrettyConfig;
use std::{
    fs::File,
    io::{self, Read as _, Write as _},
    path::Path,
};

/// A snapshot of the scalar wave fields at a single time, along with everything needed to
/// interpret them: grid geometry, chart, and (optionally) the data they were built from.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Checkpoint {
    pub name: String,
    pub time: f64,
    pub grid: GridSpace,
    pub chart: Chart,
    /// Exact solution imposed to produce the fields, if any.
    #[serde(default)]
    pub initial: Option<InitialData>,
    /// Names of the stored grid functions, in storage order.
    fields: Vec<String>,
    store: GridFunctionStore<ScalarWave>,
}

impl Checkpoint {
    /// Bundles a store with its grid. Panics if the store does not cover the grid.
    pub fn new(
        name: impl Into<String>,
        time: f64,
        grid: GridSpace,
        chart: Chart,
        store: GridFunctionStore<ScalarWave>,
    ) -> Self {
        assert_eq!(
            store.size(),
            grid.size(),
            "store extents do not match the grid"
        );

        Self {
            name: name.into(),
            time,
            grid,
            chart,
            initial: None,
            fields: ScalarWave::all().map(|gf| gf.name().to_string()).collect(),
            store,
        }
    }

    /// Records the exact solution the fields were built from.
    pub fn with_initial(mut self, initial: InitialData) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn store(&self) -> &GridFunctionStore<ScalarWave> {
        &self.store
    }

    pub fn into_store(self) -> GridFunctionStore<ScalarWave> {
        self.store
    }

    pub fn field_names(&self) -> &[String] {
        &self.fields
    }

    pub fn export_ron(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let data = ron::ser::to_string_pretty(self, PrettyConfig::default())
            .map_err(io::Error::other)?;
        let mut file = File::create(path)?;
        file.write_all(data.as_bytes())
    }

    pub fn import_ron(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut contents = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;

        // The grid is revalidated while deserializing.
        let checkpoint: Self = ron::from_str(&contents).map_err(io::Error::other)?;

        if checkpoint.store.indexer().num_gfs() != ScalarWave::COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "checkpoint stores {} grid function(s), expected {}",
                    checkpoint.store.indexer().num_gfs(),
                    ScalarWave::COUNT
                ),
            ));
        }

        if checkpoint.store.size() != checkpoint.grid.size()
            || checkpoint.store.storage().len() != checkpoint.store.indexer().len()
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "checkpoint grid functions do not match the grid",
            ));
        }

        let expected = ScalarWave::all().map(|gf| gf.name());
        if !checkpoint.fields.iter().map(String::as_str).eq(expected) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unexpected grid functions {:?}", checkpoint.fields),
            ));
        }

        Ok(checkpoint)
    }
}

impl DataSize for Checkpoint {
    const IS_DYNAMIC: bool = true;
    const STATIC_HEAP_SIZE: usize = 0;

    fn estimate_heap_size(&self) -> usize {
        self.name.capacity()
            + self.fields.iter().map(String::capacity).sum::<usize>()
            + self.fields.capacity() * size_of::<String>()
            + self.store.estimate_heap_size()
    }
}
