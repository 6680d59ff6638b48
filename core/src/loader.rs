//! Reading sample batches out of `.npz` containers.
//!
//! The entry named [`DEFAULT_KEY`] is used when present (this is the name
//! `numpy.savez` gives positional arrays), otherwise the first entry in
//! archive order.
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use ndarray::{ArrayD, IxDyn, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError, ReadableElement};
use tracing::{debug, info};

use crate::{batch::SampleBatch, error::LoadError};

pub const DEFAULT_KEY: &str = "arr_0";

/// Load the sample batch stored in the container at `path`.
pub fn load_batch(path: &Path) -> Result<SampleBatch, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let archive_error = |source| LoadError::Archive {
        path: path.to_path_buf(),
        source,
    };

    let mut npz = NpzReader::new(BufReader::new(file)).map_err(archive_error)?;
    let names = npz.names().map_err(archive_error)?;
    debug!(path = %path.display(), keys = ?names, "opened npz archive");

    let index = select_entry(&names).ok_or_else(|| LoadError::Empty(path.to_path_buf()))?;
    let key = entry_key(&names[index]).to_string();

    let stacked = read_f32(&mut npz, index, &key).map_err(|err| match err {
        ReadOutcome::Failed(source) => archive_error(source),
        ReadOutcome::WrongDtype => LoadError::UnsupportedDtype { key: key.clone() },
    })?;
    if stacked.ndim() == 0 {
        return Err(LoadError::NotABatch { key });
    }

    let batch = SampleBatch::from_stacked(key, &stacked);
    info!(key = batch.key(), samples = batch.len(), "loaded sample batch");
    Ok(batch)
}

/// Index of the entry to load: the default key if present, otherwise the first.
pub fn select_entry(names: &[String]) -> Option<usize> {
    names
        .iter()
        .position(|name| entry_key(name) == DEFAULT_KEY)
        .or_else(|| (!names.is_empty()).then_some(0))
}

/// Archive entry name with the `.npy` suffix removed.
pub fn entry_key(name: &str) -> &str {
    name.strip_suffix(".npy").unwrap_or(name)
}

enum ReadOutcome {
    Failed(ReadNpzError),
    WrongDtype,
}

/// Reads the entry as f32. u8 data is widened without rescaling, so the later
/// `* 255` saturates at 255 instead of wrapping modulo 256.
fn read_f32<R: Read + Seek>(
    npz: &mut NpzReader<R>,
    index: usize,
    key: &str,
) -> Result<ArrayD<f32>, ReadOutcome> {
    if let Some(array) = read_as::<f32, R>(npz, index)? {
        return Ok(array);
    }
    if let Some(array) = read_as::<f64, R>(npz, index)? {
        debug!(key, "narrowing f64 samples to f32");
        return Ok(array.mapv(|v| v as f32));
    }
    if let Some(array) = read_as::<u8, R>(npz, index)? {
        debug!(key, "widening u8 samples to f32");
        return Ok(array.mapv(f32::from));
    }
    Err(ReadOutcome::WrongDtype)
}

/// `Ok(None)` when the entry holds a different element type.
fn read_as<A, R>(npz: &mut NpzReader<R>, index: usize) -> Result<Option<ArrayD<A>>, ReadOutcome>
where
    A: ReadableElement,
    R: Read + Seek,
{
    match npz.by_index::<OwnedRepr<A>, IxDyn>(index) {
        Ok(array) => Ok(Some(array)),
        Err(ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_))) => Ok(None),
        Err(err) => Err(ReadOutcome::Failed(err)),
    }
}
