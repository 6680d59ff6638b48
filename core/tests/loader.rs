use std::{fs::File, path::Path};

use ndarray::{arr0, Array, ArrayD, IxDyn};
use ndarray_npy::{NpzWriter, WritableElement};
use samplegrid_core::{load_batch, LoadError};

fn write_npz<A: WritableElement>(path: &Path, entries: &[(&str, ArrayD<A>)]) {
    let mut npz = NpzWriter::new(File::create(path).unwrap());
    for (name, array) in entries {
        npz.add_array(*name, array).unwrap();
    }
    npz.finish().unwrap();
}

fn stacked(count: usize, value: f32) -> ArrayD<f32> {
    ArrayD::from_elem(IxDyn(&[count, 4, 4, 3]), value)
}

#[test]
fn loads_every_sample_from_default_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.npz");
    write_npz(&path, &[("arr_0", stacked(3, 0.5))]);

    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.len(), 3);
    assert_eq!(batch.key(), "arr_0");
    assert!(batch.iter().all(|sample| sample.shape() == [4, 4, 3]));
}

#[test]
fn default_key_is_preferred_over_first_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.npz");
    write_npz(
        &path,
        &[("images", stacked(5, 0.1)), ("arr_0", stacked(2, 0.9))],
    );

    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.key(), "arr_0");
    assert_eq!(batch.len(), 2);
}

#[test]
fn first_entry_is_used_without_default_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.npz");
    write_npz(
        &path,
        &[("images", stacked(5, 0.1)), ("extra", stacked(2, 0.9))],
    );

    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.key(), "images");
    assert_eq!(batch.len(), 5);
}

#[test]
fn f64_and_u8_entries_are_converted() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("doubles.npz");
    let doubles = ArrayD::<f64>::from_elem(IxDyn(&[2, 3, 3]), 0.25);
    write_npz(&path, &[("arr_0", doubles)]);
    let batch = load_batch(&path).unwrap();
    assert_eq!(batch.len(), 2);
    assert!(batch.iter().flat_map(|s| s.iter()).all(|&v| v == 0.25));

    let path = dir.path().join("bytes.npz");
    let bytes = ArrayD::<u8>::from_elem(IxDyn(&[1, 3, 3]), 7);
    write_npz(&path, &[("arr_0", bytes)]);
    let batch = load_batch(&path).unwrap();
    assert!(batch.iter().flat_map(|s| s.iter()).all(|&v| v == 7.0));
}

#[test]
fn integer_entries_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ints.npz");
    let ints = Array::from_elem(IxDyn(&[2, 2, 2]), 1i32);
    write_npz(&path, &[("arr_0", ints)]);

    let err = load_batch(&path).unwrap_err();
    assert!(
        matches!(err, LoadError::UnsupportedDtype { ref key } if key == "arr_0"),
        "got {err}"
    );
}

#[test]
fn container_without_arrays_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.npz");
    write_npz::<f32>(&path, &[]);

    let err = load_batch(&path).unwrap_err();
    assert!(matches!(err, LoadError::Empty(_)), "got {err}");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_batch(&dir.path().join("absent.npz")).unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }), "got {err}");
    assert!(err.to_string().contains("absent.npz"));
}

#[test]
fn non_archive_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.npz");
    std::fs::write(&path, b"definitely not a zip archive").unwrap();

    let err = load_batch(&path).unwrap_err();
    assert!(matches!(err, LoadError::Archive { .. }), "got {err}");
}

#[test]
fn scalar_entry_is_not_a_batch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scalar.npz");
    write_npz(&path, &[("arr_0", arr0(1.0f32).into_dyn())]);

    let err = load_batch(&path).unwrap_err();
    assert!(matches!(err, LoadError::NotABatch { .. }), "got {err}");
}
