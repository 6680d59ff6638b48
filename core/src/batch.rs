use ndarray::ArrayD;

/// Ordered collection of image samples, read-only once loaded.
#[derive(Clone, Debug)]
pub struct SampleBatch {
    key: String,
    samples: Vec<ArrayD<f32>>,
}

impl SampleBatch {
    pub fn new(key: impl Into<String>, samples: Vec<ArrayD<f32>>) -> Self {
        Self {
            key: key.into(),
            samples,
        }
    }

    /// Split a stacked array along its first axis, one sample per entry.
    pub fn from_stacked(key: impl Into<String>, stacked: &ArrayD<f32>) -> Self {
        let samples = stacked.outer_iter().map(|view| view.to_owned()).collect();
        Self::new(key, samples)
    }

    /// Name of the container entry the samples came from.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ArrayD<f32>> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArrayD<f32>> {
        self.samples.iter()
    }
}
