//! Labeled feature vectors and the dataset that holds them.

use std::ops::Index;

use crate::error::{KnnError, Result};

/// Class label attached to every training instance.
pub type Label = u32;

/// One labeled data point.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    features: Vec<f64>,
    label: Label,
}

impl Instance {
    /// Creates an instance from its feature vector and label.
    ///
    /// Fails with [`KnnError::EmptyFeatures`] if `features` is empty.
    pub fn new(features: Vec<f64>, label: Label) -> Result<Self> {
        if features.is_empty() {
            return Err(KnnError::EmptyFeatures);
        }
        Ok(Self { features, label })
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn label(&self) -> Label {
        self.label
    }

    /// Number of features.
    pub fn dimension(&self) -> usize {
        self.features.len()
    }
}

/// An ordered, read-only collection of instances sharing one dimension.
///
/// The dimension is fixed by the first instance; every later instance must
/// match it. An empty dataset has dimension 0 and cannot be classified against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    instances: Vec<Instance>,
    dimension: usize,
}

impl Dataset {
    /// Builds a dataset, checking that every instance has the same dimension.
    pub fn new(instances: Vec<Instance>) -> Result<Self> {
        let dimension = instances.first().map_or(0, Instance::dimension);
        if let Some(bad) = instances.iter().find(|i| i.dimension() != dimension) {
            return Err(KnnError::DimensionMismatch {
                expected: dimension,
                found: bad.dimension(),
            });
        }
        Ok(Self {
            instances,
            dimension,
        })
    }

    /// Builds a dataset from parallel feature and label vectors.
    pub fn from_parts(features: Vec<Vec<f64>>, labels: Vec<Label>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(KnnError::InvalidArgument(format!(
                "features and labels must have same length ({} != {})",
                features.len(),
                labels.len()
            )));
        }
        let instances = features
            .into_iter()
            .zip(labels)
            .map(|(f, l)| Instance::new(f, l))
            .collect::<Result<Vec<_>>>()?;
        Self::new(instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Feature dimension shared by every instance (0 when empty).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    /// Checks that `query` has this dataset's dimension.
    pub fn check_query(&self, query: &[f64]) -> Result<()> {
        if query.len() != self.dimension {
            return Err(KnnError::DimensionMismatch {
                expected: self.dimension,
                found: query.len(),
            });
        }
        Ok(())
    }
}

impl Index<usize> for Dataset {
    type Output = Instance;

    fn index(&self, index: usize) -> &Instance {
        &self.instances[index]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
