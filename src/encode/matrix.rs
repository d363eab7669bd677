//! Dense row-major feature matrix.

/// Instances × feature-length matrix backed by one contiguous buffer
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl FeatureMatrix {
    /// Create an empty matrix with a fixed number of columns
    #[must_use]
    pub const fn with_columns(cols: usize) -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols,
        }
    }

    /// Append one row
    ///
    /// The row length must equal the column count the matrix was created
    /// with; a mismatch is a caller bug.
    pub fn push_row(&mut self, row: &[f32]) {
        assert_eq!(row.len(), self.cols, "feature row length mismatch");
        self.data.extend_from_slice(row);
        self.rows += 1;
    }

    /// Number of instance rows
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Feature length per row
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// One instance row
    #[must_use]
    pub fn row(&self, index: usize) -> &[f32] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    /// The whole buffer in row-major order
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Whether the matrix holds no rows
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
