//! Index paths for addressing rows in sectioned lists.

use std::fmt;

/// Locates a row within a sectioned list.
///
/// Header and footer views are bound with the index path of their section
/// and row `0`; events they raise usually carry no index path at all.
///
/// Index paths are positional. After the sections are replaced, a previously
/// obtained index path may point at a different row or at nothing.
///
/// # Example
///
/// ```
/// use trellis::model::IndexPath;
///
/// let path = IndexPath::new(0, 1);
/// assert_eq!(path.section(), 0);
/// assert_eq!(path.row(), 1);
/// assert_eq!(path.to_string(), "0:1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    section: usize,
    row: usize,
}

impl IndexPath {
    /// Creates an index path for `row` in `section`.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Creates the index path bound to a section's header or footer view.
    #[inline]
    pub const fn for_section(section: usize) -> Self {
        Self { section, row: 0 }
    }

    /// Returns the section.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row within the section.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns the index path of a sibling row in the same section.
    #[inline]
    pub const fn with_row(self, row: usize) -> Self {
        Self {
            section: self.section,
            row,
        }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.row)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_path_ordering() {
        let mut paths = vec![IndexPath::new(1, 0), IndexPath::new(0, 2), IndexPath::new(0, 1)];
        paths.sort();
        assert_eq!(paths, vec![IndexPath::new(0, 1), IndexPath::new(0, 2), IndexPath::new(1, 0)]);
    }

    #[test]
    fn test_index_path_for_section() {
        let path = IndexPath::for_section(3);
        assert_eq!(path, IndexPath::new(3, 0));
        assert_eq!(path.with_row(4), IndexPath::new(3, 4));
    }

    #[test]
    fn test_index_path_from_tuple() {
        assert_eq!(IndexPath::from((2, 5)), IndexPath::new(2, 5));
    }
}
