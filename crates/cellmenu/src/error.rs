#![forbid(unsafe_code)]

//! Build-time configuration errors.
//!
//! Runtime navigation never fails: unresolvable page changes, scrolls past
//! the end, and clicks on empty cells are silent no-ops.

use std::fmt;

/// Errors reported by [`SurfaceBuilder::build`](crate::surface::SurfaceBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The default page was never defined.
    UndefinedDefaultPage {
        page: u32,
        /// Page indices that were defined, ascending.
        defined: Vec<u32>,
    },
    /// Page indices start at 1.
    InvalidPageIndex(u32),
    /// The surface type has zero rows or zero columns.
    EmptySurfaceType { rows: u16, columns: u16 },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedDefaultPage { page, defined } => {
                write!(f, "default page {page} is not defined (defined pages: {defined:?})")
            }
            Self::InvalidPageIndex(page) => {
                write!(f, "invalid page index {page}: page indices start at 1")
            }
            Self::EmptySurfaceType { rows, columns } => {
                write!(f, "surface type {rows}x{columns} has no cells")
            }
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_page() {
        let err = BuildError::UndefinedDefaultPage {
            page: 3,
            defined: vec![1, 2],
        };
        assert_eq!(
            err.to_string(),
            "default page 3 is not defined (defined pages: [1, 2])"
        );
    }

    #[test]
    fn display_invalid_index() {
        assert_eq!(
            BuildError::InvalidPageIndex(0).to_string(),
            "invalid page index 0: page indices start at 1"
        );
    }
}
