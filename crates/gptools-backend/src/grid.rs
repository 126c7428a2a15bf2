//! Cartesian-product coordinate grids.

use scirs2_core::ndarray::{Array1, Array2};

use crate::error::{BackendError, BackendResult};

/// Cartesian product of per-dimension coordinates.
///
/// Returns an array of shape `(Π sizes, ndim)` whose rows enumerate every
/// combination of coordinates in row-major order, i.e., the coordinate of the
/// last dimension varies fastest. Reshaping a per-row quantity to the tuple of
/// sizes therefore yields the usual `ij`-indexed grid.
///
/// # Examples
/// ```
/// use gptools_backend::grid::coordgrid;
/// use scirs2_core::ndarray::array;
///
/// let grid = coordgrid(&[array![0, 1], array![10, 20, 30]]).unwrap();
/// assert_eq!(grid.shape(), &[6, 2]);
/// assert_eq!(grid.row(4).to_vec(), vec![1, 20]);
/// ```
pub fn coordgrid<A: Clone>(axes: &[Array1<A>]) -> BackendResult<Array2<A>> {
    let ndim = axes.len();
    let sizes: Vec<usize> = axes.iter().map(|axis| axis.len()).collect();
    let rows: usize = sizes.iter().product();

    let mut data = Vec::with_capacity(rows * ndim);
    let mut index = vec![0usize; ndim];
    for _ in 0..rows {
        data.extend(axes.iter().zip(&index).map(|(axis, &i)| axis[i].clone()));
        // Odometer increment, last dimension fastest.
        for dim in (0..ndim).rev() {
            index[dim] += 1;
            if index[dim] < sizes[dim] {
                break;
            }
            index[dim] = 0;
        }
    }

    Array2::from_shape_vec((rows, ndim), data)
        .map_err(|err| BackendError::InvalidOperation(format!("coordinate grid: {}", err)))
}
