// Python bindings, enabled with the `python` feature.
//
// Everything crossing the boundary is plain numbers or numpy arrays; the
// tree itself stays on the Rust side inside the `Quadtree` class.

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{BoundsPolicy, BuildError, Point, Quadtree, QuadtreeBuilder, Rect};

impl From<BuildError> for PyErr {
    fn from(err: BuildError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn parse_policy(name: &str) -> PyResult<BoundsPolicy> {
    match name {
        "skip" => Ok(BoundsPolicy::Skip),
        "strict" => Ok(BoundsPolicy::Strict),
        "clamp" => Ok(BoundsPolicy::Clamp),
        other => Err(PyValueError::new_err(format!(
            "unknown bounds_policy {other:?}, expected 'skip', 'strict' or 'clamp'"
        ))),
    }
}

#[pyclass(name = "Quadtree", module = "quadflat", frozen)]
pub struct PyQuadtree {
    inner: Quadtree,
}

#[pymethods]
impl PyQuadtree {
    /// Quadtree(points, extent, max_depth=32, bounds_policy="skip", dedup=False)
    ///
    /// `points` is an (n, 2) float64 array, `extent` is (min_x, min_y, max_x, max_y).
    #[new]
    #[pyo3(signature = (points, extent, max_depth = 32, bounds_policy = String::from("skip"), dedup = false))]
    fn new(
        points: PyReadonlyArray2<'_, f64>,
        extent: (f64, f64, f64, f64),
        max_depth: u32,
        bounds_policy: String,
        dedup: bool,
    ) -> PyResult<Self> {
        let view = points.as_array();
        if view.ncols() != 2 {
            return Err(PyValueError::new_err(format!(
                "points must have shape (n, 2), got (n, {})",
                view.ncols()
            )));
        }
        let pts: Vec<Point> = view.rows().into_iter().map(|row| Point::new(row[0], row[1])).collect();
        let (min_x, min_y, max_x, max_y) = extent;
        let inner = QuadtreeBuilder::new()
            .max_depth(max_depth)
            .bounds_policy(parse_policy(&bounds_policy)?)
            .dedup(dedup)
            .build(&pts, Rect::new(min_x, min_y, max_x, max_y))?;
        Ok(PyQuadtree { inner })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("Quadtree(len={}, nodes={})", self.inner.len(), self.inner.node_count())
    }

    #[getter]
    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Input indices of the points left out of the tree.
    #[getter]
    fn rejected(&self) -> Vec<usize> {
        self.inner.rejected().iter().map(|r| r.index).collect()
    }

    /// Returns (rects (m, 4), depths (m,), flags (m, 2) as [is_leaf, has_point], max_depth).
    #[allow(clippy::type_complexity)]
    fn flatten<'py>(
        &self,
        py: Python<'py>,
    ) -> PyResult<(
        Bound<'py, PyArray2<f64>>,
        Bound<'py, PyArray1<u32>>,
        Bound<'py, PyArray2<bool>>,
        u32,
    )> {
        let flat = self.inner.flatten();
        let n = flat.len();
        let mut rects = Vec::with_capacity(n * 4);
        let mut flags = Vec::with_capacity(n * 2);
        let mut depths = Vec::with_capacity(n);
        for r in &flat {
            rects.extend_from_slice(&[r.rect.min_x, r.rect.min_y, r.rect.max_x, r.rect.max_y]);
            flags.extend_from_slice(&[r.is_leaf, r.has_point]);
            depths.push(r.depth);
        }
        let rects = Array2::from_shape_vec((n, 4), rects).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let flags = Array2::from_shape_vec((n, 2), flags).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((rects.into_pyarray(py), depths.into_pyarray(py), flags.into_pyarray(py), flat.max_depth))
    }

    /// Input indices of the points inside the closed rectangle.
    fn query(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<usize> {
        self.inner
            .query(Rect::new(min_x, min_y, max_x, max_y))
            .into_iter()
            .map(|it| it.index)
            .collect()
    }
}

#[pymodule]
fn quadflat(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyQuadtree>()?;
    Ok(())
}
