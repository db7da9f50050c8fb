use serde::{Deserialize, Serialize};

use crate::core::{AxisScale, RecordStore, Viewport};
use crate::error::{OverlayError, OverlayResult};

/// Position in screen space (plot units, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Mapping from data space to 2D screen space for a chosen pair of dimensions.
///
/// Projections are owned by the host and only read by overlays. All dimension
/// numbers are 1-based.
pub trait Projection {
    fn dimensionality(&self) -> usize;

    /// Full data extent of dimension `dim`.
    fn scale_of(&self, dim: usize) -> OverlayResult<AxisScale>;

    /// Embeds an n-dimensional `point` onto the `(dimx, dimy)` plane.
    fn project_2d(&self, point: &[f64], dimx: usize, dimy: usize) -> OverlayResult<Point>;

    fn viewport(&self) -> Viewport;
}

/// Converts a 1-based dimension number to a vector index.
pub(crate) fn dimension_index(dim: usize, dimensionality: usize) -> OverlayResult<usize> {
    if dim == 0 || dim > dimensionality {
        return Err(OverlayError::InvalidDimension {
            dim,
            dimensionality,
        });
    }
    Ok(dim - 1)
}

/// Axis-parallel scatterplot projection: each displayed dimension is scaled
/// linearly onto one side of the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisProjection {
    scales: Vec<AxisScale>,
    viewport: Viewport,
}

impl AxisProjection {
    pub fn new(scales: Vec<AxisScale>, viewport: Viewport) -> OverlayResult<Self> {
        if scales.is_empty() {
            return Err(OverlayError::InvalidData(
                "projection needs at least one axis scale".to_owned(),
            ));
        }
        if !viewport.is_valid() {
            return Err(OverlayError::InvalidData(format!(
                "invalid viewport size: width={}, height={}",
                viewport.width, viewport.height
            )));
        }
        Ok(Self { scales, viewport })
    }

    /// One scale per stored dimension, fitted to the records' value extent.
    pub fn fit(store: &dyn RecordStore, viewport: Viewport) -> OverlayResult<Self> {
        let records: Vec<_> = store.ids().into_iter().filter_map(|id| store.get(id)).collect();
        let scales = (0..store.dimensionality())
            .map(|index| {
                AxisScale::from_values(
                    records
                        .iter()
                        .filter_map(|record| record.values.get(index).copied()),
                )
            })
            .collect::<OverlayResult<Vec<_>>>()?;
        Self::new(scales, viewport)
    }

    #[must_use]
    pub fn scales(&self) -> &[AxisScale] {
        &self.scales
    }
}

impl Projection for AxisProjection {
    fn dimensionality(&self) -> usize {
        self.scales.len()
    }

    fn scale_of(&self, dim: usize) -> OverlayResult<AxisScale> {
        let index = dimension_index(dim, self.scales.len())?;
        Ok(self.scales[index])
    }

    fn project_2d(&self, point: &[f64], dimx: usize, dimy: usize) -> OverlayResult<Point> {
        if point.len() != self.scales.len() {
            return Err(OverlayError::InvalidData(format!(
                "point has {} coordinates, projection expects {}",
                point.len(),
                self.scales.len()
            )));
        }
        let ix = dimension_index(dimx, self.scales.len())?;
        let iy = dimension_index(dimy, self.scales.len())?;
        let x = self.scales[ix].normalize(point[ix]) * self.viewport.width;
        let y = (1.0 - self.scales[iy].normalize(point[iy])) * self.viewport.height;
        Ok(Point::new(x, y))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisProjection, Point, Projection};
    use crate::core::{AxisScale, InMemoryDatabase, Viewport};

    fn projection() -> AxisProjection {
        AxisProjection::new(
            vec![
                AxisScale::new(0.0, 10.0).expect("x"),
                AxisScale::new(-1.0, 10.0).expect("unused"),
                AxisScale::new(0.0, 5.0).expect("y"),
            ],
            Viewport::new(200.0, 100.0),
        )
        .expect("projection")
    }

    #[test]
    fn y_axis_points_downwards() {
        let p = projection();
        assert_eq!(
            p.project_2d(&[0.0, 3.0, 0.0], 1, 3).expect("origin"),
            Point::new(0.0, 100.0)
        );
        assert_eq!(
            p.project_2d(&[10.0, 3.0, 5.0], 1, 3).expect("corner"),
            Point::new(200.0, 0.0)
        );
    }

    #[test]
    fn rejects_bad_dimensions_and_points() {
        let p = projection();
        assert!(p.scale_of(0).is_err());
        assert!(p.scale_of(4).is_err());
        assert!(p.project_2d(&[1.0, 2.0], 1, 2).is_err());
        assert_eq!(p.scale_of(2).expect("dim 2").min(), -1.0);
    }

    #[test]
    fn fit_spans_stored_values() {
        let db = InMemoryDatabase::new(2)
            .expect("db")
            .with_record(1, vec![-2.0, 4.0], None)
            .with_record(2, vec![6.0, 4.0], None);
        let p = AxisProjection::fit(&db, Viewport::new(80.0, 10.0)).expect("fit");
        assert_eq!((p.scales()[0].min(), p.scales()[0].max()), (-2.0, 6.0));
        assert_eq!((p.scales()[1].min(), p.scales()[1].max()), (3.5, 4.5));
        assert_eq!(
            p.project_2d(&[6.0, 4.0], 1, 2).expect("corner"),
            Point::new(80.0, 5.0)
        );
        let empty = InMemoryDatabase::new(2).expect("db");
        assert!(AxisProjection::fit(&empty, Viewport::new(1.0, 1.0)).is_err());
    }
}
