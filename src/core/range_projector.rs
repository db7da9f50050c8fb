use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::projection::dimension_index;
use crate::core::{DimRange, Point, Projection};
use crate::error::{OverlayError, OverlayResult};

/// Corner list of a projected range, in drawing order.
pub type RangeVertices = SmallVec<[Point; 4]>;

/// A selected range sliced onto the two displayed axes.
///
/// The filled region and the frame outline share [`ProjectedRange::vertices`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRange {
    pub dimx: usize,
    pub dimy: usize,
    /// Effective data-space extent on `dimx`.
    pub x_range: DimRange,
    /// Effective data-space extent on `dimy`.
    pub y_range: DimRange,
    /// Effective per-dimension minimum, unconstrained dimensions resolved.
    pub min: Vec<f64>,
    /// Effective per-dimension maximum, unconstrained dimensions resolved.
    pub max: Vec<f64>,
    /// Screen-space corners: `(xmin, ymin)`, `(xmax, ymin)`, `(xmax, ymax)`, `(xmin, ymax)`.
    pub vertices: RangeVertices,
}

impl ProjectedRange {
    /// Screen-space bounding box as `(left, top, right, bottom)`.
    #[must_use]
    pub fn screen_bounds(&self) -> (f64, f64, f64, f64) {
        let mut left = f64::INFINITY;
        let mut top = f64::INFINITY;
        let mut right = f64::NEG_INFINITY;
        let mut bottom = f64::NEG_INFINITY;
        for vertex in &self.vertices {
            left = left.min(vertex.x);
            right = right.max(vertex.x);
            top = top.min(vertex.y);
            bottom = bottom.max(vertex.y);
        }
        (left, top, right, bottom)
    }
}

/// Resolves the effective `(min, max)` per dimension: the selected range when
/// present, otherwise the projection's full scale extent.
pub fn resolve_extents(
    ranges: &[Option<DimRange>],
    projection: &dyn Projection,
) -> OverlayResult<(Vec<f64>, Vec<f64>)> {
    let dimensionality = projection.dimensionality();
    if ranges.len() != dimensionality {
        return Err(OverlayError::InvalidData(format!(
            "selection covers {} dimensions, projection has {dimensionality}",
            ranges.len()
        )));
    }

    let mut min = Vec::with_capacity(dimensionality);
    let mut max = Vec::with_capacity(dimensionality);
    for (index, range) in ranges.iter().enumerate() {
        match range {
            Some(range) => {
                min.push(range.min);
                max.push(range.max);
            }
            None => {
                let scale = projection.scale_of(index + 1)?;
                min.push(scale.min());
                max.push(scale.max());
            }
        }
    }
    Ok((min, max))
}

/// Projects an n-dimensional axis-aligned range onto the `(dimx, dimy)` plane.
///
/// Only the two displayed axes shape the polygon; every other dimension is
/// resolved (so unconstrained ones never fail) but does not affect the result.
/// Degenerate ranges produce a zero-width polygon.
pub fn project_range(
    ranges: &[Option<DimRange>],
    projection: &dyn Projection,
    dimx: usize,
    dimy: usize,
) -> OverlayResult<ProjectedRange> {
    let (min, max) = resolve_extents(ranges, projection)?;
    let ix = dimension_index(dimx, min.len())?;
    let iy = dimension_index(dimy, min.len())?;
    if ix == iy {
        return Err(OverlayError::InvalidData(format!(
            "displayed dimensions must differ (got {dimx} twice)"
        )));
    }

    let corners = [
        (min[ix], min[iy]),
        (max[ix], min[iy]),
        (max[ix], max[iy]),
        (min[ix], max[iy]),
    ];
    let mut vertices = RangeVertices::new();
    let mut point = min.clone();
    for (x, y) in corners {
        point[ix] = x;
        point[iy] = y;
        vertices.push(projection.project_2d(&point, dimx, dimy)?);
    }

    Ok(ProjectedRange {
        dimx,
        dimy,
        x_range: DimRange::new(min[ix], max[ix])?,
        y_range: DimRange::new(min[iy], max[iy])?,
        min,
        max,
        vertices,
    })
}

#[cfg(test)]
mod tests {
    use super::{project_range, resolve_extents};
    use crate::core::{AxisProjection, AxisScale, DimRange, Viewport};

    fn projection() -> AxisProjection {
        AxisProjection::new(
            vec![
                AxisScale::new(0.0, 4.0).expect("d1"),
                AxisScale::new(-1.0, 10.0).expect("d2"),
                AxisScale::new(0.0, 10.0).expect("d3"),
            ],
            Viewport::new(100.0, 100.0),
        )
        .expect("projection")
    }

    #[test]
    fn unconstrained_dimensions_fall_back_to_scale_extent() {
        let ranges = [None, None, Some(DimRange::new(2.0, 3.0).expect("range"))];
        let (min, max) = resolve_extents(&ranges, &projection()).expect("extents");
        assert_eq!(min, vec![0.0, -1.0, 2.0]);
        assert_eq!(max, vec![4.0, 10.0, 3.0]);
    }

    #[test]
    fn vertices_follow_corner_order() {
        let ranges = [
            Some(DimRange::new(1.0, 2.0).expect("x")),
            None,
            Some(DimRange::new(0.0, 5.0).expect("y")),
        ];
        let projected = project_range(&ranges, &projection(), 1, 3).expect("projected");
        let xs: Vec<f64> = projected.vertices.iter().map(|v| v.x).collect();
        let ys: Vec<f64> = projected.vertices.iter().map(|v| v.y).collect();
        assert_eq!(xs, vec![25.0, 50.0, 50.0, 25.0]);
        assert_eq!(ys, vec![100.0, 100.0, 50.0, 50.0]);
        assert_eq!(projected.screen_bounds(), (25.0, 50.0, 50.0, 100.0));
    }

    #[test]
    fn mismatched_or_repeated_dimensions_fail() {
        let p = projection();
        assert!(project_range(&[None, None], &p, 1, 2).is_err());
        assert!(project_range(&[None, None, None], &p, 2, 2).is_err());
        assert!(project_range(&[None, None, None], &p, 1, 4).is_err());
    }
}
