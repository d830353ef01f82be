use crate::{
    core::{
        math::{min_max, point_from_parametric, seg_seg_intr, SegSegIntr, Vector2},
        traits::Real,
    },
    polygon::{BooleanOptions, Region},
};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

/// Straight edge of a region contour.
#[derive(Debug, Copy, Clone)]
pub struct RegionEdge<T> {
    pub start: Vector2<T>,
    pub end: Vector2<T>,
    /// Index of the contour within the region the edge belongs to.
    pub contour_index: usize,
}

/// Collect the edges of every contour in `region`, in contour order. Repeat positions are removed
/// first so no edge is degenerate.
pub fn collect_edges<T>(region: &Region<T>, pos_equal_eps: T) -> Vec<RegionEdge<T>>
where
    T: Real,
{
    let mut edges = Vec::new();
    for (contour_index, contour) in region.contours.iter().enumerate() {
        let cleaned = contour.remove_repeat_pos(pos_equal_eps);
        let contour = cleaned.as_ref().unwrap_or(contour);
        if contour.vertex_count() < 3 {
            continue;
        }

        edges.extend(contour.iter_segments().map(|(start, end)| RegionEdge {
            start,
            end,
            contour_index,
        }));
    }

    edges
}

/// Spatial index of the edges (edge index is the key), each bounding box padded by `pad`.
/// Returns `None` if there are no edges.
pub fn create_edge_index<T>(edges: &[RegionEdge<T>], pad: T) -> Option<StaticAABB2DIndex<T>>
where
    T: Real,
{
    if edges.is_empty() {
        return None;
    }

    let mut builder = StaticAABB2DIndexBuilder::new(edges.len());
    for e in edges.iter() {
        let (min_x, max_x) = min_max(e.start.x, e.end.x);
        let (min_y, max_y) = min_max(e.start.y, e.end.y);
        builder.add(min_x - pad, min_y - pad, max_x + pad, max_y + pad);
    }

    builder.build().ok()
}

/// Parametric split values found for the edges of both regions.
#[derive(Debug, Clone)]
pub struct EdgeSplitParams<T> {
    /// Split values for each edge of the first region (indexed like the edge list).
    pub edges1: Vec<Vec<T>>,
    /// Split values for each edge of the second region.
    pub edges2: Vec<Vec<T>>,
    /// Total number of intersect records found (overlaps count once).
    pub intersect_count: usize,
}

/// Find all intersects between the edges of two regions and record them as parametric split
/// values on both edges. Overlapping collinear edges record both ends of the shared stretch.
pub fn find_edge_split_params<T>(
    edges1: &[RegionEdge<T>],
    edges2: &[RegionEdge<T>],
    edges2_index: &StaticAABB2DIndex<T>,
    options: &BooleanOptions<T>,
) -> EdgeSplitParams<T>
where
    T: Real,
{
    let mut result = EdgeSplitParams {
        edges1: vec![Vec::new(); edges1.len()],
        edges2: vec![Vec::new(); edges2.len()],
        intersect_count: 0,
    };

    let eps = options.pos_equal_eps;
    let mut query_stack = Vec::with_capacity(8);
    for (i, e1) in edges1.iter().enumerate() {
        let (min_x, max_x) = min_max(e1.start.x, e1.end.x);
        let (min_y, max_y) = min_max(e1.start.y, e1.end.y);
        let candidates = edges2_index.query_with_stack(
            min_x - eps,
            min_y - eps,
            max_x + eps,
            max_y + eps,
            &mut query_stack,
        );

        for j in candidates {
            let e2 = &edges2[j];
            match seg_seg_intr(e1.start, e1.end, e2.start, e2.end, eps, options.collinear_eps) {
                SegSegIntr::NoIntersect => {}
                SegSegIntr::Point { seg1_t, seg2_t } => {
                    result.edges1[i].push(seg1_t);
                    result.edges2[j].push(seg2_t);
                    result.intersect_count += 1;
                }
                SegSegIntr::Overlapping {
                    seg1_t0,
                    seg1_t1,
                    seg2_t0,
                    seg2_t1,
                } => {
                    result.edges1[i].push(seg1_t0);
                    result.edges1[i].push(seg1_t1);
                    result.edges2[j].push(seg2_t0);
                    result.edges2[j].push(seg2_t1);
                    result.intersect_count += 1;
                }
            }
        }
    }

    result
}

/// Split each edge at its parametric values, returning `(start, end, contour_index)` pieces in
/// contour order. Split points within `pos_equal_eps` of a piece start or the edge end are
/// ignored.
pub fn split_edges<T>(
    edges: &[RegionEdge<T>],
    split_params: &mut [Vec<T>],
    pos_equal_eps: T,
) -> Vec<(Vector2<T>, Vector2<T>, usize)>
where
    T: Real,
{
    let mut pieces = Vec::with_capacity(edges.len());
    for (edge, params) in edges.iter().zip(split_params.iter_mut()) {
        params.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mut piece_start = edge.start;
        for &t in params.iter() {
            let split_point = point_from_parametric(edge.start, edge.end, t);
            if split_point.fuzzy_eq_eps(piece_start, pos_equal_eps) {
                continue;
            }

            if split_point.fuzzy_eq_eps(edge.end, pos_equal_eps) {
                break;
            }

            pieces.push((piece_start, split_point, edge.contour_index));
            piece_start = split_point;
        }

        pieces.push((piece_start, edge.end, edge.contour_index));
    }

    pieces
}
