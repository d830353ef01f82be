use super::region_intersects::{
    collect_edges, create_edge_index, find_edge_split_params, split_edges, RegionEdge,
};
use crate::{
    core::{
        math::{dist_squared, line_seg_closest_point, midpoint, turn_angle, Vector2},
        traits::Real,
    },
    polygon::{BooleanOp, BooleanOptions, Contour, Region},
};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

/// Which operand of the boolean operation a piece came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    First,
    Second,
}

/// Position of a piece relative to the other operand's region.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceClass {
    Inside,
    Outside,
    /// Lies on the other operand's boundary running the same direction.
    SharedSameDirection,
    /// Lies on the other operand's boundary running the opposite direction.
    SharedOppositeDirection,
}

/// Piece of an operand boundary between two consecutive split points.
#[derive(Debug, Copy, Clone)]
pub struct BooleanPiece<T> {
    pub start: Vector2<T>,
    pub end: Vector2<T>,
    pub source: Operand,
    pub contour_index: usize,
    /// Position of the piece along its source contour.
    pub order: usize,
    /// Number of pieces the source contour was split into.
    pub contour_piece_count: usize,
    /// Piece direction was reversed when selected.
    pub reversed: bool,
}

impl<T> BooleanPiece<T>
where
    T: Real,
{
    #[inline]
    pub fn direction(&self) -> Vector2<T> {
        self.end - self.start
    }

    /// Returns true if `other` is the piece that follows this one along the same source contour
    /// (taking reversal into account).
    pub fn is_followed_by(&self, other: &BooleanPiece<T>) -> bool {
        if self.source != other.source
            || self.contour_index != other.contour_index
            || self.reversed != other.reversed
        {
            return false;
        }

        let count = self.contour_piece_count;
        let next_order = if self.reversed {
            (self.order + count - 1) % count
        } else {
            (self.order + 1) % count
        };

        other.order == next_order
    }

    fn into_reversed(self) -> Self {
        BooleanPiece {
            start: self.end,
            end: self.start,
            reversed: !self.reversed,
            ..self
        }
    }
}

/// Build the pieces for one operand, numbering them along their source contours.
fn create_pieces<T>(
    edges: &[RegionEdge<T>],
    split_params: &mut [Vec<T>],
    source: Operand,
    pos_equal_eps: T,
) -> Vec<BooleanPiece<T>>
where
    T: Real,
{
    let split = split_edges(edges, split_params, pos_equal_eps);
    let mut pieces: Vec<BooleanPiece<T>> = Vec::with_capacity(split.len());
    let mut contour_start = 0;
    for (i, &(start, end, contour_index)) in split.iter().enumerate() {
        if i > 0 && split[i - 1].2 != contour_index {
            contour_start = i;
        }

        pieces.push(BooleanPiece {
            start,
            end,
            source,
            contour_index,
            order: i - contour_start,
            contour_piece_count: 0,
            reversed: false,
        });
    }

    // fill in piece counts per contour now that all pieces are known
    let mut i = 0;
    while i < pieces.len() {
        let contour_index = pieces[i].contour_index;
        let mut j = i;
        while j < pieces.len() && pieces[j].contour_index == contour_index {
            j += 1;
        }

        for p in pieces[i..j].iter_mut() {
            p.contour_piece_count = j - i;
        }

        i = j;
    }

    pieces
}

/// Classify a piece against the other operand by its midpoint.
pub fn classify_piece<T>(
    piece: &BooleanPiece<T>,
    other_region: &Region<T>,
    other_edges: &[RegionEdge<T>],
    other_index: &StaticAABB2DIndex<T>,
    pos_equal_eps: T,
    query_stack: &mut Vec<usize>,
) -> PieceClass
where
    T: Real,
{
    let m = midpoint(piece.start, piece.end);
    let candidates = other_index.query_with_stack(
        m.x - pos_equal_eps,
        m.y - pos_equal_eps,
        m.x + pos_equal_eps,
        m.y + pos_equal_eps,
        query_stack,
    );

    let eps_sq = pos_equal_eps * pos_equal_eps;
    for j in candidates {
        let edge = &other_edges[j];
        let closest = line_seg_closest_point(edge.start, edge.end, m);
        if dist_squared(closest, m) < eps_sq {
            return if piece.direction().dot(edge.end - edge.start) > T::zero() {
                PieceClass::SharedSameDirection
            } else {
                PieceClass::SharedOppositeDirection
            };
        }
    }

    if other_region.winding_number(m) != 0 {
        PieceClass::Inside
    } else {
        PieceClass::Outside
    }
}

/// Decide whether a classified piece is part of the result boundary, returning it (reversed if
/// required) when kept.
fn select_piece<T>(
    piece: BooleanPiece<T>,
    class: PieceClass,
    operation: BooleanOp,
) -> Option<BooleanPiece<T>>
where
    T: Real,
{
    use Operand::*;
    use PieceClass::*;
    match (operation, piece.source, class) {
        (BooleanOp::Or, First, Outside | SharedSameDirection) => Some(piece),
        (BooleanOp::Or, Second, Outside) => Some(piece),
        (BooleanOp::And, First, Inside | SharedSameDirection) => Some(piece),
        (BooleanOp::And, Second, Inside) => Some(piece),
        (BooleanOp::Not, First, Outside | SharedOppositeDirection) => Some(piece),
        (BooleanOp::Not, Second, Inside) => Some(piece.into_reversed()),
        _ => None,
    }
}

/// Chooses the next piece while stitching pieces into closed contours.
pub trait StitchSelector<T> {
    fn select(
        &self,
        current: &BooleanPiece<T>,
        available_idx: &[usize],
        pieces: &[BooleanPiece<T>],
    ) -> Option<usize>;
}

/// Prefer continuing along the same source contour, otherwise take the sharpest left turn so the
/// traced contour hugs the filled area.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuityStitchSelector;

impl<T> StitchSelector<T> for ContinuityStitchSelector
where
    T: Real,
{
    fn select(
        &self,
        current: &BooleanPiece<T>,
        available_idx: &[usize],
        pieces: &[BooleanPiece<T>],
    ) -> Option<usize> {
        let available = || available_idx.iter().copied();
        let incoming = current.direction();
        available()
            .find(|&i| current.is_followed_by(&pieces[i]))
            .or_else(|| {
                available().max_by(|&i, &j| {
                    let a = turn_angle(incoming, pieces[i].direction());
                    let b = turn_angle(incoming, pieces[j].direction());
                    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
                })
            })
    }
}

/// Stitch selected pieces into closed contours. Chains that cannot be closed are discarded.
pub fn stitch_pieces_into_contours<T, S>(
    pieces: &[BooleanPiece<T>],
    stitch_selector: &S,
    slice_join_eps: T,
) -> Vec<Contour<T>>
where
    T: Real,
    S: StitchSelector<T>,
{
    let mut result = Vec::new();
    if pieces.is_empty() {
        return result;
    }

    // load all the piece start points into spatial index
    let aabb_index = {
        let mut builder = StaticAABB2DIndexBuilder::new(pieces.len());
        for p in pieces.iter() {
            builder.add(
                p.start.x - slice_join_eps,
                p.start.y - slice_join_eps,
                p.start.x + slice_join_eps,
                p.start.y + slice_join_eps,
            );
        }

        match builder.build() {
            Ok(index) => index,
            Err(e) => {
                log::warn!("failed to build stitch index: {e}");
                return result;
            }
        }
    };

    let mut visited = vec![false; pieces.len()];
    let mut query_results = Vec::new();
    let mut query_stack = Vec::with_capacity(8);

    for i in 0..pieces.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let beginning_idx = i;
        let mut current_idx = i;
        let mut points = vec![pieces[i].start];
        let mut loop_count = 0;
        let max_loop_count = pieces.len();
        loop {
            if loop_count > max_loop_count {
                log::trace!("stitch loop count exceeded, discarding chain");
                break;
            }
            loop_count += 1;

            query_results.clear();
            let mut query_visitor = |j: usize| {
                // skip already visited
                if j == beginning_idx || !visited[j] {
                    query_results.push(j);
                }
            };

            let ep = pieces[current_idx].end;
            aabb_index.visit_query_with_stack(
                ep.x - slice_join_eps,
                ep.y - slice_join_eps,
                ep.x + slice_join_eps,
                ep.y + slice_join_eps,
                &mut query_visitor,
                &mut query_stack,
            );

            if query_results.is_empty() {
                // may arrive here due to epsilon/thresholds around shared boundaries
                log::trace!("discarding open chain of {} pieces", points.len());
                break;
            }

            if query_results.contains(&beginning_idx) {
                // connected back to beginning
                if points.len() >= 3 {
                    result.push(Contour::from_points(points));
                }
                break;
            }

            match stitch_selector.select(&pieces[current_idx], &query_results, pieces) {
                None => break,
                Some(next_idx) => {
                    visited[next_idx] = true;
                    points.push(pieces[next_idx].start);
                    current_idx = next_idx;
                }
            }
        }
    }

    result
}

/// Remove repeat points and collinear points from stitched contours and drop slivers.
fn clean_contours<T>(contours: Vec<Contour<T>>, options: &BooleanOptions<T>) -> Region<T>
where
    T: Real,
{
    Region::from_contours(contours.into_iter().filter_map(|c| {
        let c = c.remove_repeat_pos(options.slice_join_eps).unwrap_or(c);
        let c = c
            .remove_collinear(options.collinear_eps, options.pos_equal_eps)
            .unwrap_or(c);
        if c.vertex_count() < 3 || c.area().abs() < options.empty_area_eps {
            None
        } else {
            Some(c)
        }
    }))
}

fn extents_overlap<T>(r1: &Region<T>, r2: &Region<T>, eps: T) -> bool
where
    T: Real,
{
    match (r1.extents(), r2.extents()) {
        (Some(a), Some(b)) => {
            a.min_x <= b.max_x + eps
                && b.min_x <= a.max_x + eps
                && a.min_y <= b.max_y + eps
                && b.min_y <= a.max_y + eps
        }
        _ => false,
    }
}

/// Result when the operands do not share any boundary (one may still contain the other).
fn disjoint_result<T>(r1: &Region<T>, r2: &Region<T>, operation: BooleanOp) -> Region<T>
where
    T: Real,
{
    match operation {
        BooleanOp::Or => Region::from_contours(r1.contours.iter().chain(&r2.contours).cloned()),
        BooleanOp::And => Region::new(),
        BooleanOp::Not => r1.clone(),
        BooleanOp::Xor => Region::from_contours(r1.contours.iter().chain(&r2.contours).cloned()),
    }
}

/// Perform a boolean operation between two regions.
///
/// Both operand boundaries are split at every intersect, each piece is classified against the
/// other operand, the pieces forming the result boundary are kept and finally stitched back into
/// closed contours.
pub fn region_boolean<T>(
    r1: &Region<T>,
    r2: &Region<T>,
    operation: BooleanOp,
    options: &BooleanOptions<T>,
) -> Region<T>
where
    T: Real,
{
    if operation == BooleanOp::Xor {
        let mut result = region_boolean(r1, r2, BooleanOp::Not, options);
        let other = region_boolean(r2, r1, BooleanOp::Not, options);
        result.contours.extend(other.contours);
        return result;
    }

    let pos_equal_eps = options.pos_equal_eps;
    if !extents_overlap(r1, r2, pos_equal_eps) {
        return clean_contours(disjoint_result(r1, r2, operation).contours, options);
    }

    let edges1 = collect_edges(r1, pos_equal_eps);
    let edges2 = collect_edges(r2, pos_equal_eps);
    let (index1, index2) = match (
        create_edge_index(&edges1, pos_equal_eps),
        create_edge_index(&edges2, pos_equal_eps),
    ) {
        (Some(i1), Some(i2)) => (i1, i2),
        _ => return clean_contours(disjoint_result(r1, r2, operation).contours, options),
    };

    let mut split_params = find_edge_split_params(&edges1, &edges2, &index2, options);
    log::trace!(
        "{operation:?}: {} edges, {} edges, {} intersects",
        edges1.len(),
        edges2.len(),
        split_params.intersect_count
    );

    let mut pieces = create_pieces(
        &edges1,
        &mut split_params.edges1,
        Operand::First,
        pos_equal_eps,
    );
    pieces.extend(create_pieces(
        &edges2,
        &mut split_params.edges2,
        Operand::Second,
        pos_equal_eps,
    ));

    let mut query_stack = Vec::with_capacity(8);
    let selected: Vec<BooleanPiece<T>> = pieces
        .into_iter()
        .filter_map(|piece| {
            let class = match piece.source {
                Operand::First => {
                    classify_piece(&piece, r2, &edges2, &index2, pos_equal_eps, &mut query_stack)
                }
                Operand::Second => {
                    classify_piece(&piece, r1, &edges1, &index1, pos_equal_eps, &mut query_stack)
                }
            };
            select_piece(piece, class, operation)
        })
        .collect();

    let contours =
        stitch_pieces_into_contours(&selected, &ContinuityStitchSelector, options.slice_join_eps);
    clean_contours(contours, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Region {
        Region::from_contours(vec![contour![
            (x, y),
            (x + w, y),
            (x + w, y + h),
            (x, y + h)
        ]])
    }

    fn boolean(a: &Region, b: &Region, op: BooleanOp) -> Region {
        region_boolean(a, b, op, &BooleanOptions::new())
    }

    #[test]
    fn overlapping_squares() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 1.0, 2.0, 2.0);
        assert_fuzzy_eq!(boolean(&a, &b, BooleanOp::Or).area(), 7.0);
        assert_fuzzy_eq!(boolean(&a, &b, BooleanOp::And).area(), 1.0);
        assert_fuzzy_eq!(boolean(&a, &b, BooleanOp::Not).area(), 3.0);
        assert_fuzzy_eq!(boolean(&b, &a, BooleanOp::Not).area(), 3.0);
        let xor = boolean(&a, &b, BooleanOp::Xor);
        assert_fuzzy_eq!(xor.area(), 6.0);
        assert_eq!(xor.contour_count(), 2);
    }

    #[test]
    fn union_of_disjoint_keeps_both() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(5.0, 5.0, 1.0, 1.0);
        let r = boolean(&a, &b, BooleanOp::Or);
        assert_eq!(r.contour_count(), 2);
        assert!(boolean(&a, &b, BooleanOp::And).is_empty());
    }

    #[test]
    fn subtract_contained_creates_hole() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(2.0, 2.0, 2.0, 2.0);
        let r = boolean(&a, &b, BooleanOp::Not);
        assert_eq!(r.contour_count(), 2);
        assert_fuzzy_eq!(r.area(), 96.0);
        assert_eq!(r.outer_count(), 1);
    }

    #[test]
    fn identical_operands() {
        let a = rect(0.0, 0.0, 3.0, 3.0);
        assert_fuzzy_eq!(boolean(&a, &a, BooleanOp::Or).area(), 9.0);
        assert_fuzzy_eq!(boolean(&a, &a, BooleanOp::And).area(), 9.0);
        assert!(boolean(&a, &a, BooleanOp::Not).is_empty());
    }

    #[test]
    fn edge_sharing_rectangles_union_to_one_contour() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(2.0, 0.0, 2.0, 2.0);
        let r = boolean(&a, &b, BooleanOp::Or);
        assert_eq!(r.contour_count(), 1);
        assert_fuzzy_eq!(r.area(), 8.0);
        assert_eq!(r.contours[0].vertex_count(), 4);
        assert!(boolean(&a, &b, BooleanOp::And).is_empty());
    }

    #[test]
    fn piece_continuation_wraps() {
        let piece = |order, reversed| BooleanPiece {
            start: Vector2::new(0.0, 0.0),
            end: Vector2::new(1.0, 0.0),
            source: Operand::First,
            contour_index: 0,
            order,
            contour_piece_count: 3,
            reversed,
        };

        assert!(piece(2, false).is_followed_by(&piece(0, false)));
        assert!(piece(0, true).is_followed_by(&piece(2, true)));
        assert!(!piece(0, false).is_followed_by(&piece(2, false)));
    }
}
