use super::{internal::region_boolean::region_boolean, BooleanOp, BooleanOptions, Contour};
use crate::core::{math::Vector2, traits::Real};
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Area enclosed by a set of closed contours under the non-zero winding rule.
///
/// Outer boundaries are counter clockwise (positive area), holes are clockwise (negative area).
/// Results of [Region::boolean] follow that convention and contain no contours with fewer than 3
/// points.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region<T = f64> {
    pub contours: Vec<Contour<T>>,
}

impl<T> Region<T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Region {
            contours: Vec::new(),
        }
    }

    /// Create a region from contours, contours with fewer than 3 points are discarded.
    pub fn from_contours<I>(contours: I) -> Self
    where
        I: IntoIterator<Item = Contour<T>>,
    {
        Region {
            contours: contours
                .into_iter()
                .filter(|c| c.vertex_count() >= 3)
                .collect(),
        }
    }

    /// Region filled by a single contour regardless of the contour's direction.
    pub fn from_filled_contour(contour: &Contour<T>) -> Self {
        Self::from_contours(std::iter::once(contour.normalized_positive()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    #[inline]
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// Number of outer (positive area) contours.
    pub fn outer_count(&self) -> usize {
        self.contours
            .iter()
            .filter(|c| c.area() > T::zero())
            .count()
    }

    /// Number of hole (negative area) contours.
    pub fn hole_count(&self) -> usize {
        self.contours
            .iter()
            .filter(|c| c.area() < T::zero())
            .count()
    }

    /// Net enclosed area (sum of signed contour areas).
    pub fn area(&self) -> T {
        self.contours
            .iter()
            .fold(T::zero(), |acc, c| acc + c.area())
    }

    /// Combined bounding box of all contours, `None` if the region is empty.
    pub fn extents(&self) -> Option<AABB<T>> {
        let mut iter = self.contours.iter().filter_map(|c| c.extents());
        let first = iter.next()?;
        Some(iter.fold(first, |acc, e| {
            AABB::new(
                num_traits::real::Real::min(acc.min_x, e.min_x),
                num_traits::real::Real::min(acc.min_y, e.min_y),
                num_traits::real::Real::max(acc.max_x, e.max_x),
                num_traits::real::Real::max(acc.max_y, e.max_y),
            )
        }))
    }

    /// Sum of the winding numbers of all contours around `point`.
    pub fn winding_number(&self, point: Vector2<T>) -> i32 {
        self.contours.iter().map(|c| c.winding_number(point)).sum()
    }

    /// Returns true if `point` is inside the region (non-zero winding).
    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.winding_number(point) != 0
    }

    pub fn translate_mut(&mut self, x_offset: T, y_offset: T) {
        for c in self.contours.iter_mut() {
            c.translate_mut(x_offset, y_offset);
        }
    }

    /// Split the region into its connected components.
    ///
    /// Each outer contour becomes its own region. Every hole is assigned to the smallest outer
    /// contour that contains it. A region with at most one outer contour is returned whole.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shape_boolean::contour;
    /// # use shape_boolean::polygon::*;
    /// let region = Region::from_contours(vec![
    ///     contour![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
    ///     contour![(5.0, 0.0), (6.0, 0.0), (6.0, 1.0), (5.0, 1.0)],
    /// ]);
    /// assert_eq!(region.components(1e-5).len(), 2);
    /// ```
    pub fn components(&self, pos_equal_eps: T) -> Vec<Region<T>> {
        if self.is_empty() {
            return Vec::new();
        }

        let outers: Vec<(usize, T)> = self
            .contours
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let a = c.area();
                if a > T::zero() {
                    Some((i, a))
                } else {
                    None
                }
            })
            .collect();

        if outers.len() <= 1 {
            return vec![self.clone()];
        }

        let mut groups: Vec<Vec<Contour<T>>> = outers
            .iter()
            .map(|&(i, _)| vec![self.contours[i].clone()])
            .collect();

        for hole in self.contours.iter().filter(|c| c.area() <= T::zero()) {
            let owner = outers
                .iter()
                .enumerate()
                .filter(|(_, (oi, _))| self.contours[*oi].contains_contour(hole, pos_equal_eps))
                .min_by(|(_, (_, a1)), (_, (_, a2))| {
                    a1.partial_cmp(a2).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(g, _)| g);

            match owner {
                Some(g) => groups[g].push(hole.clone()),
                None => log::debug!(
                    "dropping hole with {} points that is not inside any outer contour",
                    hole.vertex_count()
                ),
            }
        }

        groups.into_iter().map(Region::from_contours).collect()
    }

    /// Perform a boolean operation between this region and another using default options.
    #[inline]
    pub fn boolean(&self, other: &Region<T>, operation: BooleanOp) -> Region<T> {
        self.boolean_opt(other, operation, &BooleanOptions::new())
    }

    /// Perform a boolean operation between this region and another.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shape_boolean::contour;
    /// # use shape_boolean::polygon::*;
    /// let a: Region<f64> = Region::from_contours(vec![contour![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]]);
    /// let b: Region<f64> = Region::from_contours(vec![contour![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]]);
    /// let union = a.boolean(&b, BooleanOp::Or);
    /// assert!((union.area() - 7.0).abs() < 1e-9);
    /// let intersection = a.boolean(&b, BooleanOp::And);
    /// assert!((intersection.area() - 1.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn boolean_opt(
        &self,
        other: &Region<T>,
        operation: BooleanOp,
        options: &BooleanOptions<T>,
    ) -> Region<T> {
        region_boolean(self, other, operation, options)
    }
}
