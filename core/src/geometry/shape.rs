//! Planar curve shapes with minimum-distance and tangent queries.
//!
//! This is the curve-kernel side of inference: given two shapes, find where
//! they come closest and which feature (a vertex or the interior of an edge)
//! each side touches there.

use serde::{Deserialize, Serialize};

use super::intersection::{circle_circle, segment_circle, segment_segment, Crossing};
use super::utils_2d::{
    angle_in_sweep, angle_of, arc_point, closest_point_on_segment, distance, lerp, normalize_2d,
    normalize_angle, project_point_on_line, sub,
};
use super::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Vertex { pos: [f64; 2] },
    Segment { start: [f64; 2], end: [f64; 2] },
    Circle { center: [f64; 2], radius: f64 },
    /// Counter-clockwise arc from `start_angle` to `end_angle` (radians).
    Arc { center: [f64; 2], radius: f64, start_angle: f64, end_angle: f64 },
}

/// The part of a shape a proximity query landed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Feature {
    /// Index into [`Shape::vertices`].
    Vertex(usize),
    /// Interior of the curve at the given parameter.
    Edge(f64),
}

impl Feature {
    pub fn is_vertex(&self) -> bool {
        matches!(self, Feature::Vertex(_))
    }
}

/// Result of [`Shape::nearest`]: the closest approach between two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub distance: f64,
    pub point_a: [f64; 2],
    pub point_b: [f64; 2],
    pub param_a: f64,
    pub param_b: f64,
    pub feature_a: Feature,
    pub feature_b: Feature,
}

impl Proximity {
    pub fn is_vertex_to_vertex(&self) -> bool {
        self.feature_a.is_vertex() && self.feature_b.is_vertex()
    }
}

/// Candidate contact before features are resolved.
#[derive(Debug, Clone, Copy)]
struct Contact {
    point_a: [f64; 2],
    param_a: f64,
    point_b: [f64; 2],
    param_b: f64,
}

impl Contact {
    fn from_crossing(c: Crossing) -> Self {
        Self { point_a: c.point, param_a: c.param_a, point_b: c.point, param_b: c.param_b }
    }

    fn swapped(self) -> Self {
        Self {
            point_a: self.point_b,
            param_a: self.param_b,
            point_b: self.point_a,
            param_b: self.param_a,
        }
    }

    fn distance(&self) -> f64 {
        distance(self.point_a, self.point_b)
    }
}

impl Shape {
    /// Vertices with their curve parameter. Full circles have none.
    pub fn vertices(&self) -> Vec<([f64; 2], f64)> {
        match *self {
            Shape::Vertex { pos } => vec![(pos, 0.0)],
            Shape::Segment { start, end } => vec![(start, 0.0), (end, 1.0)],
            Shape::Circle { .. } => vec![],
            Shape::Arc { center, radius, start_angle, end_angle } => vec![
                (arc_point(center, radius, start_angle), normalize_angle(start_angle)),
                (arc_point(center, radius, end_angle), normalize_angle(end_angle)),
            ],
        }
    }

    /// Largest dimension of the shape, used to derive the working scale.
    pub fn extent(&self) -> f64 {
        match *self {
            Shape::Vertex { .. } => 0.0,
            Shape::Segment { start, end } => distance(start, end),
            Shape::Circle { radius, .. } | Shape::Arc { radius, .. } => 2.0 * radius.abs(),
        }
    }

    fn contains_param(&self, param: f64) -> bool {
        match *self {
            Shape::Vertex { .. } | Shape::Circle { .. } => true,
            Shape::Segment { .. } => (0.0..=1.0).contains(&param),
            Shape::Arc { start_angle, end_angle, .. } => angle_in_sweep(param, start_angle, end_angle),
        }
    }

    /// Closest point of the shape to `point`, with its parameter.
    pub fn closest_point(&self, point: [f64; 2]) -> ([f64; 2], f64) {
        match *self {
            Shape::Vertex { pos } => (pos, 0.0),
            Shape::Segment { start, end } => closest_point_on_segment(start, end, point),
            Shape::Circle { center, radius } => {
                let angle = angle_of(center, point);
                (arc_point(center, radius, angle), angle)
            }
            Shape::Arc { center, radius, start_angle, end_angle } => {
                let angle = angle_of(center, point);
                if angle_in_sweep(angle, start_angle, end_angle) {
                    return (arc_point(center, radius, angle), angle);
                }
                let start = arc_point(center, radius, start_angle);
                let end = arc_point(center, radius, end_angle);
                if distance(point, start) <= distance(point, end) {
                    (start, normalize_angle(start_angle))
                } else {
                    (end, normalize_angle(end_angle))
                }
            }
        }
    }

    /// Unit tangent at `param`. Points have no tangent.
    pub fn tangent_at(&self, param: f64) -> Option<[f64; 2]> {
        match *self {
            Shape::Vertex { .. } => None,
            Shape::Segment { start, end } => normalize_2d(sub(end, start)),
            Shape::Circle { .. } | Shape::Arc { .. } => Some([-param.sin(), param.cos()]),
        }
    }

    /// Classify a point of this shape as a vertex hit or an interior hit.
    pub fn feature_at(&self, point: [f64; 2], param: f64, vertex_tolerance: f64) -> Feature {
        if let Shape::Vertex { .. } = self {
            return Feature::Vertex(0);
        }
        self.vertices()
            .iter()
            .position(|(v, _)| distance(*v, point) < vertex_tolerance)
            .map_or(Feature::Edge(param), Feature::Vertex)
    }

    /// Minimum distance between two shapes and the features involved.
    ///
    /// `tolerance` is both the vertex snap radius and the grazing depth: two
    /// crossings whose curves separate by less than it in between are one
    /// contact, reported at the closest approach between them.
    ///
    /// Returns `None` only if no candidate contact exists, which cannot
    /// happen for well-formed shapes.
    pub fn nearest(&self, other: &Shape, tolerance: f64) -> Option<Proximity> {
        let mut candidates = self.crossing_contacts(other, tolerance);
        candidates.extend(self.interior_approaches(other));

        for (v, param) in self.vertices() {
            let (p, q) = other.closest_point(v);
            candidates.push(Contact { point_a: v, param_a: param, point_b: p, param_b: q });
        }
        for (v, param) in other.vertices() {
            let (p, q) = self.closest_point(v);
            candidates.push(Contact { point_a: p, param_a: q, point_b: v, param_b: param });
        }

        let best = candidates
            .into_iter()
            .filter(|c| self.contains_param(c.param_a) && other.contains_param(c.param_b))
            .fold(None::<Contact>, |best, c| match best {
                Some(b) if b.distance() <= c.distance() => Some(b),
                _ => Some(c),
            })?;

        Some(Proximity {
            distance: best.distance(),
            point_a: best.point_a,
            point_b: best.point_b,
            param_a: best.param_a,
            param_b: best.param_b,
            feature_a: self.feature_at(best.point_a, best.param_a, tolerance),
            feature_b: other.feature_at(best.point_b, best.param_b, tolerance),
        })
    }

    /// Crossings, with a grazing pair folded into one contact at the
    /// closest approach between its two crossing points.
    fn crossing_contacts(&self, other: &Shape, grazing_depth: f64) -> Vec<Contact> {
        let crossings = self.crossings(other);
        if let [a, b] = crossings.as_slice() {
            let mid = lerp(a.point_a, b.point_a, 0.5);
            let (point_a, param_a) = self.closest_point(mid);
            let (point_b, param_b) = other.closest_point(mid);
            let graze = Contact { point_a, param_a, point_b, param_b };
            if graze.distance() < grazing_depth {
                return vec![graze];
            }
        }
        crossings
    }

    fn crossings(&self, other: &Shape) -> Vec<Contact> {
        use Shape::*;
        match (*self, *other) {
            (Segment { start: s1, end: e1 }, Segment { start: s2, end: e2 }) => {
                segment_segment(s1, e1, s2, e2).into_iter().map(Contact::from_crossing).collect()
            }
            (Segment { start, end }, Circle { center, radius } | Arc { center, radius, .. }) => {
                segment_circle(start, end, center, radius).into_iter().map(Contact::from_crossing).collect()
            }
            (Circle { .. } | Arc { .. }, Segment { .. }) => {
                other.crossings(self).into_iter().map(Contact::swapped).collect()
            }
            (
                Circle { center: c1, radius: r1 } | Arc { center: c1, radius: r1, .. },
                Circle { center: c2, radius: r2 } | Arc { center: c2, radius: r2, .. },
            ) => circle_circle(c1, r1, c2, r2).into_iter().map(Contact::from_crossing).collect(),
            _ => vec![],
        }
    }

    /// Interior critical points of the distance function that are not
    /// crossings and not vertex projections.
    fn interior_approaches(&self, other: &Shape) -> Vec<Contact> {
        use Shape::*;
        match (*self, *other) {
            (Segment { start, end }, Circle { center, radius } | Arc { center, radius, .. }) => {
                let t = project_point_on_line(start, end, center);
                if !(0.0..=1.0).contains(&t) {
                    return vec![];
                }
                let foot = lerp(start, end, t);
                if distance(foot, center) < EPSILON {
                    return vec![];
                }
                let angle = angle_of(center, foot);
                vec![Contact {
                    point_a: foot,
                    param_a: t,
                    point_b: arc_point(center, radius, angle),
                    param_b: angle,
                }]
            }
            (Circle { .. } | Arc { .. }, Segment { .. }) => {
                other.interior_approaches(self).into_iter().map(Contact::swapped).collect()
            }
            (
                Circle { center: c1, radius: r1 } | Arc { center: c1, radius: r1, .. },
                Circle { center: c2, radius: r2 } | Arc { center: c2, radius: r2, .. },
            ) => {
                let u = normalize_2d(sub(c2, c1)).unwrap_or([1.0, 0.0]);
                let mut out = Vec::with_capacity(4);
                for s1 in [1.0, -1.0] {
                    for s2 in [1.0, -1.0] {
                        let p1 = [c1[0] + s1 * r1 * u[0], c1[1] + s1 * r1 * u[1]];
                        let p2 = [c2[0] + s2 * r2 * u[0], c2[1] + s2 * r2 * u[1]];
                        out.push(Contact {
                            point_a: p1,
                            param_a: angle_of(c1, p1),
                            point_b: p2,
                            param_b: angle_of(c2, p2),
                        });
                    }
                }
                out
            }
            _ => vec![],
        }
    }
}
