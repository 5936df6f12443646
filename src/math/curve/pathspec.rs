use std::fmt::Write;

use serde::Serialize;

use crate::math::curve::cubicbezier::CubicBezier;
use crate::math::curve::curve::ParametricCurve;
use crate::math::point2d::Point2D;

/// 由三次 Bezier 段落首尾相接組成的封閉路徑。
///
/// 第 i 段的終點即第 i+1 段的起點，最後一段回到第一段的起點。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSpec {
    segments: Vec<CubicBezier>
}

impl PathSpec {
    pub fn new(segments: Vec<CubicBezier>) -> PathSpec {
        PathSpec { segments }
    }

    pub fn segments(&self) -> &[CubicBezier] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// 路徑經過的節點，依走訪順序。
    pub fn vertices(&self) -> Vec<Point2D> {
        self.segments.iter().map(|s| s.start()).collect()
    }

    pub fn point_at(&self, segment: usize, t: f64) -> Option<Point2D> {
        self.segments.get(segment).map(|s| s.point_at(t))
    }

    /// 反向走訪的同一條路徑。
    pub fn reversed(&self) -> PathSpec {
        PathSpec::new(self.segments.iter().rev().map(|s| s.reversed()).collect())
    }

    /// SVG `<path d="...">` 的內容。
    pub fn to_svg_path_data(&self, precision: usize) -> String {
        let mut data = String::new();
        let Some(first) = self.segments.first() else {
            return data;
        };
        let fmt_pt = |p: Point2D| format!("{:.*},{:.*}", precision, p.x(), precision, p.y());
        // String 的 fmt::Write 不會失敗
        let _ = write!(data, "M{}", fmt_pt(first.start()));
        for s in &self.segments {
            let _ = write!(data, "C{} {} {}", fmt_pt(s.control1()), fmt_pt(s.control2()), fmt_pt(s.end()));
        }
        data.push('Z');
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: (f64, f64), b: (f64, f64)) -> CubicBezier {
        let a = Point2D::new(a.0, a.1);
        let b = Point2D::new(b.0, b.1);
        CubicBezier::new(a, a, b, b)
    }

    fn triangle() -> PathSpec {
        PathSpec::new(vec![
            line((0.0, 0.0), (2.0, 0.0)),
            line((2.0, 0.0), (1.0, 1.5)),
            line((1.0, 1.5), (0.0, 0.0)),
        ])
    }

    #[test]
    fn svg_path_data_visits_every_segment_and_closes() {
        assert_eq!(
            triangle().to_svg_path_data(1),
            "M0.0,0.0C0.0,0.0 2.0,0.0 2.0,0.0C2.0,0.0 1.0,1.5 1.0,1.5C1.0,1.5 0.0,0.0 0.0,0.0Z"
        );
    }

    #[test]
    fn empty_path_renders_nothing() {
        assert_eq!(PathSpec::new(Vec::new()).to_svg_path_data(2), "");
    }

    #[test]
    fn reversed_path_visits_vertices_backwards() {
        let path = triangle();
        let reversed = path.reversed();
        assert_eq!(
            reversed.vertices(),
            vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.5), Point2D::new(2.0, 0.0)]
        );
        assert_eq!(reversed.reversed(), path);
        assert_eq!(path.point_at(1, 1.0), Some(Point2D::new(1.0, 1.5)));
        assert_eq!(path.point_at(3, 0.0), None);
    }
}
