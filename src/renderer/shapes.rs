//! Shape generation for 2D primitives

use glam::Vec2;

use super::Rect;
use super::vertex::Vertex;

/// Map a field point (pixels, y down) to normalized device coordinates
/// (-1..1, y up)
#[inline]
pub fn field_to_ndc(point: Vec2, field: Vec2) -> Vec2 {
    let field = field.max(Vec2::ONE);
    Vec2::new(point.x / field.x * 2.0 - 1.0, 1.0 - point.y / field.y * 2.0)
}

/// Two triangles covering `rect`, already in NDC
pub fn rect_vertices(rect: Rect, field: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let tl = field_to_ndc(rect.origin, field);
    let br = field_to_ndc(rect.origin + rect.size, field);

    let v = |x: f32, y: f32| Vertex::new(x, y, color);
    [
        v(tl.x, tl.y),
        v(tl.x, br.y),
        v(br.x, tl.y),
        v(br.x, tl.y),
        v(tl.x, br.y),
        v(br.x, br.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_corners_map_to_ndc_corners() {
        let field = Vec2::new(300.0, 200.0);
        assert_eq!(field_to_ndc(Vec2::ZERO, field), Vec2::new(-1.0, 1.0));
        assert_eq!(field_to_ndc(field, field), Vec2::new(1.0, -1.0));
        assert_eq!(field_to_ndc(field / 2.0, field), Vec2::ZERO);
    }

    #[test]
    fn test_rect_vertices_span_rect() {
        let field = Vec2::new(100.0, 100.0);
        let rect = Rect {
            origin: Vec2::new(25.0, 25.0),
            size: Vec2::new(50.0, 50.0),
        };
        let verts = rect_vertices(rect, field, [1.0; 4]);

        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|x| *x == -0.5 || *x == 0.5));
        assert!(ys.iter().all(|y| *y == -0.5 || *y == 0.5));
        assert!(verts.iter().all(|v| v.color == [1.0; 4]));
    }

    #[test]
    fn test_zero_field_does_not_divide_by_zero() {
        let p = field_to_ndc(Vec2::new(5.0, 5.0), Vec2::ZERO);
        assert!(p.is_finite());
    }
}
