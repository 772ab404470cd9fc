use crate::shapes::Aabb;

// Check that Aabb inner is fully contained in Aabb outer (edges may touch)
pub fn aabb_contains_aabb(outer: &Aabb, inner: &Aabb) -> bool {
    inner.top() <= outer.top()
        && inner.bottom() >= outer.bottom()
        && inner.left() >= outer.left()
        && inner.right() <= outer.right()
}

// Open-interval test, boxes that only share an edge do not overlap
pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.bottom() < b.top() && a.top() > b.bottom()
}
