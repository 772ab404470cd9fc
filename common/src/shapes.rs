use crate::collision_detection;
use rand::Rng;

/// Axis-aligned rectangle in world units.
///
/// `(x, y)` is the bottom-left corner and the y axis points up, so
/// `top() == y + height`. Width and height are expected to be finite and
/// non-negative; callers that accept user input validate with
/// [`Aabb::has_valid_dims`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn has_valid_dims(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn overlaps_with(&self, other: &Aabb) -> bool {
        collision_detection::aabb_aabb(self, other)
    }

    pub fn inside_of(&self, other: &Aabb) -> bool {
        collision_detection::aabb_contains_aabb(other, self)
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.bottom() && y <= self.top()
    }

    pub fn translate_x(&mut self, dx: f32) {
        self.x += dx;
    }

    pub fn translate_y(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    // Copies the position only, the size of self is kept
    pub fn sync_position_with(&mut self, other: &Aabb) {
        self.x = other.x;
        self.y = other.y;
    }

    // Returns the four equal quadrants in top-left, top-right, bottom-left, bottom-right order
    pub fn quadrants(&self) -> [Aabb; 4] {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let center_x = self.x + half_width;
        let center_y = self.y + half_height;
        [
            Aabb::new(self.x, center_y, half_width, half_height),
            Aabb::new(center_x, center_y, half_width, half_height),
            Aabb::new(self.x, self.y, half_width, half_height),
            Aabb::new(center_x, self.y, half_width, half_height),
        ]
    }

    /// Picks a bottom-left corner so that a `width` x `height` box lands fully inside `self`.
    pub fn random_position_inside<R: Rng>(&self, width: f32, height: f32, rng: &mut R) -> (f32, f32) {
        (
            self._safe_randf32(rng, self.left(), self.right() - width),
            self._safe_randf32(rng, self.bottom(), self.top() - height),
        )
    }

    fn _safe_randf32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}
