use common::shapes::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new_and_getters() {
    let aabb = Aabb::new(2.0, 3.0, 4.0, 6.0);
    assert_eq!(aabb.width(), 4.0);
    assert_eq!(aabb.height(), 6.0);
    assert_eq!(aabb.left(), 2.0);
    assert_eq!(aabb.right(), 6.0);
    assert_eq!(aabb.bottom(), 3.0);
    assert_eq!(aabb.top(), 9.0);
    assert_eq!(aabb.center_x(), 4.0);
    assert_eq!(aabb.center_y(), 6.0);
    assert_eq!(aabb.position(), (2.0, 3.0));
}

#[test]
fn test_overlap_is_open_interval() {
    let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    // Shares the right edge only
    let touching = Aabb::new(10.0, 0.0, 10.0, 10.0);
    // Shares the top edge only
    let stacked = Aabb::new(0.0, 10.0, 10.0, 10.0);
    let overlapping = Aabb::new(9.5, 9.5, 10.0, 10.0);
    assert!(!a.overlaps_with(&touching));
    assert!(!touching.overlaps_with(&a));
    assert!(!a.overlaps_with(&stacked));
    assert!(a.overlaps_with(&overlapping));
    assert!(overlapping.overlaps_with(&a));
}

#[test]
fn test_inside_of_is_closed() {
    let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
    assert!(outer.inside_of(&outer));
    assert!(Aabb::new(0.0, 0.0, 10.0, 10.0).inside_of(&outer));
    assert!(Aabb::new(90.0, 90.0, 10.0, 10.0).inside_of(&outer));
    assert!(!Aabb::new(95.0, 90.0, 10.0, 10.0).inside_of(&outer));
    assert!(!Aabb::new(-0.5, 10.0, 10.0, 10.0).inside_of(&outer));
}

#[test]
fn test_translate_and_set() {
    let mut aabb = Aabb::new(1.0, 1.0, 4.0, 4.0);
    aabb.translate_x(2.0);
    aabb.translate_y(-1.0);
    assert_eq!(aabb.position(), (3.0, 0.0));
    aabb.set_x(-5.0);
    aabb.set_y(7.0);
    assert_eq!(aabb.position(), (-5.0, 7.0));
    aabb.set_position(0.0, 0.0);
    assert_eq!(aabb, Aabb::new(0.0, 0.0, 4.0, 4.0));
}

#[test]
fn test_sync_position_keeps_size() {
    let mut scratch = Aabb::new(0.0, 0.0, 10.0, 16.0);
    let other = Aabb::new(30.0, 40.0, 2.0, 2.0);
    scratch.sync_position_with(&other);
    assert_eq!(scratch, Aabb::new(30.0, 40.0, 10.0, 16.0));
}

#[test]
fn test_quadrants_order() {
    let [tl, tr, bl, br] = Aabb::new(0.0, 0.0, 100.0, 50.0).quadrants();
    assert_eq!(tl, Aabb::new(0.0, 25.0, 50.0, 25.0));
    assert_eq!(tr, Aabb::new(50.0, 25.0, 50.0, 25.0));
    assert_eq!(bl, Aabb::new(0.0, 0.0, 50.0, 25.0));
    assert_eq!(br, Aabb::new(50.0, 0.0, 50.0, 25.0));
}

#[test]
fn test_contains_point() {
    let aabb = Aabb::new(2.0, 3.0, 4.0, 6.0);
    assert!(aabb.contains_point(2.0, 3.0));
    assert!(aabb.contains_point(6.0, 9.0));
    assert!(!aabb.contains_point(6.1, 3.0));
    assert!(!aabb.contains_point(2.0, 9.5));
}

#[test]
fn test_valid_dims() {
    assert!(Aabb::new(0.0, 0.0, 0.0, 0.0).has_valid_dims());
    assert!(!Aabb::new(0.0, 0.0, -1.0, 2.0).has_valid_dims());
    assert!(!Aabb::new(0.0, 0.0, 1.0, f32::NAN).has_valid_dims());
    assert!(!Aabb::new(0.0, 0.0, f32::INFINITY, 1.0).has_valid_dims());
}

#[test]
fn test_random_position_inside() {
    let bounds = Aabb::new(-50.0, 10.0, 200.0, 80.0);

    // Use a fixed seed for reproducibility.
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    for _ in 0..100 {
        let (x, y) = bounds.random_position_inside(16.0, 16.0, &mut rng);
        assert!(Aabb::new(x, y, 16.0, 16.0).inside_of(&bounds));
    }
}

#[test]
fn test_random_position_inside_small_bounds() {
    let bounds = Aabb::new(2.0, 3.0, 4.0, 4.0);
    let mut rng: StdRng = SeedableRng::seed_from_u64(123);

    // Box larger than the bounds is clamped to the bottom-left corner.
    let (x, y) = bounds.random_position_inside(10.0, 10.0, &mut rng);
    assert_eq!((x, y), (2.0, 3.0));
}
