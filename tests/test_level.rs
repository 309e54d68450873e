use platform_duel::geometry::Rect;
use platform_duel::level::create_level;

#[test]
fn layout_for_reference_viewport() {
    let plats = create_level(1000.0, 800.0);
    assert_eq!(plats.len(), 4);

    // Ground slab spans the full width, 12% tall.
    assert_eq!(plats[0], Rect::new(0.0, 704.0, 1000.0, 96.0));

    // Two wide elevated platforms at proportional offsets.
    assert_eq!(plats[1], Rect::new(120.0, 500.0, 350.0, 24.0));
    assert_eq!(plats[2], Rect::new(600.0, 380.0, 350.0, 24.0));

    // The low middle platform is 70% of the standard width.
    assert_eq!(plats[3].x, 420.0);
    assert_eq!(plats[3].y, 610.0);
    assert_eq!(plats[3].w, 350.0 * 0.7);
    assert_eq!(plats[3].h, 24.0);
}

#[test]
fn ground_height_caps_on_tall_viewports() {
    // 12% of 2000 would be 240; the ground never exceeds 160.
    let plats = create_level(1000.0, 2000.0);
    assert_eq!(plats[0].h, 160.0);
    assert_eq!(plats[0].y, 1840.0);
}

#[test]
fn platform_width_caps_on_wide_viewports() {
    // 35% of 2000 would be 700; wide platforms never exceed 420.
    let plats = create_level(2000.0, 800.0);
    assert_eq!(plats[1].w, 420.0);
    assert_eq!(plats[2].w, 420.0);
    assert_eq!(plats[3].w, 420.0 * 0.7);
}

#[test]
fn layout_is_deterministic() {
    assert_eq!(create_level(1366.0, 768.0), create_level(1366.0, 768.0));
}
