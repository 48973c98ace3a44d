//! Composition Invariant Tests
//!
//! These tests verify the guarantees the editor relies on.

use pretty_assertions::assert_eq;

use menucomposer_core::{
    grid::{clear, place, resize},
    render::TextRole,
    compose_page, composition_digest, render, render_placement, resolve_geometry, resolve_price,
    DisplayMode, GeometryError, GridError, PageConfig, PageFormat, Placement, PriceOverride,
    Product, Slot, StyleVariant, TextColors, VisualComposition,
};

fn tiered_product() -> Product {
    let mut p = Product::new(10, "Smoothie", "Boissons");
    p.price_small = Some(10.0);
    p.price_medium = Some(12.0);
    p.price_large = Some(14.0);
    p.image_isolated = Some("https://cdn/smoothie.png".to_string());
    p
}

fn colors() -> TextColors {
    TextColors::from_config(&PageConfig::default())
}

fn occupied(seq: &[Slot]) -> Vec<usize> {
    seq.iter()
        .enumerate()
        .filter(|(_, s)| s.is_some())
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn invariant_tiered_prices_listed_in_order() {
    assert_eq!(resolve_price(&tiered_product(), None), "S 10€ M 12€ L 14€");
}

#[test]
fn invariant_flat_price() {
    let mut p = Product::new(1, "Croissant", "Viennoiserie");
    p.price = Some(9.5);
    assert_eq!(resolve_price(&p, None), "9.5€");
}

#[test]
fn invariant_no_price_placeholder() {
    assert_eq!(resolve_price(&Product::new(1, "Eau", "Boissons"), None), "-€");
}

#[test]
fn invariant_override_wins() {
    let mut flat = Product::new(2, "Pizza", "Plats");
    flat.price = Some(11.0);
    let ov = PriceOverride::sized(8.0, "M");

    assert_eq!(resolve_price(&tiered_product(), Some(&ov)), "M 8€");
    assert_eq!(resolve_price(&flat, Some(&ov)), "M 8€");
    assert_eq!(resolve_price(&Product::new(3, "Eau", ""), Some(&ov)), "M 8€");
}

#[test]
fn invariant_resize_idempotent() {
    let seq = place(&resize(&[], 3, 4), 7, Placement::new(1, StyleVariant::SolidBg, DisplayMode::Lifestyle)).unwrap();
    for (c, r) in [(3, 4), (2, 2), (4, 20), (1, 1)] {
        let once = resize(&seq, c, r);
        let twice = resize(&once, c, r);
        assert_eq!(once, twice);
    }
}

#[test]
fn invariant_resize_preserves_prefix_and_drops_tail() {
    let item = Placement::new(1, StyleVariant::WhiteClean, DisplayMode::Isolated);
    let grid = place(&resize(&[], 3, 4), 0, item.clone()).unwrap();
    assert_eq!(grid.len(), 12);

    let small = resize(&grid, 2, 2);
    assert_eq!(small.len(), 4);
    assert_eq!(small[0], Some(item.clone()));

    let restored = resize(&resize(&grid, 4, 4), 3, 4);
    assert_eq!(occupied(&restored), vec![0]);
    assert_eq!(restored, grid);
}

#[test]
fn invariant_shrink_discards_items_for_good() {
    let item = Placement::new(5, StyleVariant::MinimalRow, DisplayMode::Isolated);
    let grid = place(&resize(&[], 3, 4), 9, item).unwrap();

    let shrunk = resize(&grid, 2, 2);
    assert!(occupied(&shrunk).is_empty());
    assert!(occupied(&resize(&shrunk, 3, 4)).is_empty());
}

#[test]
fn invariant_out_of_range_rejected() {
    let grid = resize(&[], 2, 2);
    let item = Placement::new(1, StyleVariant::WhiteClean, DisplayMode::Isolated);
    assert_eq!(
        place(&grid, 4, item).unwrap_err(),
        GridError::IndexOutOfRange { index: 4, len: 4 }
    );
    assert_eq!(
        clear(&grid, 99).unwrap_err(),
        GridError::IndexOutOfRange { index: 99, len: 4 }
    );
}

#[test]
fn invariant_render_is_pure() {
    let product = tiered_product();
    for style in StyleVariant::ALL {
        for mode in [DisplayMode::Isolated, DisplayMode::Lifestyle] {
            let a = render(style, Some(&product), mode, &colors(), None);
            let b = render(style, Some(&product), mode, &colors(), None);
            assert_eq!(a, b);
        }
    }
}

#[test]
fn invariant_dangling_placement_renders_empty() {
    let placement = Placement::new(404, StyleVariant::CardClassic, DisplayMode::Isolated);
    let visual = render_placement(&placement, &[tiered_product()], &colors());
    assert_eq!(visual, VisualComposition::Empty);
}

#[test]
fn invariant_custom_geometry_rejects_zero() {
    assert_eq!(
        resolve_geometry(PageFormat::Custom, 1080, 0).unwrap_err(),
        GeometryError::InvalidGeometry { width: 1080, height: 0 }
    );
    assert!(resolve_geometry(PageFormat::A4, 0, 0).is_ok());
}

#[test]
fn invariant_page_digest_deterministic() {
    let config = PageConfig::default();
    let item = Placement::new(10, StyleVariant::PhotoEmphasis, DisplayMode::Lifestyle)
        .with_override(PriceOverride::sized(12.0, "M"));
    let slots = place(&resize(&[], config.cols, config.rows), 2, item).unwrap();
    let products = vec![tiered_product()];

    let first = compose_page(&config, &slots, &products).unwrap();
    let second = compose_page(&config, &slots, &products).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        composition_digest(&first).unwrap(),
        composition_digest(&second).unwrap()
    );

    let card = first.cells[2].card().expect("slot 2 rendered");
    assert_eq!(card.line(TextRole::Price).unwrap().text, "M 12€");
}
