//! Editing session flows driven through the public API

use menucomposer_core::{
    catalog::{CatalogError, CatalogStore, Category},
    render::{ImageSource, TextRole},
    compose_request, grid::Placement, ComposeRequest, CompositionSession, DisplayMode, EditorMode,
    InMemoryCatalog, PageConfig, PriceOverride, Product, SessionError, StyleVariant,
};

fn catalog() -> InMemoryCatalog {
    let mut latte = Product::new(1, "Latte Glacé", "Boissons");
    latte.price_small = Some(10.0);
    latte.price_medium = Some(12.0);
    latte.image_isolated = Some("https://cdn/latte.png".to_string());
    latte.image_lifestyle = Some("https://cdn/latte-terrasse.jpg".to_string());

    let mut tarte = Product::new(2, "Tarte Citron", "Desserts");
    tarte.price = Some(6.5);

    let mut store = InMemoryCatalog::new();
    store.add_product(latte);
    store.add_product(tarte);
    store.add_category(Category {
        id: "c1".to_string(),
        name: "Boissons".to_string(),
        icon_id: Some("drink".to_string()),
    });
    store
}

struct OfflineStore;

impl CatalogStore for OfflineStore {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Err(CatalogError::Unavailable("network down".to_string()))
    }

    fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(vec![])
    }
}

fn open_session() -> CompositionSession {
    let mut session = CompositionSession::new();
    session.refresh_catalog(&catalog()).unwrap();
    session
}

#[test]
fn test_pick_medium_size_into_slot_five() {
    let mut session = open_session();
    session.set_cols(3);
    session.set_rows(4);
    assert_eq!(session.slots().len(), 12);

    session.select_slot(5).unwrap();
    assert_eq!(session.mode(), EditorMode::Selecting(5));
    session.choose_style(StyleVariant::CardClassic);
    session.choose_display_mode(DisplayMode::Isolated);

    let medium = {
        let entries = session.picker_entries();
        let latte = entries.iter().find(|e| e.product.id == 1).unwrap();
        assert_eq!(latte.price_blocks.len(), 2);
        latte.price_blocks[1].clone()
    };
    session.assign_product_with_price(1, &medium).unwrap();

    assert_eq!(session.mode(), EditorMode::Configuring);
    let placement = session.grid().get(5).unwrap().unwrap();
    assert_eq!(placement.product_id, 1);
    assert_eq!(placement.style, StyleVariant::CardClassic);
    assert_eq!(placement.display_mode, DisplayMode::Isolated);
    assert_eq!(placement.price_override, Some(PriceOverride::sized(12.0, "M")));
    assert_eq!(session.slot_price_text(5).unwrap().as_deref(), Some("M 12€"));
}

#[test]
fn test_plain_assignment_shows_all_prices() {
    let mut session = open_session();
    session.select_slot(0).unwrap();
    session.choose_display_mode(DisplayMode::Lifestyle);
    session.assign_product(1).unwrap();

    let visual = session.slot_visual(0).unwrap();
    let card = visual.card().unwrap();
    assert_eq!(card.line(TextRole::Price).unwrap().text, "S 10€ M 12€");
    assert_eq!(
        card.image().unwrap().source,
        ImageSource::Picture {
            url: "https://cdn/latte-terrasse.jpg".to_string(),
            mode: DisplayMode::Lifestyle,
        }
    );
}

#[test]
fn test_picker_choices_persist_between_selections() {
    let mut session = open_session();
    session.select_slot(0).unwrap();
    session.choose_style(StyleVariant::RoundedPremium);
    session.set_search("tarte");
    assert_eq!(session.picker_entries().len(), 1);
    session.assign_product(2).unwrap();
    assert!(session.picker().search.is_empty());

    session.select_slot(1).unwrap();
    assert_eq!(session.picker().style, StyleVariant::RoundedPremium);
    assert_eq!(session.picker_entries().len(), 2);
}

#[test]
fn test_search_is_case_insensitive() {
    let mut session = open_session();
    session.select_slot(0).unwrap();
    session.set_search("LATTE");
    let names: Vec<_> = session.picker_entries().iter().map(|e| e.product.name.clone()).collect();
    assert_eq!(names, vec!["Latte Glacé".to_string()]);
}

#[test]
fn test_reselect_retargets_slot() {
    let mut session = open_session();
    session.select_slot(2).unwrap();
    session.select_slot(7).unwrap();
    session.assign_product(2).unwrap();
    assert!(session.grid().get(2).unwrap().is_none());
    assert!(session.grid().get(7).unwrap().is_some());
}

#[test]
fn test_remove_item_keeps_mode() {
    let mut session = open_session();
    session.select_slot(4).unwrap();
    session.assign_product(2).unwrap();

    session.select_slot(0).unwrap();
    session.remove_item(4).unwrap();
    assert_eq!(session.mode(), EditorMode::Selecting(0));
    assert!(session.grid().get(4).unwrap().is_none());

    // Clearing an empty slot is fine, clearing past the end is not
    session.remove_item(4).unwrap();
    assert!(matches!(session.remove_item(12), Err(SessionError::Grid(_))));
}

#[test]
fn test_changing_dims_resizes_immediately() {
    let mut session = open_session();
    session.select_slot(0).unwrap();
    session.assign_product(2).unwrap();
    session.select_slot(10).unwrap();
    session.assign_product(1).unwrap();

    session.set_cols(2);
    session.set_rows(2);
    assert_eq!(session.slots().len(), 4);
    assert!(session.grid().get(0).unwrap().is_some());

    session.set_cols(3);
    session.set_rows(4);
    assert!(session.grid().get(10).unwrap().is_none());
}

#[test]
fn test_failed_refresh_keeps_catalog_and_clears_loading() {
    let mut session = open_session();
    let result = session.refresh_catalog(&OfflineStore);
    assert!(matches!(result, Err(SessionError::Catalog(_))));
    assert!(!session.is_loading_products());
    assert_eq!(session.catalog().products().len(), 2);
    assert_eq!(session.categories().len(), 1);
}

#[test]
fn test_late_fetch_result_wins() {
    let mut session = open_session();
    session.begin_catalog_load();
    session.begin_catalog_load();
    assert!(session.is_loading_products());

    session
        .finish_catalog_load(Ok((vec![Product::new(9, "Soupe", "Plats")], vec![])))
        .unwrap();
    session.finish_catalog_load(Ok((vec![], vec![]))).unwrap();
    assert!(session.catalog().products().is_empty());
    assert!(!session.is_loading_products());
}

#[test]
fn test_compose_full_page() {
    let mut session = open_session();
    session.set_title("Carte d'Été");
    session.select_slot(0).unwrap();
    session.choose_style(StyleVariant::FullOverlay);
    session.assign_product(1).unwrap();

    let page = session.compose().unwrap();
    assert_eq!(page.title.as_ref().unwrap().text, "Carte d'Été");
    assert_eq!(page.cells.len(), 12);
    assert!(!page.cells[0].is_empty());
    assert!(page.cells[1].is_empty());
}

#[test]
fn test_compose_request_validates_before_composing() {
    let store = catalog();

    let oversized = ComposeRequest {
        config: PageConfig { cols: u32::MAX, rows: u32::MAX, ..PageConfig::default() },
        slots: vec![],
    };
    let outcome = compose_request(&oversized, &store).unwrap();
    assert!(!outcome.validation.valid);
    assert!(outcome.page.is_none());

    let request = ComposeRequest {
        config: PageConfig { cols: 2, rows: 1, ..PageConfig::default() },
        slots: vec![
            Some(Placement::new(2, StyleVariant::CardClassic, DisplayMode::Isolated)),
            Some(Placement::new(42, StyleVariant::WhiteClean, DisplayMode::Isolated)),
        ],
    };
    let outcome = compose_request(&request, &store).unwrap();
    assert!(outcome.validation.valid);
    assert!(outcome.page.is_some());
    assert_eq!(outcome.dangling_slots, vec![1]);
}
