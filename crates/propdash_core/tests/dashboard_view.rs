use propdash_core::{
    DashboardView, FormError, FormField, MemoryStorage, ModalMode, PropertyId, PropertyStore,
    PropertyType, ViewError,
};

fn store() -> PropertyStore<MemoryStorage> {
    PropertyStore::open(MemoryStorage::new(), false).unwrap()
}

#[test]
fn projection_tracks_search_and_type_selection() {
    let store = store();
    let mut view = DashboardView::new();
    assert_eq!(view.listing_count(&store), 8);

    view.set_search_term("plot");
    assert_eq!(view.listing_count(&store), 4);

    view.select_type("Plot").unwrap();
    view.set_search_term("");
    assert_eq!(view.listing_count(&store), 4);

    view.select_type("").unwrap();
    assert_eq!(view.type_filter(), None);
    assert_eq!(view.listing_count(&store), 8);

    assert!(view.select_type("Castle").is_err());
}

#[test]
fn submit_create_validates_before_touching_store() {
    let mut store = store();
    let mut view = DashboardView::new();

    let form = view.open_create_form();
    form.name = "Lakeside House".to_string();
    form.kind = PropertyType::House;
    form.location = "Bhopal".to_string();

    let err = view.submit_create(&mut store).unwrap_err();
    assert!(matches!(
        err,
        ViewError::Validation(FormError::MissingField(FormField::Price))
    ));
    assert_eq!(store.len(), 8);
    assert!(view.create_form().is_some());

    let form = view.create_form_mut().unwrap();
    form.price = "310000".to_string();
    form.description = "Three bedrooms facing the lake.".to_string();
    form.set_image("data:image/png;base64,AAAA");

    let created = view.submit_create(&mut store).unwrap();
    assert_eq!(store.len(), 9);
    assert_eq!(store.properties().last(), Some(&created));
    assert_eq!(created.kind, PropertyType::House);
    assert_eq!(created.price, 310_000.0);
    assert!(view.create_form().is_none());
}

#[test]
fn submit_without_open_form_is_rejected() {
    let mut store = store();
    let mut view = DashboardView::new();
    assert!(matches!(
        view.submit_create(&mut store).unwrap_err(),
        ViewError::NothingOpen
    ));
}

#[test]
fn edits_are_discarded_on_close() {
    let store = store();
    let mut view = DashboardView::new();
    let id = PropertyId::new("1");

    view.open_record(&store, &id, ModalMode::Edit).unwrap();
    view.working_copy_mut().unwrap().name = "Renamed".to_string();
    view.close();

    assert!(view.open().is_none());
    assert_eq!(store.get(&id).unwrap().name, "Green Valley Plot");
}

#[test]
fn working_copy_is_read_only_in_view_mode() {
    let store = store();
    let mut view = DashboardView::new();
    view.open_record(&store, &PropertyId::new("2"), ModalMode::View)
        .unwrap();

    assert!(view.working_copy_mut().is_none());
    view.enter_edit().unwrap();
    assert!(view.working_copy_mut().is_some());
}

#[test]
fn save_writes_through_update_and_returns_to_view_mode() {
    let mut store = store();
    let mut view = DashboardView::new();
    let id = PropertyId::new("3");
    let created_at = store.get(&id).unwrap().created_at;

    view.open_record(&store, &id, ModalMode::View).unwrap();
    view.enter_edit().unwrap();
    let working = view.working_copy_mut().unwrap();
    working.price = "155000".to_string();
    working.clear_image();

    let saved = view.save(&mut store).unwrap();
    assert_eq!(saved.price, 155_000.0);
    assert_eq!(saved.image, None);
    assert_eq!(saved.created_at, created_at);
    assert_eq!(saved.name, "City Center Store");

    let open = view.open().unwrap();
    assert_eq!(open.mode, ModalMode::View);
    assert_eq!(open.working.price, "155000");
    assert_eq!(view.selected(&store), Some(&saved));
}

#[test]
fn save_with_invalid_input_keeps_edit_mode() {
    let mut store = store();
    let mut view = DashboardView::new();
    let id = PropertyId::new("6");

    view.open_record(&store, &id, ModalMode::Edit).unwrap();
    view.working_copy_mut().unwrap().price = "-20".to_string();

    let err = view.save(&mut store).unwrap_err();
    assert!(matches!(err, ViewError::Validation(FormError::InvalidPrice(_))));
    assert_eq!(view.open().unwrap().mode, ModalMode::Edit);
    assert_eq!(store.get(&id).unwrap().price, 30_000.0);
}

#[test]
fn opening_unknown_record_fails_and_keeps_previous() {
    let store = store();
    let mut view = DashboardView::new();
    view.open_record(&store, &PropertyId::new("7"), ModalMode::View)
        .unwrap();

    let err = view
        .open_record(&store, &PropertyId::new("nope"), ModalMode::View)
        .unwrap_err();
    assert!(matches!(err, ViewError::NotFound(_)));
    assert_eq!(view.open().unwrap().id, PropertyId::new("7"));
}

#[test]
fn deleting_open_record_closes_it() {
    let mut store = store();
    let mut view = DashboardView::new();
    let id = PropertyId::new("8");

    view.open_record(&store, &id, ModalMode::View).unwrap();
    assert!(view.delete(&mut store, &id).unwrap());
    assert!(view.open().is_none());
    assert!(!view.delete(&mut store, &id).unwrap());
    assert_eq!(store.len(), 7);
}
