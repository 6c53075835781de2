// Helper functions to build stores with various flow shapes

use flow_designer::{ComponentId, ComponentKind, FlowStore, Position, ScreenId, ScreenKind};

/// A login screen holding three buttons, as in the README walkthrough
pub fn login_with_buttons() -> (FlowStore, ScreenId, Vec<ComponentId>) {
    let mut store = FlowStore::new();
    let login = store.add_screen(ScreenKind::LoginScreen, Position::new(100.0, 100.0));

    let buttons = (0..3)
        .map(|_| {
            store
                .add_component_to_screen(&login, ComponentKind::Button, Position::new(0.0, 0.0))
                .unwrap()
        })
        .collect();

    (store, login, buttons)
}

/// Login -> Dashboard -> {List, Settings}, List -> Detail
pub fn navigation_tree() -> (FlowStore, Vec<ScreenId>) {
    let mut store = FlowStore::new();

    let login = store.add_screen(ScreenKind::LoginScreen, Position::new(0.0, 0.0));
    let dashboard = store.add_screen(ScreenKind::DashboardScreen, Position::new(500.0, 0.0));
    let list = store.add_screen(ScreenKind::ListScreen, Position::new(1000.0, -200.0));
    let settings = store.add_screen(ScreenKind::SettingsScreen, Position::new(1000.0, 200.0));
    let detail = store.add_screen(ScreenKind::DetailScreen, Position::new(1500.0, -200.0));

    store.connect(&login, &dashboard).unwrap();
    store.connect(&dashboard, &list).unwrap();
    store.connect(&dashboard, &settings).unwrap();
    store.connect(&list, &detail).unwrap();

    store
        .add_component_to_screen(&login, ComponentKind::Input, Position::new(0.0, 0.0))
        .unwrap();
    store
        .add_component_to_screen(&login, ComponentKind::ApiCall, Position::new(0.0, 40.0))
        .unwrap();
    store
        .add_component_to_screen(&list, ComponentKind::Table, Position::new(0.0, 0.0))
        .unwrap();
    store
        .add_component_to_screen(&detail, ComponentKind::Database, Position::new(0.0, 0.0))
        .unwrap();

    (store, vec![login, dashboard, list, settings, detail])
}

/// One screen per kind, each with one component per kind
pub fn every_kind() -> FlowStore {
    let mut store = FlowStore::new();
    for (row, kind) in ScreenKind::ALL.into_iter().enumerate() {
        let screen = store.add_screen(kind, Position::new(0.0, row as f64 * 400.0));
        for component in ComponentKind::ALL {
            store
                .add_component_to_screen(&screen, component, Position::new(0.0, 0.0))
                .unwrap();
        }
    }
    store
}

pub fn component_order(store: &FlowStore, screen: &ScreenId) -> Vec<ComponentId> {
    store
        .screen(screen)
        .unwrap()
        .components
        .iter()
        .map(|c| c.id.clone())
        .collect()
}
