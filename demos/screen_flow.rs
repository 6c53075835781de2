/// Example: Sketching a small app flow
///
/// This example demonstrates:
/// - Adding screens and components from the catalog
/// - Connecting screens and reordering components
/// - Listening for store events
/// - Validating the flow
/// - Exporting and re-importing the document

use anyhow::{Context, Result};
use flow_designer::*;

fn main() -> Result<()> {
    println!("=== Flow Designer: Screen Flow Example ===\n");

    let mut store = FlowStore::new();
    store.subscribe(|event| println!("    event: {:?}", event.kind));

    // Step 1: Screens
    println!("Step 1: Adding screens...");
    let login = store.add_screen(ScreenKind::LoginScreen, Position::new(100.0, 100.0));
    let dashboard = store.add_screen(ScreenKind::DashboardScreen, Position::new(600.0, 100.0));
    let settings = store.add_screen(ScreenKind::SettingsScreen, Position::new(1100.0, 100.0));
    store.update_screen_data(&login, ScreenPatch::label("Sign In"));
    println!("  ✓ Added {} screens", store.screen_count());

    // Step 2: Components
    println!("\nStep 2: Filling the login screen...");
    let email = store
        .add_component_to_screen(&login, ComponentKind::Input, Position::new(0.0, 0.0))
        .context("login screen should exist")?;
    store.update_component_in_screen(&login, &email, ComponentPatch::name("Email"));
    store.add_component_to_screen(&login, ComponentKind::Button, Position::new(0.0, 40.0));
    store.add_component_to_screen(&login, ComponentKind::ApiCall, Position::new(0.0, 80.0));

    // Auth call to the top, ahead of the email field and submit button
    store.reorder_component_in_screen(&login, 2, 0);
    let screen = store.screen(&login).context("login screen should exist")?;
    for (i, component) in screen.components.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, component.display_name(), component.kind);
    }
    println!("  ✓ Login screen is {}px tall", screen.size.height);

    // Step 3: Navigation
    println!("\nStep 3: Connecting screens...");
    store.connect(&login, &dashboard).context("connect login")?;
    store.connect(&dashboard, &settings).context("connect dashboard")?;
    println!("  ✓ Created {} edges", store.edge_count());

    // Step 4: Validation
    println!("\nStep 4: Validating flow...");
    let result = store.validate();
    if result.has_errors() {
        println!("  ✗ Validation errors:");
        for issue in result.errors() {
            println!("    - {}", issue.message);
        }
    } else {
        println!("  ✓ No errors found");
    }
    for issue in result.warnings() {
        println!("  ⚠ {}", issue.message);
    }
    for issue in result.info() {
        println!("  ℹ {}", issue.message);
    }

    // Step 5: Export and import
    println!("\nStep 5: Exporting flow...");
    let json = store.export_flow()?;
    let file_name = export_file_name(chrono::Utc::now().date_naive());
    println!("  ✓ {} would hold {} bytes", file_name, json.len());

    let mut restored = FlowStore::new();
    restored.try_import_flow(&json)?;
    println!(
        "  ✓ Re-imported {} screens and {} edges",
        restored.screen_count(),
        restored.edge_count()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
