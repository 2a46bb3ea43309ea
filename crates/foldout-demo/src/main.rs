//! Foldout demo
//!
//! Builds a small panel, prints it as an outline, then collapses a group on
//! a tokio timer and prints each animation frame.
//!
//! Set `RUST_LOG=foldout_panel=debug` to watch rebuilds.

use std::sync::Arc;
use std::time::Duration;

use foldout_core::{ActionRef, CoreError, Icon, PanelConfig, SimpleAction};
use foldout_panel::{ActionRenderer, Panel, RenderContext, TokioScheduler};

// =============================================================================
// Renderer
// =============================================================================

/// Renders each action as one outline line.
struct OutlineRenderer;

impl ActionRenderer for OutlineRenderer {
    type Widget = String;

    fn render(&self, action: &ActionRef, ctx: &RenderContext<'_>) -> String {
        let marker = if ctx.highlighted { '>' } else { ' ' };
        match action.icon() {
            Some(icon) => format!("{} {} {}", marker, icon.as_ref(), action.name()),
            None => format!("{}   {}", marker, action.name()),
        }
    }
}

fn print_outline(panel: &Panel<OutlineRenderer>) {
    let Some(rendered) = panel.rendered() else {
        return;
    };
    println!("--- generation {} ---", rendered.generation);
    for group in &rendered.groups {
        let indicator = if group.is_expanded() { 'v' } else { '>' };
        println!("{} {} ({:.1}px)", indicator, group.name, group.animation.height());
        if group.is_expanded() {
            for row in &group.actions {
                println!("    {}", row.widget);
            }
        }
    }
}

// =============================================================================
// Setup
// =============================================================================

fn load_config() -> PanelConfig {
    match PanelConfig::load_default() {
        Ok(Some(config)) => {
            tracing::info!("Loaded panel config");
            config
        }
        Ok(None) => PanelConfig::default(),
        Err(e) => {
            tracing::warn!("Ignoring panel config: {}", e);
            PanelConfig::default()
        }
    }
}

fn action(name: &str, icon: Option<&str>) -> ActionRef {
    let label = name.to_string();
    let mut action = SimpleAction::new(name, move || tracing::info!("Invoked {}", label));
    if let Some(icon) = icon {
        action = action.with_icon(icon);
    }
    action.into_ref()
}

fn populate(panel: &Panel<OutlineRenderer>) -> Result<(), String> {
    // One rebuild for the whole setup
    panel.set_auto_rebuild_enabled(false);
    let result = (|| -> Result<(), CoreError> {
        panel.add_actions(
            "File",
            vec![action("Open", Some("📂")), action("Save", Some("💾"))],
        )?;
        panel.add_actions(
            "Edit",
            vec![action("Cut", None), action("Copy", None), action("Paste", None)],
        )?;
        panel.add_action("View", action("Zoom", Some("🔍")))?;
        panel.set_group_icon("Edit", Some(Icon::from("✂")));
        Ok(())
    })();
    panel.set_auto_rebuild_enabled(true);
    result.map_err(|e| format!("Failed to populate panel: {}", e))
}

// =============================================================================
// Entry Point
// =============================================================================

fn run() -> Result<(), String> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

    let config = load_config();
    let scheduler = Arc::new(TokioScheduler::new(rt.handle().clone()));
    let panel = Panel::from_config(OutlineRenderer, scheduler, &config)
        .map_err(|e| format!("Invalid panel config: {}", e))?;

    populate(&panel)?;
    print_outline(&panel);

    panel.invoke_action("File", 1);
    print_outline(&panel);

    panel.add_frame_listener(|group: &str, height: f32| {
        println!("  frame: {} -> {:.1}px", group, height);
    });
    panel.add_expand_listener(|group: &str, expanded: bool| {
        tracing::info!("Group '{}' expanded: {}", group, expanded);
    });

    panel.toggle_group("Edit");
    let settle = panel.expand_collapse().duration() + Duration::from_millis(50);
    rt.block_on(tokio::time::sleep(settle));
    print_outline(&panel);

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Foldout demo starting...");

    if let Err(e) = run() {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
