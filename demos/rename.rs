/// Rename or move a single file on a panel-managed server
///
/// Usage:
///   PANEL_URL=https://panel.example.com PANEL_API_KEY=... \
///     cargo run --example rename -- <server> <directory> <name> <new-name> [--move]
///
/// Set `RUST_LOG=panel_files=debug` to see the outgoing request.

use panel_files::{
    FileEntry, MemoryDirectoryStore, OperationMode, PanelClient, PanelConfig,
    RenameSubmissionController,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!("usage: rename <server> <directory> <name> <new-name> [--move]");
        std::process::exit(2);
    }
    let mode = OperationMode::from_move_terminology(args.iter().any(|a| a == "--move"));

    let config = PanelConfig::from_env()?;
    let client = PanelClient::new(config)?;

    let file = FileEntry::new("", args[2].clone());
    let store = MemoryDirectoryStore::new(args[1].clone(), vec![file.clone()]);

    let controller = RenameSubmissionController::new(
        Arc::new(client),
        Arc::new(store.clone()),
        args[0].clone(),
        file,
        mode,
        Box::new(|| println!("done")),
    );

    let form = controller.form();
    let resolved = controller.preview(&args[3]).await;
    println!(
        "{} {} -> {}",
        form.button_label(),
        resolved.absolute_source,
        resolved.absolute_target
    );
    if let Some(caption) = form.location_caption(&resolved) {
        println!("{}", caption);
    }

    controller.submit(&args[3]).await?;

    for entry in store.entries().await {
        println!("  {}", entry.name);
    }

    Ok(())
}
