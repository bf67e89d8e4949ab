#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod gallery;
mod telemetry;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use args::{Args, EditRequest};
use clap::Parser;
use platecraft_config::Config;
use platecraft_core::{
    AiGateway, BatchReport, EditOrchestrator, EditOutcome, GalleryState, GalleryStore, GenerationOrchestrator,
    ImageStyle,
};
use platecraft_gateway::GoogleGateway;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // A missing API key is fatal here, before anything else runs
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    telemetry::init(&config.telemetry)?;

    tracing::debug!(
        base_url = %config.gateway.base_url,
        extraction_model = %config.gateway.extraction_model,
        image_model = %config.gateway.image_model,
        edit_model = %config.gateway.edit_model,
        "configuration loaded"
    );

    let style = args.style.unwrap_or(config.generation.default_style);
    let menu = read_menu(&args.menu)?;

    tracing::info!(%style, out = %args.out.display(), "starting platecraft");

    let gateway: Arc<dyn AiGateway> = Arc::new(GoogleGateway::new(&config.gateway)?);
    let store = GalleryStore::new();
    let generator = GenerationOrchestrator::new(Arc::clone(&gateway), store.clone());
    let editor = EditOrchestrator::new(gateway, store.clone());

    let progress = tokio::spawn(log_progress(store.subscribe()));

    let report = tokio::select! {
        report = submit(&generator, &menu, style) => report,
        () = shutdown_signal() => {
            progress.abort();
            anyhow::bail!("interrupted before the gallery settled");
        }
    };
    progress.abort();

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            if let Some(error) = store.snapshot().error() {
                eprintln!("error: {error}");
            }
            return Err(e);
        }
    };

    apply_edits(&editor, &store, &args.edits).await;

    let state = store.snapshot();
    let files = gallery::write_images(&state, &args.out)?;

    for (dish, reason) in &files.failed {
        eprintln!("could not write image for `{dish}`: {reason}");
    }

    print!("{}", gallery::summary(&state));
    println!(
        "{} of {} dishes photographed, {} file(s) written to {}",
        report.generated,
        report.total,
        files.written.len(),
        args.out.display()
    );

    Ok(())
}

/// Submit the menu unless a batch is still running
async fn submit(generator: &GenerationOrchestrator, menu: &str, style: ImageStyle) -> anyhow::Result<BatchReport> {
    if generator.store().is_busy() {
        anyhow::bail!("a gallery is still being generated");
    }

    Ok(generator.generate_gallery(menu, style).await?)
}

/// Apply each requested edit; a failed edit is reported and the rest continue
async fn apply_edits(editor: &EditOrchestrator, store: &GalleryStore, edits: &[EditRequest]) {
    for edit in edits {
        let snapshot = store.snapshot();
        let Some(dish) = snapshot
            .dishes()
            .iter()
            .find(|d| d.name().eq_ignore_ascii_case(&edit.dish))
        else {
            eprintln!("edit skipped: no dish named `{}`", edit.dish);
            continue;
        };

        match editor.edit_dish_image(dish, &edit.instruction).await {
            Ok(EditOutcome::Applied { .. }) => {
                tracing::info!(dish = %dish.name(), "edit applied");
            }
            Ok(EditOutcome::Skipped) => {
                eprintln!("edit skipped: `{}` has no image to edit", dish.name());
            }
            Err(e) => {
                eprintln!("edit failed for `{}`: {e}", dish.name());
            }
        }
    }
}

/// Log a line whenever the gallery changes
async fn log_progress(mut rx: watch::Receiver<GalleryState>) {
    while rx.changed().await.is_ok() {
        let (ready, pending, total) = {
            let state = rx.borrow_and_update();
            let ready = state.dishes().iter().filter(|d| d.has_image()).count();
            (ready, state.in_flight().len(), state.dishes().len())
        };

        if total > 0 {
            tracing::info!(ready, pending, total, "gallery progress");
        }
    }
}

fn read_menu(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut menu = String::new();
        std::io::stdin()
            .read_to_string(&mut menu)
            .map_err(|e| anyhow::anyhow!("failed to read menu from stdin: {e}"))?;
        return Ok(menu);
    }

    std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("failed to read menu file {}: {e}", path.display()))
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
