//! Stand-alone demos: the static prototype page and the document store.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use console::style;
use serde_json::json;
use tokio::sync::oneshot;

use issuetracker::config::Config;
use issuetracker::docstore::{InsertAndFind, run_awaited, run_with_callback};
use issuetracker::errors::StoreError;
use issuetracker::prototype::{PrototypeTable, SeedStore, render_prototype_page};
use issuetracker::views::icons;

use super::spinner;

pub async fn cmd_prototype() -> Result<()> {
    let store = Arc::new(SeedStore::initial());
    let mut table = PrototypeTable::new(store);

    let bar = spinner("Loading issues...");
    table.load().await;
    bar.finish_and_clear();

    print!("{}", render_prototype_page(&table));
    Ok(())
}

pub async fn cmd_try_store(config: &Config, location: Option<String>) -> Result<()> {
    let location = location.unwrap_or_else(|| config.store_location.clone());
    if location != ":memory:" {
        if let Some(parent) = Path::new(&location).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let collection = config.store_collection.clone();
    println!(
        "Document store {} collection {}",
        style(&location).cyan(),
        style(&collection).cyan()
    );

    println!();
    println!("{}", style("Callback style").bold());
    let (done_tx, done_rx) = oneshot::channel();
    let task = run_with_callback(
        location.clone(),
        collection.clone(),
        json!({"id": 1, "name": "A. Callback", "age": 23}),
        move |result| {
            let ok = print_outcome(&result);
            let _ = done_tx.send(ok);
        },
    );
    let callback_ok = done_rx
        .await
        .context("Callback task ended without reporting")?;
    task.await.map_err(|e| StoreError::Task(e.to_string()))?;

    println!();
    println!("{}", style("Async/await style").bold());
    let result = run_awaited(
        location,
        collection,
        json!({"id": 2, "name": "B. Async", "age": 16}),
    )
    .await;
    let awaited_ok = print_outcome(&result);

    if !(callback_ok && awaited_ok) {
        bail!("Document store demo failed");
    }
    Ok(())
}

fn print_outcome(result: &Result<InsertAndFind, StoreError>) -> bool {
    match result {
        Ok(outcome) => {
            println!(
                "{}Result of insert: inserted id {}",
                icons::CHECK,
                style(&outcome.inserted.inserted_id).cyan()
            );
            println!("{}Result of find:", icons::CHECK);
            for doc in &outcome.found {
                match serde_json::to_string_pretty(doc) {
                    Ok(text) => println!("{}", text),
                    Err(e) => println!("{}{}", icons::CROSS, e),
                }
            }
            true
        }
        Err(e) => {
            println!("{}{}", icons::CROSS, style(format!("ERROR: {}", e)).red());
            false
        }
    }
}
