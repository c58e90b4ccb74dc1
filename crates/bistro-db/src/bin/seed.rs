//! # Demo Store Seeder
//!
//! Writes the demo store (menu, events, reviews, owner profile) into a
//! database file, so the website opens with content during development.
//!
//! ## Usage
//! ```bash
//! # Seed ./bistro_dev.db (skips if a snapshot already exists)
//! cargo run -p bistro-db --bin seed
//!
//! # Specify database path and overwrite an existing snapshot
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db --force
//! ```

use std::env;

use bistro_core::seed::demo_state;
use bistro_db::{snapshot, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bistro_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Bistro demo store seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bistro_dev.db)");
                println!("  -f, --force        Overwrite an existing snapshot");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Bistro demo store seeder");
    println!("========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let storage = db.local_storage();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !force {
        if let Some(existing) = snapshot::load_state(&storage).await.ok().flatten() {
            println!(
                "⚠ A snapshot already exists ({} menu items, {} orders)",
                existing.menu_items.len(),
                existing.orders.len()
            );
            println!("  Pass --force to replace it.");
            return Ok(());
        }
    }

    let state = demo_state();
    snapshot::save_state(&storage, &state).await?;

    println!();
    println!("✓ Menu items:   {}", state.menu_items.len());
    println!("✓ Events:       {}", state.events.len());
    println!("✓ Reviews:      {}", state.reviews.len());
    println!("✓ Social posts: {}", state.social_posts.len());
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
