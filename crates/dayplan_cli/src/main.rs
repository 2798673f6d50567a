//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dayplan_core` linkage.
//! - Print a summary of a persisted to-do document when given its path.

use dayplan_core::{JsonFileTodoRepository, TodoService};

fn main() {
    println!("dayplan_core version={}", dayplan_core::core_version());

    // Optional document path: summarize the persisted store without
    // mutating it. Missing or malformed documents read as empty.
    if let Some(path) = std::env::args().nth(1) {
        let service = TodoService::load(JsonFileTodoRepository::new(&path));
        let dividers = service.dividers();
        println!("document={path} dividers={}", dividers.len());
        for divider in dividers {
            println!("  {} tasks={}", divider.name, divider.tasks.len());
        }
    }
}
