use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use skein_core::Storylet;

pub fn run(dir: &Path, category: Option<&str>, tag: Option<&str>) -> Result<(), String> {
    let store = super::load_store(dir)?.store;

    let mut storylets: Vec<&Storylet> = store.all().iter().collect();
    if let Some(category) = category {
        storylets.retain(|storylet| storylet.category == category);
    }
    if let Some(tag) = tag {
        storylets.retain(|storylet| storylet.tags.iter().any(|candidate| candidate == tag));
    }

    if storylets.is_empty() {
        println!("  No storylets found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Category", "Priority", "Description"]);

    for storylet in &storylets {
        let desc = if storylet.description.len() > 60 {
            format!("{}...", &storylet.description[..57])
        } else if storylet.description.is_empty() {
            "—".to_string()
        } else {
            storylet.description.clone()
        };

        let category = if storylet.category.is_empty() {
            "—".to_string()
        } else {
            storylet.category.clone()
        };

        table.add_row(vec![
            &storylet.id,
            &storylet.title,
            &category,
            &storylet.priority.to_string(),
            &desc,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} storylet{}",
        storylets.len(),
        if storylets.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
