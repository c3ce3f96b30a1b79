use std::path::Path;

use skein_core::Storylet;

pub fn run(dir: &Path, id: &str, title: &str, category: Option<&str>) -> Result<(), String> {
    let mut store = super::load_store(dir)?.store;

    if store.get(id).is_some() {
        return Err(format!("storylet '{id}' already exists"));
    }

    let mut storylet = Storylet::new(id, title).with_content("Write your story here.");
    if let Some(category) = category {
        storylet = storylet.with_category(category);
    }

    let path = store.save(storylet).map_err(|e| e.to_string())?;
    println!("Added storylet '{id}' to {}", path.display());
    println!("  Edit the record, then run `skein check` to validate it.");

    Ok(())
}
