use std::path::Path;

use skein_store::Severity;

pub fn run(dir: &Path) -> Result<(), String> {
    let result = super::load_store(dir)?;

    let errors = result
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count();
    if errors > 0 {
        return Err("storylet directory has errors".into());
    }

    println!("  All checks passed for '{}'.", dir.display());
    println!(
        "  {} storylet{}",
        result.store.len(),
        if result.store.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
