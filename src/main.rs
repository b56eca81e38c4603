use anyhow::{bail, Result};
use chrono::Local;
use std::env;

use cattle_lookup::{LookupError, Provenance, RecordStore, Session, ViewModel};
use cattle_lookup::loader::load_table;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let as_json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args[1..].iter().filter(|a| *a != "--json").collect();

    if positional.len() != 3 {
        eprintln!("Usage: cattle-lookup <master.csv> <weight.csv> <tag> [--json]");
        std::process::exit(2);
    }

    let (master_path, weight_path, tag) = (positional[0], positional[1], positional[2]);

    // Load both snapshot tables before the first lookup; a load failure is
    // a file problem, not a lookup outcome.
    let master_rows = load_table(master_path)?;
    let weight_rows = load_table(weight_path)?;

    let mut session = Session::new();
    session.attach(RecordStore::from_rows(&master_rows, &weight_rows));

    let today = Local::now().date_naive();
    let view = match session.resolve(tag, today) {
        Ok(view) => view,
        Err(err @ (LookupError::EmptyInput | LookupError::NotFound { .. })) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
        Err(err @ LookupError::NotLoaded) => {
            // Unreachable after attach; kept explicit rather than swallowed.
            bail!(err);
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }

    Ok(())
}

fn print_view(view: &ViewModel) {
    println!("個体番号: {}", view.id);

    let badges: Vec<&str> = view.badges.iter().map(|b| b.label.as_str()).collect();
    println!("ステータス: {}", badges.join(" "));

    println!();
    for field in &view.fields {
        println!("{:　<6}{}", field.label, field.value);
    }

    if !view.weight_series.is_empty() {
        println!();
        println!("体重推移:");
        for point in &view.weight_series {
            let note = match point.provenance {
                Provenance::History if point.note.is_empty() => String::new(),
                _ => format!("  {}", point.note),
            };
            println!("  {}  {} kg{}", point.date.format("%Y/%m/%d"), point.weight, note);
        }
    }
}
