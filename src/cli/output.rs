//! Output formatting for maps and record tables

use console::style;

use crate::core::{Rating, Record, RiskMap, Table};

use crate::cli::helpers::truncate_str;

/// (header, width) pairs for the record table
const RECORD_COLUMNS: &[(&str, usize)] = &[
    ("N", 3),
    ("HAZARD", 24),
    ("EVENT", 30),
    ("D", 2),
    ("S", 2),
    ("P", 2),
    ("WEIGHT", 6),
    ("RISK", 5),
    ("RATING", 8),
];

fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn opt_pts(value: Option<u8>) -> String {
    value.map(|p| p.to_string()).unwrap_or_else(|| "-".into())
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".into())
}

fn styled_rating(rating: Option<Rating>) -> String {
    match rating {
        Some(Rating::Low) => style("Low").green().to_string(),
        Some(Rating::Moderate) => style("Moderate").yellow().to_string(),
        Some(Rating::High) => style("High").red().to_string(),
        None => "-".to_string(),
    }
}

/// Print the record table with a header row
pub fn print_records(records: &[Record]) {
    let header: Vec<String> = RECORD_COLUMNS
        .iter()
        .map(|(name, width)| format!("{:<width$}", name, width = *width))
        .collect();
    println!("{}", style(header.join("  ")).bold());

    for record in records {
        let cells = [
            format!("{:<3}", opt(record.n())),
            format!("{:<24}", truncate_str(opt(record.danger()), 24)),
            format!("{:<30}", truncate_str(opt(record.event()), 30)),
            format!("{:<2}", opt_pts(record.damage().map(|d| d.points()))),
            format!("{:<2}", opt_pts(record.susceptibility().map(|s| s.points()))),
            format!("{:<2}", opt_pts(record.probability().map(|p| p.points()))),
            format!("{:<6}", opt_num(record.weight())),
            format!("{:<5}", opt_num(record.identified_risk())),
            styled_rating(record.rating()),
        ];
        println!("{}", cells.join("  "));
    }
}

/// Print the map header block: identity and metadata
pub fn print_map_header(map: &RiskMap) {
    println!("{}", style(map.tab_name()).bold().underlined());
    println!("  Map no.:     {}", opt(map.map_no()));
    println!("  Profession:  {}", opt(map.profession()));
    println!("  Division:    {}", opt(map.struct_division()));
    println!("  Chairman:    {}", opt(map.chairman()));
    println!("  Work:        {}", opt(map.description()));
    println!("  Tools:       {}", opt(map.tools_materials()));
}

/// Print the stored summary fields and the methods list
pub fn print_summary(table: &Table) {
    println!();
    println!(
        "  k = {:+.1}   professional risk = {}   result = {} ({})",
        table.k_factor(),
        opt_num(table.prof_risk()),
        opt_num(table.result()),
        table
            .result_band()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".into()),
    );
    if !table.methods().is_empty() {
        println!();
        println!("{}", style("Recommended measures:").bold());
        for (i, method) in table.methods().iter().enumerate() {
            println!("  {}. {}", i + 1, method);
        }
    }
}
