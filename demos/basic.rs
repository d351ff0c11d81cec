//! Basic example: build a table and print it as HTML and LaTeX.
//!
//! Run with `RUST_LOG=tabmark=debug` to see construction diagnostics.

use tabmark::cells;
use tabmark::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> tabmark::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Header row carrying the table's column formats
    let mut table = Table::builder()
        .row(Row::header(["Item", "Qty", "Price"]).column_format(["{}", "{:d}", "{:.2f}"]))
        .row(cells!["Coffee", 2, 3.5])
        .row(cells!["Tea & biscuits", 1, 4.25])
        .build()?;

    // A short row is padded; a spanning cell covers two columns
    table.append_values(["Delivery"])?;
    table.append_values(cells![
        Cell::header("Total").with_column_span(2)?,
        Cell::new(11.25).with_background("#ffd"),
    ])?;

    println!("{}", table.to_html()?);
    println!();
    println!("{}", table.to_latex()?);

    // Mapping form: keys become the header row
    let scores = Table::from_mapping([
        ("name", vec![Value::from("ada"), Value::from("grace")]),
        ("score", vec![Value::from(0.975)]),
    ])?;
    println!();
    println!("{}", scores.to_html()?);

    Ok(())
}
