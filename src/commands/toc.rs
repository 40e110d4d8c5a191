//! Print a post's heading outline

use anyhow::Result;

use crate::content::Heading;
use crate::Folio;

/// Print the outline of a public post
pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    let headings = folio.repository().headings(slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&headings)?);
    } else {
        print!("{}", format_outline(&headings));
    }

    Ok(())
}

/// Indented outline, `###` entries nested under `##`
pub fn format_outline(headings: &[Heading]) -> String {
    headings
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level.saturating_sub(2)));
            format!("{}- {} (#{})\n", indent, heading.text, heading.id)
        })
        .collect()
}
