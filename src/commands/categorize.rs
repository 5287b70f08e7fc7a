use anyhow::Result;

use khabar::categorizer::classify;

/// Classify a piece of text against the taxonomy and print the label
pub fn categorize(text: &str) -> Result<()> {
    println!("{}", classify(text));
    Ok(())
}
