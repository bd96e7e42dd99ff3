//! CLI command printing the locale table

use crate::formats::available_locales;

pub fn execute() -> anyhow::Result<()> {
    for locale in available_locales() {
        println!("{locale}");
    }
    Ok(())
}
