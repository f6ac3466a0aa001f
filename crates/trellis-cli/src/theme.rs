use console::{style, StyledObject};

pub(crate) fn heading(title: &str) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
}

pub(crate) fn arrow() -> StyledObject<&'static str> {
    style("→").cyan()
}

pub(crate) fn success() -> StyledObject<&'static str> {
    style("✓").green().bold()
}

pub(crate) fn failure() -> StyledObject<&'static str> {
    style("✖").red().bold()
}
