use anyhow::Result;
use api_resolver::words::Words;
use std::io::{self, Write};

fn describe(symbol: &str, snake: bool) -> String {
    let words = if snake {
        Words::split_snake(symbol)
    } else {
        Words::split_pascal(symbol)
    }
    .normalized();

    format!(
        "{symbol}: {} -> {}",
        words.components().join(" "),
        words.camel_case()
    )
}

pub fn run(symbols: &[String], snake: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for symbol in symbols {
        writeln!(stdout, "{}", describe(symbol, snake))?;
    }
    Ok(())
}
