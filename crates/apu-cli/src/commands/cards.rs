use std::path::{Path, PathBuf};

use apu_core::error::ApuError;
use apu_core::extraction::SourceOptions;
use apu_core::model::Card;
use apu_core::parse_cards_from;
use apu_core::session::Session;

use crate::commands::open_input;
use crate::output::{self, OutputFormat};

pub fn run(
    inputs: &[PathBuf],
    format: OutputFormat,
    out: Option<&Path>,
    append: bool,
    options: &SourceOptions,
) -> Result<(), ApuError> {
    let mut documents: Vec<(&Path, Vec<Card>)> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let (bytes, source) = open_input(input, options)?;
        let cards = parse_cards_from(&bytes, source.as_ref())?;
        if cards.is_empty() {
            tracing::warn!(input = %input.display(), "no cards found");
        }
        documents.push((input.as_path(), cards));
    }

    match out {
        Some(path) => {
            let mut session = Session::new();
            for (_, cards) in &documents {
                session.extend_cards(cards)?;
            }

            if append && path.exists() {
                let added = session.append_to(path)?;
                eprintln!("Appended {} card(s) to {}", added, path.display());
            } else {
                session.save(path)?;
                eprintln!("Wrote {} card(s) to {}", session.len(), path.display());
            }
        }
        None => match format {
            OutputFormat::Table => {
                let multi = documents.len() > 1;
                for (i, (input, cards)) in documents.iter().enumerate() {
                    if multi {
                        if i > 0 {
                            println!();
                        }
                        println!("--- {} ---\n", input.display());
                    }
                    print!("{}", output::table::format_cards(cards));
                }
            }
            OutputFormat::Json => {
                let all: Vec<&Card> = documents.iter().flat_map(|(_, c)| c).collect();
                output::json::print(&all)?;
            }
            OutputFormat::Csv => {
                let all: Vec<Card> = documents.into_iter().flat_map(|(_, c)| c).collect();
                apu_core::export::write_cards_csv(std::io::stdout().lock(), &all)?;
            }
        },
    }

    Ok(())
}
