#[macro_use]
extern crate log;

use std::fs::File;
use std::io::Read;
use std::process::exit;

use clap::{crate_authors, crate_description, crate_version, App, Arg};

use totalfit::config::BreakingConfig;
use totalfit::optimizer::{lines, optimum_breakpoints};
use totalfit::tokenizer::paragraph;
use totalfit::units::Pt;

/// A width oracle that charges a fixed width per character. Stands in for
/// real font metrics, which this crate doesn't provide.
struct MonospaceWidths {
    char_width: f64,
}

impl totalfit::tokenizer::WidthOracle for MonospaceWidths {
    fn width_of(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let matches = App::new("breaklines")
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .arg(
            Arg::with_name("INPUT")
                .help("Text file to break into justified lines")
                .required(true),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML file holding a BreakingConfig (defaults are used otherwise)"),
        )
        .arg(
            Arg::with_name("char-width")
                .long("char-width")
                .value_name("PT")
                .default_value("6.0")
                .help("Width in points charged per character by the demo width oracle"),
        )
        .get_matches();

    let input_path = matches.value_of("INPUT").expect("required arg");
    let mut text = String::new();
    File::open(input_path)?.read_to_string(&mut text)?;

    let config = match matches.value_of("config") {
        Some(path) => {
            let mut contents = String::new();
            File::open(path)?.read_to_string(&mut contents)?;
            BreakingConfig::from_toml(&contents)?
        }
        None => BreakingConfig::default(),
    };

    let char_width: f64 = matches.value_of("char-width").unwrap().parse()?;
    let widths = MonospaceWidths { char_width };

    let (tokenize_opts, optimizer_opts) = config.split();
    let optimizer_opts = if optimizer_opts.line_width == Pt::ZERO {
        totalfit::optimizer::OptimizerOptions::with_line_width(Pt(400.0))
    } else {
        optimizer_opts
    };

    let para = paragraph(
        text.trim(),
        tokenize_opts,
        &widths,
        &totalfit::tokenizer::NoHyphenation,
    )?;

    let breakpoints = optimum_breakpoints(&para, &optimizer_opts)?;
    debug!("broke paragraph into {} lines", breakpoints.len() - 1);

    for (items, breakpoint) in lines(&para.items, &breakpoints) {
        let rendered: String = items
            .iter()
            .filter_map(|item| match &item.content {
                totalfit::items::Content::Box(s) => Some(s.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ");

        println!(
            "{:>5.1} | fitness {} | {}",
            breakpoint.ratio, breakpoint.fitness_class, rendered
        );
    }

    Ok(())
}
