use std::path::PathBuf;

use bmfont_text::{BmFontError, Font, ParseOptions, MAX_TOKEN_LENGTH};
use clap::Command;

fn main() {
    let command = Command::new("bmfont-text")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check and inspect BMFont text descriptors")
        .arg(
            clap::Arg::new("font_path")
                .help("Path to the .fnt file")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Write the parsed font as JSON to this path")
                .value_name("PATH"),
        )
        .arg(
            clap::Arg::new("max_records")
                .long("max-records")
                .help("Reject descriptors declaring more pages, chars or kernings than this")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("max_token_len")
                .long("max-token-len")
                .help("Longest accepted token, in bytes")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Set the level of verbosity")
                .action(clap::ArgAction::Count),
        );

    let args = command.get_matches();
    env_logger::Builder::new()
        .filter_level(match args.get_count("verbosity") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let mut options = ParseOptions {
        max_token_len: args
            .get_one::<usize>("max_token_len")
            .copied()
            .unwrap_or(MAX_TOKEN_LENGTH),
        ..Default::default()
    };
    if let Some(&limit) = args.get_one::<usize>("max_records") {
        options.max_pages = limit;
        options.max_chars = limit;
        options.max_kernings = limit;
    }

    if let Err(e) = run(&args, &options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &clap::ArgMatches, options: &ParseOptions) -> Result<(), BmFontError> {
    // clap enforces `required(true)`
    let input_name = args
        .get_one::<String>("font_path")
        .map(PathBuf::from)
        .unwrap_or_default();

    log::info!("Loading {}", input_name.display());
    let before = std::time::Instant::now();
    let font = bmfont_text::load_with_options(&input_name, options)?;
    log::info!("Parsed in {:.2?}", before.elapsed());

    print_summary(&font);

    if let Some(output) = args.get_one::<String>("json") {
        log::info!("Saving {}", output);
        font.save(output)?;
    }
    Ok(())
}

fn print_summary(font: &Font) {
    println!("face:        {}", font.face);
    println!("size:        {}", font.size);
    println!("line height: {}", font.line_height);
    println!("base:        {}", font.base);
    println!("texture:     {}x{}", font.scale_w, font.scale_h);
    for (id, name) in font.pages.iter().enumerate() {
        println!("page {}:      {}", id, name);
    }
    println!("chars:       {}", font.glyph_count());
    println!("kernings:    {}", font.kerning_count());
}
