use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the format names registered by adf_babel::FormatRegistry::with_defaults
// Build scripts can't depend on the crate they build, so the list lives here too
const AVAILABLE_FORMATS: &[&str] = &["adf", "html", "markdown"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let formats = || clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS);

    let mut cmd = Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert ADF documents to and from Markdown and HTML")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("from").long("from").value_parser(formats()))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(formats()),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("media-map")
                        .long("media-map")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("generate-css").about("Output the default CSS used for HTML export"),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "adf", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "adf", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "adf", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
