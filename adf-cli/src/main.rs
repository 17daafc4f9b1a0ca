// Command-line interface for adf
//
// This binary converts documents between the ADF document tree (JSON), Markdown and HTML.
// All conversion logic lives in the adf-babel crate; this crate only reads files, layers
// configuration and reports errors.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  adf <input> --to <format> [--from <format>] [--output <file>] [--media-map <file>]  - Convert (default)
//  adf convert <input> --to <format> ...   - Same as above (explicit)
//  adf generate-css                        - Print the baseline stylesheet used for HTML
//  adf --list-formats                      - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the target format.
// Example:
//  adf issue.json --to html --extra-standalone --extra-title "Release notes"
//
// Logging goes to stderr and is filtered by the ADF_LOG environment variable (default: warn).

use adf_babel::formats::adf::AdfFormat;
use adf_babel::formats::html::{render_to_html, HtmlFormat};
use adf_babel::formats::markdown::MarkdownFormat;
use adf_babel::{Format, FormatRegistry, MediaMap, Node};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "generate-css", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert ADF documents to and from Markdown and HTML")
        .long_about(
            "adf converts rich-text documents between the ADF document tree (JSON),\n\
            Markdown and HTML.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            adf issue.json --to markdown                  # Convert to markdown (stdout)\n  \
            adf notes.md --to adf -o notes.json           # Markdown to ADF JSON\n  \
            adf issue.json --to html --extra-standalone   # Complete HTML page",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - adf:      ADF document tree as JSON (.json, .adf)\n  \
                    - markdown: Markdown (.md, .markdown)\n  \
                    - html:     HTML fragment or standalone page (.html), output only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    HTML options (--extra-<name>):\n  \
                    standalone, title <text>, css <text>, css-path <file>,\n  \
                    inline-card-max-length <n>, media-placeholder <text>\n\
                    Markdown options (--extra-<name>):\n  \
                    indent-width <n>, media-placeholder <text>\n\n\
                    Examples:\n  \
                    adf convert issue.json --to markdown           # Markdown on stdout\n  \
                    adf convert notes.md --to adf -o notes.json    # Markdown to ADF\n  \
                    adf convert issue.json --to html --media-map media.json",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: adf, markdown, html\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("media-map")
                        .long("media-map")
                        .value_name("PATH")
                        .help("JSON file mapping media ids to URIs, used for HTML output")
                        .long_help(
                            "JSON file holding an object of media id to URI, e.g.\n\
                            {\"3f2a\": \"https://cdn.example.com/3f2a.png\"}\n\n\
                            Media whose id is missing from the map render as a placeholder\n\
                            and are reported on stderr.",
                        )
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the default CSS used for HTML export")
                .long_about(
                    "Outputs the baseline CSS embedded in standalone HTML output.\n\n\
                    Use this as a starting point for custom styling, then pass the file\n\
                    via --extra-css-path to append your rules to the defaults.\n\n\
                    Examples:\n  \
                    adf generate-css                 # Print CSS to stdout\n  \
                    adf generate-css > custom.css    # Save to file for editing",
                ),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ADF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A leading file argument means the "convert" subcommand was left out
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    resolve_css_path(&mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("input is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                fail("--to is required");
            };

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => FormatRegistry::default()
                    .detect_format_from_filename(input)
                    .unwrap_or_else(|| {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }),
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let media = sub_matches
                .get_one::<String>("media-map")
                .map(|path| load_media_map(path))
                .unwrap_or_default();

            handle_convert_command(input, &from, to, output, &media, &extra_params, &config);
        }
        Some(("generate-css", _)) => {
            handle_generate_css_command();
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    media: &MediaMap,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) {
    let registry = configured_registry(config, media);

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        fail(&e.to_string());
    }
    if let Err(e) = registry.get(to) {
        fail(&e.to_string());
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    tracing::debug!(from, to, "parsed input");

    let result = if to == "html" {
        render_html(&doc, media, extra_params, config)
    } else {
        registry.serialize_with_options(&doc, to, extra_params)
    };
    let mut text = result.unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    if !text.ends_with('\n') {
        text.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Registry whose formats carry the configured options
fn configured_registry(config: &AdfConfig, media: &MediaMap) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(AdfFormat);
    registry.register(MarkdownFormat::new((&config.markdown).into()));
    registry.register(HtmlFormat::new((&config.html).into()).with_media(media.clone()));
    registry
}

/// Render HTML directly so unresolved media can be reported
fn render_html(
    doc: &Node,
    media: &MediaMap,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) -> Result<String, adf_babel::ConvertError> {
    let options = HtmlFormat::new((&config.html).into()).options_with(extra_params)?;
    let rendered = render_to_html(doc, media, &options)?;
    for id in &rendered.unresolved_media {
        tracing::warn!("media '{id}' not found in media map, rendered as placeholder");
    }
    Ok(rendered.html)
}

/// Handle the generate-css command
fn handle_generate_css_command() {
    print!("{}", adf_babel::formats::get_default_css());
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let direction = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "read/write",
            (true, false) => "read",
            (false, true) => "write",
            (false, false) => "-",
        };
        println!(
            "  {name:<10} {direction:<11} .{}  {}",
            format.file_extensions().join(", ."),
            format.description()
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn load_media_map(path: &str) -> MediaMap {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading media map '{path}': {e}");
        std::process::exit(1);
    });
    parse_media_map(&raw).unwrap_or_else(|e| {
        eprintln!("Invalid media map '{path}': {e}");
        std::process::exit(1);
    })
}

fn parse_media_map(raw: &str) -> Result<MediaMap, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Replace `css-path` with the file's contents under `css`
fn resolve_css_path(extra_params: &mut HashMap<String, String>) {
    if let Some(path) = extra_params.remove("css-path") {
        let css = fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("Error reading CSS file '{path}': {e}");
            std::process::exit(1);
        });
        extra_params.insert("css".to_string(), css);
    }
}
