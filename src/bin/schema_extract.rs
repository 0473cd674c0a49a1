use clap::Parser;
use oiddir_3d::schema::SchemaError;
use oiddir_3d::utils::{logger, validation, validation::Validate};
use oiddir_3d::{ExtractOptions, OidDirError, SchemaExtractor, ServerFormat, TomlConfig};

/// Extracts LDAP schema definitions from a revision of draft-coretta-oiddir-schema.
///
/// WARNING: the oiddir schema is an experimental concept, not for production use.
#[derive(Parser)]
#[command(name = "schema-extract")]
struct Args {
    /// Output format type (falls back to the config file)
    #[arg(short = 't', long = "type", value_enum)]
    format: Option<ServerFormat>,

    /// draft-coretta-oiddir-schema revision to parse
    #[arg(short, long)]
    file: String,

    /// No newlines in definitions
    #[arg(short = 'n', long)]
    no_newlines: bool,

    /// Use custom syntaxes (OpenDJ only)
    #[arg(short = 's', long)]
    use_custom_syntaxes: bool,

    /// Do not include eXtensions
    #[arg(short = 'x', long)]
    no_extensions: bool,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let toml_config = match &args.config {
        Some(path) => TomlConfig::from_file(path).unwrap_or_else(|e| fail(&e)),
        None => TomlConfig::default(),
    };

    logger::init_cli_logger(
        args.verbose || toml_config.logging.verbose,
        toml_config.logging.json,
    );

    if let Err(e) = toml_config.validate() {
        fail(&e);
    }
    if let Err(e) = validation::validate_path("file", &args.file) {
        fail(&e);
    }

    // 命令列旗標與配置檔合併
    let defaults = toml_config.extract_options();
    let options = ExtractOptions {
        format: args.format.unwrap_or(defaults.format),
        no_newlines: args.no_newlines || defaults.no_newlines,
        custom_syntaxes: args.use_custom_syntaxes || defaults.custom_syntaxes,
        no_extensions: args.no_extensions || defaults.no_extensions,
    };
    tracing::debug!("Extract options: {:?}", options);

    let extractor = SchemaExtractor::new(options).map_err(OidDirError::from)?;
    let extract = match extractor.extract_file(&args.file) {
        Ok(extract) => extract,
        Err(OidDirError::SchemaError(SchemaError::NoDefinitions)) => {
            println!("# No definitions parsed");
            std::process::exit(2);
        }
        Err(e) => fail(&e),
    };

    print!("{}", extract.render());

    // 有未知元素時以 2 結束
    if let Err(e) = extract.ensure_known() {
        tracing::warn!("⚠️ {}", e);
        std::process::exit(2);
    }

    Ok(())
}

fn fail(e: &OidDirError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
