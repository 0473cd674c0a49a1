use anyhow::Context;
use clap::Parser;
use oiddir_3d::config::{CliConfig, Command};
use oiddir_3d::core::{Conversion, ConversionEngine, Direction, IdentifierPathConverter};
use oiddir_3d::utils::{logger, validation, validation::Validate};
use oiddir_3d::{OidDirError, TomlConfig};
use std::io::{self, BufRead, Write};

const DEMO_OID: &str = "1.3.6.1.4.1.56521";

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入 TOML 配置 (未指定時使用預設值)
    let toml_config = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    logger::init_cli_logger(
        args.verbose || toml_config.logging.verbose,
        toml_config.logging.json,
    );

    tracing::debug!("CLI config: {:?}", args);

    // 命令列 --base 優先於配置檔
    let converter = match &args.base {
        Some(_) => IdentifierPathConverter::from_config(&args),
        None => IdentifierPathConverter::from_config(&toml_config),
    };

    // 驗證配置
    if let Err(e) = toml_config.validate() {
        fail(&e);
    }
    if let Some(base) = &args.base {
        if let Err(e) = validation::validate_dn("--base", base) {
            fail(&e);
        }
    }
    tracing::debug!("Registration base: {}", converter.registration_base());

    let engine = if args.strict {
        ConversionEngine::new_strict(converter)
    } else {
        ConversionEngine::new(converter)
    };

    let result = match &args.command {
        Command::Oid2dn { dots } => run_batch(&engine, Direction::Oid2Dn, dots, args.json),
        Command::Dn2oid { dns } => run_batch(&engine, Direction::Dn2Oid, dns, args.json),
        Command::Demo => run_demo(&engine, args.json),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast::<OidDirError>() {
            Ok(e) => fail(&e),
            Err(e) => Err(e),
        },
    }
}

fn run_batch(
    engine: &ConversionEngine,
    direction: Direction,
    values: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let inputs = if values.is_empty() {
        read_stdin_values()?
    } else {
        values.to_vec()
    };

    let conversions = engine.run(direction, &inputs)?;
    print_conversions(&conversions, json)
}

/// dotNotation -> DN -> dotNotation for the sample OID.
fn run_demo(engine: &ConversionEngine, json: bool) -> anyhow::Result<()> {
    let dn = engine.convert(Direction::Oid2Dn, DEMO_OID)?;
    let oid = engine.convert(Direction::Dn2Oid, &dn.output)?;
    print_conversions(&[dn, oid], json)
}

fn read_stdin_values() -> anyhow::Result<Vec<String>> {
    let stdin = io::stdin();
    let mut values = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            values.push(line.to_string());
        }
    }
    tracing::debug!("Read {} values from stdin", values.len());
    Ok(values)
}

fn print_conversions(conversions: &[Conversion], json: bool) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for conversion in conversions {
        if json {
            writeln!(out, "{}", serde_json::to_string(conversion)?)?;
        } else {
            writeln!(out, "{}", conversion)?;
        }
    }
    Ok(())
}

fn fail(e: &OidDirError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
