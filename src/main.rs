use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use lazyjs::ast::Program;
use lazyjs::{Config, StrategyKind, Translator};

fn main() -> Result<()> {
    // Warnings by default; RUST_LOG overrides.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let mut strategy: Option<StrategyKind> = None;
    let mut output_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut input_path: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strategy" | "-s" => {
                let name = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Missing strategy name after {arg}"))?;
                strategy = Some(name.parse()?);
            }
            "--output" | "-o" => {
                output_path = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("Missing output path after {arg}"))?,
                );
            }
            "--config" | "-c" => {
                config_path = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("Missing config path after {arg}"))?,
                );
            }
            _ => {
                input_path = Some(arg);
                if args.next().is_some() {
                    bail!("Only one input file is supported");
                }
                break;
            }
        }
    }

    let mut config = match config_path {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }

    let source = if let Some(path) = input_path {
        fs::read_to_string(&path).with_context(|| format!("Reading {path}"))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading stdin")?;
        buffer
    };
    let program = Program::from_yaml_str(&source)?;
    let translator = Translator::new(config);

    match output_path {
        Some(path) => {
            let file = fs::File::create(&path).with_context(|| format!("Creating {path}"))?;
            let mut writer = BufWriter::new(file);
            translator.translate(&program, &mut writer)?;
            writer.flush().with_context(|| format!("Writing {path}"))?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            translator.translate(&program, &mut writer)?;
            writer.flush().context("Writing stdout")?;
        }
    }
    Ok(())
}
