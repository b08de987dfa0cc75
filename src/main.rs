use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use watgen::gen::{self, FunctionBuilder, Module, Signature};
use watgen::{Config, FormatOptions, WidthCaps};

/// Builds a small demo module and prints it as WAT.
#[derive(Parser)]
#[command(name = "watgen")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Maximum bit width of sized i32 loads and stores
    #[arg(long, default_value_t = WidthCaps::default().i32)]
    i32_cap: u32,

    /// Maximum bit width of sized i64 loads and stores
    #[arg(long, default_value_t = WidthCaps::default().i64)]
    i64_cap: u32,

    /// Spaces per nesting level
    #[arg(long, default_value_t = FormatOptions::default().indent)]
    indent: usize,

    /// Lists up to this nesting height stay on one line
    #[arg(long, default_value_t = FormatOptions::default().inline_height)]
    inline_height: usize,

    /// Write the module to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            caps: WidthCaps {
                i32: self.i32_cap,
                i64: self.i64_cap,
            },
            format: FormatOptions {
                indent: self.indent,
                inline_height: self.inline_height,
                ..FormatOptions::default()
            },
        }
    }
}

fn demo_module(config: &Config) -> watgen::Result<Module> {
    let mut module = Module::new();

    // import console.log from the host
    module.import("console.log", "$log", Signature::new().param(gen::i32()))?;

    let add = FunctionBuilder::new("$add")?
        .with_caps(config.caps)
        .param(gen::i32())
        .param(gen::i32())
        .local("lhs", gen::i32())
        .result(gen::i32())
        .body(|b| {
            b.get(0).get(1);
            b.f32().const_(5);
            b.i32().add();
            Ok(())
        });

    module.export("add", add)?;
    Ok(module)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let code = match demo_module(&config).and_then(|m| m.to_wat_with(&config.format)) {
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(exitcode::DATAERR);
        }
        Ok(code) => code,
    };

    match cli.output {
        Some(path) => {
            if let Err(err) = fs::write(&path, code + "\n") {
                eprintln!("error: cannot write `{}`: {}", path.display(), err);
                std::process::exit(exitcode::IOERR);
            }
            tracing::info!(path = %path.display(), "module written");
        }
        None => println!("{}", code),
    }
}
