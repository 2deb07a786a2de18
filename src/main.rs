//! Command-line interface for htmlschema

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use htmlschema::validators::{AttributeValue, Validator};
#[cfg(feature = "cli")]
use htmlschema::Settings;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "htmlschema")]
#[command(author, version, about = "HTML attribute schema inspection and validation tool", long_about = None)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an element's attributes
    Validate {
        /// Element tag
        #[arg(value_name = "TAG")]
        tag: String,

        /// Attributes as NAME=VALUE, or NAME for an attribute without a value
        #[arg(value_name = "NAME[=VALUE]")]
        attributes: Vec<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the effective attribute schema of an element
    Inspect {
        /// Element tag
        #[arg(value_name = "TAG")]
        tag: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the rel link-type vocabulary
    #[command(name = "link-types")]
    LinkTypes {
        /// Only list link types allowed on this element
        #[arg(long, value_name = "TAG")]
        host: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_validator(cli.config).and_then(|validator| match cli.command {
        Commands::Validate {
            tag,
            attributes,
            json,
        } => cmd_validate(&validator, &tag, &attributes, json),
        Commands::Inspect { tag, json } => cmd_inspect(&validator, &tag, json).map(|_| true),
        Commands::LinkTypes { host, json } => {
            cmd_link_types(&validator, host.as_deref(), json).map(|_| true)
        }
    });

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(feature = "cli")]
fn load_validator(config: Option<PathBuf>) -> Result<Validator, Box<dyn std::error::Error>> {
    let settings = match config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    Ok(Validator::with_settings(settings)?)
}

/// Split `NAME=VALUE`; a bare `NAME` is an attribute written without a value
#[cfg(feature = "cli")]
fn parse_attribute(arg: &str) -> (&str, AttributeValue) {
    match arg.split_once('=') {
        Some((name, value)) => (name, AttributeValue::from(value)),
        None => (arg, AttributeValue::Absent),
    }
}

/// Returns `false` when a warning-level diagnostic was reported
#[cfg(feature = "cli")]
fn cmd_validate(
    validator: &Validator,
    tag: &str,
    attributes: &[String],
    json_output: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let diagnostics = validator.validate(tag, attributes.iter().map(|a| parse_attribute(a)));
    let valid = !diagnostics.iter().any(|d| d.is_warning());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else if diagnostics.is_empty() {
        println!("✓ <{}> is valid", tag);
    } else {
        for diagnostic in &diagnostics {
            println!("{}", diagnostic);
            if let Some(allowed) = &diagnostic.allowed_values {
                println!("    allowed: {}", allowed.join(", "));
            }
        }
    }

    Ok(valid)
}

#[cfg(feature = "cli")]
fn cmd_inspect(
    validator: &Validator,
    tag: &str,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = validator.resolve(tag);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&*schema)?);
        return Ok(());
    }

    println!("Element: <{}>", schema.tag);
    println!("  Known: {}", schema.is_known());
    if !schema.lineage.is_empty() {
        println!("  Families: {}", schema.lineage.join(" -> "));
    }
    println!("  Empty element: {}", schema.is_empty_element());
    if schema.is_deprecated() {
        println!("  Deprecated: true");
    }
    println!();
    println!("Attributes ({}):", schema.attributes.len());
    for spec in schema.attributes.iter() {
        let mut flags = Vec::new();
        if spec.deprecated {
            flags.push("deprecated");
        }
        if spec.experimental {
            flags.push("experimental");
        }
        if flags.is_empty() {
            println!("  {} : {}", spec.name(), spec.constraint);
        } else {
            println!("  {} : {} [{}]", spec.name(), spec.constraint, flags.join(", "));
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_link_types(
    validator: &Validator,
    host: Option<&str>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let vocabulary = validator
        .table()
        .link_types()
        .ok_or("schema table has no link-type vocabulary")?;

    let entries: Vec<_> = vocabulary
        .iter()
        .filter(|entry| host.map_or(true, |h| entry.allows_host(h)))
        .collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        let mut line = format!("{:<14} {}", entry.token, entry.hosts_display());
        if entry.deprecated {
            line.push_str(" [deprecated]");
        }
        if entry.experimental {
            line.push_str(" [experimental]");
        }
        println!("{}", line);
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
