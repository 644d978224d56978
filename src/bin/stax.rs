use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use simtax::{CategorizedMethod, CategorizedModel, MethodConfig, ModelConfig, catalog, convert, tree};

#[derive(Parser)]
#[command(
    name = "stax",
    about = "Inspect the model/method taxonomy and convert configurations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the model taxonomy
    Tree {
        /// Show the tree registered for an application instead of the global one
        #[arg(long, value_name = "NAME")]
        application: Option<String>,
    },

    /// Convert a categorized method record (JSON) to its simple form
    MethodToSimple {
        /// Input file (stdin if omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Convert a simple method record (JSON) to its categorized form
    MethodToCategorized {
        /// Input file (stdin if omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Convert a categorized model record (JSON) to its simple form
    ModelToSimple {
        /// Input file (stdin if omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Convert a simple model record (JSON) to its categorized form
    ModelToCategorized {
        /// Input file (stdin if omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("input is not a valid record")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_tree(tree: tree::ModelTree) {
    for (kind, branches) in tree {
        let named = tree::named_slug(kind);
        println!("{} ({})", kind, named.name.unwrap_or_default());
        for (subtype, branch) in branches.iter() {
            println!("  {subtype}");
            if !branch.functionals.is_empty() {
                println!("    functionals: {}", branch.functionals.join(", "));
            }
            if !branch.refiners.is_empty() {
                println!("    refiners:    {}", branch.refiners.join(", "));
            }
            if !branch.modifiers.is_empty() {
                println!("    modifiers:   {}", branch.modifiers.join(", "));
            }
            for (method_kind, method_subtypes) in branch.methods.iter() {
                println!("    method {}: {}", method_kind, method_subtypes.join(", "));
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tree { application } => match application {
            None => print_tree(tree::MODEL_TREE),
            Some(name) => match tree::tree_for_application(&name, None) {
                Some(app_tree) => print_tree(app_tree),
                None => bail!("no tree registered for application '{name}'"),
            },
        },

        Command::MethodToSimple { input } => {
            let categorized: CategorizedMethod = parse_json(input.as_deref())?;
            print_json(&convert::method::to_simple(Some(&categorized)))?;
        }

        Command::MethodToCategorized { input } => {
            let simple: MethodConfig = parse_json(input.as_deref())?;
            let categorized =
                convert::method::to_categorized(Some(&simple), catalog::categorized_methods());
            print_json(&categorized)?;
        }

        Command::ModelToSimple { input } => {
            let categorized: CategorizedModel = parse_json(input.as_deref())?;
            print_json(&convert::model::to_simple(Some(&categorized)))?;
        }

        Command::ModelToCategorized { input } => {
            let simple: ModelConfig = parse_json(input.as_deref())?;
            let categorized =
                convert::model::to_categorized(Some(&simple), catalog::categorized_models());
            print_json(&categorized)?;
        }
    }

    Ok(())
}
