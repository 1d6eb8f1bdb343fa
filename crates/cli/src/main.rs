//! MediaFS
//!
//! Command line access to the MediaFS filesystem facade.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use filesystem::config::{default_config_path, Config};
use filesystem::{EntryFilter, FileSystem, FileSystemEntry};
use tracing_subscriber::EnvFilter;

/// MediaFS - cross-platform filesystem tool for media libraries.
#[derive(Parser, Debug)]
#[command(name = "mediafs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Strip trailing separators from a path
    Normalize {
        /// Path to normalize
        path: String,
    },

    /// Rewrite a path prefix, ignoring case
    Substitute {
        /// Path to rewrite
        path: String,

        /// Prefix to replace
        from: String,

        /// Replacement prefix
        to: String,
    },

    /// Replace invalid filename characters with spaces
    Sanitize {
        /// Filename to clean
        name: String,
    },

    /// Describe a file or directory
    Info {
        /// Path to describe
        path: PathBuf,
    },

    /// List the entries of a directory
    List(ListArgs),

    /// Create or resolve shortcut files
    #[command(subcommand)]
    Shortcut(ShortcutCommands),

    /// Exchange the contents of two files
    Swap {
        /// First file
        file1: PathBuf,

        /// Second file
        file2: PathBuf,
    },

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for directory listings.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Directory to list
    pub path: PathBuf,

    /// Walk the whole subtree
    #[arg(long, short)]
    pub recursive: bool,

    /// Only list files
    #[arg(long, conflicts_with = "dirs")]
    pub files: bool,

    /// Only list directories
    #[arg(long)]
    pub dirs: bool,

    /// Only list files with this extension (repeatable)
    #[arg(long = "extension", short = 'e', value_name = "EXT", conflicts_with = "dirs")]
    pub extensions: Vec<String>,
}

impl ListArgs {
    fn filter(&self) -> EntryFilter {
        if self.files || !self.extensions.is_empty() {
            EntryFilter::Files
        } else if self.dirs {
            EntryFilter::Directories
        } else {
            EntryFilter::All
        }
    }
}

/// Subcommands for shortcut files.
#[derive(Subcommand, Debug, Clone)]
pub enum ShortcutCommands {
    /// Write a shortcut pointing at a target path
    Create {
        /// Shortcut file to write
        shortcut: PathBuf,

        /// Path the shortcut points at
        target: String,
    },

    /// Print the target of a shortcut
    Resolve {
        /// Shortcut file to read
        shortcut: PathBuf,
    },
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = Config::load(&config_path)?;

    // Apply environment variable overrides
    config.apply_env_overrides();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.log_level.to_lowercase()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Using config file: {:?}", config_path);

    let fs = FileSystem::from_config(&config);

    match cli.command {
        Commands::Normalize { path } => {
            println!("{}", fs.normalize_path(&path)?);
        }
        Commands::Substitute { path, from, to } => {
            println!("{}", fs.substitute_path(&path, &from, &to)?);
        }
        Commands::Sanitize { name } => {
            println!("{}", fs.get_valid_filename(&name)?);
        }
        Commands::Info { path } => {
            let entry = fs.get_file_system_info(&path)?;
            for line in describe_entry(&fs, &entry) {
                println!("{line}");
            }
        }
        Commands::List(args) => {
            let count = list_entries(&fs, &args)?;
            tracing::debug!("Listed {} entries", count);
        }
        Commands::Shortcut(cmd) => match cmd {
            ShortcutCommands::Create { shortcut, target } => {
                fs.create_shortcut(&shortcut, &target)?;
                println!("Created {} -> {}", shortcut.display(), target);
            }
            ShortcutCommands::Resolve { shortcut } => match fs.resolve_shortcut(&shortcut)? {
                Some(target) => println!("{target}"),
                None => {
                    eprintln!("{} is not a shortcut or has no target", shortcut.display());
                    std::process::exit(1);
                }
            },
        },
        Commands::Swap { file1, file2 } => {
            fs.swap_files(&file1, &file2)?;
            println!("Swapped {} and {}", file1.display(), file2.display());
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => {
                println!("# {}", config_path.display());
                print!("{}", config.to_toml()?);
            }
            ConfigCommands::Init { force } => {
                init_config(&config_path, force)?;
                println!("Wrote default configuration to {}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Render the details of an entry, one field per line.
fn describe_entry(fs: &FileSystem, entry: &FileSystemEntry) -> Vec<String> {
    let kind = if entry.is_directory() { "directory" } else { "file" };
    let mut lines = vec![
        format!("Path:      {}", entry.path().display()),
        format!("Kind:      {kind}"),
        format!("Exists:    {}", entry.exists()),
        format!("Name:      {}", entry.name()),
    ];

    if let Some(extension) = entry.extension() {
        lines.push(format!("Extension: {extension}"));
    }
    if !entry.exists() {
        return lines;
    }

    if entry.is_file() {
        match entry.length() {
            Ok(length) => lines.push(format!("Length:    {length} bytes")),
            Err(e) => tracing::warn!("Failed to read length of {:?}: {}", entry.path(), e),
        }
    }
    lines.push(format!("Created:   {}", fs.get_creation_time_utc(entry).to_rfc3339()));
    lines.push(format!("Modified:  {}", fs.get_last_write_time_utc(entry).to_rfc3339()));
    if let Ok(hidden) = fs.is_hidden(entry.path()) {
        lines.push(format!("Hidden:    {hidden}"));
    }
    lines
}

/// Print the entries selected by `args`, returning how many were listed.
fn list_entries(fs: &FileSystem, args: &ListArgs) -> anyhow::Result<usize> {
    let entries = match args.filter() {
        EntryFilter::Files if !args.extensions.is_empty() => {
            fs.get_files_with_extensions(&args.path, &args.extensions, args.recursive)?
        }
        EntryFilter::Files => fs.get_files(&args.path, args.recursive)?,
        EntryFilter::Directories => fs.get_directories(&args.path, args.recursive)?,
        EntryFilter::All => fs.get_file_system_entries(&args.path, args.recursive)?,
    };

    let mut count = 0;
    for path in entries.paths() {
        let path = path.with_context(|| format!("Failed to list {}", args.path.display()))?;
        println!("{}", path.display());
        count += 1;
    }
    Ok(count)
}

/// Write the default configuration to `path` unless a file is already there.
fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save(path)
}
