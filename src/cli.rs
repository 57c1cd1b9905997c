// CLI module for argument parsing and configuration

use crate::config::UserConfig;
use crate::domain::{PlanOptions, SessionStore, TransferMode};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

const DEFAULT_SOURCE_DIR: &str = "./media";
const DEFAULT_KEEP_DIR: &str = "./keep";
const DEFAULT_DISCARD_DIR: &str = "./discard";
const FALLBACK_SESSION_FILE: &str = ".pswp-session.json";

/// Pswp - swipe through a folder of photos
///
/// Keep or discard each photo, then copy or move the decisions (RAW
/// siblings included) into keep/discard folders.
#[derive(Parser, Debug, Clone)]
#[command(name = "pswp")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory with the photos to review
    #[arg(default_value = DEFAULT_SOURCE_DIR)]
    pub directory: PathBuf,

    /// Destination folder for kept photos
    #[arg(long = "keep-dir")]
    pub keep_dir: Option<PathBuf>,

    /// Destination folder for discarded photos
    #[arg(long = "discard-dir")]
    pub discard_dir: Option<PathBuf>,

    /// Copy or move files when executing
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Transfer all RAW siblings even when several match one photo
    #[arg(long = "include-ambiguous-raws", action = ArgAction::SetTrue)]
    pub include_ambiguous_raws: bool,

    /// Session file (defaults to the user data directory)
    #[arg(long = "session-file")]
    pub session_file: Option<PathBuf>,

    /// Discard the stored session and start over
    #[arg(long = "reset", action = ArgAction::SetTrue)]
    pub reset: bool,

    /// Report what would be transferred without touching any file
    #[arg(short = 'n', long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Confirm the transfer without asking
    #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
    pub yes: bool,

    /// Print the transfer plan and exit
    #[arg(long = "plan", action = ArgAction::SetTrue)]
    pub plan: bool,

    /// Write a filename,decision CSV into DIR and exit
    #[arg(long = "export", value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    pub export: Option<PathBuf>,

    /// Execute the plan without opening the interface (requires --yes)
    #[arg(long = "execute", action = ArgAction::SetTrue)]
    pub execute: bool,

    /// Show the welcome screen again
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub welcome: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Transfer mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Duplicate files into the destination folders
    Copy,
    /// Relocate files into the destination folders
    Move,
}

impl From<ModeArg> for TransferMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Copy => TransferMode::Copy,
            ModeArg::Move => TransferMode::Move,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

/// Configuration merged from defaults, the user config file and arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: PathBuf,
    pub keep_dir: PathBuf,
    pub discard_dir: PathBuf,
    pub mode: TransferMode,
    pub include_ambiguous_raws: bool,
    pub session_file: PathBuf,
    pub reset: bool,
    pub dry_run: bool,
    pub assume_yes: bool,
    pub print_plan: bool,
    pub export_dir: Option<PathBuf>,
    pub execute: bool,
    pub show_welcome: bool,
    pub verbose: bool,
}

impl AppConfig {
    /// Arguments win over the user config, which wins over defaults
    pub fn resolve(args: Args, user: &UserConfig) -> Self {
        AppConfig {
            directory: args.directory,
            keep_dir: args
                .keep_dir
                .or_else(|| user.keep_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KEEP_DIR)),
            discard_dir: args
                .discard_dir
                .or_else(|| user.discard_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DISCARD_DIR)),
            mode: args
                .mode
                .map(TransferMode::from)
                .or(user.mode)
                .unwrap_or_default(),
            include_ambiguous_raws: args.include_ambiguous_raws
                || user.include_ambiguous_raws.unwrap_or(false),
            session_file: args
                .session_file
                .or_else(SessionStore::default_path)
                .unwrap_or_else(|| PathBuf::from(FALLBACK_SESSION_FILE)),
            reset: args.reset,
            dry_run: args.dry_run,
            assume_yes: args.yes,
            print_plan: args.plan,
            export_dir: args.export,
            execute: args.execute,
            show_welcome: args.welcome,
            verbose: args.verbose,
        }
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            keep_dir: self.keep_dir.clone(),
            discard_dir: self.discard_dir.clone(),
            include_ambiguous_raws: self.include_ambiguous_raws,
        }
    }

    /// True when no interactive session should be started
    pub fn is_headless(&self) -> bool {
        self.print_plan || self.export_dir.is_some() || self.execute
    }

    /// Validate the configuration and return any errors.
    ///
    /// A missing source directory is allowed: it shows up as an empty index.
    pub fn validate(&self) -> Result<(), String> {
        if self.keep_dir == self.discard_dir {
            return Err(format!(
                "Keep and discard folders must differ: {}",
                self.keep_dir.display()
            ));
        }

        for (label, dir) in [("Keep", &self.keep_dir), ("Discard", &self.discard_dir)] {
            if dir == &self.directory {
                return Err(format!(
                    "{} folder cannot be the source directory: {}",
                    label,
                    dir.display()
                ));
            }
        }

        if self.directory.exists() && !self.directory.is_dir() {
            return Err(format!(
                "Path is not a directory: {}",
                self.directory.display()
            ));
        }

        Ok(())
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig::resolve(args, &UserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv.iter().copied()).unwrap()
    }

    mod args_tests {
        use super::*;

        #[test]
        fn test_args_default_values() {
            let args = parse(&["pswp"]);

            assert_eq!(args.directory, PathBuf::from(DEFAULT_SOURCE_DIR));
            assert!(args.mode.is_none());
            assert!(!args.dry_run);
            assert!(!args.yes);
            assert!(args.export.is_none());
        }

        #[test]
        fn test_args_mode_and_dirs() {
            let args = parse(&[
                "pswp",
                "/photos",
                "--mode",
                "move",
                "--keep-dir",
                "/out/keep",
                "--discard-dir",
                "/out/discard",
                "--include-ambiguous-raws",
            ]);

            assert_eq!(args.directory, PathBuf::from("/photos"));
            assert_eq!(args.mode, Some(ModeArg::Move));
            assert_eq!(args.keep_dir, Some(PathBuf::from("/out/keep")));
            assert!(args.include_ambiguous_raws);
        }

        #[test]
        fn test_export_without_value_uses_current_dir() {
            let args = parse(&["pswp", "--export"]);
            assert_eq!(args.export, Some(PathBuf::from(".")));

            let args = parse(&["pswp", "--export", "/tmp/out"]);
            assert_eq!(args.export, Some(PathBuf::from("/tmp/out")));
        }

        #[test]
        fn test_invalid_mode_rejected() {
            assert!(Args::try_parse_from(["pswp", "--mode", "delete"]).is_err());
        }

        #[test]
        fn test_mode_conversion() {
            assert_eq!(TransferMode::from(ModeArg::Copy), TransferMode::Copy);
            assert_eq!(TransferMode::from(ModeArg::Move), TransferMode::Move);
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_app_config_defaults() {
            let config: AppConfig = parse(&["pswp"]).into();

            assert_eq!(config.keep_dir, PathBuf::from(DEFAULT_KEEP_DIR));
            assert_eq!(config.discard_dir, PathBuf::from(DEFAULT_DISCARD_DIR));
            assert_eq!(config.mode, TransferMode::Copy);
            assert!(!config.include_ambiguous_raws);
            assert!(!config.is_headless());
        }

        #[test]
        fn test_user_config_fills_missing_args() {
            let user = UserConfig {
                keep_dir: Some(PathBuf::from("/saved/keep")),
                mode: Some(TransferMode::Move),
                include_ambiguous_raws: Some(true),
                ..UserConfig::default()
            };

            let config = AppConfig::resolve(parse(&["pswp"]), &user);

            assert_eq!(config.keep_dir, PathBuf::from("/saved/keep"));
            assert_eq!(config.mode, TransferMode::Move);
            assert!(config.include_ambiguous_raws);
        }

        #[test]
        fn test_args_override_user_config() {
            let user = UserConfig {
                keep_dir: Some(PathBuf::from("/saved/keep")),
                mode: Some(TransferMode::Move),
                ..UserConfig::default()
            };

            let config = AppConfig::resolve(
                parse(&["pswp", "--keep-dir", "/cli/keep", "--mode", "copy"]),
                &user,
            );

            assert_eq!(config.keep_dir, PathBuf::from("/cli/keep"));
            assert_eq!(config.mode, TransferMode::Copy);
        }

        #[test]
        fn test_headless_flags() {
            assert!(AppConfig::from(parse(&["pswp", "--plan"])).is_headless());
            assert!(AppConfig::from(parse(&["pswp", "--export"])).is_headless());
            assert!(AppConfig::from(parse(&["pswp", "--execute"])).is_headless());
        }

        #[test]
        fn test_validate_missing_source_is_allowed() {
            let config: AppConfig = parse(&["pswp", "/nonexistent/pswp/media"]).into();
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_validate_same_keep_and_discard() {
            let config: AppConfig =
                parse(&["pswp", "--keep-dir", "/out", "--discard-dir", "/out"]).into();

            let result = config.validate();
            assert!(result.unwrap_err().contains("must differ"));
        }

        #[test]
        fn test_validate_destination_equals_source() {
            let config: AppConfig = parse(&["pswp", "/photos", "--keep-dir", "/photos"]).into();

            let result = config.validate();
            assert!(result.unwrap_err().contains("cannot be the source"));
        }
    }
}
