use std::{
    io,
    path::{Component, Path, PathBuf},
};

mod terminal;

use anyhow::Context;
use clap::ArgAction;
use mdtoc::{Config, Directory, Outline, domain::CONFIG_FILE_NAME};
use tracing::instrument;

/// Generate a table of contents from a directory of markdown documents
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory to scan for markdown documents
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Write the table of contents to this file instead of standard output
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// The title of the table of contents [default: the name of the directory]
    #[arg(short, long)]
    title: Option<String>,

    /// List entries in ascending order; pass `false` for descending order
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    asc: Option<bool>,

    /// Read configuration from this file [default: <DIR>/.mdtoc.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.execute()
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn execute(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        let toc = self.generate(&config)?;

        match &self.out {
            Some(path) => {
                use terminal::Colorize;

                std::fs::write(path, toc)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!(
                    "{}",
                    format!("Wrote table of contents to {}", path.display()).success()
                );
            }
            None => println!("{toc}"),
        }
        Ok(())
    }

    /// Scans the directory and renders the outline.
    fn generate(&self, config: &Config) -> anyhow::Result<String> {
        let mut tree = Directory::new(self.dir.clone())
            .load()
            .with_context(|| format!("failed to scan {}", self.dir.display()))?;

        let title = [&self.title, &config.title]
            .into_iter()
            .flatten()
            .find(|title| !title.is_empty())
            .cloned()
            .unwrap_or_else(|| directory_name(&self.dir));
        tree.set_title(title);

        let order = self.asc.map_or_else(|| config.sort_order(), Into::into);
        tracing::debug!("rendering in {order:?} order");

        Ok(Outline::new(&tree, order)
            .with_indent(config.indent())
            .to_string())
    }

    /// Loads the configuration file given on the command line, or else the
    /// one in the scanned directory if there is one.
    fn load_config(&self) -> anyhow::Result<Config> {
        if let Some(path) = &self.config {
            return Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()));
        }

        let path = self.dir.join(CONFIG_FILE_NAME);
        Ok(Config::load(&path).unwrap_or_else(|e| {
            match &e {
                mdtoc::domain::ConfigError::Read(io_error)
                    if io_error.kind() == io::ErrorKind::NotFound =>
                {
                    tracing::debug!("no config at {}", path.display());
                }
                _ => tracing::warn!("ignoring {}: {e}", path.display()),
            }
            Config::default()
        }))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// The name of a directory as given, without following symbolic links.
///
/// Paths ending in `.` or `..` are resolved first.
fn directory_name(dir: &Path) -> String {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    let resolved = if matches!(absolute.components().next_back(), Some(Component::Normal(_))) {
        absolute
    } else {
        absolute.canonicalize().unwrap_or(absolute)
    };
    resolved.file_name().map_or_else(
        || resolved.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::tempdir;
    use test_case::test_case;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mdtoc").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);

        assert_eq!(cli.dir, PathBuf::from("."));
        assert_eq!(cli.out, None);
        assert_eq!(cli.title, None);
        assert_eq!(cli.asc, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_all_flags() {
        let cli = parse(&[
            "--dir", "docs", "--out", "TOC.md", "-t", "Handbook", "--asc", "false", "-vv",
        ]);

        assert_eq!(cli.dir, PathBuf::from("docs"));
        assert_eq!(cli.out, Some(PathBuf::from("TOC.md")));
        assert_eq!(cli.title.as_deref(), Some("Handbook"));
        assert_eq!(cli.asc, Some(false));
        assert_eq!(cli.verbose, 2);
    }

    #[test_case(&["--asc"], Some(true); "bare flag")]
    #[test_case(&["--asc=false"], Some(false); "inline value")]
    #[test_case(&["--asc", "true"], Some(true); "separate value")]
    #[test_case(&[], None; "absent")]
    fn parses_order_flag(args: &[&str], expected: Option<bool>) {
        assert_eq!(parse(args).asc, expected);
    }

    #[test]
    fn rejects_non_boolean_order() {
        let result = Cli::try_parse_from(["mdtoc", "--asc", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn title_defaults_to_directory_name() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("handbook");
        write(&dir, "part/intro.md", "# Intro\n");

        let cli = parse(&["--dir", dir.to_str().unwrap()]);
        let toc = cli.generate(&Config::default()).unwrap();

        assert_eq!(toc, "# handbook\n\n## part\n\n- [Intro](./part/intro.md)\n");
    }

    #[test]
    fn empty_title_falls_back_to_directory_name() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("handbook");
        write(&dir, "intro.md", "# Intro\n");

        let cli = parse(&["--dir", dir.to_str().unwrap(), "-t", ""]);
        let toc = cli.generate(&Config::default()).unwrap();

        assert!(toc.starts_with("# handbook\n"));
    }

    #[cfg(unix)]
    #[test]
    fn title_keeps_symlinked_directory_name() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "real-name/d/x.md", "# X\n");
        let link = tmp.path().join("link-name");
        std::os::unix::fs::symlink(tmp.path().join("real-name"), &link).unwrap();

        let cli = parse(&["--dir", link.to_str().unwrap()]);

        assert_eq!(
            cli.generate(&Config::default()).unwrap(),
            "# link-name\n\n## d\n\n- [X](./d/x.md)\n"
        );
    }

    #[test]
    fn directory_name_resolves_relative_paths() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("notes");
        std::fs::create_dir_all(dir.join("sub")).unwrap();

        assert_eq!(directory_name(&dir.join("sub").join("..")), "notes");
    }

    #[test]
    fn command_line_overrides_config() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "docs/a.md", "# Alpha\n");
        write(tmp.path(), "docs/b.md", "# Beta\n");

        let mut config = Config::default();
        config.title = Some("From config".to_string());
        let cli = parse(&[
            "--dir",
            tmp.path().to_str().unwrap(),
            "--title",
            "From flag",
            "--asc",
            "false",
        ]);

        assert_eq!(
            cli.generate(&config).unwrap(),
            "# From flag\n\n## docs\n\n- [Beta](./docs/b.md)\n- [Alpha](./docs/a.md)\n"
        );
    }

    #[test]
    fn config_in_scanned_directory_is_used() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "a/b/c.md", "# C\n");
        write(
            tmp.path(),
            CONFIG_FILE_NAME,
            "_version = \"1\"\ntitle = \"Configured\"\nindent = \"\\t\"\n",
        );

        let cli = parse(&["--dir", tmp.path().to_str().unwrap()]);
        let config = cli.load_config().unwrap();

        assert_eq!(
            cli.generate(&config).unwrap(),
            "# Configured\n\n## a\n\n- b\n\t- [C](./a/b/c.md)\n"
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let tmp = tempdir().unwrap();
        let cli = parse(&[
            "--dir",
            tmp.path().to_str().unwrap(),
            "--config",
            tmp.path().join("missing.toml").to_str().unwrap(),
        ]);

        assert!(cli.load_config().is_err());
    }

    #[test]
    fn writes_output_file() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("site");
        write(&dir, "guide.md", "# Guide\n");
        let out = tmp.path().join("TOC.md");

        let cli = parse(&[
            "--dir",
            dir.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]);
        cli.execute().unwrap();

        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "# site\n\n## [Guide](./guide.md)\n\n"
        );
    }

    #[test]
    fn missing_directory_fails() {
        let tmp = tempdir().unwrap();
        let cli = parse(&["--dir", tmp.path().join("missing").to_str().unwrap()]);

        assert!(cli.execute().is_err());
    }
}
