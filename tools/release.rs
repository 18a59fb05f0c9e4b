use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use toml_edit::{DocumentMut, Item};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Bump {
    Major,
    Minor,
    Patch,
}

/// Bump the crate version, record the changes and tag the release.
#[derive(Debug, Parser)]
#[command(name = "release")]
struct Args {
    /// Which part of the current version to increment
    #[arg(long, value_enum, conflicts_with = "version")]
    bump: Option<Bump>,

    /// Exact version to release
    #[arg(long)]
    version: Option<String>,

    /// Print the plan without touching files or git
    #[arg(long)]
    dry_run: bool,

    /// Skip the confirmation prompts
    #[arg(long, short)]
    yes: bool,

    /// Push the commit and tag once created
    #[arg(long)]
    push: bool,
}

fn parse_version(version: &str) -> Result<(u64, u64, u64)> {
    let parts = version
        .split('.')
        .map(str::parse::<u64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid version `{}`: {}", version, e))?;
    match parts.as_slice() {
        [major, minor, patch] => Ok((*major, *minor, *patch)),
        _ => Err(format!("version `{}` is not MAJOR.MINOR.PATCH", version).into()),
    }
}

fn next_version(current: &str, bump: Bump) -> Result<String> {
    let (major, minor, patch) = parse_version(current)?;
    Ok(match bump {
        Bump::Major => format!("{}.0.0", major + 1),
        Bump::Minor => format!("{}.{}.0", major, minor + 1),
        Bump::Patch => format!("{}.{}.{}", major, minor, patch + 1),
    })
}

fn git(args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        return Err(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )
        .into());
    }
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

fn latest_tag() -> Option<String> {
    git(&["describe", "--tags", "--abbrev=0"]).ok()
}

fn changes_since(tag: Option<&str>) -> Result<String> {
    let range = tag.map(|t| format!("{}..HEAD", t));
    let mut args = vec!["log", "--pretty=format:- %s"];
    if let Some(range) = range.as_deref() {
        args.push(range);
    }
    git(&args)
}

fn confirm(message: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{} (y/n): ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn write_changelog(path: &Path, version: &str, changes: &str) -> Result<()> {
    let existing = fs::read_to_string(path).unwrap_or_default();
    let section = format!(
        "## v{} ({})\n\n{}\n\n",
        version,
        Local::now().format("%Y-%m-%d"),
        if changes.is_empty() { "- No changes recorded" } else { changes }
    );
    let body = match existing.strip_prefix("# Changelog\n\n") {
        Some(rest) => format!("# Changelog\n\n{}{}", section, rest),
        None => format!("# Changelog\n\n{}{}", section, existing),
    };
    fs::write(path, body)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let manifest = fs::read_to_string("Cargo.toml")?;
    let mut doc = manifest.parse::<DocumentMut>()?;
    let current = doc["package"]["version"]
        .as_str()
        .ok_or("Cargo.toml has no [package].version")?
        .to_string();

    let version = match (&args.version, args.bump) {
        (Some(version), _) => {
            parse_version(version)?;
            version.clone()
        }
        (None, Some(bump)) => next_version(&current, bump)?,
        (None, None) => return Err("pass either --bump or --version".into()),
    };
    info!("releasing {} -> {}", current, version);

    let previous = latest_tag();
    info!("previous tag: {}", previous.as_deref().unwrap_or("none"));
    let changes = changes_since(previous.as_deref())?;
    if changes.is_empty() {
        warn!("no commits since the previous tag");
    } else {
        info!("changes:\n{}", changes);
    }

    if args.dry_run {
        info!("dry run, nothing written");
        return Ok(());
    }

    if !confirm(&format!("Release version {}?", version), args.yes)? {
        info!("release aborted");
        return Ok(());
    }

    doc["package"]["version"] = Item::from(version.as_str());
    fs::write("Cargo.toml", doc.to_string())?;
    write_changelog(Path::new("CHANGELOG.md"), &version, &changes)?;
    info!("updated Cargo.toml and CHANGELOG.md");

    git(&["add", "Cargo.toml", "CHANGELOG.md"])?;
    git(&["commit", "-m", &format!("Release v{}", version)])?;
    git(&["tag", "-a", &format!("v{}", version), "-m", &format!("Version {}", version)])?;
    info!("tagged v{}", version);

    if args.push {
        git(&["push"])?;
        git(&["push", "--tags"])?;
        info!("pushed v{}", version);
    }

    Ok(())
}
