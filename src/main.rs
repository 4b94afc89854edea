use clap::Parser;

use relver::cli::{run_release, ReleaseArgs};
use relver::config;
use relver::ui;

#[derive(clap::Parser)]
#[command(
    name = "relver",
    version,
    about = "Validate a version bump, rewrite version markers, then commit, tag, push, and publish"
)]
struct Args {
    #[arg(
        value_name = "VERSION",
        help = "New version, format <Major>.<Minor>.<Patch>, a single increment from the last"
    )]
    new_version: String,

    #[arg(help = "Release description, used as the commit and tag message")]
    description: String,

    #[arg(
        short,
        long,
        help = "Force the given version even if it is not a single increment"
    )]
    force: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Upload to the alternate package index")]
    alt_target: bool,

    #[arg(long, help = "Package-index username")]
    username: Option<String>,

    #[arg(long, help = "Package-index password")]
    password: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            ui::display_usage_hint();
            std::process::exit(1);
        }
    };

    let release_args = ReleaseArgs {
        version: args.new_version,
        description: args.description,
        force: args.force,
        dry_run: args.dry_run,
        alt_target: args.alt_target,
        username: args.username,
        password: args.password,
    };

    match run_release(&release_args, &config) {
        Ok(outcome) => {
            if release_args.dry_run {
                ui::display_success(&format!(
                    "Dry run complete, version {} would be released",
                    outcome.version
                ));
            } else {
                ui::display_success(&format!("Released version {}", outcome.version));
            }
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            ui::display_usage_hint();
            std::process::exit(1);
        }
    }
}
