use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use fake_comics::confirm::{is_affirmative, read_answer};
use fake_comics::forge::DEFAULT_DESTINATION;
use fake_comics::{Features, ForgeConfig, Layout};
use log::info;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate a slew of fake one-page comics to test a comic server
#[derive(Parser, Debug)]
#[clap(name = "gen-fake-comics")]
struct Args {
    /// How many publishers
    #[clap(short, long, default_value = "2", value_name = "PUB")]
    publishers: u32,
    /// How many series per publisher
    #[clap(short, long, default_value = "2", value_name = "SERIES")]
    series: u32,
    /// How many volumes per series
    #[clap(short, long, default_value = "2", value_name = "VOLUMES")]
    volumes: u32,
    /// How many issues per volume
    #[clap(short, long, default_value = "10", value_name = "ISSUES")]
    issues: u32,
    /// Destination path
    #[clap(short, long, default_value = DEFAULT_DESTINATION, value_name = "DEST")]
    dest: PathBuf,
    /// Create a tree of folders, instead of dumping all in the same folder
    #[clap(short, long)]
    tree: bool,
    /// Populate random credits
    #[clap(short, long)]
    credits: bool,
    /// Populate random tags
    #[clap(short = 'T', long)]
    tags: bool,
    /// Populate random summaries
    #[clap(short = 'S', long)]
    summaries: bool,
    /// Populate story arcs
    #[clap(short, long)]
    arcs: bool,
    /// Cover height in pixels
    #[clap(long, default_value_t = fake_comics::cover::DEFAULT_COVER_HEIGHT)]
    height: u32,
    /// Seed for years, tags, credits and summaries (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    yes: bool,
}

impl Args {
    fn to_config(&self) -> Result<ForgeConfig> {
        let mut builder = ForgeConfig::builder();
        builder
            .publishers(self.publishers)
            .series(self.series)
            .volumes(self.volumes)
            .issues(self.issues)
            .destination(self.dest.clone())
            .layout(if self.tree { Layout::Tree } else { Layout::Flat })
            .features(Features {
                credits: self.credits,
                tags: self.tags,
                summaries: self.summaries,
                story_arcs: self.arcs,
            })
            .cover_height(self.height);
        if let Some(seed) = self.seed {
            builder.seed(seed);
        }
        Ok(builder.build()?)
    }
}

/// Asks on the terminal when there is one, otherwise reads a line from stdin.
fn confirm(prompt: &str) -> Result<bool> {
    let answer = if std::io::stdin().is_terminal() {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?
    } else {
        print!("{prompt} ");
        std::io::stdout().flush()?;
        read_answer(&mut std::io::stdin().lock())?
    };
    Ok(is_affirmative(&answer))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config()?;

    for line in config.plan_summary() {
        println!("{line}");
    }
    println!();

    if !args.yes && !confirm("Continue (y/n)")? {
        println!("Okay, quitting.");
        return Ok(ExitCode::FAILURE);
    }

    println!("Generating...");
    let report = config.generate().await?;
    info!("{} publishers generated", report.publishers);
    println!("Done.");

    Ok(ExitCode::SUCCESS)
}
