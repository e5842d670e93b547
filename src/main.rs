use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use densitymap::config::{ScenarioSpec, Settings};
use densitymap::model::{self, ScenarioInput};
use densitymap::{diagnostics, render};
use std::fs::File;
use std::path::PathBuf;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "densitymap")]
#[command(about = "Density map collector", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect one series per scenario and report mean / standard error.
    Collect {
        /// Grid files or zip archives, one per scenario.
        locators: Vec<PathBuf>,

        /// Scenario labels, in locator order. Defaults to file stems.
        #[arg(long = "label")]
        labels: Vec<String>,

        /// JSON config file; flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,

        /// Write the full JSON report here.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the summary table (label, mean, stderr) here.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Args)]
struct Overrides {
    /// Expected grid side length.
    #[arg(long)]
    size: Option<usize>,

    /// Reference scenario index, or -1 for absolute values.
    #[arg(long, allow_hyphen_values = true)]
    norm_id: Option<i64>,

    /// Crop half-extent as RX,RY.
    #[arg(long, value_parser = parse_pair)]
    radius: Option<(usize, usize)>,

    /// Columns trimmed from the right of the crop.
    #[arg(long)]
    dropx: Option<usize>,

    /// Rows trimmed from the bottom of the crop.
    #[arg(long)]
    dropy: Option<usize>,

    /// Keep every k-th cell on both axes.
    #[arg(long)]
    repeat_shift: Option<usize>,

    /// Sampling anchor as CX,CY in cropped coordinates.
    #[arg(long, value_parser = parse_pair)]
    repeat_center: Option<(usize, usize)>,

    /// Regex for archive entry names.
    #[arg(long)]
    entry_pattern: Option<String>,

    /// Process scenarios in parallel.
    #[arg(long)]
    parallel: bool,
}

impl Overrides {
    fn into_settings(self) -> Settings {
        Settings {
            size: self.size,
            norm_id: self.norm_id,
            radius: self.radius,
            dropx: self.dropx,
            dropy: self.dropy,
            repeat_shift: self.repeat_shift,
            repeat_center: self.repeat_center,
            entry_pattern: self.entry_pattern,
            parallel: self.parallel.then_some(true),
            scenarios: Vec::new(),
        }
    }
}

fn parse_pair(s: &str) -> std::result::Result<(usize, usize), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated integers, got {:?}", s))?;
    let a = a.trim().parse().map_err(|e| format!("{}: {:?}", e, a))?;
    let b = b.trim().parse().map_err(|e| format!("{}: {:?}", e, b))?;
    Ok((a, b))
}

/// Positional locators replace the config's scenario list; `--label` values
/// name whichever list ends up in effect, in order.
fn set_scenarios(settings: &mut Settings, locators: Vec<PathBuf>, labels: Vec<String>) -> Result<()> {
    if !locators.is_empty() {
        settings.scenarios = locators
            .into_iter()
            .map(|path| ScenarioSpec {
                path,
                label: None,
                kind: None,
            })
            .collect();
    }
    if settings.scenarios.is_empty() {
        bail!("no scenarios given (pass locators or a config with \"scenarios\")");
    }

    if !labels.is_empty() {
        if labels.len() != settings.scenarios.len() {
            bail!(
                "got {} --label value(s) for {} scenario(s)",
                labels.len(),
                settings.scenarios.len()
            );
        }
        for (spec, label) in settings.scenarios.iter_mut().zip(labels) {
            spec.label = Some(label);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Collect {
            locators,
            labels,
            config,
            overrides,
            json,
            csv,
        } => {
            // 1) Layer settings: config file, then CLI flags, then positional scenarios.
            let mut settings = match &config {
                Some(path) => Settings::from_json_file(path)?,
                None => Settings::default(),
            };
            settings = settings.merged_with(overrides.into_settings());

            set_scenarios(&mut settings, locators, labels)?;

            let cfg = settings
                .validate_and_build()
                .context("invalid configuration")?;
            let inputs: Vec<ScenarioInput> =
                settings.scenarios.iter().map(ScenarioInput::from).collect();

            // 2) Collect.
            let data = model::collect_scenarios(&inputs, &cfg)?;

            // 3) Report.
            for line in render::summary_lines(&data) {
                println!("{}", line);
            }

            if let Some(out) = json {
                std::fs::write(&out, render::render_report(&data)?)
                    .with_context(|| format!("write {}", out.display()))?;
                println!("Wrote {}", out.display());
            }
            if let Some(out) = csv {
                let file =
                    File::create(&out).with_context(|| format!("create {}", out.display()))?;
                render::write_summary_csv(file, &render::summary_rows(&data))?;
                println!("Wrote {}", out.display());
            }
        }
    }

    Ok(())
}
