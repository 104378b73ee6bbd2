//! textfill — fit the text of every box in a scene file to its box.
//!
//! Loads a JSON scene (`options`, `root`, `boxes`), lays it out with
//! `textfill-layout`, runs the fitter over every box and prints the final
//! font sizes. Command-line flags override the scene's fit options.

mod output;

use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::{info, warn};

use textfill_core::{Callbacks, FitOptions};
use textfill_layout::{Scene, SceneDescription, SceneTarget};
use textfill_text::TextMeasurer;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[clap(rename_all = "kebab_case")]
pub enum OutputType {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scene file, or `-` for stdin.
    #[arg(index = 1)]
    scene: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputType::Table)]
    output: OutputType,

    /// Ceiling in pixels; 0 or less derives it from the box height.
    #[arg(long, allow_hyphen_values = true)]
    max_font_pixels: Option<i32>,

    #[arg(long)]
    min_font_pixels: Option<u32>,

    /// Balance the width only and keep text on one line.
    #[arg(long)]
    width_only: bool,

    #[arg(long)]
    explicit_width: Option<f32>,

    #[arg(long)]
    explicit_height: Option<f32>,

    /// Rescale line height along with the font size.
    #[arg(long)]
    change_line_height: bool,

    /// Trace every search step.
    #[arg(long)]
    debug: bool,
}

impl Args {
    /// Layer command-line flags over the scene's options.
    fn apply_to(&self, options: &mut FitOptions) {
        if let Some(max) = self.max_font_pixels {
            options.max_font_pixels = max;
        }
        if let Some(min) = self.min_font_pixels {
            options.min_font_pixels = min;
        }
        if self.explicit_width.is_some() {
            options.explicit_width = self.explicit_width;
        }
        if self.explicit_height.is_some() {
            options.explicit_height = self.explicit_height;
        }
        options.width_only |= self.width_only;
        options.change_line_height |= self.change_line_height;
        options.debug |= self.debug;
    }
}

fn read_scene(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)?;
        Ok(json)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Default log filter: traces are only visible when debugging is on,
/// whether the scene or the command line asked for it.
fn log_filter(options: &FitOptions) -> &'static str {
    if options.debug {
        "debug"
    } else {
        "warn"
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let json = read_scene(&args.scene)?;
    let mut description: SceneDescription = serde_json::from_str(&json)?;
    args.apply_to(&mut description.options);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&description.options)))
        .init();

    let measurer = TextMeasurer::new();
    info!("Loaded {} font faces", measurer.face_count());

    let mut scene = Scene::from_description(description, measurer)?;
    let mut callbacks = Callbacks::new()
        .on_fail(|target: &SceneTarget<'_>| {
            warn!("{}: text still overflows, font size restored", target.name());
        })
        .on_complete(|report| {
            info!(
                "Fitted {} boxes: {} succeeded, {} failed",
                report.len(),
                report.succeeded(),
                report.failed()
            );
        });
    let report = scene.fit_all_with(&mut callbacks)?;
    drop(callbacks);

    match args.output {
        OutputType::Table => print!("{}", output::table(&report)),
        OutputType::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
