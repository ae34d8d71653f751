//! Command-line flags
//!
//! Parsing is deliberately forgiving: unknown flags are skipped, a flag at
//! the end of the line without its value is skipped, and a value that does
//! not parse leaves the setting untouched.

use crate::config::{DonutConfig, RenderMode};
use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

/// Flags clap adds on its own
const BUILTIN_FLAGS: [&str; 4] = ["--help", "-h", "--version", "-V"];

#[derive(Parser, Debug)]
#[command(name = "termdonut")]
#[command(version)]
#[command(about = "Spinning ASCII torus for the terminal", long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Render a fixed number of frames without drawing and print timings
    #[arg(long)]
    pub benchmark: bool,

    /// Grid width in characters
    #[arg(long, value_name = "COLS")]
    pub width: Option<String>,

    /// Grid height in lines
    #[arg(long, value_name = "ROWS")]
    pub height: Option<String>,

    /// Tube radius
    #[arg(long)]
    pub r1: Option<String>,

    /// Distance from the torus centre to the tube centre
    #[arg(long)]
    pub r2: Option<String>,

    /// Projection scale
    #[arg(long)]
    pub k1: Option<String>,

    /// Camera distance
    #[arg(long)]
    pub k2: Option<String>,

    /// Rotation added to angle A each frame (radians)
    #[arg(long, value_name = "RAD")]
    pub a_step: Option<String>,

    /// Rotation added to angle B each frame (radians)
    #[arg(long, value_name = "RAD")]
    pub b_step: Option<String>,

    /// Sampling step around the tube (radians)
    #[arg(long, value_name = "RAD")]
    pub theta_step: Option<String>,

    /// Sampling step around the torus axis (radians)
    #[arg(long, value_name = "RAD")]
    pub phi_step: Option<String>,

    /// Frames to render in benchmark mode
    #[arg(long, value_name = "N")]
    pub frames: Option<String>,

    /// Shading characters, darkest first
    #[arg(long, value_name = "CHARS")]
    pub shading: Option<String>,

    /// Sampling mode: baseline or optimized
    #[arg(long)]
    pub mode: Option<String>,

    /// Settings file (default: <config dir>/termdonut/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter for stderr, e.g. debug or termdonut=trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn parse_lenient() -> Self {
        Self::parse_lenient_from(std::env::args_os())
    }

    /// Parse `args` (program name first), skipping anything clap would reject
    pub fn parse_lenient_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.into().to_string_lossy().into_owned())
            .collect();
        Self::parse_from(sanitize_args(&args))
    }

    /// Overlay the flags that were given onto `cfg`
    pub fn apply(&self, cfg: &mut DonutConfig) {
        if self.benchmark {
            cfg.benchmark = true;
        }

        cfg.width = lenient("width", self.width.as_deref(), cfg.width);
        cfg.height = lenient("height", self.height.as_deref(), cfg.height);
        cfg.r1 = lenient("r1", self.r1.as_deref(), cfg.r1);
        cfg.r2 = lenient("r2", self.r2.as_deref(), cfg.r2);
        cfg.k1 = lenient("k1", self.k1.as_deref(), cfg.k1);
        cfg.k2 = lenient("k2", self.k2.as_deref(), cfg.k2);
        cfg.a_step = lenient("a-step", self.a_step.as_deref(), cfg.a_step);
        cfg.b_step = lenient("b-step", self.b_step.as_deref(), cfg.b_step);
        cfg.theta_step = lenient("theta-step", self.theta_step.as_deref(), cfg.theta_step);
        cfg.phi_step = lenient("phi-step", self.phi_step.as_deref(), cfg.phi_step);
        cfg.frames = lenient("frames", self.frames.as_deref(), cfg.frames);

        if let Some(shading) = &self.shading {
            cfg.shading = shading.chars().collect();
        }

        if let Some(mode) = &self.mode {
            match mode.parse::<RenderMode>() {
                Ok(m) => cfg.mode = m,
                Err(e) => tracing::warn!("{e}; keeping {}", cfg.mode),
            }
        }
    }
}

fn lenient<T>(name: &str, raw: Option<&str>, current: T) -> T
where
    T: FromStr + Copy,
{
    let Some(raw) = raw else {
        return current;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(flag = name, value = raw, "ignoring malformed value");
            current
        }
    }
}

/// Rewrite raw arguments into a form clap accepts unconditionally.
///
/// Known value flags always take the following token and become
/// `--flag=value`, which keeps values starting with `-` intact. A value flag
/// at the end of the line, or with an empty value, is dropped. Unknown tokens
/// are dropped.
pub fn sanitize_args(args: &[String]) -> Vec<String> {
    let mut cmd = Cli::command();
    cmd.build();
    let known: HashMap<String, bool> = cmd
        .get_arguments()
        .filter_map(|arg| {
            arg.get_long()
                .map(|long| (format!("--{long}"), arg.get_action().takes_values()))
        })
        .collect();

    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    if let Some(program) = iter.next() {
        out.push(program.clone());
    }

    while let Some(arg) = iter.next() {
        if BUILTIN_FLAGS.contains(&arg.as_str()) {
            out.push(arg.clone());
            continue;
        }

        if let Some((flag, value)) = arg.split_once('=') {
            if known.get(flag) == Some(&true) && !value.is_empty() {
                out.push(arg.clone());
            }
            continue;
        }

        match known.get(arg.as_str()) {
            Some(true) => {
                // The next token is the value even if it looks like a flag
                if let Some(value) = iter.next() {
                    if !value.is_empty() {
                        out.push(format!("{arg}={value}"));
                    }
                }
            }
            Some(false) => out.push(arg.clone()),
            None => {}
        }
    }

    out
}
