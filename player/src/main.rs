use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use flowline::library::{Library, Pack};
use flowline::{DragSession, Location, StoreConfig, TimeRecordPolicy};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One pointer stroke: press on the first cell, then move through the rest.
///
/// Written as 1-based `x,y` cells joined by `-`, e.g. `1,1-3,1-3,3`.
#[derive(Clone, Debug)]
struct Stroke(Vec<Location>);

impl FromStr for Stroke {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s.split('-')
            .map(|cell| {
                let (x, y) = cell.split_once(',').ok_or_else(|| format!("cell {cell:?} is not x,y"))?;
                let x: usize = x.trim().parse().map_err(|e| format!("bad x in {cell:?}: {e}"))?;
                let y: usize = y.trim().parse().map_err(|e| format!("bad y in {cell:?}: {e}"))?;
                if x == 0 || y == 0 {
                    return Err(format!("cell {cell:?} is 1-based"));
                }
                Ok(Location(x - 1, y - 1))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(cells))
    }
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Built-in level pack.
    #[arg(long, default_value = "defaultLevels.txt")]
    levels: PathBuf,
    /// User level pack.
    #[arg(long, default_value = "userLevels.txt")]
    user_levels: PathBuf,
    /// Time-trial scores.
    #[arg(long, default_value = "scores.txt")]
    scores: PathBuf,
    /// Keep recorded times when saving instead of writing 0.
    #[arg(long)]
    preserve_times: bool,
    /// Play from the user pack.
    #[arg(long)]
    user: bool,
    /// 1-based level number; out-of-range numbers pick the nearest level.
    #[arg(long, default_value_t = 1)]
    level: usize,
    /// Write ratings and scores back afterwards.
    #[arg(long)]
    save: bool,
    /// Strokes to play, in order.
    strokes: Vec<Stroke>,
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            levels_path: self.levels.clone(),
            user_levels_path: self.user_levels.clone(),
            scores_path: self.scores.clone(),
            time_record: if self.preserve_times {
                TimeRecordPolicy::Preserve
            } else {
                TimeRecordPolicy::Reset
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let mut library = Library::open(args.store_config()).context("failed to open level library")?;

    let pack = if args.user {
        library.load_user_pack().with_context(|| format!("{:?} could not be loaded", args.user_levels))?;
        Pack::User
    } else {
        Pack::Builtin
    };

    let Some(level) = library.select(pack, args.level.saturating_sub(1)) else {
        bail!("no levels to play");
    };
    info!(?pack, flows = level.flow_count(), size = level.size().get(), "playing");

    let mut session = DragSession::new();
    for Stroke(cells) in &args.strokes {
        let Some((first, rest)) = cells.split_first() else {
            continue;
        };
        if session.pick(level, *first).is_none() {
            info!(cell = %first, "nothing to pick up");
            continue;
        }
        for cell in rest {
            session.drag_to(level, *cell).context("ran out of memory while drawing")?;
        }
        session.release();
    }

    print!("{}", level);
    let progress = level.track();
    println!(
        "{}/{} flows, {}/{} cells, rated {}",
        progress.completed_flows,
        progress.flow_count,
        progress.filled_cells + 2 * progress.flow_count,
        progress.cell_count,
        level.rating(),
    );

    if args.save {
        library.save().context("failed to save")?;
    }

    Ok(())
}
