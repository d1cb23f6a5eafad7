use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use minefield_core::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SamplerKind {
    /// Partial shuffle, bounded time
    Shuffle,
    /// Redraw until distinct
    Rejection,
}

#[derive(Parser, Debug)]
#[command(version, about = "Generate a minesweeper board", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[arg(long, default_value_t = GameConfig::default().rows())]
    rows: Coord,

    #[arg(long, default_value_t = GameConfig::default().cols())]
    cols: Coord,

    #[arg(short, long, default_value_t = GameConfig::default().mines())]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = SamplerKind::Shuffle)]
    sampler: SamplerKind,

    /// Open every cell before printing
    #[arg(long)]
    reveal: bool,

    /// Print the board as JSON instead of a glyph grid
    #[arg(long)]
    json: bool,
}

fn init_logger(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::EnvFilter;

    let level = verbose.log_level_filter().to_string().to_lowercase();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn build_board(args: &Args) -> Result<Board> {
    let config = GameConfig::new((args.rows, args.cols), args.mines).with_context(|| {
        format!(
            "invalid board: {} rows, {} cols, {} mines",
            args.rows, args.cols, args.mines
        )
    })?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("seed: {}", seed);

    let mut board = match args.sampler {
        SamplerKind::Shuffle => Board::generate(config, ShuffleSampler::new(seed)),
        SamplerKind::Rejection => Board::generate(config, RejectionSampler::new(seed)),
    };

    if args.reveal {
        let (rows, cols) = board.size();
        for row in 0..rows {
            for col in 0..cols {
                board.cell_mut((row, col))?.is_open = true;
            }
        }
    }

    Ok(board)
}

fn render(args: &Args, board: &Board) -> Result<String> {
    if args.json {
        serde_json::to_string_pretty(board).context("could not serialize board")
    } else {
        Ok(board.render())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.verbose);

    let board = build_board(&args)?;
    print!("{}", render(&args, &board)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(["minefield"].iter().chain(extra)).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_default_config() {
        let args = args(&[]);

        assert_eq!((args.rows, args.cols, args.mines), (15, 20, 60));
        assert_eq!(args.sampler, SamplerKind::Shuffle);
        assert!(!args.reveal && !args.json);
    }

    #[test]
    fn revealed_full_board_is_all_mines() {
        let args = args(&["--rows", "2", "--cols", "2", "-m", "4", "--reveal", "-s", "1"]);

        let board = build_board(&args).unwrap();

        assert_eq!(render(&args, &board).unwrap(), "**\n**\n");
    }

    #[test]
    fn rejection_sampler_is_selectable() {
        let args = args(&[
            "--rows",
            "9",
            "--cols",
            "9",
            "-m",
            "10",
            "--sampler",
            "rejection",
            "-s",
            "5",
        ]);

        let board = build_board(&args).unwrap();

        assert_eq!(board.mine_count(), 10);
        assert_eq!(board.render(), format!("{}\n", " ".repeat(9)).repeat(9));
    }

    #[test]
    fn too_many_mines_is_reported() {
        let args = args(&["--rows", "2", "--cols", "2", "-m", "5"]);

        let err = build_board(&args).unwrap_err();

        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::TooManyMines {
                requested: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn json_output_has_cell_grid() {
        let args = args(&["--rows", "1", "--cols", "3", "-m", "0", "--json"]);
        let board = build_board(&args).unwrap();

        let value: serde_json::Value = serde_json::from_str(&render(&args, &board).unwrap()).unwrap();

        assert_eq!(value["mine_count"], 0);
        assert_eq!(value["cells"]["dim"], serde_json::json!([1, 3]));
    }
}
