use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Grid width; even values round up to the next odd value.
    #[arg(long, default_value_t = 21)]
    pub width: usize,

    /// Grid height; even values round up to the next odd value.
    #[arg(long, default_value_t = 21)]
    pub height: usize,

    /// RNG seed for reproducible mazes; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell; defaults to the origin room (0, 0).
    #[arg(long)]
    pub start_x: Option<usize>,
    #[arg(long)]
    pub start_y: Option<usize>,

    /// Goal cell; defaults to the far-corner room.
    #[arg(long)]
    pub goal_x: Option<usize>,
    #[arg(long)]
    pub goal_y: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,
}
