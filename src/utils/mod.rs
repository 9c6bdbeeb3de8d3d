pub mod palette;
pub mod random_graph;
pub mod serialization;

pub use palette::{ensure_renderable, palette_color, PaletteError, PALETTE};
pub use random_graph::{complete_graph, generate_random_graph, random_graph, InstanceParameters};
pub use serialization::{append_run, load_runs, RecordedColoring, RunLogError, RunRecord};
