use crate::compare::{ComparisonResult, ExactStatus};
use crate::graph::{ColoringResult, Graph};
use crate::utils::palette::{ensure_renderable, palette_rgb, PaletteError};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color as TuiColor, Style},
    text::Line,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph, Widget,
    },
    Frame, Terminal,
};
use std::f64::consts::PI;
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// One canvas: a coloring of the shared graph, or a note saying why it is missing.
#[derive(Clone, Debug)]
pub enum Panel {
    Coloring {
        title: String,
        node_colors: Vec<TuiColor>,
    },
    Missing {
        title: String,
        reason: String,
    },
}

impl Panel {
    pub fn from_result(result: &ColoringResult) -> Result<Self, PaletteError> {
        let node_colors = result
            .coloring
            .as_slice()
            .iter()
            .map(|&color| palette_rgb(color).map(|(r, g, b)| TuiColor::Rgb(r, g, b)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Panel::Coloring {
            title: panel_title(result),
            node_colors,
        })
    }

    pub fn title(&self) -> &str {
        match self {
            Panel::Coloring { title, .. } | Panel::Missing { title, .. } => title,
        }
    }
}

pub fn panel_title(result: &ColoringResult) -> String {
    format!(
        "{} ({} colors, {:.6} runtime)",
        result.algorithm,
        result.color_count(),
        result.runtime_secs()
    )
}

/// Panels for a comparison, one per greedy pass and then the exact search. Fails before anything is drawn when
/// a coloring needs more colors than the palette has.
pub fn panels_for(result: &ComparisonResult) -> Result<Vec<Panel>, PaletteError> {
    ensure_renderable(result.results().map(|r| &r.coloring))?;
    let mut panels = result
        .greedy
        .iter()
        .map(Panel::from_result)
        .collect::<Result<Vec<_>, _>>()?;
    match (&result.exact, &result.exact_status) {
        (Some(exact), _) => panels.push(Panel::from_result(exact)?),
        (None, ExactStatus::TimedOut) => panels.push(Panel::Missing {
            title: "Brute Force".to_string(),
            reason: "runtime exceeded the limit; no exact coloring".to_string(),
        }),
        (None, ExactStatus::Failed(reason)) => panels.push(Panel::Missing {
            title: "Brute Force".to_string(),
            reason: reason.clone(),
        }),
        (None, ExactStatus::Completed) => {}
    }
    Ok(panels)
}

#[derive(Clone, Debug)]
pub struct NodePoint {
    pub idx: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug)]
pub struct EdgeSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Vertices evenly spaced on the unit circle.
#[derive(Clone, Debug)]
pub struct GraphLayout {
    pub nodes: Vec<NodePoint>,
    pub edges: Vec<EdgeSegment>,
}

impl GraphLayout {
    pub fn circular(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let nodes: Vec<NodePoint> = (0..n)
            .map(|idx| {
                let angle = 2.0 * PI * (idx as f64) / (n as f64);
                NodePoint {
                    idx,
                    x: angle.cos(),
                    y: angle.sin(),
                }
            })
            .collect();

        let edges = graph
            .edges()
            .into_iter()
            .map(|(from, to)| EdgeSegment {
                x1: nodes[from].x,
                y1: nodes[from].y,
                x2: nodes[to].x,
                y2: nodes[to].y,
            })
            .collect();

        GraphLayout { nodes, edges }
    }
}

pub struct Visualizer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    layout: GraphLayout,
    panels: Vec<Panel>,
    footer: String,
    finished: bool,
}

impl Visualizer {
    pub fn for_comparison(result: &ComparisonResult) -> Result<Self, VizError> {
        let panels = panels_for(result)?;
        let layout = GraphLayout::circular(&result.graph);

        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            layout,
            panels,
            footer: String::new(),
            finished: false,
        })
    }

    /// Swaps in another comparison, e.g. the next entry of the run log.
    pub fn show(&mut self, result: &ComparisonResult, footer: &str) -> Result<(), VizError> {
        self.panels = panels_for(result)?;
        self.layout = GraphLayout::circular(&result.graph);
        self.footer = footer.to_string();
        self.render()?;
        Ok(())
    }

    /// Blocks until q/Esc (returns false) or Enter/Space/n (returns true).
    pub fn wait_for_key(&mut self) -> io::Result<bool> {
        self.render()?;
        loop {
            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) => match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(false)
                        }
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => {
                            return Ok(true)
                        }
                        _ => {}
                    },
                    Event::Resize(_, _) => {
                        self.render()?;
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.restore_terminal()
    }

    fn render(&mut self) -> io::Result<()> {
        let panels = self.panels.clone();
        let layout = self.layout.clone();
        let footer = self.footer.clone();

        self.terminal.draw(|frame| {
            let size = frame.size();
            let vertical = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(3)])
                .split(size);

            let share = 100 / panels.len().max(1) as u16;
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Percentage(share); panels.len().max(1)])
                .split(vertical[0]);

            for (panel, area) in panels.iter().zip(columns.iter()) {
                Self::draw_panel(frame, panel, &layout, *area);
            }

            let hint = if footer.is_empty() {
                "q: quit".to_string()
            } else {
                format!("{footer}   q: quit, enter: next")
            };
            frame.render_widget(
                Paragraph::new(Line::from(hint)).block(Block::default().borders(Borders::ALL)),
                vertical[1],
            );
        })?;
        Ok(())
    }

    fn draw_panel(frame: &mut Frame<'_>, panel: &Panel, layout: &GraphLayout, area: Rect) {
        match panel {
            Panel::Coloring { title, node_colors } => {
                frame.render_widget(Self::graph_canvas(title, layout, node_colors), area);
            }
            Panel::Missing { title, reason } => {
                let text = Paragraph::new(Line::from(reason.as_str()))
                    .style(Style::default().fg(TuiColor::Gray))
                    .block(Block::default().title(title.as_str()).borders(Borders::ALL));
                frame.render_widget(text, area);
            }
        }
    }

    fn graph_canvas<'a>(
        title: &'a str,
        layout: &'a GraphLayout,
        node_colors: &'a [TuiColor],
    ) -> impl Widget + 'a {
        Canvas::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .x_bounds([-1.2, 1.2])
            .y_bounds([-1.2, 1.2])
            .paint(move |ctx: &mut Context<'_>| {
                for edge in &layout.edges {
                    ctx.draw(&CanvasLine {
                        x1: edge.x1,
                        y1: edge.y1,
                        x2: edge.x2,
                        y2: edge.y2,
                        color: TuiColor::DarkGray,
                    });
                }
                ctx.layer();
                for (node, &color) in layout.nodes.iter().zip(node_colors) {
                    ctx.draw(&Points {
                        coords: &[(node.x, node.y)],
                        color,
                    });
                }
                for node in &layout.nodes {
                    ctx.print(node.x + 0.04, node.y + 0.04, format!("{}", node.idx));
                }
            })
    }

    fn restore_terminal(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Algorithm, Coloring};

    fn result_with(colors: Vec<usize>) -> ColoringResult {
        ColoringResult {
            algorithm: Algorithm::Greedy,
            coloring: Coloring::new(colors),
            duration: Duration::from_millis(2),
        }
    }

    fn comparison(greedy: Vec<usize>, exact_status: ExactStatus) -> ComparisonResult {
        let n = greedy.len();
        ComparisonResult {
            graph: Graph::new(n).unwrap(),
            greedy: vec![result_with(greedy)],
            exact: None,
            exact_status,
        }
    }

    #[test]
    fn title_reports_color_count_and_runtime() {
        assert_eq!(
            panel_title(&result_with(vec![0, 1, 0])),
            "Greedy (2 colors, 0.002000 runtime)"
        );
    }

    #[test]
    fn timed_out_search_gets_a_placeholder_panel() {
        let panels = panels_for(&comparison(vec![0, 0], ExactStatus::TimedOut)).unwrap();
        assert_eq!(panels.len(), 2);
        assert!(matches!(panels[1], Panel::Missing { .. }));
    }

    #[test]
    fn every_greedy_pass_gets_its_own_panel() {
        let mut result = comparison(vec![0, 1, 0], ExactStatus::Completed);
        result.greedy.push(ColoringResult {
            algorithm: Algorithm::LargestDegreeFirst,
            ..result_with(vec![1, 0, 1])
        });
        result.exact = Some(ColoringResult {
            algorithm: Algorithm::BruteForce,
            ..result_with(vec![0, 1, 0])
        });

        let titles: Vec<String> = panels_for(&result)
            .unwrap()
            .iter()
            .map(|panel| panel.title().to_string())
            .collect();
        assert_eq!(titles.len(), 3);
        assert!(titles[0].starts_with("Greedy"));
        assert!(titles[1].starts_with("Welsh-Powell"));
        assert!(titles[2].starts_with("Brute Force"));
    }

    #[test]
    fn too_many_colors_is_reported_before_drawing() {
        let err = panels_for(&comparison((0..46).collect(), ExactStatus::TimedOut)).unwrap_err();
        assert_eq!(
            err,
            PaletteError::Exhausted {
                required: 46,
                available: 45
            }
        );
    }

    #[test]
    fn circular_layout_places_every_vertex_and_edge() {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
        let layout = GraphLayout::circular(&graph);
        assert_eq!(layout.nodes.len(), 4);
        assert_eq!(layout.edges.len(), 3);
        assert!((layout.nodes[0].x - 1.0).abs() < 1e-9);
    }
}
