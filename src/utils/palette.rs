use crate::graph::Coloring;
use thiserror::Error;

pub const PALETTE: [&str; 45] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231",
    "#911eb4", "#46f0f0", "#f032e6", "#bcf60c", "#fabebe",
    "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000",
    "#aaffc3", "#808000", "#ffd8b1", "#000075", "#808080",
    "#ffffff", "#000000", "#0a74da", "#6f2da8", "#008000",
    "#e0e0e0", "#d1e231", "#fabea7", "#ff7f00", "#ff0033",
    "#a1ca6d", "#673770", "#c1a1d3", "#d1e8e2", "#f9c1a2",
    "#0d98ba", "#ffdb58", "#00468b", "#ff6fff", "#a4c639",
    "#cd9575", "#665d1e", "#915c83", "#841b2d", "#faebd7",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error(
        "the graph requires {required} colors but the palette only offers {available}"
    )]
    Exhausted { required: usize, available: usize },
}

pub fn palette_color(color: usize) -> Result<&'static str, PaletteError> {
    PALETTE.get(color).copied().ok_or(PaletteError::Exhausted {
        required: color + 1,
        available: PALETTE.len(),
    })
}

/// `#rrggbb` as an RGB triple.
pub fn palette_rgb(color: usize) -> Result<(u8, u8, u8), PaletteError> {
    let hex = palette_color(color)?;
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).unwrap_or(0);
    Ok((channel(1), channel(3), channel(5)))
}

/// Fails when any of the colorings uses an id past the end of the palette.
pub fn ensure_renderable<'a, I>(colorings: I) -> Result<(), PaletteError>
where
    I: IntoIterator<Item = &'a Coloring>,
{
    let required = colorings
        .into_iter()
        .filter_map(Coloring::max_color)
        .max()
        .map_or(0, |max| max + 1);
    if required > PALETTE.len() {
        return Err(PaletteError::Exhausted {
            required,
            available: PALETTE.len(),
        });
    }
    Ok(())
}
