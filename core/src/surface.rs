//! Surface backdrop state.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

/// The canvas backdrop. Strokes are committed straight to the raster, so
/// toggling only restyles the element behind them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Black,
    White,
}

impl Background {
    pub fn css(self) -> &'static str {
        match self {
            Background::Black => "black",
            Background::White => "white",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Background::Black => Background::White,
            Background::White => Background::Black,
        }
    }
}
