//! Block font for the flip cards.
//!
//! Every glyph is a 3x5 bitmap that gets scaled up to the card size. Only
//! the symbols the display can produce are defined: digits, the letters of
//! the expiry alert and blank.

pub const GLYPH_COLUMNS: usize = 3;
pub const GLYPH_ROWS: usize = 5;

const FILLED: char = '█';

type Bitmap = [&'static str; GLYPH_ROWS];

const UNKNOWN: Bitmap = ["###", "  #", " ##", "   ", " # "];

fn bitmap(symbol: char) -> Bitmap {
    match symbol {
        '0' => ["###", "# #", "# #", "# #", "###"],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => ["###", "  #", "###", "#  ", "###"],
        '3' => ["###", "  #", "###", "  #", "###"],
        '4' => ["# #", "# #", "###", "  #", "  #"],
        '5' => ["###", "#  ", "###", "  #", "###"],
        '6' => ["###", "#  ", "###", "# #", "###"],
        '7' => ["###", "  #", "  #", "  #", "  #"],
        '8' => ["###", "# #", "###", "# #", "###"],
        '9' => ["###", "# #", "###", "  #", "###"],
        'T' => ["###", " # ", " # ", " # ", " # "],
        'I' => ["###", " # ", " # ", " # ", "###"],
        'M' => ["# #", "###", "# #", "# #", "# #"],
        'E' => ["###", "#  ", "## ", "#  ", "###"],
        'U' => ["# #", "# #", "# #", "# #", "###"],
        'P' => ["###", "# #", "###", "#  ", "#  "],
        ' ' => ["   "; GLYPH_ROWS],
        _ => UNKNOWN,
    }
}

/// Integer scale applied to the base bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub x: usize,
    pub y: usize,
}

impl Scale {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn width(&self) -> usize {
        GLYPH_COLUMNS * self.x
    }

    pub fn height(&self) -> usize {
        GLYPH_ROWS * self.y
    }
}

/// Rows of `symbol` drawn with block characters at `scale`.
pub fn render_glyph(symbol: char, scale: Scale) -> Vec<String> {
    let mut rows = Vec::with_capacity(scale.height());
    for line in bitmap(symbol) {
        let row: String = line
            .chars()
            .flat_map(|bit| {
                let cell = if bit == '#' { FILLED } else { ' ' };
                std::iter::repeat_n(cell, scale.x)
            })
            .collect();
        for _ in 0..scale.y {
            rows.push(row.clone());
        }
    }
    rows
}
