//! Off-screen cell grid the scene is composed into before painting.

/// Semantic colour of a cell; the palette maps it to terminal colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Background,
    /// Idle card: border and glyph.
    Card,
    /// Card in the middle of a flip.
    Shaded,
    Separator,
    /// Separator while the alert is shown, or an unavailable hint.
    Dimmed,
    Indicator,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    symbol: char,
    tone: Tone,
}

const BLANK: Cell = Cell {
    symbol: ' ',
    tone: Tone::Background,
};

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Write `text` starting at (`x`, `y`); anything off the grid is clipped.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, tone: Tone) {
        if y >= self.height {
            return;
        }
        for (offset, symbol) in text.chars().enumerate() {
            let column = x + offset;
            if column >= self.width {
                break;
            }
            self.cells[y * self.width + column] = Cell { symbol, tone };
        }
    }

    /// Plain text of one row.
    pub fn row_text(&self, y: usize) -> String {
        self.row(y).iter().map(|cell| cell.symbol).collect()
    }

    /// Consecutive cells of one row grouped by tone.
    pub fn runs(&self, y: usize) -> Vec<(Tone, String)> {
        let mut runs: Vec<(Tone, String)> = Vec::new();
        for cell in self.row(y) {
            match runs.last_mut() {
                Some((tone, text)) if *tone == cell.tone => text.push(cell.symbol),
                _ => runs.push((cell.tone, cell.symbol.to_string())),
            }
        }
        runs
    }

    pub fn tone_at(&self, x: usize, y: usize) -> Option<Tone> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].tone)
    }

    fn row(&self, y: usize) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        &self.cells[y * self.width..(y + 1) * self.width]
    }
}
