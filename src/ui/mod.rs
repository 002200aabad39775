//! Terminal front-end: composes the flip cards into a canvas and paints it.
//!
//! Composition is pure (scene and viewport in, canvas out) so it can be
//! tested without a terminal. [`Renderer`] only maps tones to colours and
//! writes rows.

pub mod canvas;
pub mod glyphs;
pub mod input;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{Stdout, Write, stdout};

use crate::common::constants::TIMER_INCREMENTS;
use crate::config::{ClockMode, Theme};
use crate::core::controller::ClockController;
use crate::core::timer::TimerState;
use crate::display::Meridiem;
use crate::display::flip::{FlipFrame, FlipPhase};
use crate::display::layout::{DigitSize, Layout, Viewport, compute_layout};
use canvas::{Canvas, Tone};
use glyphs::{Scale, render_glyph};

/// Rows reserved at the bottom for key hints.
const HINT_ROWS: usize = 2;
const CARD_GAP: usize = 1;
const SEPARATOR_WIDTH: usize = 3;

/// Everything one frame needs, captured from the controller.
#[derive(Debug, Clone)]
pub struct Scene {
    pub cards: Vec<FlipFrame<char>>,
    pub indicator: Option<Meridiem>,
    pub layout: Layout,
    pub theme: Theme,
    pub mode: ClockMode,
    pub timer: TimerState,
}

impl Scene {
    pub fn capture(controller: &ClockController, viewport: Viewport) -> Self {
        let config = *controller.config();
        let timer = *controller.timer();
        Self {
            cards: controller
                .digits()
                .iter()
                .map(|card| card.frame().cloned())
                .collect(),
            indicator: controller.display().indicator,
            layout: compute_layout(&config, viewport, timer.is_expired()),
            theme: config.theme,
            mode: config.mode,
            timer,
        }
    }
}

/// Pixel-free geometry for one scale choice.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    scale: Scale,
    card_width: usize,
    card_height: usize,
    width: usize,
    height: usize,
}

impl Geometry {
    fn new(scale: Scale, layout: &Layout) -> Self {
        let card_width = scale.width() + 4;
        let card_height = scale.height() + 3;
        let group_width = card_width * 2 + CARD_GAP;
        let groups = layout.visible_slots / 2;

        let (width, height) = if layout.portrait {
            (group_width, groups * card_height + (groups - 1))
        } else {
            // Groups keep the separator column even when no colon is drawn.
            (
                groups * group_width + (groups - 1) * SEPARATOR_WIDTH,
                card_height,
            )
        };

        Self {
            scale,
            card_width,
            card_height,
            width,
            height,
        }
    }
}

fn scale_candidates(size: DigitSize) -> &'static [Scale] {
    const EXTRA_LARGE: [Scale; 3] = [Scale::new(3, 2), Scale::new(2, 1), Scale::new(1, 1)];
    const LARGE: [Scale; 2] = [Scale::new(2, 1), Scale::new(1, 1)];
    match size {
        DigitSize::ExtraLarge => &EXTRA_LARGE,
        DigitSize::Large => &LARGE,
    }
}

/// Largest geometry that fits the area above the hint rows.
fn fit_geometry(layout: &Layout, viewport: Viewport) -> Option<Geometry> {
    let columns = usize::from(viewport.columns);
    let rows = usize::from(viewport.rows).saturating_sub(HINT_ROWS + 1);
    scale_candidates(layout.digit_size)
        .iter()
        .map(|scale| Geometry::new(*scale, layout))
        .find(|geometry| geometry.width <= columns && geometry.height <= rows)
}

pub fn compose(scene: &Scene, viewport: Viewport) -> Canvas {
    let mut canvas = Canvas::new(usize::from(viewport.columns), usize::from(viewport.rows));
    let display_rows = canvas.height().saturating_sub(HINT_ROWS);

    match fit_geometry(&scene.layout, viewport) {
        Some(geometry) => draw_cards(&mut canvas, scene, &geometry, display_rows),
        None => draw_plain(&mut canvas, scene, display_rows),
    }

    draw_hints(&mut canvas, scene);
    canvas
}

fn draw_cards(canvas: &mut Canvas, scene: &Scene, geometry: &Geometry, display_rows: usize) {
    let left = canvas.width().saturating_sub(geometry.width) / 2;
    let top = display_rows.saturating_sub(geometry.height) / 2;
    let group_width = geometry.card_width * 2 + CARD_GAP;

    for (group, pair) in scene.cards.chunks(2).enumerate() {
        let (group_x, group_y) = if scene.layout.portrait {
            (left, top + group * (geometry.card_height + 1))
        } else {
            (left + group * (group_width + SEPARATOR_WIDTH), top)
        };

        for (index, frame) in pair.iter().enumerate() {
            let x = group_x + index * (geometry.card_width + CARD_GAP);
            draw_card(canvas, frame, geometry, x, group_y);
        }

        let separator_shown = match group {
            0 => scene.layout.first_separator,
            1 => scene.layout.second_separator,
            _ => false,
        };
        if separator_shown && !scene.layout.portrait {
            let tone = if scene.layout.separators_dimmed {
                Tone::Dimmed
            } else {
                Tone::Separator
            };
            let x = group_x + group_width + SEPARATOR_WIDTH / 2;
            canvas.put_str(x, group_y + geometry.card_height / 3, "█", tone);
            canvas.put_str(x, group_y + geometry.card_height * 2 / 3, "█", tone);
        }
    }

    if let Some(indicator) = scene.indicator {
        canvas.put_str(left + 2, top, indicator.as_str(), Tone::Indicator);
    }
}

/// One card: the top half shows the revealed upper layer, the bottom half
/// the lower front layer, split by a divider.
fn draw_card(canvas: &mut Canvas, frame: &FlipFrame<char>, geometry: &Geometry, x: usize, y: usize) {
    let tone = match frame.phase {
        FlipPhase::Idle => Tone::Card,
        FlipPhase::Transitioning => Tone::Shaded,
    };
    let inner = geometry.card_width - 2;
    let rule = "─".repeat(inner);

    let top_rows = render_glyph(frame.top_back, geometry.scale);
    let bottom_rows = render_glyph(frame.bottom_front, geometry.scale);
    let split = geometry.scale.height() / 2;

    canvas.put_str(x, y, &format!("┌{rule}┐"), tone);
    let mut row = y + 1;
    for line in &top_rows[..split] {
        canvas.put_str(x, row, &format!("│ {line} │"), tone);
        row += 1;
    }
    canvas.put_str(x, row, &format!("├{rule}┤"), tone);
    row += 1;
    for line in &bottom_rows[split..] {
        canvas.put_str(x, row, &format!("│ {line} │"), tone);
        row += 1;
    }
    canvas.put_str(x, row, &format!("└{rule}┘"), tone);
}

/// Fallback when the terminal is too small for any card size.
fn draw_plain(canvas: &mut Canvas, scene: &Scene, display_rows: usize) {
    let mut text = String::new();
    for (slot, frame) in scene.cards.iter().enumerate() {
        if slot > 0 && slot % 2 == 0 {
            text.push(':');
        }
        text.push(frame.top_front);
    }
    if let Some(indicator) = scene.indicator {
        text.push(' ');
        text.push_str(indicator.as_str());
    }

    let x = canvas.width().saturating_sub(text.chars().count()) / 2;
    canvas.put_str(x, display_rows / 2, &text, Tone::Card);
}

fn hint_segments(scene: &Scene) -> Vec<(String, Tone)> {
    match scene.mode {
        ClockMode::Clock => vec![("[m] timer".to_string(), Tone::Hint)],
        ClockMode::Timer if scene.timer.is_expired() => {
            vec![("[enter] DISMISS".to_string(), Tone::Hint)]
        }
        ClockMode::Timer if scene.timer.is_running() => {
            vec![("[space] PAUSE".to_string(), Tone::Hint)]
        }
        ClockMode::Timer => {
            let mut segments: Vec<(String, Tone)> = TIMER_INCREMENTS
                .iter()
                .enumerate()
                .map(|(index, (label, _))| (format!("[{}] {label}", index + 1), Tone::Hint))
                .collect();
            let start_tone = if scene.timer.can_start() {
                Tone::Hint
            } else {
                Tone::Dimmed
            };
            segments.push(("[space] START".to_string(), start_tone));
            segments
        }
    }
}

fn draw_centered(canvas: &mut Canvas, y: usize, segments: &[(String, Tone)]) {
    let total: usize = segments.iter().map(|(text, _)| text.chars().count()).sum::<usize>()
        + segments.len().saturating_sub(1) * 2;
    let mut x = canvas.width().saturating_sub(total) / 2;
    for (text, tone) in segments {
        canvas.put_str(x, y, text, *tone);
        x += text.chars().count() + 2;
    }
}

fn draw_hints(canvas: &mut Canvas, scene: &Scene) {
    let height = canvas.height();
    if height < HINT_ROWS {
        return;
    }
    draw_centered(canvas, height - 2, &hint_segments(scene));
    draw_centered(
        canvas,
        height - 1,
        &[(
            "s seconds  t theme  h 12/24h  m mode  o orientation  q quit".to_string(),
            Tone::Dimmed,
        )],
    );
}

/// Colours for one theme.
struct Palette {
    background: Color,
    card: Color,
    face: Color,
    shaded: Color,
    dimmed: Color,
    indicator: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb { r: 10, g: 10, b: 10 },
                card: Color::Rgb { r: 28, g: 28, b: 30 },
                face: Color::Rgb { r: 235, g: 235, b: 235 },
                shaded: Color::Rgb { r: 120, g: 120, b: 125 },
                dimmed: Color::Rgb { r: 70, g: 70, b: 75 },
                indicator: Color::Rgb { r: 160, g: 160, b: 165 },
            },
            Theme::Light => Self {
                background: Color::Rgb { r: 242, g: 242, b: 242 },
                card: Color::Rgb { r: 255, g: 255, b: 255 },
                face: Color::Rgb { r: 20, g: 20, b: 22 },
                shaded: Color::Rgb { r: 140, g: 140, b: 145 },
                dimmed: Color::Rgb { r: 190, g: 190, b: 195 },
                indicator: Color::Rgb { r: 100, g: 100, b: 105 },
            },
        }
    }

    /// (foreground, background) for a tone.
    fn colors(&self, tone: Tone) -> (Color, Color) {
        match tone {
            Tone::Background => (self.face, self.background),
            Tone::Card => (self.face, self.card),
            Tone::Shaded => (self.shaded, self.card),
            Tone::Separator => (self.face, self.background),
            Tone::Dimmed => (self.dimmed, self.background),
            Tone::Indicator => (self.indicator, self.card),
            Tone::Hint => (self.indicator, self.background),
        }
    }
}

/// Paints composed frames to the terminal.
pub struct Renderer {
    out: Stdout,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self { out: stdout() }
    }

    pub fn draw(&mut self, scene: &Scene, viewport: Viewport) -> Result<()> {
        let canvas = compose(scene, viewport);
        let palette = Palette::for_theme(scene.theme);

        for y in 0..canvas.height() {
            queue!(self.out, MoveTo(0, y as u16))?;
            for (tone, text) in canvas.runs(y) {
                let (foreground, background) = palette.colors(tone);
                queue!(
                    self.out,
                    SetForegroundColor(foreground),
                    SetBackgroundColor(background),
                    Print(text)
                )?;
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
