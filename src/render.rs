//! Terminal drawing: a pixel buffer flushed as upper-half-block glyphs.
//!
//! Each terminal cell shows two vertically stacked pixels, the top one as the
//! foreground of `▀` and the bottom one as the background. The logical world
//! is scaled onto the buffer independently on each axis.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
    terminal,
};

use crate::game::{Phase, Scene};
use crate::state::{Bird, Obstacle};
use crate::world;

/// Something that can present a frame of the game.
pub trait Renderer {
    /// The display surface changed size, in terminal cells.
    fn resize(&mut self, cols: u16, rows: u16);

    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()>;
}

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    const fn halved(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PANEL: Rgb = Rgb(220, 195, 120);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer ────────────────────────────────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY_TOP);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn darken(&mut self) {
        for c in &mut self.px {
            *c = c.halved();
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.term()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.term()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.term()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

// ── 3x5 bitmap font ─────────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
fn letter(ch: char) -> Option<[u8; 15]> {
    let glyph = match ch {
        'A' => [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1],
        'B' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0],
        'C' => [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1],
        'D' => [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0],
        'E' => [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1],
        'F' => [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0],
        'G' => [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1],
        'H' => [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1],
        'I' => [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1],
        'L' => [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1],
        'M' => [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1],
        'O' => [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0],
        'P' => [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0],
        'R' => [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1],
        'S' => [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0],
        'T' => [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0],
        'U' => [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1],
        'V' => [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0],
        'Y' => [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0],
        d if d.is_ascii_digit() => DIGITS[d as usize - '0' as usize],
        _ => return None,
    };
    Some(glyph)
}

fn draw_glyph(buf: &mut PixelBuf, x: i32, y: i32, glyph: &[u8; 15], k: i32, fg: Rgb) {
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32 * k;
                let py = y + row as i32 * k;
                buf.fill_rect(px + 1, py + 1, k, k, SHADOW);
                buf.fill_rect(px, py, k, k, fg);
            }
        }
    }
}

/// Draws `text` centered on `cx`, each glyph pixel blown up to `k`×`k`.
fn draw_text(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, k: i32, fg: Rgb) {
    let advance = 4 * k;
    let total_w = text.chars().count() as i32 * advance - k;
    let start_x = cx - total_w / 2;
    for (i, ch) in text.chars().enumerate() {
        if let Some(glyph) = letter(ch.to_ascii_uppercase()) {
            draw_glyph(buf, start_x + i as i32 * advance, y, &glyph, k, fg);
        }
    }
}

fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb) {
    draw_text(buf, cx, y, &n.to_string(), 1, fg);
}

// ── Scene painting ──────────────────────────────────────────────────────────

/// World to pixel mapping for one frame.
struct View {
    sx: f64,
    sy: f64,
    /// Decoration scale, 1.0 at 48 pixel rows.
    scale: f64,
    pw: i32,
    ph: i32,
}

impl View {
    fn new(buf: &PixelBuf) -> Self {
        Self {
            sx: buf.width() as f64 / world::WIDTH,
            sy: buf.height() as f64 / world::HEIGHT,
            scale: (buf.height() as f64 / 48.0).max(0.5),
            pw: buf.width() as i32,
            ph: buf.height() as i32,
        }
    }

    fn x(&self, x: f64) -> i32 {
        (x * self.sx).floor() as i32
    }

    fn y(&self, y: f64) -> i32 {
        (y * self.sy).floor() as i32
    }

    fn ground(&self) -> i32 {
        self.y(world::GROUND_Y)
    }
}

/// Paints a full frame of `scene` into `buf`.
pub fn paint(buf: &mut PixelBuf, scene: &Scene<'_>) {
    if buf.width() == 0 || buf.height() == 0 {
        return;
    }
    let view = View::new(buf);

    draw_sky(buf, &view);
    draw_hills(buf, &view, scene.scroll);
    for obstacle in &scene.state.obstacles {
        draw_obstacle(buf, &view, obstacle);
    }
    draw_ground(buf, &view, scene.scroll);
    draw_bird(buf, &view, &scene.state.bird, scene.frame);
    draw_number(buf, view.pw / 2, 4, scene.state.score, WHITE);

    if scene.hovering {
        draw_title(buf, &view, scene);
    }
    if let Phase::Dead { .. } = scene.phase {
        draw_game_over(buf, &view, scene);
    }
}

fn draw_sky(buf: &mut PixelBuf, view: &View) {
    let sky_h = view.ground().clamp(0, view.ph);
    for y in 0..sky_h {
        let t = (y as u32 * 256 / sky_h.max(1) as u32) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for x in 0..view.pw {
            buf.set(x, y, c);
        }
    }
}

fn draw_hills(buf: &mut PixelBuf, view: &View, scroll: f64) {
    let base = view.ground();
    let ground_px = scroll * view.sx;
    for x in 0..view.pw {
        let fx = (x as f64 + ground_px * 0.2) * 0.04;
        let h = (fx.sin() * 6.0 + (fx * 1.7).sin() * 3.0) * view.scale;
        let top = base - h as i32 - (4.0 * view.scale) as i32;
        for y in top..base {
            buf.set(x, y, HILL_FAR);
        }
    }
    for x in 0..view.pw {
        let fx = (x as f64 + ground_px * 0.4) * 0.06;
        let h = (fx.sin() * 4.0 + (fx * 2.3).sin() * 2.0) * view.scale;
        let top = base - h as i32 - (2.0 * view.scale) as i32;
        for y in top..base {
            buf.set(x, y, HILL_NEAR);
        }
    }
}

fn draw_ground(buf: &mut PixelBuf, view: &View, scroll: f64) {
    let gy = view.ground();
    let ground_px = scroll * view.sx;
    for x in 0..view.pw {
        let alt = ((x as f64 + ground_px) as i32 / 3) % 2 == 0;
        buf.set(x, gy, if alt { GRASS } else { GRASS_LIGHT });
        buf.set(x, gy + 1, GRASS);
    }
    for y in (gy + 2)..view.ph {
        for x in 0..view.pw {
            let stripe = ((x as f64 + ground_px * 0.8) as i32 + (y - gy) * 2) % 12 < 6;
            buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
        }
    }
}

fn draw_obstacle(buf: &mut PixelBuf, view: &View, obstacle: &Obstacle) {
    let cap_extra = (1.5 * view.scale).max(1.0) as i32;
    let cap_h = (2.0 * view.scale).max(1.0) as i32;
    let px = view.x(obstacle.x);
    let pw = (view.x(obstacle.right()) - px).max(2);
    let gap_top = view.y(obstacle.gap_top());
    let gap_bot = view.y(obstacle.gap_bottom());
    let ground = view.ground();

    for x in 0..pw {
        let c = pipe_shade(x, pw);
        for y in 0..gap_top - cap_h {
            buf.set(px + x, y, c);
        }
        for y in (gap_bot + cap_h)..ground {
            buf.set(px + x, y, c);
        }
    }

    for x in -cap_extra..(pw + cap_extra) {
        let c = pipe_shade(x + cap_extra, pw + cap_extra * 2);
        for y in (gap_top - cap_h)..gap_top {
            buf.set(px + x, y, c);
        }
        buf.set(px + x, gap_top - cap_h, CAP_DARK);
        buf.set(px + x, gap_top - 1, CAP_DARK);

        for y in gap_bot..(gap_bot + cap_h) {
            buf.set(px + x, y, c);
        }
        buf.set(px + x, gap_bot, CAP_DARK);
        buf.set(px + x, gap_bot + cap_h - 1, CAP_DARK);
    }
}

fn draw_bird(buf: &mut PixelBuf, view: &View, bird: &Bird, frame: u64) {
    let cx = view.x(bird.x);
    let cy = view.y(bird.y);
    let bw = (world::BIRD_HALF_WIDTH * view.sx).round().max(2.0) as i32;
    let bh = (world::BIRD_HALF_HEIGHT * view.sy).round().max(2.0) as i32;
    let s = bh as f64 / 2.0;

    // Nose up while climbing, down while falling.
    let tilt = (bird.vy / 6.0).clamp(-1.0, 1.0) as i32;

    buf.fill_rect(cx - bw, cy - bh, bw * 2 + 1, bh * 2, BIRD_Y);
    buf.fill_rect(cx - bw + 1, cy - bh, bw * 2 - 2, 1.max((s * 0.8) as i32), BIRD_HI);

    let wing_y_off = if frame % 8 < 4 { -1 } else { 1 };
    let wing_h = (1.5 * s).max(1.0) as i32;
    let wing_w = (2.0 * s).max(1.0) as i32;
    buf.fill_rect(cx - bw + 1, cy + wing_y_off + tilt, wing_w, wing_h, BIRD_WING);

    let eye_r = (0.8 * s).max(1.0) as i32;
    let ex = cx + bw - eye_r - 1;
    let ey = cy - bh + (1.0 * s).max(1.0) as i32;
    buf.fill_rect(ex, ey, eye_r + 1, eye_r + 1, BIRD_EYE);
    buf.set(ex + eye_r, ey + eye_r, BIRD_PUPIL);

    let beak_x = cx + bw;
    let beak_y = cy - (0.5 * s) as i32 + tilt;
    let beak_w = (2.5 * s).max(2.0) as i32;
    let beak_h = (1.5 * s).max(1.0) as i32;
    buf.fill_rect(beak_x, beak_y, beak_w, beak_h / 2 + 1, BIRD_BEAK_HI);
    buf.fill_rect(beak_x, beak_y + beak_h / 2 + 1, beak_w, beak_h / 2, BIRD_BEAK);

    let tail_w = (1.5 * s).max(1.0) as i32;
    buf.fill_rect(cx - bw - tail_w, cy - 1 + tilt, tail_w, 2, BIRD_WING);
}

fn draw_title(buf: &mut PixelBuf, view: &View, scene: &Scene<'_>) {
    let cx = view.pw / 2;
    let k = (view.scale.round() as i32).clamp(1, 4);
    let title_y = view.ph / 5;
    draw_text(buf, cx, title_y, "FLAPPY", k + 1, BIRD_Y);
    draw_text(buf, cx, title_y + 5 * (k + 1) + 3, scene.tier.level.name(), k, WHITE);
    if scene.best > 0 {
        let best_y = title_y + 5 * (k + 1) + 5 * k + 6;
        draw_text(buf, cx, best_y, &format!("BEST {}", scene.best), 1, WHITE);
    }
    draw_text(buf, cx, view.ground() - 8, "SPACE TO FLAP", 1, WHITE);
}

fn draw_game_over(buf: &mut PixelBuf, view: &View, scene: &Scene<'_>) {
    let cx = view.pw / 2;
    let cy = view.ph / 2;
    let panel_w = (40.0 * view.scale).max(30.0) as i32;
    let panel_h = (24.0 * view.scale).max(22.0) as i32;

    buf.darken();

    let px = cx - panel_w / 2;
    let py = cy - panel_h / 2;
    buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
    buf.fill_rect(px, py, panel_w, panel_h, DIRT);
    buf.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL);

    draw_text(buf, cx, py + 3, "GAME OVER", 1, BIRD_BEAK);
    draw_number(buf, cx, py + 10, scene.state.score, WHITE);
    draw_text(buf, cx, py + 17, &format!("BEST {}", scene.best), 1, BIRD_Y);
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0).clamp(0.0, 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

// ── Terminal output ─────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    buf: PixelBuf,
    clear_pending: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            clear_pending: true,
        }
    }

    #[cfg(test)]
    fn pixels(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn resize(&mut self, cols: u16, rows: u16) {
        log::debug!("resized to {cols}x{rows}");
        self.buf.resize(cols as usize, rows as usize * 2);
        self.clear_pending = true;
    }

    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        if self.clear_pending {
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
            self.clear_pending = false;
        }
        paint(&mut self.buf, scene);
        self.buf.render(&mut self.out)
    }
}
