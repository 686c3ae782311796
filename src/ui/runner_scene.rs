//! Game screen rendering.
//!
//! Uses a cell buffer for per-character color control: sky, track, scrolling
//! cross-ties, obstacles, coins and the runner are drawn into a 2D grid which
//! is then stamped row-by-row as Paragraph widgets. Everything on the track
//! is placed with the pseudo-3D projection, so lanes converge toward the
//! horizon and entities grow as they approach.

use super::game_common::{
    create_game_layout, format_thousands, render_info_panel_frame, render_result_modal,
    render_status_bar,
};
use lane_runner::runner::projection::{
    project, project_x, track_line_opacity, TRACK_BOTTOM, TRACK_TOP,
};
use lane_runner::runner::{Lane, ObstacleKind, Session, Traversing};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Depth (progress) at which the runner stands on the track.
const PLAYER_DEPTH: f64 = 0.85;
/// Rows the runner rises at the top of a jump.
const JUMP_ROWS: f64 = 3.0;
/// Track edges and lane dividers, as screen-x fractions at the camera.
const TRACK_LEFT: f64 = 0.08;
const TRACK_RIGHT: f64 = 0.92;
const LANE_DIVIDERS: [f64; 2] = [0.36, 0.64];
/// Width of one lane at the camera, as a fraction of screen width.
const LANE_WIDTH: f64 = 0.28;

const SKY: Color = Color::Rgb(24, 28, 50);
const TRACK_BG: Color = Color::Rgb(45, 55, 72);
const RAIL: Color = Color::Rgb(140, 140, 150);
const COIN: Color = Color::Rgb(255, 215, 0);

/// Skyline silhouettes: (left edge, height in rows, color).
const BUILDINGS: [(f64, u16, Color); 7] = [
    (0.05, 2, Color::Rgb(65, 78, 117)),
    (0.15, 3, Color::Rgb(58, 58, 90)),
    (0.28, 2, Color::Rgb(36, 40, 70)),
    (0.42, 3, Color::Rgb(65, 78, 117)),
    (0.58, 2, Color::Rgb(65, 78, 117)),
    (0.72, 3, Color::Rgb(58, 58, 90)),
    (0.85, 2, Color::Rgb(36, 40, 70)),
];

/// Render the game screen.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, session: &Session) {
    let title_color = if session.is_over() {
        Color::Red
    } else {
        Color::LightYellow
    };
    let layout = create_game_layout(frame, area, " Lane Runner ", title_color, 24);

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session);
    render_hud(frame, layout.info_panel, session);

    if session.is_over() {
        render_game_over(frame, layout.content, session);
    }
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: SKY,
        }
    }
}

/// Cell grid with bounds-checked writes.
struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as usize,
            height: height as usize,
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
        }
    }

    fn col(&self, x_frac: f64) -> i32 {
        (x_frac * self.width as f64).floor() as i32
    }

    fn row(&self, y_frac: f64) -> i32 {
        (y_frac * self.height as f64).floor() as i32
    }

    fn bg_at(&self, col: i32, row: i32) -> Color {
        self.get(col, row).map_or(Color::Reset, |c| c.bg)
    }

    fn get(&self, col: i32, row: i32) -> Option<&Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        self.cells.get(row as usize)?.get(col as usize)
    }

    /// Draw a glyph, keeping whatever background is already there.
    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        let bg = self.bg_at(col, row);
        self.set(col, row, Cell { ch, fg, bg });
    }

    fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return;
        }
        self.cells[row as usize][col as usize] = cell;
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, session: &Session) {
    if area.height < 6 || area.width < 20 {
        return;
    }

    let mut canvas = Canvas::new(area.width, area.height);
    let now = session.clock_ms();

    draw_skyline(&mut canvas);
    draw_track(&mut canvas);

    // ── Cross-ties ────────────────────────────────────────────────────
    for (_, line) in session.track_lines().iter() {
        let p = line.progress(now);
        let left = project_x(p, TRACK_LEFT);
        let right = project_x(p, TRACK_RIGHT);
        let row = canvas.row(left.y);
        let shade = (60.0 + track_line_opacity(p) * 160.0) as u8;
        for col in (canvas.col(left.x) + 1)..canvas.col(right.x) {
            canvas.put(col, row, '─', Color::Rgb(shade, shade, shade));
        }
    }

    // ── Entities, far to near ─────────────────────────────────────────
    let mut sprites: Vec<Sprite> = Vec::new();
    for (_, obstacle) in session.obstacles().iter() {
        sprites.push(Sprite::Obstacle {
            progress: obstacle.progress(now),
            lane: obstacle.lane,
            kind: obstacle.kind,
        });
    }
    for (_, coin) in session.coin_items().iter() {
        sprites.push(Sprite::Coin {
            progress: coin.progress(now),
            lane: coin.lane,
        });
    }
    sprites.sort_by(|a, b| a.depth().total_cmp(&b.depth()));

    let (far, near): (Vec<Sprite>, Vec<Sprite>) =
        sprites.into_iter().partition(|s| s.depth() <= PLAYER_DEPTH);
    for sprite in &far {
        sprite.draw(&mut canvas);
    }
    draw_runner(&mut canvas, session);
    for sprite in &near {
        sprite.draw(&mut canvas);
    }

    stamp(frame, area, &canvas);
}

fn draw_skyline(canvas: &mut Canvas) {
    let horizon = canvas.row(TRACK_TOP).max(1);
    for (left, height, color) in BUILDINGS {
        let start = canvas.col(left);
        let width = ((canvas.width as f64) * 0.06).round().max(2.0) as i32;
        for dy in 0..height as i32 {
            let row = horizon - 1 - dy;
            for col in start..start + width {
                let ch = if dy == height as i32 - 1 { '▄' } else { '█' };
                canvas.put(col, row, ch, color);
            }
        }
    }
}

fn draw_track(canvas: &mut Canvas) {
    let top = canvas.row(TRACK_TOP);
    let bottom = canvas.row(TRACK_BOTTOM).min(canvas.height as i32 - 1);

    for row in top..=canvas.height as i32 - 1 {
        // Rows below the track bottom continue at full width.
        let y = ((row as f64 + 0.5) / canvas.height as f64).min(TRACK_BOTTOM);
        let p = ((y - TRACK_TOP) / (TRACK_BOTTOM - TRACK_TOP)).clamp(0.0, 1.0);

        let left = canvas.col(project_x(p, TRACK_LEFT).x);
        let right = canvas.col(project_x(p, TRACK_RIGHT).x);
        for col in left..=right {
            canvas.set(
                col,
                row,
                Cell {
                    ch: ' ',
                    fg: Color::Reset,
                    bg: TRACK_BG,
                },
            );
        }
        canvas.put(left, row, '/', RAIL);
        canvas.put(right, row, '\\', RAIL);

        for divider in LANE_DIVIDERS {
            let col = canvas.col(project_x(p, divider).x);
            let ch = if row <= bottom { '│' } else { '┊' };
            canvas.put(col, row, ch, Color::Rgb(90, 95, 110));
        }
    }
}

enum Sprite {
    Obstacle {
        progress: f64,
        lane: Lane,
        kind: ObstacleKind,
    },
    Coin {
        progress: f64,
        lane: Lane,
    },
}

impl Sprite {
    fn depth(&self) -> f64 {
        match self {
            Self::Obstacle { progress, .. } | Self::Coin { progress, .. } => *progress,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        match *self {
            Self::Obstacle {
                progress,
                lane,
                kind,
            } => {
                let proj = project(progress, lane);
                let width = ((LANE_WIDTH * 0.8 * proj.scale * canvas.width as f64).round() as i32).max(1);
                let height = ((proj.scale * 3.0).round() as i32).max(1);
                let left = canvas.col(proj.x) - width / 2;
                let base = canvas.row(proj.y);

                for dy in 0..height {
                    let row = base - dy;
                    for dx in 0..width {
                        let col = left + dx;
                        let (ch, fg) = match kind {
                            ObstacleKind::Train => {
                                if dy == height - 1 {
                                    ('▄', Color::Rgb(230, 90, 80))
                                } else if dy == 1 && dx % 2 == 1 {
                                    ('▪', Color::Rgb(250, 240, 180))
                                } else {
                                    ('█', Color::Rgb(190, 50, 50))
                                }
                            }
                            ObstacleKind::Barrier => {
                                if (dx + dy) % 2 == 0 {
                                    ('▒', Color::Red)
                                } else {
                                    ('▒', Color::White)
                                }
                            }
                        };
                        canvas.put(col, row, ch, fg);
                    }
                }
            }
            Self::Coin { progress, lane } => {
                let proj = project(progress, lane);
                let col = canvas.col(proj.x);
                let row = canvas.row(proj.y);
                if proj.scale > 0.75 {
                    canvas.put(col - 1, row, '(', COIN);
                    canvas.put(col, row, '$', COIN);
                    canvas.put(col + 1, row, ')', COIN);
                } else {
                    canvas.put(col, row, '●', COIN);
                }
            }
        }
    }
}

fn draw_runner(canvas: &mut Canvas, session: &Session) {
    let now = session.clock_ms();
    let config = session.config();
    let player = session.player();

    let ground = project_x(PLAYER_DEPTH, player.visual_x(now, config));
    let col = canvas.col(ground.x);
    let ground_row = canvas.row(ground.y);
    let lift = (player.jump_height(now, config) * JUMP_ROWS).round() as i32;
    let feet = ground_row - lift;
    let wide = player.scale(now, config) > 1.15;

    if lift > 0 {
        canvas.put(col, ground_row, '▁', Color::Rgb(20, 20, 30));
    }

    let color = if session.is_over() {
        Color::Red
    } else {
        Color::LightYellow
    };

    // Legs alternate while running
    let stride = (now / 150) % 2 == 0;
    let (l, r) = if lift > 0 {
        ('╯', '╰')
    } else if stride {
        ('/', ' ')
    } else {
        (' ', '\\')
    };
    canvas.put(col - 1, feet, l, color);
    canvas.put(col + 1, feet, r, color);
    canvas.put(col, feet, '▀', color);

    canvas.put(col, feet - 1, '█', color);
    if wide {
        canvas.put(col - 1, feet - 1, '▐', color);
        canvas.put(col + 1, feet - 1, '▌', color);
    }
    canvas.put(col, feet - 2, 'o', Color::Rgb(255, 200, 150));
}

/// Copy the canvas into the frame, merging runs of identical style.
fn stamp(frame: &mut Frame, area: Rect, canvas: &Canvas) {
    for (row_idx, row_data) in canvas.cells.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &Session) {
    if session.is_over() {
        render_status_bar(
            frame,
            area,
            "Crashed!",
            Color::Red,
            &[("[R/Enter]", "Play Again"), ("[Esc]", "Home")],
        );
        return;
    }

    let airborne = session
        .player()
        .is_jumping(session.clock_ms(), session.config());
    let status = if airborne { "Airborne!" } else { "Run!" };
    render_status_bar(
        frame,
        area,
        status,
        Color::LightYellow,
        &[
            ("[←/→]", "Lane"),
            ("[↑/Space]", "Jump"),
            ("[Drag]", "Swipe"),
            ("[Esc]", "Home"),
        ],
    );
}

fn render_hud(frame: &mut Frame, area: Rect, session: &Session) {
    let inner = render_info_panel_frame(frame, area, " Run ");

    let label = Style::default().fg(Color::DarkGray);
    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format_thousands(session.score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Coins: ", label),
            Span::styled(
                format!("{} $", session.coins()),
                Style::default().fg(COIN),
            ),
        ]),
        Line::from(vec![
            Span::styled("Multiplier: ", label),
            Span::styled(
                format!("x{:.1} ★", session.multiplier()),
                Style::default().fg(Color::LightYellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{}ms", session.speed_ms()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(Color::LightYellow)),
            Span::styled("Runner", label),
        ]),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(Color::Rgb(190, 50, 50))),
            Span::styled("Train - jump it", label),
        ]),
        Line::from(vec![
            Span::styled(" ▒ ", Style::default().fg(Color::Red)),
            Span::styled("Barrier", label),
        ]),
        Line::from(vec![
            Span::styled(" $ ", Style::default().fg(COIN)),
            Span::styled("Coin (+0.1x)", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, area: Rect, session: &Session) {
    render_result_modal(
        frame,
        area,
        "GAME OVER",
        Color::Red,
        &[
            ("SCORE", format_thousands(session.score())),
            ("COINS", format!("{} $", session.coins())),
            ("MULT", format!("x{:.1}", session.multiplier())),
        ],
        "[R] Play Again   [Esc] Home",
    );
}
