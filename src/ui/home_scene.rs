use super::game_common::format_thousands;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Play, MenuItem::Quit];

    fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Quit => "Quit",
        }
    }
}

/// Totals shown on the home screen, kept for the lifetime of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomeStats {
    pub balance: u64,
    pub best_score: u64,
    pub runs: u32,
}

pub struct HomeScreen {
    pub selected_index: usize,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected_index.min(MenuItem::ALL.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.selected_index = (self.selected_index + 1).min(MenuItem::ALL.len() - 1);
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, stats: &HomeStats) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(7), // Title art
                Constraint::Length(4), // Stats
                Constraint::Min(4),    // Menu
                Constraint::Length(2), // Controls
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_stats(f, chunks[1], stats);
        self.draw_menu(f, chunks[2]);
        self.draw_controls(f, chunks[3]);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let art = [
            r"  _                        ___                          ",
            r" | |   __ _ _ _  ___      | _ \_  _ _ _  _ _  ___ _ _  ",
            r" | |__/ _` | ' \/ -_)     |   / || | ' \| ' \/ -_) '_| ",
            r" |____\__,_|_||_\___|     |_|_\\_,_|_||_|_||_\___|_|   ",
        ];
        let mut lines: Vec<Line> = art
            .iter()
            .map(|row| {
                Line::from(Span::styled(
                    *row,
                    Style::default()
                        .fg(Color::LightYellow)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Dodge the trains. Grab the coins.",
            Style::default().fg(Color::DarkGray),
        )));

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn draw_stats(&self, f: &mut Frame, area: Rect, stats: &HomeStats) {
        let label = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled("Coins ", label),
            Span::styled(
                format!("{} $", format_thousands(stats.balance)),
                Style::default().fg(Color::Rgb(255, 215, 0)),
            ),
            Span::styled("    Best ", label),
            Span::styled(
                format_thousands(stats.best_score),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled("    Runs ", label),
            Span::styled(stats.runs.to_string(), Style::default().fg(Color::White)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn draw_menu(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];
        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let is_selected = i == self.selected_index;
            let marker = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, item.label()),
                style,
            )));
        }
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn draw_controls(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("[↑/↓]", Style::default().fg(Color::White)),
            Span::styled(" Select  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Enter]", Style::default().fg(Color::White)),
            Span::styled(" Confirm  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Q]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_navigation_clamps() {
        let mut home = HomeScreen::new();
        assert_eq!(home.selected(), MenuItem::Play);
        home.move_up();
        assert_eq!(home.selected(), MenuItem::Play);
        home.move_down();
        home.move_down();
        assert_eq!(home.selected(), MenuItem::Quit);
    }
}
