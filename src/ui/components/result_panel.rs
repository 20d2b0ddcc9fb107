use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::quiz::FinalResult;
use crate::ui::theme::Theme;

pub struct ResultPanel<'a> {
    pub result: &'a FinalResult,
    pub total_questions: usize,
    pub passing_threshold: f64,
    pub theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(
        result: &'a FinalResult,
        total_questions: usize,
        passing_threshold: f64,
        theme: &'a Theme,
    ) -> Self {
        Self {
            result,
            total_questions,
            passing_threshold,
            theme,
        }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Quiz Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let verdict = if self.result.passed {
            Span::styled(
                "PASSED",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "FAILED",
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            )
        };
        let title = Paragraph::new(Line::from(verdict)).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let score_text = format!("{:.1}", self.result.score);
        let score_max = format!("  (out of {})", self.total_questions);
        let score_line = Line::from(vec![
            Span::styled("  Score:     ", Style::default().fg(colors.fg())),
            Span::styled(
                &*score_text,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(&*score_max, Style::default().fg(colors.text_dim())),
        ]);
        Paragraph::new(score_line).render(layout[1], buf);

        let threshold_text = format!("{:.1}", self.passing_threshold);
        let threshold_line = Line::from(vec![
            Span::styled("  Pass mark: ", Style::default().fg(colors.fg())),
            Span::styled(&*threshold_text, Style::default().fg(colors.fg())),
        ]);
        Paragraph::new(threshold_line).render(layout[2], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r] Retry  ", Style::default().fg(colors.accent())),
            Span::styled("[m] Menu  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[4], buf);
    }
}
