use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::quiz::Question;
use crate::ui::theme::Theme;

/// The current question with its position in the round.
pub struct QuestionCard<'a> {
    pub question: &'a Question,
    pub position: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(question: &'a Question, position: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            question,
            position,
            total,
            theme,
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Question {}/{} ", self.position, self.total))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        // Push the question text toward the vertical middle of the card.
        let pad = inner.height.saturating_sub(3) / 2;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(pad), Constraint::Min(1)])
            .split(inner);

        let text = Paragraph::new(Line::from(Span::styled(
            self.question.text.as_str(),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        text.render(layout[1], buf);
    }
}
