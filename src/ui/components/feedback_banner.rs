use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::FeedbackKind;
use crate::ui::theme::Theme;

/// Transient verdict line shown between a response and the next question.
pub struct FeedbackBanner<'a> {
    pub kind: FeedbackKind,
    pub theme: &'a Theme,
}

impl<'a> FeedbackBanner<'a> {
    pub fn new(kind: FeedbackKind, theme: &'a Theme) -> Self {
        Self { kind, theme }
    }
}

impl Widget for FeedbackBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let (text, color) = match self.kind {
            FeedbackKind::Correct => ("Correct!".to_string(), colors.success()),
            FeedbackKind::Incorrect(correct_answer) => (
                format!(
                    "Wrong! The correct answer was {}.",
                    correct_answer.as_str()
                ),
                colors.error(),
            ),
            FeedbackKind::Skipped => ("Question skipped.".to_string(), colors.text_dim()),
        };

        let line = Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
