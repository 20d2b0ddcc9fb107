pub mod feedback_banner;
pub mod menu;
pub mod progress_bar;
pub mod question_card;
pub mod result_panel;
