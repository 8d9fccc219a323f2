pub mod feedback_panel;
pub mod language_switcher;
pub mod notice_banner;
pub mod scenario_card;
pub mod stats_bar;
