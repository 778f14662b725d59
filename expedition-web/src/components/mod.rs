pub mod board;
pub mod config_notice;
pub mod finish_screen;
pub mod question_card;
pub mod setup_panel;
pub mod trail_header;
