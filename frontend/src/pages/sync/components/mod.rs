pub mod mode_card;
pub mod result_summary;
