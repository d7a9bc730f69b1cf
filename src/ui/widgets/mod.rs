pub mod card;
pub mod overlay;
