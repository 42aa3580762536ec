pub mod charts;
pub mod heatmap;
pub mod map;
pub mod notifications;
pub mod popup;
pub mod stat_cards;
