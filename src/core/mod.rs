/// Live menu: optimistic status changes, removal and form submission
pub mod board;
/// Cuisine and food type catalogs
pub mod catalog;
/// Tax and display text derived from dish fields
pub mod derive;
/// The dish record and its wire conventions
pub mod dish;
/// Create/edit form state and the validation gate
pub mod form;
/// Image intake for dish pictures
pub mod image;
/// Filtering, sorting and statistics for the listing
pub mod listing;
/// Request bodies for the dish resource
pub mod payload;
