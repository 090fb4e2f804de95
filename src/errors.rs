//! Unified error types and result handling.
//!
//! Local failures (form validation, image intake) have their own enums so callers
//! can show them inline without any network round trip. Everything else funnels
//! into [`Error`].

use crate::core::dish::ItemId;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// Local store failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Transport-level HTTP failure (connection, decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered but reported a failure
    #[error("Backend rejected the request ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Message from the response body, or a generic description
        message: String,
    },

    /// Pre-submit form validation failed; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The selected image was refused before encoding
    #[error(transparent)]
    Image(#[from] ImageError),

    /// No dish with this identifier in the current collection
    #[error("Dish not found: {id}")]
    DishNotFound {
        /// Identifier that was looked up
        id: ItemId,
    },

    /// A change for this dish is still in flight
    #[error("Dish {id} is busy with another change")]
    Busy {
        /// Identifier of the busy dish
        id: ItemId,
    },

    /// The dish awaits approval and cannot be changed from here
    #[error("Dish {id} is pending approval and cannot be changed")]
    PendingApproval {
        /// Identifier of the locked dish
        id: ItemId,
    },

    /// The form is already being submitted
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// The form was opened for a different flow than the one requested
    #[error("Form error: {message}")]
    Form {
        /// What went wrong
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons the validation gate refuses a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming
    #[error("Item name is required")]
    EmptyName,

    /// Selling price missing, unparseable, or not positive
    #[error("Valid vendor price is required")]
    InvalidVendorPrice,

    /// MRP missing or unparseable
    #[error("Valid base price (MRP) is required")]
    InvalidBasePrice,

    /// Selling price above MRP
    #[error("Vendor price ({vendor_price}) cannot be higher than base price ({base_price})")]
    PriceOrdering {
        /// Selling price entered
        vendor_price: String,
        /// MRP entered
        base_price: String,
    },

    /// Cuisine or food type not chosen
    #[error("{field} selection is required")]
    MissingSelection {
        /// Which selection is missing ("Cuisine" or "Food type")
        field: &'static str,
    },

    /// Opening or closing time missing
    #[error("Opening and closing times are required")]
    MissingSchedule,
}

/// Reasons an image is refused before it is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// File exceeds the size ceiling
    #[error("Image size should be less than {limit} bytes (got {size})")]
    TooLarge {
        /// Size of the selected file in bytes
        size: u64,
        /// Ceiling in bytes
        limit: u64,
    },

    /// MIME type is not `image/*`
    #[error("Please select a valid image file (got {mime})")]
    NotAnImage {
        /// MIME type reported for the file
        mime: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
