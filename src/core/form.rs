//! Dish form state and the pre-submit validation gate.
//!
//! A [`DishForm`] holds raw text the way a browser form does; prices only become
//! decimals once [`DishForm::validate`] accepts the whole form. Every accepted edit
//! clears the form's error message, and every validation failure sets it.

use crate::{
    core::{
        catalog::{Cuisine, FoodType},
        derive::{capitalize_words, tax_for},
        dish::{CHANGE_TYPE_EDIT, DishStatus, ImageData, ItemId, MenuItem, OutletId},
        listing::StatusLifecycle,
        payload::{DishPatch, NewDish},
    },
    errors::{Error, Result, ValidationError},
};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Which flow the form belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New dish for an outlet
    Create {
        /// Owning outlet
        outlet_id: OutletId,
    },
    /// Editing an existing dish; the MRP is fixed
    Edit {
        /// Dish being edited
        item_id: ItemId,
        /// Set when the dish awaits approval and must not change
        locked: bool,
    },
}

/// A single field change coming from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FieldEdit {
    Name(String),
    Description(String),
    BasePrice(String),
    VendorPrice(String),
    Status(DishStatus),
    OpeningTime(String),
    ClosingTime(String),
    Vegetarian(bool),
    Cuisine(Option<Cuisine>),
    FoodType(Option<FoodType>),
    BulkOnly(bool),
    Image(ImageData),
}

/// Editable dish form.
#[derive(Debug, Clone, PartialEq)]
pub struct DishForm {
    mode: FormMode,
    name: String,
    description: String,
    base_price: String,
    vendor_price: String,
    tax: Decimal,
    status: DishStatus,
    opening_time: String,
    closing_time: String,
    is_vegetarian: bool,
    cuisine: Option<Cuisine>,
    food_type: Option<FoodType>,
    bulk_only: bool,
    image: ImageData,
    error: Option<String>,
    submitting: bool,
}

/// A form that passed the validation gate, with prices parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDish {
    /// Trimmed name
    pub name: String,
    /// Trimmed description
    pub description: String,
    /// MRP
    pub base_price: Decimal,
    /// Selling price
    pub vendor_price: Decimal,
    /// Derived tax
    pub tax: Decimal,
    /// Status to send
    pub status: DishStatus,
    /// "HH:MM"
    pub opening_time: String,
    /// "HH:MM"
    pub closing_time: String,
    /// Vegetarian flag
    pub is_vegetarian: bool,
    /// Cuisine
    pub cuisine: Cuisine,
    /// Food type
    pub food_type: FoodType,
    /// Bulk-only flag
    pub bulk_only: bool,
    /// Picture
    pub image: ImageData,
}

impl ValidDish {
    /// Creation payload for an outlet
    #[must_use]
    pub fn into_new_dish(self, outlet_id: OutletId) -> NewDish {
        NewDish {
            item_name: self.name,
            base_price: self.base_price,
            vendor_price: self.vendor_price,
            status: self.status,
            outlet_id,
            description: self.description,
            opening_time: self.opening_time,
            closing_time: self.closing_time,
            is_vegetarian: self.is_vegetarian,
            image: self.image,
            cuisine: self.cuisine,
            food_type: self.food_type,
            bulk_only: self.bulk_only,
            tax: self.tax,
            tax_percentage: None,
            verified: false,
        }
    }

    /// Full-edit patch, marked verified with the edit audit marker
    #[must_use]
    pub fn into_patch(self) -> DishPatch {
        DishPatch {
            item_name: Some(self.name),
            description: Some(self.description),
            base_price: Some(self.base_price),
            vendor_price: Some(self.vendor_price),
            opening_time: Some(self.opening_time),
            closing_time: Some(self.closing_time),
            is_vegetarian: Some(self.is_vegetarian),
            cuisine: Some(self.cuisine),
            food_type: Some(self.food_type),
            bulk_only: Some(self.bulk_only),
            image: Some(self.image),
            status: Some(self.status),
            verified: Some(true),
            change_type: Some(CHANGE_TYPE_EDIT),
            updated_at: None,
        }
    }
}

/// Leading number of `raw`: optional sign, digits with at most one point, then
/// an optional exponent. Trailing text is ignored, as price inputs allow.
fn numeric_prefix(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    raw.get(..end)
}

fn parse_price(raw: &str) -> Option<Decimal> {
    let number = numeric_prefix(raw.trim())?;
    Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .ok()
}

impl DishForm {
    /// Blank creation form with the dashboard's defaults.
    #[must_use]
    pub fn create(outlet_id: OutletId) -> Self {
        Self {
            mode: FormMode::Create { outlet_id },
            name: String::new(),
            description: String::new(),
            base_price: String::new(),
            vendor_price: String::new(),
            tax: Decimal::ZERO,
            status: DishStatus::Active,
            opening_time: "09:00".to_string(),
            closing_time: "22:00".to_string(),
            is_vegetarian: true,
            cuisine: Some(Cuisine::NorthIndian),
            food_type: Some(FoodType::Thali),
            bulk_only: false,
            image: ImageData::Absent,
            error: None,
            submitting: false,
        }
    }

    /// Form pre-filled from an existing dish.
    #[must_use]
    pub fn edit(item: &MenuItem, lifecycle: StatusLifecycle) -> Self {
        Self {
            mode: FormMode::Edit {
                item_id: item.item_id,
                locked: lifecycle.is_locked(item),
            },
            name: item.item_name.clone(),
            description: item.description_text().to_string(),
            base_price: item.base_price.to_string(),
            vendor_price: item.vendor_price.to_string(),
            tax: tax_for(item.vendor_price),
            status: item.status,
            opening_time: item.opening_time.clone(),
            closing_time: item.closing_time.clone(),
            is_vegetarian: item.is_vegetarian,
            cuisine: item.cuisine.known(),
            food_type: item.food_type.known(),
            bulk_only: item.bulk_only,
            image: item.image.clone(),
            error: None,
            submitting: false,
        }
    }

    /// Flow this form belongs to
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw MRP text
    #[must_use]
    pub fn base_price(&self) -> &str {
        &self.base_price
    }

    /// Raw selling price text
    #[must_use]
    pub fn vendor_price(&self) -> &str {
        &self.vendor_price
    }

    /// Tax derived from the current selling price
    #[must_use]
    pub const fn tax(&self) -> Decimal {
        self.tax
    }

    /// Current error message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submission is outstanding
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the form refuses all edits
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self.mode, FormMode::Edit { locked: true, .. })
    }

    /// Applies one field change.
    ///
    /// # Errors
    /// Fails if the form is locked, or on an MRP change in the edit flow.
    pub fn apply(&mut self, edit: FieldEdit) -> Result<()> {
        if let FormMode::Edit {
            item_id,
            locked: true,
        } = self.mode
        {
            return Err(Error::PendingApproval { id: item_id });
        }

        match edit {
            FieldEdit::Name(name) => self.name = capitalize_words(&name),
            FieldEdit::Description(text) => self.description = capitalize_words(&text),
            FieldEdit::BasePrice(price) => {
                if matches!(self.mode, FormMode::Edit { .. }) {
                    return Err(Error::Form {
                        message: "Base price (MRP) cannot be changed after creation".to_string(),
                    });
                }
                self.base_price = price;
            }
            FieldEdit::VendorPrice(price) => {
                let parsed = parse_price(&price);
                self.tax = parsed.map_or(Decimal::ZERO, tax_for);
                // No discount until the owner says otherwise
                if let (FormMode::Create { .. }, Some(value)) = (self.mode, parsed) {
                    if self.base_price.trim().is_empty() {
                        self.base_price = value.to_string();
                    }
                }
                self.vendor_price = price;
            }
            FieldEdit::Status(status) => self.status = status,
            FieldEdit::OpeningTime(time) => self.opening_time = time,
            FieldEdit::ClosingTime(time) => self.closing_time = time,
            FieldEdit::Vegetarian(flag) => self.is_vegetarian = flag,
            FieldEdit::Cuisine(cuisine) => self.cuisine = cuisine,
            FieldEdit::FoodType(food_type) => self.food_type = food_type,
            FieldEdit::BulkOnly(flag) => self.bulk_only = flag,
            FieldEdit::Image(image) => self.image = image,
        }
        self.error = None;
        Ok(())
    }

    /// Applies several edits in order, stopping at the first refusal.
    ///
    /// # Errors
    /// See [`DishForm::apply`].
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = FieldEdit>) -> Result<()> {
        edits.into_iter().try_for_each(|edit| self.apply(edit))
    }

    /// Runs the validation gate without touching the form.
    ///
    /// # Errors
    /// Returns the first failing check.
    pub fn validate(&self) -> std::result::Result<ValidDish, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let vendor_price = parse_price(&self.vendor_price)
            .filter(|price| price.is_sign_positive() && !price.is_zero())
            .ok_or(ValidationError::InvalidVendorPrice)?;
        let base_price = parse_price(&self.base_price).ok_or(ValidationError::InvalidBasePrice)?;

        if vendor_price > base_price {
            return Err(ValidationError::PriceOrdering {
                vendor_price: vendor_price.to_string(),
                base_price: base_price.to_string(),
            });
        }

        let cuisine = self
            .cuisine
            .ok_or(ValidationError::MissingSelection { field: "Cuisine" })?;
        let food_type = self
            .food_type
            .ok_or(ValidationError::MissingSelection { field: "Food type" })?;

        if self.opening_time.trim().is_empty() || self.closing_time.trim().is_empty() {
            return Err(ValidationError::MissingSchedule);
        }

        Ok(ValidDish {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            base_price,
            vendor_price,
            tax: tax_for(vendor_price),
            status: self.status,
            opening_time: self.opening_time.trim().to_string(),
            closing_time: self.closing_time.trim().to_string(),
            is_vegetarian: self.is_vegetarian,
            cuisine,
            food_type,
            bulk_only: self.bulk_only,
            image: self.image.clone(),
        })
    }

    /// Runs the validation gate and records a failure as the form error.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when a check fails.
    pub fn check(&mut self) -> Result<ValidDish> {
        self.validate().map_err(|e| {
            self.error = Some(e.to_string());
            Error::Validation(e)
        })
    }

    /// Marks the form as submitting.
    ///
    /// # Errors
    /// Returns [`Error::SubmissionInFlight`] if it already is.
    pub fn begin_submit(&mut self) -> Result<()> {
        if self.submitting {
            return Err(Error::SubmissionInFlight);
        }
        self.submitting = true;
        Ok(())
    }

    /// Clears the submitting flag and records the outcome's message.
    pub fn finish_submit(&mut self, error: Option<String>) {
        self.submitting = false;
        self.error = error;
    }
}
