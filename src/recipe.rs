//! Recipe form model: raw field values, category set, and the validation
//! gate that turns them into a request payload.
//!
//! Fields hold text exactly as typed; nothing is checked while editing. The
//! whole form is validated in one pass when the user asks for a prediction,
//! and the first offending field wins.

use std::fmt;

use crate::prediction::RecipePayload;

/// Recipe categories known to the traffic model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipeCategory {
    Breakfast,
    Beverages,
    Chicken,
    ChickenBreast,
    Dessert,
    LunchSnacks,
    Meat,
    OneDishMeal,
    Pork,
    Potato,
    Vegetable,
}

/// Every category, in the order the form presents them.
pub const ALL_CATEGORIES: [RecipeCategory; 11] = [
    RecipeCategory::Breakfast,
    RecipeCategory::Beverages,
    RecipeCategory::Chicken,
    RecipeCategory::ChickenBreast,
    RecipeCategory::Dessert,
    RecipeCategory::LunchSnacks,
    RecipeCategory::Meat,
    RecipeCategory::OneDishMeal,
    RecipeCategory::Pork,
    RecipeCategory::Potato,
    RecipeCategory::Vegetable,
];

impl RecipeCategory {
    /// Dataset label, used on the wire and in the combo box.
    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Beverages => "Beverages",
            Self::Chicken => "Chicken",
            Self::ChickenBreast => "Chicken Breast",
            Self::Dessert => "Dessert",
            Self::LunchSnacks => "Lunch/Snacks",
            Self::Meat => "Meat",
            Self::OneDishMeal => "One Dish Meal",
            Self::Pork => "Pork",
            Self::Potato => "Potato",
            Self::Vegetable => "Vegetable",
        }
    }

    /// Parse a dataset label back into a category.
    pub fn from_label(label: &str) -> Option<Self> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|category| category.label() == label)
    }
}

/// Names of the six form fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Calories,
    Carbohydrate,
    Sugar,
    Protein,
    Category,
    Servings,
}

impl FormField {
    /// Human-facing field name used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Calories => "Calories",
            Self::Carbohydrate => "Carbohydrate",
            Self::Sugar => "Sugar",
            Self::Protein => "Protein",
            Self::Category => "Category",
            Self::Servings => "Servings",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form values, exactly as the user typed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeForm {
    pub calories: String,
    pub carbohydrate: String,
    pub sugar: String,
    pub protein: String,
    pub category: Option<RecipeCategory>,
    pub servings: String,
}

/// Why a form failed the submission gate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(FormField),
    #[error("{0} must be a number")]
    NotANumber(FormField),
    #[error("{0} cannot be negative")]
    Negative(FormField),
    #[error("Servings must be a whole number of at least 1")]
    InvalidServings,
}

impl ValidationError {
    /// The field that caused the failure.
    pub fn field(&self) -> FormField {
        match self {
            Self::Missing(field) | Self::NotANumber(field) | Self::Negative(field) => *field,
            Self::InvalidServings => FormField::Servings,
        }
    }
}

impl RecipeForm {
    /// Replace one field's raw value, leaving the others untouched.
    ///
    /// A category value that is not a known label leaves the selection unset;
    /// the validation gate reports it as missing.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Calories => self.calories = value.to_string(),
            FormField::Carbohydrate => self.carbohydrate = value.to_string(),
            FormField::Sugar => self.sugar = value.to_string(),
            FormField::Protein => self.protein = value.to_string(),
            FormField::Category => self.category = RecipeCategory::from_label(value),
            FormField::Servings => self.servings = value.to_string(),
        }
    }

    /// Raw value of one field; the category yields its label or `""`.
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Calories => &self.calories,
            FormField::Carbohydrate => &self.carbohydrate,
            FormField::Sugar => &self.sugar,
            FormField::Protein => &self.protein,
            FormField::Category => self.category.map(RecipeCategory::label).unwrap_or(""),
            FormField::Servings => &self.servings,
        }
    }

    /// Reset every field to empty/unset.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the whole form and build the request payload.
    ///
    /// Fields are checked in presentation order; the first failure is
    /// returned and nothing else runs.
    pub fn validate(&self) -> Result<RecipePayload, ValidationError> {
        let calories = parse_amount(&self.calories, FormField::Calories)?;
        let carbohydrate = parse_amount(&self.carbohydrate, FormField::Carbohydrate)?;
        let sugar = parse_amount(&self.sugar, FormField::Sugar)?;
        let protein = parse_amount(&self.protein, FormField::Protein)?;
        let category = self
            .category
            .ok_or(ValidationError::Missing(FormField::Category))?;
        let servings = parse_servings(&self.servings)?;
        Ok(RecipePayload {
            calories,
            carbohydrate,
            sugar,
            protein,
            category: category.label().to_string(),
            servings,
        })
    }
}

fn parse_amount(raw: &str, field: FormField) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(field));
    }
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

fn parse_servings(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(FormField::Servings));
    }
    match trimmed.parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ValidationError::InvalidServings),
    }
}
