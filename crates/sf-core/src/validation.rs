//! Field rules for the sponsorship application.
//!
//! Every rule is evaluated on each pass; each failing field gets its own
//! message. Nothing here short-circuits on the first error.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{CountryCode, Tier};

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

pub const MIN_CONTACT_DIGITS: usize = 6;

/// Raw form input, exactly as typed. Serialized with the form's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub company_name: String,
    pub website: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    #[serde(deserialize_with = "string_or_number")]
    pub contact_number: String,
    pub interest: String,
    pub level: String,
    #[serde(deserialize_with = "string_or_number")]
    pub other_amount: String,
    pub letter_filename: String,
    pub comments: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            website: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            country_code: CountryCode::default().dial().to_string(),
            contact_number: String::new(),
            interest: String::new(),
            level: String::new(),
            other_amount: String::new(),
            letter_filename: String::new(),
            comments: String::new(),
        }
    }
}

/// JSON clients may send numeric fields as numbers; the form keeps them as typed text.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Whole(u64),
        Signed(i64),
        Decimal(f64),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s,
        Loose::Whole(n) => n.to_string(),
        Loose::Signed(n) => n.to_string(),
        Loose::Decimal(n) => n.to_string(),
    })
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::CompanyName => &self.company_name,
            Field::Website => &self.website,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::CountryCode => &self.country_code,
            Field::ContactNumber => &self.contact_number,
            Field::Interest => &self.interest,
            Field::Level => &self.level,
            Field::OtherAmount => &self.other_amount,
            Field::LetterFilename => &self.letter_filename,
            Field::Comments => &self.comments,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::CompanyName => &mut self.company_name,
            Field::Website => &mut self.website,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::CountryCode => &mut self.country_code,
            Field::ContactNumber => &mut self.contact_number,
            Field::Interest => &mut self.interest,
            Field::Level => &mut self.level,
            Field::OtherAmount => &mut self.other_amount,
            Field::LetterFilename => &mut self.letter_filename,
            Field::Comments => &mut self.comments,
        };
        *slot = value.into();
    }

    /// Parsed level, `None` when unset or not one of the four tiers.
    pub fn tier(&self) -> Option<Tier> {
        self.level.parse().ok()
    }

    pub fn country(&self) -> Option<CountryCode> {
        CountryCode::from_dial(&self.country_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CompanyName,
    Website,
    FirstName,
    LastName,
    Email,
    CountryCode,
    ContactNumber,
    Interest,
    Level,
    OtherAmount,
    LetterFilename,
    Comments,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::CompanyName => "companyName",
            Field::Website => "website",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::CountryCode => "countryCode",
            Field::ContactNumber => "contactNumber",
            Field::Interest => "interest",
            Field::Level => "level",
            Field::OtherAmount => "otherAmount",
            Field::LetterFilename => "letterFilename",
            Field::Comments => "comments",
        }
    }

    /// Whether a change to this field can move the derived amount.
    pub fn affects_amount(self) -> bool {
        matches!(self, Field::Level | Field::OtherAmount)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Runs every rule against `values`.
pub fn validate(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::default();

    for field in [Field::CompanyName, Field::FirstName, Field::LastName] {
        if values.get(field).trim().is_empty() {
            errors.insert(field, "Required");
        }
    }

    let email = values.email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, "Required");
    } else if !EMAIL_SHAPE.is_match(email) {
        errors.insert(Field::Email, "Invalid email");
    }

    if values.country().is_none() {
        errors.insert(Field::CountryCode, "Select a country code");
    }

    if let Some(message) = contact_number_error(&values.contact_number) {
        errors.insert(Field::ContactNumber, message);
    }

    match values.tier() {
        None => errors.insert(Field::Level, "Select a level"),
        // Cross-field: the custom amount only matters for the Other tier.
        Some(Tier::Other) if values.other_amount.trim().is_empty() => {
            errors.insert(Field::OtherAmount, "Please enter amount for Other")
        }
        Some(_) => {}
    }

    errors
}

fn contact_number_error(number: &str) -> Option<&'static str> {
    if number.is_empty() {
        Some("Required")
    } else if !number.chars().all(|c| c.is_ascii_digit()) {
        Some("Digits only")
    } else if number.len() < MIN_CONTACT_DIGITS {
        Some("Too short")
    } else {
        None
    }
}

/// The package amount in LKR for a level and the custom amount field.
///
/// Fixed tiers ignore `other_amount`. For `Other` the custom value is read as
/// a whole number of rupees (decimals are rounded); anything non-numeric is 0,
/// as is an unset level.
pub fn amount(level: Option<Tier>, other_amount: &str) -> u64 {
    match level {
        Some(Tier::Other) => parse_amount(other_amount),
        Some(tier) => tier.fixed_amount().unwrap_or(0),
        None => 0,
    }
}

fn parse_amount(raw: &str) -> u64 {
    let raw = raw.trim();
    if let Ok(whole) = raw.parse::<u64>() {
        return whole;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.round() as u64,
        _ => 0,
    }
}

/// `"<code> <number>"` as sent to the submission endpoint.
pub fn composite_phone(country_code: &str, contact_number: &str) -> String {
    format!("{} {}", country_code.trim(), contact_number.trim())
}
