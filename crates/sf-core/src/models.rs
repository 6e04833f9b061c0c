//! # Domain Models
//!
//! These structs represent the core entities of the sponsorship site.
//! Records use UUID v4 identifiers and serialize with the camelCase field
//! names of the persisted storage slot.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sponsorship level. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Platinum,
    Gold,
    Silver,
    Other,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Platinum, Tier::Gold, Tier::Silver, Tier::Other];

    /// Package price in LKR. `Other` carries a caller-chosen amount instead.
    pub fn fixed_amount(self) -> Option<u64> {
        match self {
            Tier::Platinum => Some(100_000),
            Tier::Gold => Some(75_000),
            Tier::Silver => Some(50_000),
            Tier::Other => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Platinum => "Platinum",
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
            Tier::Other => "Other",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl fmt::Display for UnknownTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sponsorship tier {:?}", self.0)
    }
}

impl std::error::Error for UnknownTier {}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

/// Calling codes offered next to the contact number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryCode {
    #[default]
    SriLanka,
    India,
    Singapore,
    UnitedKingdom,
}

impl CountryCode {
    pub const ALL: [CountryCode; 4] = [
        CountryCode::SriLanka,
        CountryCode::India,
        CountryCode::Singapore,
        CountryCode::UnitedKingdom,
    ];

    /// The dialing prefix, e.g. `+94`.
    pub fn dial(self) -> &'static str {
        match self {
            CountryCode::SriLanka => "+94",
            CountryCode::India => "+91",
            CountryCode::Singapore => "+65",
            CountryCode::UnitedKingdom => "+44",
        }
    }

    /// Short region label shown in the picker.
    pub fn region(self) -> &'static str {
        match self {
            CountryCode::SriLanka => "LK",
            CountryCode::India => "IN",
            CountryCode::Singapore => "SG",
            CountryCode::UnitedKingdom => "UK",
        }
    }

    pub fn from_dial(dial: &str) -> Option<Self> {
        CountryCode::ALL.into_iter().find(|c| c.dial() == dial.trim())
    }
}

/// A sponsor shown on the landing page. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorRecord {
    pub id: Uuid,
    pub company: String,
    pub tier: Tier,
    #[serde(rename = "amountLKR")]
    pub amount_lkr: u64,
    /// The only sort key: lists are ordered newest first.
    pub date_since: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Input for `SponsorStore::add`. `id` and `dateSince` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSponsor {
    pub company: String,
    pub tier: Tier,
    #[serde(rename = "amountLKR")]
    pub amount_lkr: u64,
    #[serde(default)]
    pub website: Option<String>,
}

/// Body POSTed to the external submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub contact_person_first_name: String,
    pub contact_person_last_name: String,
    pub email: String,
    /// `"<code> <number>"`, e.g. `"+94 712345678"`.
    pub contact_number: String,
    pub sponsorship_level: Tier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_amount: Option<String>,
    #[serde(rename = "amountLKR")]
    pub amount_lkr: u64,
    /// Always present on the wire; `null` when nothing was attached.
    pub company_letter_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_comments: Option<String>,
}
