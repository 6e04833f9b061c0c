//! # sf-ui
//!
//! Askama page templates and the view models they render. Templates live in
//! `templates/`; everything here is plain data so pages can be unit tested.

use askama::Template;
use chrono::{DateTime, Local, Utc};
use sf_core::{CountryCode, FieldErrors, Field, FormValues, SponsorRecord, SubmissionReceipt, Tier};

pub const SITE_NAME: &str = "Sportify";
pub const SPONSOR_CONTACT: &str = "sponsors@sportify.lk";

/// Groups digits in threes, e.g. `100000` → `100,000`.
pub fn format_lkr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Day-first short date, e.g. `15/03/2024`.
pub fn format_since(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Submission time in the server's local zone, e.g. `15/03/2024, 09:00:00`.
pub fn format_submitted(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Badge style per tier.
pub fn badge_variant(tier: Tier) -> &'static str {
    match tier {
        Tier::Platinum => "default",
        Tier::Gold => "secondary",
        Tier::Silver | Tier::Other => "outline",
    }
}

/// One tile of the sponsor grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SponsorCard {
    pub id: String,
    pub company: String,
    pub initial: String,
    pub tier: String,
    pub badge: &'static str,
    pub amount: String,
    pub since: String,
    pub website: Option<String>,
}

impl From<&SponsorRecord> for SponsorCard {
    fn from(r: &SponsorRecord) -> Self {
        let initial = r
            .company
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string());
        Self {
            id: r.id.to_string(),
            company: r.company.clone(),
            initial,
            tier: r.tier.to_string(),
            badge: badge_variant(r.tier),
            amount: format_lkr(r.amount_lkr),
            since: format_since(&r.date_since),
            website: r.website.clone(),
        }
    }
}

pub fn sponsor_cards(records: &[SponsorRecord]) -> Vec<SponsorCard> {
    records.iter().map(SponsorCard::from).collect()
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
}

/// The sponsor grid on its own.
#[derive(Template)]
#[template(path = "sponsors_grid.html")]
pub struct SponsorsGridTemplate {
    pub cards: Vec<SponsorCard>,
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate<'a> {
    pub title: &'a str,
    pub benefits: &'a [&'a str],
    pub cards: Vec<SponsorCard>,
}

pub const BENEFITS: [&str; 3] = [
    "Increased brand visibility",
    "Exposure to a global audience",
    "Networking opportunities",
];

/// A form input with its current value and error text (empty when fine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldView {
    pub value: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "packages.html")]
pub struct PackagesTemplate<'a> {
    pub title: &'a str,
    pub company_name: FieldView,
    pub website: FieldView,
    pub first_name: FieldView,
    pub last_name: FieldView,
    pub email: FieldView,
    pub country_code: FieldView,
    pub contact_number: FieldView,
    pub interest: FieldView,
    pub level: FieldView,
    pub other_amount: FieldView,
    pub letter_filename: FieldView,
    pub comments: FieldView,
    pub countries: Vec<SelectOption>,
    pub levels: Vec<SelectOption>,
    pub is_other: bool,
    pub amount: String,
    pub can_submit: bool,
    pub notices: Vec<String>,
}

impl<'a> PackagesTemplate<'a> {
    /// Builds the form page. Errors are only shown once `show_errors` is set,
    /// so an untouched form does not open covered in red.
    pub fn new(
        title: &'a str,
        values: &FormValues,
        errors: &FieldErrors,
        amount: u64,
        show_errors: bool,
        notices: Vec<String>,
    ) -> Self {
        let view = |field: Field| FieldView {
            value: values.get(field).to_string(),
            error: if show_errors {
                errors.get(field).unwrap_or_default().to_string()
            } else {
                String::new()
            },
        };
        let countries = CountryCode::ALL
            .into_iter()
            .map(|c| SelectOption {
                value: c.dial().to_string(),
                label: format!("{} ({})", c.dial(), c.region()),
                selected: values.country_code == c.dial(),
            })
            .collect();
        let levels = Tier::ALL
            .into_iter()
            .map(|t| SelectOption {
                value: t.to_string(),
                label: match t.fixed_amount() {
                    Some(a) => format!("{t} (Rs. {})", format_lkr(a)),
                    None => "Other (custom amount)".to_string(),
                },
                selected: values.level == t.as_str(),
            })
            .collect();

        Self {
            title,
            company_name: view(Field::CompanyName),
            website: view(Field::Website),
            first_name: view(Field::FirstName),
            last_name: view(Field::LastName),
            email: view(Field::Email),
            country_code: view(Field::CountryCode),
            contact_number: view(Field::ContactNumber),
            interest: view(Field::Interest),
            level: view(Field::Level),
            other_amount: view(Field::OtherAmount),
            letter_filename: view(Field::LetterFilename),
            comments: view(Field::Comments),
            countries,
            levels,
            is_other: values.tier() == Some(Tier::Other),
            amount: format_lkr(amount),
            can_submit: errors.is_empty(),
            notices,
        }
    }
}

#[derive(Template)]
#[template(path = "confirmation.html")]
pub struct ConfirmationTemplate<'a> {
    pub title: &'a str,
    pub company: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub level: String,
    pub amount: String,
    pub submitted: String,
    pub letter: Option<String>,
    pub contact: &'a str,
    pub notices: Vec<String>,
}

impl<'a> ConfirmationTemplate<'a> {
    /// `notices` carries anything dropped from the input, e.g. a rejected letter.
    pub fn new(title: &'a str, receipt: &SubmissionReceipt, notices: Vec<String>) -> Self {
        let v = &receipt.values;
        Self {
            title,
            company: v.company_name.trim().to_string(),
            contact_person: format!("{} {}", v.first_name.trim(), v.last_name.trim()),
            email: v.email.trim().to_string(),
            phone: receipt.payload.contact_number.clone(),
            level: receipt.payload.sponsorship_level.to_string(),
            amount: format_lkr(receipt.amount_lkr),
            submitted: format_submitted(&receipt.submitted_at),
            letter: receipt.payload.company_letter_filename.clone(),
            contact: SPONSOR_CONTACT,
            notices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sf_core::{validate, SubmissionPayload};

    fn record(company: &str, tier: Tier, amount: u64, website: Option<&str>) -> SponsorRecord {
        SponsorRecord {
            id: "3f7c2a1e-8b4d-4c6e-9a10-2d5e7f8a9b01".parse().unwrap(),
            company: company.to_string(),
            tier,
            amount_lkr: amount,
            date_since: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            website: website.map(str::to_string),
        }
    }

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_lkr(0), "0");
        assert_eq!(format_lkr(999), "999");
        assert_eq!(format_lkr(1_000), "1,000");
        assert_eq!(format_lkr(75_000), "75,000");
        assert_eq!(format_lkr(1_234_567), "1,234,567");
    }

    #[test]
    fn since_is_day_first() {
        let d = Utc.with_ymd_and_hms(2024, 3, 5, 23, 0, 0).unwrap();
        assert_eq!(format_since(&d), "05/03/2024");
    }

    #[test]
    fn card_carries_badge_initial_and_link() {
        let card = SponsorCard::from(&record("ceylon gear", Tier::Platinum, 100_000, Some("https://c.lk")));
        assert_eq!(card.initial, "C");
        assert_eq!(card.badge, "default");
        assert_eq!(card.amount, "100,000");
        assert_eq!(card.since, "15/03/2024");
        assert_eq!(card.website.as_deref(), Some("https://c.lk"));

        assert_eq!(SponsorCard::from(&record("", Tier::Silver, 1, None)).initial, "?");
        assert_eq!(badge_variant(Tier::Gold), "secondary");
        assert_eq!(badge_variant(Tier::Other), "outline");
    }

    #[test]
    fn grid_renders_every_card_and_optional_link() {
        let html = SponsorsGridTemplate {
            cards: sponsor_cards(&[
                record("With Site", Tier::Gold, 75_000, Some("https://site.lk")),
                record("No Site", Tier::Silver, 50_000, None),
            ]),
        }
        .render()
        .unwrap();
        assert!(html.contains("With Site"));
        assert!(html.contains("No Site"));
        assert!(html.contains("LKR 75,000"));
        assert_eq!(html.matches("Website</a>").count(), 1);
    }

    #[test]
    fn grid_escapes_company_names() {
        let html = SponsorsGridTemplate {
            cards: sponsor_cards(&[record("<script>x</script>", Tier::Gold, 1, None)]),
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn untouched_form_hides_errors() {
        let values = FormValues::default();
        let errors = validate(&values);
        let page = PackagesTemplate::new("t", &values, &errors, 0, false, vec![]);
        assert!(page.company_name.error.is_empty());
        assert!(!page.can_submit);
        assert!(page.countries.iter().any(|c| c.value == "+94" && c.selected));
        let html = page.render().unwrap();
        assert!(!html.contains("Required"));
    }

    #[test]
    fn submitted_form_shows_field_errors_and_amount() {
        let values = FormValues { level: "Other".into(), ..FormValues::default() };
        let errors = validate(&values);
        let page = PackagesTemplate::new("t", &values, &errors, 0, true, vec!["careful".into()]);
        assert_eq!(page.other_amount.error, "Please enter amount for Other");
        assert!(page.is_other);
        let html = page.render().unwrap();
        assert!(html.contains("Please enter amount for Other"));
        assert!(html.contains("careful"));
    }

    #[test]
    fn confirmation_echoes_submission() {
        let values = FormValues {
            company_name: "Acme".into(),
            first_name: "Nimal".into(),
            last_name: "Perera".into(),
            email: "n@acme.lk".into(),
            contact_number: "712345678".into(),
            level: "Gold".into(),
            ..FormValues::default()
        };
        let receipt = SubmissionReceipt {
            payload: SubmissionPayload {
                company_name: "Acme".into(),
                website: None,
                contact_person_first_name: "Nimal".into(),
                contact_person_last_name: "Perera".into(),
                email: "n@acme.lk".into(),
                contact_number: "+94 712345678".into(),
                sponsorship_level: Tier::Gold,
                other_amount: None,
                amount_lkr: 75_000,
                company_letter_filename: None,
                interest_reason: None,
                additional_comments: None,
            },
            values,
            amount_lkr: 75_000,
            submitted_at: Utc::now(),
        };
        let page = ConfirmationTemplate::new("t", &receipt, vec![]);
        assert_eq!(page.contact_person, "Nimal Perera");
        let html = page.render().unwrap();
        assert!(html.contains("Rs. 75,000"));
        assert!(html.contains("+94 712345678"));
        assert!(html.contains(SPONSOR_CONTACT));
        assert!(!html.contains("Company letter:"));

        let mut with_letter = receipt.clone();
        with_letter.payload.company_letter_filename = Some("letter.pdf".into());
        let html = ConfirmationTemplate::new("t", &with_letter, vec!["heads up".into()])
            .render()
            .unwrap();
        assert!(html.contains("Company letter:</strong> letter.pdf"));
        assert!(html.contains("heads up"));
    }
}
