// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Create/edit forms. Validation runs before any request is built; a form
//! that fails validation never reaches the backend.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Client, Quote, QuoteInsert};
use crate::utils::{parse_date, parse_decimal};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r##"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$"##,
    )
    .expect("email pattern compiles")
});

const MIN_DESCRIPTION_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("is required")]
    Required,
    #[error("is not a valid e-mail address")]
    InvalidEmail,
    #[error("must be a date in YYYY-MM-DD format")]
    InvalidDate,
    #[error("must be a number")]
    InvalidNumber,
    #[error("must be at least {0} characters")]
    TooShort(usize),
    #[error("must be at least {0}")]
    BelowMinimum(i64),
    #[error("is not one of the available options")]
    UnknownOption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: Problem,
}

/// Every invalid field of one submit, e.g. `name is required; email is not a
/// valid e-mail address`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_fields(.fields))]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{} {}", e.field, e.problem))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn single(field: &'static str, problem: Problem) -> Self {
        Self {
            fields: vec![FieldError { field, problem }],
        }
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn flag(&mut self, field: &'static str, problem: Problem) {
        self.errors.push(FieldError { field, problem });
    }

    fn text(&mut self, field: &'static str, value: &str) -> String {
        let v = value.trim();
        if v.is_empty() {
            self.flag(field, Problem::Required);
        }
        v.to_string()
    }

    fn id(&mut self, field: &'static str, value: Option<i64>) -> i64 {
        match value {
            Some(id) if id > 0 => id,
            _ => {
                self.flag(field, Problem::Required);
                0
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors {
                fields: self.errors,
            })
        }
    }
}

/// Client create/edit form. Field names match the CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientForm {
    pub id: i64,
    pub client_type_id: Option<i64>,
    /// Backend label for the type; empty on create, carried through on edit.
    pub client_type_name: String,
    pub name: String,
    pub identity: String,
    /// `YYYY-MM-DD`; empty means today.
    pub birth_date: String,
    pub phone: String,
    pub email: String,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Default for ClientForm {
    fn default() -> Self {
        Self {
            id: 0,
            client_type_id: None,
            client_type_name: String::new(),
            name: String::new(),
            identity: String::new(),
            birth_date: String::new(),
            phone: String::new(),
            email: String::new(),
            active: true,
            created_at: None,
        }
    }
}

impl ClientForm {
    /// Edit form prefilled from an existing client.
    pub fn from_client(c: &Client) -> Self {
        Self {
            id: c.id,
            client_type_id: Some(c.client_type_id),
            client_type_name: c.client_type.clone(),
            name: c.name.clone(),
            identity: c.identity.clone(),
            birth_date: c.birth_date.date().format("%Y-%m-%d").to_string(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            active: c.active,
            created_at: Some(c.created_at),
        }
    }

    pub fn validate(&self, now: NaiveDateTime) -> Result<Client, ValidationErrors> {
        let mut ck = Checker::default();
        let client_type_id = ck.id("client_type", self.client_type_id);
        let name = ck.text("name", &self.name);
        let identity = ck.text("identity", &self.identity);
        let phone = ck.text("phone", &self.phone);
        let email = ck.text("email", &self.email);
        if !email.is_empty() && !EMAIL.is_match(&email) {
            ck.flag("email", Problem::InvalidEmail);
        }
        let birth_date = match self.birth_date.trim() {
            "" => now.date().and_hms_opt(0, 0, 0).unwrap_or(now),
            raw => match parse_date(raw) {
                Ok(d) => d.and_hms_opt(0, 0, 0).unwrap_or(now),
                Err(_) => {
                    ck.flag("birth_date", Problem::InvalidDate);
                    now
                }
            },
        };
        ck.finish(Client {
            id: self.id,
            client_type_id,
            client_type: self.client_type_name.clone(),
            name,
            identity,
            birth_date,
            phone,
            email,
            active: self.active,
            created_at: self.created_at.unwrap_or(now),
        })
    }
}

/// Quote create/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteForm {
    pub client_id: Option<i64>,
    pub insurance_type_id: Option<i64>,
    pub currency_id: Option<i64>,
    pub asset_description: String,
    pub sum_insured: String,
}

impl QuoteForm {
    pub fn from_quote(q: &Quote) -> Self {
        Self {
            client_id: Some(q.client_id),
            insurance_type_id: Some(q.insurance_type_id),
            currency_id: Some(q.currency_id),
            asset_description: q.asset_description.clone(),
            sum_insured: q.sum_insured.to_string(),
        }
    }

    pub fn validate(&self) -> Result<QuoteInsert, ValidationErrors> {
        let mut ck = Checker::default();
        let client_id = ck.id("client", self.client_id);
        let insurance_type_id = ck.id("insurance_type", self.insurance_type_id);
        let currency_id = ck.id("currency", self.currency_id);
        let asset_description = ck.text("description", &self.asset_description);
        if !asset_description.is_empty() && asset_description.chars().count() < MIN_DESCRIPTION_CHARS
        {
            ck.flag("description", Problem::TooShort(MIN_DESCRIPTION_CHARS));
        }
        let raw_sum = ck.text("sum_insured", &self.sum_insured);
        let sum_insured = if raw_sum.is_empty() {
            Decimal::ZERO
        } else {
            match parse_decimal(&raw_sum) {
                Ok(d) if d >= Decimal::ONE => d,
                Ok(d) => {
                    ck.flag("sum_insured", Problem::BelowMinimum(1));
                    d
                }
                Err(_) => {
                    ck.flag("sum_insured", Problem::InvalidNumber);
                    Decimal::ZERO
                }
            }
        };
        ck.finish(QuoteInsert {
            client_id,
            insurance_type_id,
            currency_id,
            asset_description,
            sum_insured,
        })
    }

    /// Same rules as a new quote; the result keeps every other field of `base`.
    pub fn validate_update(&self, base: &Quote) -> Result<Quote, ValidationErrors> {
        let fields = self.validate()?;
        Ok(Quote {
            client_id: fields.client_id,
            insurance_type_id: fields.insurance_type_id,
            currency_id: fields.currency_id,
            asset_description: fields.asset_description,
            sum_insured: fields.sum_insured,
            ..base.clone()
        })
    }
}

/// Rejects an id that is not among the loaded catalog entries.
pub fn check_option(
    field: &'static str,
    id: i64,
    mut known: impl Iterator<Item = i64>,
) -> Result<(), ValidationErrors> {
    if known.any(|k| k == id) {
        Ok(())
    } else {
        Err(ValidationErrors::single(field, Problem::UnknownOption))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn filled_client() -> ClientForm {
        ClientForm {
            client_type_id: Some(1),
            name: " Ana Ruiz ".into(),
            identity: "0801-1990-12345".into(),
            birth_date: "1990-04-12".into(),
            phone: "9876-5432".into(),
            email: "ana@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn client_form_trims_and_builds_record() {
        let c = filled_client().validate(now()).unwrap();
        assert_eq!(c.name, "Ana Ruiz");
        assert!(c.active);
        assert_eq!(c.created_at, now());
        assert_eq!(c.birth_date.date(), NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
    }

    #[test]
    fn client_form_flags_every_bad_field() {
        let form = ClientForm {
            name: "   ".into(),
            email: "not-an-email".into(),
            birth_date: "12/04/1990".into(),
            ..filled_client()
        };
        let err = form.validate(now()).unwrap_err();
        assert!(err.is_invalid("name"));
        assert!(err.is_invalid("email"));
        assert!(err.is_invalid("birth_date"));
        assert!(!err.is_invalid("phone"));
    }

    #[test]
    fn missing_birth_date_defaults_to_today() {
        let form = ClientForm {
            birth_date: String::new(),
            ..filled_client()
        };
        let c = form.validate(now()).unwrap();
        assert_eq!(c.birth_date.date(), now().date());
    }

    #[test]
    fn quote_form_enforces_description_and_minimum_sum() {
        let form = QuoteForm {
            client_id: Some(3),
            insurance_type_id: Some(1),
            currency_id: None,
            asset_description: "Casa".into(),
            sum_insured: "0.50".into(),
        };
        let err = form.validate().unwrap_err();
        assert!(err.is_invalid("currency"));
        assert!(err.is_invalid("description"));
        assert!(err.is_invalid("sum_insured"));
        assert!(!err.is_invalid("client"));
    }

    #[test]
    fn quote_update_keeps_backend_fields() {
        let base = Quote {
            id: 12,
            number: "COT-12".into(),
            client_id: 3,
            insurance_type_id: 1,
            currency_id: 2,
            asset_description: "Toyota Hilux 2020".into(),
            sum_insured: Decimal::new(500000, 0),
            ..Default::default()
        };
        let mut form = QuoteForm::from_quote(&base);
        form.sum_insured = "650000".into();
        let q = form.validate_update(&base).unwrap();
        assert_eq!(q.id, 12);
        assert_eq!(q.number, "COT-12");
        assert_eq!(q.sum_insured, Decimal::new(650000, 0));
    }

    #[test]
    fn errors_list_every_field_in_order() {
        let err = ClientForm::default().validate(now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "client_type is required; name is required; identity is required; \
             phone is required; email is required"
        );
    }

    #[test]
    fn edit_form_keeps_type_label() {
        let c = Client {
            id: 5,
            client_type_id: 1,
            client_type: "Persona Natural".into(),
            ..filled_client().validate(now()).unwrap()
        };
        let back = ClientForm::from_client(&c).validate(now()).unwrap();
        assert_eq!(back.client_type, "Persona Natural");
        assert_eq!(filled_client().validate(now()).unwrap().client_type, "");
    }

    #[test]
    fn unknown_catalog_option_is_rejected() {
        assert!(check_option("currency", 2, [1, 2].into_iter()).is_ok());
        let err = check_option("currency", 9, [1, 2].into_iter()).unwrap_err();
        assert!(err.is_invalid("currency"));
    }
}
