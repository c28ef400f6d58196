// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Records exchanged with the backend, named in Rust but serialized with the
//! backend's field names.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(rename = "clie_Id", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "tiCl_Id", deserialize_with = "null_as_default")]
    pub client_type_id: i64,
    #[serde(rename = "tipoCliente", deserialize_with = "null_as_default")]
    pub client_type: String,
    #[serde(rename = "clie_Nombre", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "clie_Identidad", deserialize_with = "null_as_default")]
    pub identity: String,
    #[serde(rename = "clie_FechaNacimiento", with = "backend_datetime")]
    pub birth_date: NaiveDateTime,
    #[serde(rename = "clie_Telefono", deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(rename = "clie_CorreoElectronico", deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "clie_Activo", deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(rename = "clie_FechaCreacion", with = "backend_datetime")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    #[serde(rename = "coti_Id", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "coti_Numero", deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(rename = "coti_Fecha", with = "backend_datetime")]
    pub date: NaiveDateTime,
    #[serde(rename = "coti_DescripcionBien", deserialize_with = "null_as_default")]
    pub asset_description: String,
    #[serde(
        rename = "coti_SumaAsegurada",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "null_as_zero"
    )]
    pub sum_insured: Decimal,
    #[serde(
        rename = "coti_TasaPorcentaje",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "null_as_zero"
    )]
    pub rate_percent: Decimal,
    #[serde(
        rename = "coti_PrimaNeta",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "null_as_zero"
    )]
    pub net_premium: Decimal,
    #[serde(rename = "coti_CorreoEnviado", deserialize_with = "null_as_default")]
    pub email_sent: bool,
    #[serde(rename = "coti_FechaEnvioCorreo", with = "backend_datetime_opt")]
    pub email_sent_at: Option<NaiveDateTime>,

    #[serde(rename = "clie_Id", deserialize_with = "null_as_default")]
    pub client_id: i64,
    #[serde(rename = "clie_Nombre", deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(rename = "clie_Identidad", deserialize_with = "null_as_default")]
    pub client_identity: String,
    #[serde(rename = "clie_Telefono", deserialize_with = "null_as_default")]
    pub client_phone: String,
    #[serde(rename = "clie_CorreoElectronico", deserialize_with = "null_as_default")]
    pub client_email: String,

    #[serde(rename = "tiCl_Id", deserialize_with = "null_as_default")]
    pub client_type_id: i64,
    #[serde(rename = "tipoCliente", deserialize_with = "null_as_default")]
    pub client_type: String,

    #[serde(rename = "tiSe_Id", deserialize_with = "null_as_default")]
    pub insurance_type_id: i64,
    #[serde(rename = "tipoSeguro", deserialize_with = "null_as_default")]
    pub insurance_type: String,
    #[serde(rename = "descripcionSeguro", deserialize_with = "null_as_default")]
    pub insurance_description: String,

    #[serde(rename = "mone_Id", deserialize_with = "null_as_default")]
    pub currency_id: i64,
    #[serde(rename = "mone_Codigo", deserialize_with = "null_as_default")]
    pub currency_code: String,
    #[serde(rename = "moneda", deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(rename = "mone_Simbolo", deserialize_with = "null_as_default")]
    pub currency_symbol: String,

    // Display strings formatted by the backend.
    #[serde(rename = "fechaFormateada", deserialize_with = "null_as_default")]
    pub date_display: String,
    #[serde(rename = "sumaAseguradaFormateada", deserialize_with = "null_as_default")]
    pub sum_insured_display: String,
    #[serde(rename = "tasaFormateada", deserialize_with = "null_as_default")]
    pub rate_display: String,
    #[serde(rename = "primaNetaFormateada", deserialize_with = "null_as_default")]
    pub net_premium_display: String,
    #[serde(rename = "correoEnviadoTexto", deserialize_with = "null_as_default")]
    pub email_sent_display: String,
}

/// Payload for a new quote. The backend fills in number, rate and premium.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteInsert {
    #[serde(rename = "clie_Id")]
    pub client_id: i64,
    #[serde(rename = "tiSe_Id")]
    pub insurance_type_id: i64,
    #[serde(rename = "mone_Id")]
    pub currency_id: i64,
    #[serde(rename = "coti_DescripcionBien")]
    pub asset_description: String,
    #[serde(rename = "coti_SumaAsegurada", with = "rust_decimal::serde::float")]
    pub sum_insured: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceType {
    #[serde(rename = "tiSe_Id")]
    pub id: i64,
    #[serde(rename = "tiSe_Nombre", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "tiSe_Descripcion", deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientType {
    #[serde(rename = "tiCl_Id")]
    pub id: i64,
    #[serde(rename = "tiCl_Nombre", deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    #[serde(rename = "mone_Id")]
    pub id: i64,
    #[serde(rename = "mone_Codigo", deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(rename = "mone_Nombre", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "mone_Simbolo", deserialize_with = "null_as_default")]
    pub symbol: String,
}

// Backend rows may carry `null` in any column; one such row must not sink
// the whole list.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(d: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(rust_decimal::serde::float_option::deserialize(d)?.unwrap_or_default())
}

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepts the shapes the backend produces:
/// `2024-05-01T10:00:00[.123]`, RFC 3339 with offset, or a bare date.
pub fn parse_backend_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

mod backend_datetime {
    use super::{WIRE_FORMAT, parse_backend_datetime};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(WIRE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(NaiveDateTime::default()),
            Some(raw) if raw.trim().is_empty() => Ok(NaiveDateTime::default()),
            Some(raw) => parse_backend_datetime(&raw)
                .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw))),
        }
    }
}

mod backend_datetime_opt {
    use super::{WIRE_FORMAT, parse_backend_datetime};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(dt: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_str(&dt.format(WIRE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_backend_datetime(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw))),
        }
    }
}
