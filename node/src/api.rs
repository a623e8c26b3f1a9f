// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vreg_kernel::literal::{parse_int, LiteralError};

/// Integer field that may arrive as a JSON number or a literal string
/// (`"0x80000000"`, `"42"`, ...).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum IntLiteral {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl IntLiteral {
    pub fn to_i128(&self) -> Result<i128, LiteralError> {
        match self {
            IntLiteral::Unsigned(v) => Ok(*v as i128),
            IntLiteral::Signed(v) => Ok(*v as i128),
            IntLiteral::Text(s) => parse_int(s),
        }
    }
}

impl From<u64> for IntLiteral {
    fn from(v: u64) -> Self {
        IntLiteral::Unsigned(v)
    }
}

impl From<&str> for IntLiteral {
    fn from(s: &str) -> Self {
        IntLiteral::Text(s.to_string())
    }
}

/// Lowercase `0x` rendering used for every address and value on the wire.
pub fn hex(v: u64) -> String {
    format!("{:#x}", v)
}

// Query-string requests keep raw strings; parsing happens in the handlers.

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterParams {
    pub addr: Option<String>,
    pub width: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ReadRangeParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub count: Option<String>,
    pub width: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ReadResponse {
    pub addr: String,
    pub width: u64,
    pub value: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ReadRangeResponse {
    pub status: String,
    pub width: u64,
    pub count: usize,
    /// Address → value, both hex. All addresses share one length, so key
    /// order is address order.
    pub data: BTreeMap<String, String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct WriteRequest {
    pub addr: Option<IntLiteral>,
    pub width: Option<IntLiteral>,
    pub value: Option<IntLiteral>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct WriteResponse {
    pub status: String,
    pub addr: String,
    pub width: u64,
    pub value: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct WriteRangeRequest {
    pub start: Option<IntLiteral>,
    pub count: Option<IntLiteral>,
    pub width: Option<IntLiteral>,
    /// One value per resolved address.
    pub values: Option<Vec<IntLiteral>>,
    /// Repeated for every resolved address when `values` is absent.
    pub value: Option<IntLiteral>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WrittenEntry {
    pub addr: String,
    pub value: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct WriteRangeResponse {
    pub status: String,
    pub count: usize,
    pub written: Vec<WrittenEntry>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ClearResponse {
    pub status: String,
    pub addr: String,
    pub width: u64,
    pub value: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ClearRangeRequest {
    pub start: Option<IntLiteral>,
    pub end: Option<IntLiteral>,
    pub width: Option<IntLiteral>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ClearRangeResponse {
    pub status: String,
    pub start: String,
    pub end: String,
    pub width: u64,
    pub count: usize,
}

/// Only a literal JSON `true` confirms; `"true"`, `1` and absence do not.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ClearAllRequest {
    pub confirm: Option<serde_json::Value>,
}

impl ClearAllRequest {
    pub fn confirmed(&self) -> bool {
        matches!(self.confirm, Some(serde_json::Value::Bool(true)))
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ClearAllResponse {
    pub status: String,
    pub size: usize,
    pub base: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct StatusResponse {
    pub base: String,
    pub end: String,
    pub size: usize,
    pub non_zero_bytes: usize,
    /// CRC-64 of the in-memory image.
    pub digest: String,
    pub persistent: bool,
    pub image: String,
}
