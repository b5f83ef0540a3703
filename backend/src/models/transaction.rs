//! Transaction record model
//!
//! A record is one generated card payment:
//! - Label (legitimate or fraud)
//! - User and merchant IDs
//! - Amount (i64 cents)
//! - Entry type and foreign flag
//!
//! Records are immutable once emitted; fields are only readable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Money amount in integer cents
///
/// # Example
/// ```
/// use fraud_sim_core_rs::Cents;
///
/// let amount = Cents::from_units_floor(12.349);
/// assert_eq!(amount.get(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    pub fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Floor a currency amount to cent precision.
    ///
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_units_floor(units: f64) -> Self {
        if !units.is_finite() || units <= 0.0 {
            return Self(0);
        }
        Self((units * 100.0).floor() as i64)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Amount in currency units (for display and Python export)
    pub fn as_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Ground-truth label of a generated transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Legitimate,
    Fraud,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Legitimate => "legitimate",
            Label::Fraud => "fraud",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the card was presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Contactless,
    ChipAndPin,
    Swipe,
    Manual,
    Online,
}

impl EntryType {
    /// All variants, in the order used by weight vectors
    pub const ALL: [EntryType; 5] = [
        EntryType::Contactless,
        EntryType::ChipAndPin,
        EntryType::Swipe,
        EntryType::Manual,
        EntryType::Online,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Contactless => "contactless",
            EntryType::ChipAndPin => "chip_and_pin",
            EntryType::Swipe => "swipe",
            EntryType::Manual => "manual",
            EntryType::Online => "online",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated payment
///
/// # Example
/// ```
/// use fraud_sim_core_rs::{Cents, EntryType, Label, TransactionRecord};
///
/// let tx = TransactionRecord::new(
///     Label::Legitimate,
///     42,
///     Cents::new(1_999),
///     7,
///     EntryType::Contactless,
///     false,
/// );
/// assert_eq!(tx.amount().to_string(), "19.99");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    label: Label,
    user_id: u32,
    amount: Cents,
    merchant_id: u32,
    entry_type: EntryType,
    foreign: bool,
}

impl TransactionRecord {
    pub fn new(
        label: Label,
        user_id: u32,
        amount: Cents,
        merchant_id: u32,
        entry_type: EntryType,
        foreign: bool,
    ) -> Self {
        Self {
            label,
            user_id,
            amount,
            merchant_id,
            entry_type,
            foreign,
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn is_fraud(&self) -> bool {
        self.label == Label::Fraud
    }

    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    pub fn amount(&self) -> Cents {
        self.amount
    }

    pub fn merchant_id(&self) -> u32 {
        self.merchant_id
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn foreign(&self) -> bool {
        self.foreign
    }
}
