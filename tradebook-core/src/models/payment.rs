//! Payment model and method enum.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Cheque,
    Upi,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Cheque => "CHEQUE",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "CARD",
        }
    }

    /// Non-cash payments carry a reference (UTR, cheque number, UPI id).
    pub fn requires_reference(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operator input for one payment row.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInput {
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: String,
}

impl Default for PaymentInput {
    fn default() -> Self {
        Self {
            amount: 0.0,
            method: PaymentMethod::Cash,
            reference: String::new(),
        }
    }
}

/// Payment recorded against an in-progress document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Payment {
    /// Build a payment from validated input, dropping a blank reference.
    pub fn from_input(input: &PaymentInput) -> Self {
        let reference = {
            let trimmed = input.reference.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        Self {
            amount: input.amount,
            method: input.method,
            reference,
        }
    }
}
