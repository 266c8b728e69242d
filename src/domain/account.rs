use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message reported for any amount that is unparseable or not strictly positive.
pub const INVALID_AMOUNT: &str = "Amount to be transferred is invalid";

/// Power of ten of `Decimal::MAX`'s leading digit.
const MAX_LEADING_EXPONENT: i64 = 28;

/// Represents the monetary balance held by an account.
///
/// A thin wrapper around `rust_decimal::Decimal` so balances are always exact
/// and never pass through floating point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

/// A strictly positive amount to move between two accounts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::invalid_input(INVALID_AMOUNT))
        }
    }

    /// Parses a decimal literal as sent by a client.
    ///
    /// Accepts an optional sign, a fractional part and scientific notation
    /// (`1.5E+2`). Surrounding whitespace, digit separators and values that do
    /// not fit exactly are rejected with `InvalidInput`. A well-formed positive
    /// literal too large for `Decimal` fails with `AmountOutOfRange` instead.
    pub fn parse(raw: &str) -> Result<Self> {
        if !is_decimal_literal(raw) {
            return Err(PaymentError::invalid_input(INVALID_AMOUNT));
        }
        let parsed = if raw.contains(['e', 'E']) {
            Decimal::from_scientific(raw)
        } else {
            Decimal::from_str_exact(raw)
        };
        match parsed {
            Ok(value) => Self::new(value),
            Err(_)
                if !raw.starts_with('-')
                    && leading_exponent(raw).is_some_and(|exp| exp >= MAX_LEADING_EXPONENT) =>
            {
                Err(PaymentError::AmountOutOfRange(raw.to_string()))
            }
            Err(_) => Err(PaymentError::invalid_input(INVALID_AMOUNT)),
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with digits allowed on either side
/// of the point but not missing on both.
fn is_decimal_literal(raw: &str) -> bool {
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_ok = digits(int_part)
        && digits(frac_part)
        && !(int_part.is_empty() && frac_part.is_empty());
    let exponent_ok = exponent.is_none_or(|exp| {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        !exp.is_empty() && digits(exp)
    });
    mantissa_ok && exponent_ok
}

/// Power of ten of the first significant digit of a well-formed literal.
///
/// `None` when every digit is zero or the exponent does not fit an `i64`.
fn leading_exponent(raw: &str) -> Option<i64> {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let int_digits = int_part.trim_start_matches('0');
    let position = if int_digits.is_empty() {
        let significant = frac_part.trim_start_matches('0');
        if significant.is_empty() {
            return None;
        }
        -((frac_part.len() - significant.len()) as i64) - 1
    } else {
        int_digits.len() as i64 - 1
    };
    position.checked_add(exponent)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn covers(&self, amount: Amount) -> bool {
        self.0 >= amount.0
    }

    /// The balance with `amount` removed, or `None` when the result overflows
    /// or would have to be rounded.
    pub fn checked_debit(self, amount: Amount) -> Option<Self> {
        let next = self.0.checked_sub(amount.0)?;
        (self.0.checked_sub(next)? == amount.0).then_some(Self(next))
    }

    /// The balance with `amount` added, or `None` when the result overflows
    /// or would have to be rounded.
    pub fn checked_credit(self, amount: Amount) -> Option<Self> {
        let next = self.0.checked_add(amount.0)?;
        (next.checked_sub(self.0)? == amount.0).then_some(Self(next))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// A customer account held by the bank.
///
/// Accounts are keyed by `account_no` and may also be reached through
/// `pay_id`. Provisioning happens outside the transfer flow, which only ever
/// changes `account_balance`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub account_no: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub pay_id: String,
    pub account_balance: Balance,
}

impl UserAccount {
    pub fn new(
        account_no: impl Into<String>,
        user_name: impl Into<String>,
        pay_id: impl Into<String>,
        account_balance: Balance,
    ) -> Self {
        Self {
            account_no: account_no.into(),
            user_name: user_name.into(),
            pay_id: pay_id.into(),
            account_balance,
        }
    }

    /// Whether the balance is enough to send `amount`; emptying the account is allowed.
    pub fn can_send(&self, amount: Amount) -> bool {
        self.account_balance.covers(amount)
    }
}
