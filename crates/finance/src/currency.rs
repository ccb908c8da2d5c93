//! Display formatting of money amounts.
//!
//! Amounts are stored as full-precision `f64`; only the rendered string is
//! rounded, to two decimals.

use franchise_core::ValueObject;

/// Currency display convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// ISO 4217 code, for labels and logs.
    pub code: &'static str,
    /// Prefixed to the digits.
    pub symbol: &'static str,
    pub grouping: char,
    pub decimal: char,
}

impl ValueObject for CurrencyFormat {}

impl CurrencyFormat {
    /// Mexican peso, es-MX conventions: `$1,234.50`, `-$1,234.50`.
    pub const MXN: CurrencyFormat = CurrencyFormat {
        code: "MXN",
        symbol: "$",
        grouping: ',',
        decimal: '.',
    };

    /// Render `amount` with two decimals and grouped thousands.
    ///
    /// Defined for every `f64`. Amounts that round to zero drop their sign;
    /// NaN and infinities are spelled out after the symbol.
    pub fn format(&self, amount: f64) -> String {
        if amount.is_nan() {
            return format!("{}NaN", self.symbol);
        }
        if amount.is_infinite() {
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{sign}{}∞", self.symbol);
        }

        let fixed = format!("{:.2}", amount.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let is_zero = whole.bytes().all(|b| b == b'0') && cents.bytes().all(|b| b == b'0');

        let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 2);
        if amount < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(self.symbol);
        let digits = whole.len();
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                out.push(self.grouping);
            }
            out.push(digit);
        }
        out.push(self.decimal);
        out.push_str(cents);
        out
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::MXN
    }
}

/// Format an amount in the system currency (MXN).
pub fn format_currency(amount: f64) -> String {
    CurrencyFormat::MXN.format(amount)
}

/// `Display` adapter, handy in log fields: `total = %Currency(x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Currency(pub f64);

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&format_currency(self.0))
    }
}
