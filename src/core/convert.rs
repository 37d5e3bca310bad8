//! Currency conversion against an in-memory snapshot, and the form that drives it.

use std::fmt::Display;
use thiserror::Error;

use super::snapshot::Snapshot;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Currency not available: {0}")]
    MissingCurrency(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Converts `amount` of `from` into `to` using the rates of `snapshot`.
///
/// Codes are matched case-insensitively. The result is rounded to two decimal places.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    snapshot: &Snapshot,
) -> Result<f64, ConversionError> {
    if !amount.is_finite() {
        return Err(ConversionError::InvalidAmount(amount.to_string()));
    }

    let from = from.trim().to_uppercase();
    let to = to.trim().to_uppercase();
    let from_rate = snapshot
        .rate(&from)
        .ok_or_else(|| ConversionError::MissingCurrency(from.clone()))?;
    let to_rate = snapshot
        .rate(&to)
        .ok_or_else(|| ConversionError::MissingCurrency(to.clone()))?;

    let result = round_cents(amount * (to_rate / from_rate));
    if !result.is_finite() {
        return Err(ConversionError::InvalidAmount(amount.to_string()));
    }
    Ok(result)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A successful conversion, displayed as `100 USD = 90.00 EUR`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
}

impl Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {:.2} {}",
            self.amount, self.from, self.result, self.to
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error("Please fill in all fields.")]
    EmptyField,
    #[error("Rates are not loaded yet.")]
    NoRates,
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl FormError {
    /// Text shown in place of a conversion result.
    pub fn guidance(&self) -> String {
        match self {
            FormError::EmptyField | FormError::NoRates => self.to_string(),
            FormError::Conversion(ConversionError::MissingCurrency(code)) => {
                format!("Currency {code} is not available in the current rates.")
            }
            FormError::Conversion(ConversionError::InvalidAmount(text)) => {
                format!("Please enter a valid amount (got '{text}').")
            }
        }
    }
}

/// Raw conversion input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ConversionForm {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl ConversionForm {
    pub fn new(amount: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        ConversionForm {
            amount: amount.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn submit(&self, snapshot: &Snapshot) -> Result<Conversion, FormError> {
        let (amount, from, to) = (self.amount.trim(), self.from.trim(), self.to.trim());
        if amount.is_empty() || from.is_empty() || to.is_empty() {
            return Err(FormError::EmptyField);
        }

        let amount: f64 = amount
            .parse()
            .map_err(|_| ConversionError::InvalidAmount(amount.to_string()))?;
        let result = convert(amount, from, to, snapshot)?;

        Ok(Conversion {
            amount,
            from: from.to_uppercase(),
            to: to.to_uppercase(),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot() -> Snapshot {
        let rates = BTreeMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.9),
            ("GBP".to_string(), 0.79),
            ("UAH".to_string(), 39.62),
            ("JPY".to_string(), 155.31),
            ("ZERO".to_string(), 0.0),
        ]);
        Snapshot::new("USD", "2024-05-01", rates)
    }

    #[test]
    fn test_convert_usd_to_eur() {
        let snapshot = Snapshot::new(
            "USD",
            "2024-05-01",
            BTreeMap::from([("USD".to_string(), 1.0), ("EUR".to_string(), 0.9)]),
        );
        assert_eq!(convert(100.0, "USD", "EUR", &snapshot), Ok(90.0));
    }

    #[test]
    fn test_convert_self_is_identity() {
        let snapshot = snapshot();
        assert_eq!(convert(100.0, "USD", "USD", &snapshot), Ok(100.0));
        assert_eq!(convert(12.34, "JPY", "JPY", &snapshot), Ok(12.34));
    }

    #[test]
    fn test_convert_cross_rate() {
        // 50 EUR -> UAH = 50 * 39.62 / 0.9
        assert_eq!(convert(50.0, "EUR", "UAH", &snapshot()), Ok(2201.11));
    }

    #[test]
    fn test_convert_is_case_insensitive() {
        assert_eq!(convert(100.0, "usd", " eur ", &snapshot()), Ok(90.0));
    }

    #[test]
    fn test_convert_round_trip() {
        let snapshot = snapshot();
        let codes = ["USD", "EUR", "GBP", "UAH", "JPY"];
        for amount in [1.0, 25.5, 100.0, 999.99] {
            for from in codes {
                // Only pairs whose first leg does not shrink the amount below cent precision.
                for to in codes.into_iter().filter(|to| snapshot.rate(to) >= snapshot.rate(from)) {
                    let there = convert(amount, from, to, &snapshot).unwrap();
                    let back = convert(there, to, from, &snapshot).unwrap();
                    assert!(
                        (back - amount).abs() <= 0.01 + 1e-9,
                        "{amount} {from}->{to}->{from} gave {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_convert_missing_currency() {
        let snapshot = snapshot();
        assert_eq!(
            convert(50.0, "USD", "ZZZ", &snapshot),
            Err(ConversionError::MissingCurrency("ZZZ".to_string()))
        );
        assert_eq!(
            convert(50.0, "ZZZ", "USD", &snapshot),
            Err(ConversionError::MissingCurrency("ZZZ".to_string()))
        );
        assert_eq!(
            convert(50.0, "ZERO", "USD", &snapshot),
            Err(ConversionError::MissingCurrency("ZERO".to_string()))
        );
    }

    #[test]
    fn test_convert_invalid_amount() {
        let snapshot = snapshot();
        assert!(matches!(
            convert(f64::NAN, "USD", "EUR", &snapshot),
            Err(ConversionError::InvalidAmount(_))
        ));
        assert!(matches!(
            convert(f64::INFINITY, "USD", "EUR", &snapshot),
            Err(ConversionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_convert_overflow_is_invalid_amount() {
        let snapshot = snapshot();
        assert_eq!(
            convert(1e307, "USD", "JPY", &snapshot),
            Err(ConversionError::InvalidAmount(1e307.to_string()))
        );
        assert!(convert(1e300, "USD", "JPY", &snapshot).is_ok());
    }

    #[test]
    fn test_form_submit_formats_result() {
        let conversion = ConversionForm::new("100", "usd", "EUR")
            .submit(&snapshot())
            .unwrap();
        assert_eq!(conversion.result, 90.0);
        assert_eq!(conversion.to_string(), "100 USD = 90.00 EUR");

        let conversion = ConversionForm::new("12.5", "USD", "UAH")
            .submit(&snapshot())
            .unwrap();
        assert_eq!(conversion.to_string(), "12.5 USD = 495.25 UAH");
    }

    #[test]
    fn test_form_empty_fields() {
        let snapshot = snapshot();
        for form in [
            ConversionForm::new("", "USD", "EUR"),
            ConversionForm::new("10", " ", "EUR"),
            ConversionForm::new("10", "USD", ""),
        ] {
            let err = form.submit(&snapshot).unwrap_err();
            assert_eq!(err, FormError::EmptyField);
            assert_eq!(err.guidance(), "Please fill in all fields.");
        }
    }

    #[test]
    fn test_form_bad_amount() {
        let err = ConversionForm::new("ten", "USD", "EUR")
            .submit(&snapshot())
            .unwrap_err();
        assert_eq!(
            err,
            FormError::Conversion(ConversionError::InvalidAmount("ten".to_string()))
        );
        assert_eq!(err.guidance(), "Please enter a valid amount (got 'ten').");

        let err = ConversionForm::new("inf", "USD", "EUR")
            .submit(&snapshot())
            .unwrap_err();
        assert!(matches!(
            err,
            FormError::Conversion(ConversionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_form_missing_currency_guidance() {
        let err = ConversionForm::new("50", "USD", "zzz")
            .submit(&snapshot())
            .unwrap_err();
        assert_eq!(
            err.guidance(),
            "Currency ZZZ is not available in the current rates."
        );
    }
}
