use std::fmt;



/// One user-facing validation failure. Several can apply at the same time
/// and all applicable ones are shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NoPrices,
    SameToken,
    InvalidAmount,
    InsufficientBalance,
    NoRate,
}



impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::NoPrices => "No token prices available.",
            ValidationError::SameToken => "Pick different tokens to swap.",
            ValidationError::InvalidAmount => "Enter a valid positive amount.",
            ValidationError::InsufficientBalance => "Insufficient balance.",
            ValidationError::NoRate => "This pair has no available price.",
        };

        write!(f, "{}", msg)
    }
}



/// Outcome of the eager validation pass.
///
/// `errors` - the messages to render inline.
/// `ok` - whether submission is allowed. This is not simply
/// `errors.is_empty()`: an empty amount field disables submission without
/// nagging the user about an amount they have not typed yet.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub errors: Vec<ValidationError>,
    pub ok: bool,
}



/// Validate one from/to/amount combination against the known prices and
/// balances. Recomputed on every input change.
///
/// `amount` is the parsed amount field, NaN when the text does not parse.
/// `amount_empty` tells whether the field is still untouched, which
/// suppresses the invalid-amount message but never enables submission.
pub fn validate(token_count: usize, from: &str, to: &str, amount: f64,
    amount_empty: bool, balance: f64, rate: f64,
)
    -> Validation
{
    let mut errors = Vec::new();
    let mut ok = true;

    if token_count == 0 {
        errors.push(ValidationError::NoPrices);
        ok = false;
    }

    if from == to {
        errors.push(ValidationError::SameToken);
        ok = false;
    }

    if !amount.is_finite() || amount <= 0.0 {
        if !amount_empty {
            errors.push(ValidationError::InvalidAmount);
        }

        ok = false;
    }

    // NaN never compares greater, so an unparseable amount is reported as
    // invalid above rather than as insufficient.
    if amount > balance {
        errors.push(ValidationError::InsufficientBalance);
        ok = false;
    }

    if rate == 0.0 {
        errors.push(ValidationError::NoRate);
        ok = false;
    }

    Validation {
        errors, ok,
    }
}
