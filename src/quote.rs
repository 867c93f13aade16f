//! The derived quantities of the form: rate, estimated receive, fee and
//! slippage-adjusted minimum. Pure arithmetic, recomputed on every input
//! change.



/// Fixed fee fraction taken from the estimated receive amount, 0.3%.
pub const FEE_RATE: f64 = 0.003;



/// Derived quantities for one from/to/amount/slippage combination.
///
/// `rate` - price ratio from/to, 0 when no rate is available.
/// `estimated_receive` - amount converted at `rate`.
/// `fee` - fixed 0.3% of the estimated receive, charged in the destination
/// token.
/// `min_received` - estimate reduced by the user-tolerated slippage.
///
/// All values are non-negative. When no rate is available or the amount is
/// not a valid positive number, every derived value is 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quote {
    pub rate: f64,
    pub estimated_receive: f64,
    pub fee: f64,
    pub min_received: f64,
}



/// Price ratio between the source and destination token.
///
/// Either price missing or zero means the pair can not be quoted, which is
/// expressed as rate 0 rather than an error, because the form keeps
/// rendering with zeroed derived values.
pub fn rate(from_price: Option<f64>, to_price: Option<f64>) -> f64 {
    let Some(fp) = from_price else {
        return 0.0
    };

    let Some(tp) = to_price else {
        return 0.0
    };

    if fp == 0.0 || tp == 0.0 {
        return 0.0
    }

    fp / tp
}



impl Quote {
    pub fn compute(from_price: Option<f64>, to_price: Option<f64>,
        amount: f64, slippage_pct: f64,
    )
        -> Self
    {
        let rate = rate(from_price, to_price);

        if rate == 0.0 || !amount.is_finite() || amount <= 0.0 {
            return Self {
                rate,
                ..Self::default()
            }
        }

        let estimated_receive = amount * rate;
        let fee = estimated_receive * FEE_RATE;
        let min_received = estimated_receive * (1.0 - slippage_pct / 100.0);

        Self {
            rate, estimated_receive, fee, min_received,
        }
    }
}
