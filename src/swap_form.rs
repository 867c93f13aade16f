use crate::{
    balances::BalanceMap,
    price_map::PriceMap,
    quote::Quote,
    validate::{
        Validation,
        validate,
    },
};



/// Slippage slider bounds, percent.
const SLIPPAGE_MIN: f64 = 0.1;
const SLIPPAGE_MAX: f64 = 2.0;

/// Default token selection after load, used when present in the feed.
const DEFAULT_FROM: &str = "SWTH";
const DEFAULT_TO: &str = "USDC";



/// Ephemeral state of the swap form. Nothing here survives the process.
///
/// `amount` - the raw text of the amount field. Kept as text because the
/// field is validated eagerly while the user is still typing, and "1."
/// must stay editable rather than snap to a number.
#[derive(Debug, Clone)]
pub struct SwapForm {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub slippage: f64,
}



/// Everything derived from the current form state, recomputed on every
/// input change.
#[derive(Debug, Clone)]
pub struct FormView {
    pub quote: Quote,
    pub validation: Validation,
    pub balance: f64,
}



impl SwapForm {
    /// Build the form with the post-load default selection: SWTH/USDC
    /// when the feed has them, otherwise the first token and the first
    /// token different from it.
    pub fn new(prices: &PriceMap) -> Self {
        let first = match prices.keys().next() {
            Some(sym) => sym.as_str(),
            None => "",
        };

        let from = if prices.contains_key(DEFAULT_FROM) {
            DEFAULT_FROM.to_string()
        }
        else {
            first.to_string()
        };

        let to = if prices.contains_key(DEFAULT_TO) {
            DEFAULT_TO.to_string()
        }
        else {
            match prices.keys().find(|sym| **sym != from) {
                Some(sym) => sym.clone(),
                // Single-token feed: the same-token error will show until
                // the feed offers an alternative, which it never will.
                None => from.clone(),
            }
        };

        Self {
            from,
            to,
            amount: String::new(),
            slippage: 0.5,
        }
    }



    /// Apply one edit to the amount field. Commas are treated as decimal
    /// dots; anything but digits and at most one dot rejects the edit and
    /// leaves the field unchanged.
    pub fn amount_input(&mut self, text: &str) -> bool {
        let next = text.replace(',', ".");

        let mut dots = 0;
        for c in next.chars() {
            match c {
                '0'..='9' => {}

                '.' => {
                    dots += 1;
                }

                _ => {
                    return false
                }
            }
        }

        if dots > 1 {
            return false
        }

        self.amount = next;
        true
    }



    /// The amount field as a number, NaN when it does not parse to one.
    pub fn amount_value(&self) -> f64 {
        let text = self.amount.trim();

        if text.is_empty() {
            return f64::NAN
        }

        match text.parse() {
            Ok(val) => val,
            Err(..) => f64::NAN,
        }
    }



    /// Select the source token. Picking the token currently on the other
    /// side moves that side to the first different token.
    pub fn from_select(&mut self, symbol: &str, prices: &PriceMap) -> bool {
        if !prices.contains_key(symbol) {
            return false
        }

        self.from = symbol.to_string();

        if self.from == self.to {
            if let Some(alt) = prices.keys().find(|sym| **sym != self.from) {
                self.to = alt.clone();
            }
        }

        true
    }



    /// Select the destination token, same rules as `from_select`.
    pub fn to_select(&mut self, symbol: &str, prices: &PriceMap) -> bool {
        if !prices.contains_key(symbol) {
            return false
        }

        self.to = symbol.to_string();

        if self.to == self.from {
            if let Some(alt) = prices.keys().find(|sym| **sym != self.to) {
                self.from = alt.clone();
            }
        }

        true
    }



    /// Swap source and destination.
    pub fn switch_direction(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }



    /// MAX button: fill the amount field with the entire source balance.
    pub fn amount_set_max(&mut self, balances: &BalanceMap) {
        self.amount = balances.get(&self.from).to_string();
    }



    /// Set the slippage tolerance, snapped to 0.1% steps and clamped to
    /// the slider range.
    pub fn slippage_set(&mut self, pct: f64) -> bool {
        if !pct.is_finite() {
            return false
        }

        let snapped = (pct * 10.0).round() / 10.0;
        self.slippage = snapped.clamp(SLIPPAGE_MIN, SLIPPAGE_MAX);
        true
    }



    /// Recompute the quote and validation for the current state.
    pub fn view(&self, prices: &PriceMap, balances: &BalanceMap) -> FormView {
        let amount = self.amount_value();
        let balance = balances.get(&self.from);

        let quote = Quote::compute(
            prices.get(&self.from).copied(),
            prices.get(&self.to).copied(),
            amount,
            self.slippage,
        );

        let validation = validate(
            prices.len(),
            &self.from,
            &self.to,
            amount,
            self.amount.trim().is_empty(),
            balance,
            quote.rate,
        );

        FormView {
            quote, validation, balance,
        }
    }
}



#[cfg(test)]
mod test {
    use super::*;

    fn prices(pairs: &[(&str, f64)]) -> PriceMap {
        pairs.iter().map(|(s, p)| (s.to_string(), *p)).collect()
    }

    /// SWTH/USDC are preselected when the feed carries them.
    #[test]
    fn test_default_selection_prefers_swth_usdc() {
        let p = prices(&[("ATOM", 7.2), ("SWTH", 0.5), ("USDC", 1.0)]);
        let form = SwapForm::new(&p);

        assert_eq!(form.from, "SWTH");
        assert_eq!(form.to, "USDC");
        assert_eq!(form.slippage, 0.5);
    }

    /// Without the preferred pair, the first token and the first
    /// different token are selected.
    #[test]
    fn test_default_selection_falls_back_to_first_tokens() {
        let p = prices(&[("ETH", 1700.0), ("ATOM", 7.2)]);
        let form = SwapForm::new(&p);

        assert_eq!(form.from, "ATOM");
        assert_eq!(form.to, "ETH");
    }

    /// Amount edits accept digits with at most one dot, map commas to
    /// dots, and reject everything else without touching the field.
    #[test]
    fn test_amount_input_sanitization() {
        let p = prices(&[("SWTH", 0.5), ("USDC", 1.0)]);
        let mut form = SwapForm::new(&p);

        assert!(form.amount_input("1,5"));
        assert_eq!(form.amount, "1.5");
        assert_eq!(form.amount_value(), 1.5);

        assert!(!form.amount_input("1.2.3"));
        assert!(!form.amount_input("abc"));
        assert_eq!(form.amount, "1.5");

        assert!(form.amount_input(""));
        assert!(form.amount_value().is_nan());

        // A bare dot is an acceptable edit but not yet a number.
        assert!(form.amount_input("."));
        assert!(form.amount_value().is_nan());
    }

    /// Selecting the same token on one side moves the other side away.
    #[test]
    fn test_same_token_selection_moves_other_side() {
        let p = prices(&[("ATOM", 7.2), ("SWTH", 0.5), ("USDC", 1.0)]);
        let mut form = SwapForm::new(&p);

        assert!(form.to_select("SWTH", &p));
        assert_eq!(form.to, "SWTH");
        assert_eq!(form.from, "ATOM");

        assert!(form.from_select("SWTH", &p));
        assert_eq!(form.from, "SWTH");
        assert_eq!(form.to, "ATOM");
    }

    #[test]
    fn test_unknown_token_rejected() {
        let p = prices(&[("SWTH", 0.5), ("USDC", 1.0)]);
        let mut form = SwapForm::new(&p);

        assert!(!form.from_select("DOGE", &p));
        assert_eq!(form.from, "SWTH");
    }

    #[test]
    fn test_switch_direction() {
        let p = prices(&[("SWTH", 0.5), ("USDC", 1.0)]);
        let mut form = SwapForm::new(&p);

        form.switch_direction();
        assert_eq!(form.from, "USDC");
        assert_eq!(form.to, "SWTH");
    }

    /// MAX then submit passes the balance check exactly.
    #[test]
    fn test_max_fills_exact_balance() {
        let p = prices(&[("SWTH", 0.5), ("USDC", 1.0)]);
        let balances = BalanceMap::mock();
        let mut form = SwapForm::new(&p);

        form.amount_set_max(&balances);
        assert_eq!(form.amount_value(), 123.4567);

        let view = form.view(&p, &balances);
        assert!(view.validation.ok);
    }

    /// Slippage snaps to 0.1 steps and clamps to the slider range.
    #[test]
    fn test_slippage_snap_and_clamp() {
        let p = prices(&[("SWTH", 0.5), ("USDC", 1.0)]);
        let mut form = SwapForm::new(&p);

        assert!(form.slippage_set(0.34));
        assert_eq!(form.slippage, 0.3);

        assert!(form.slippage_set(5.0));
        assert_eq!(form.slippage, 2.0);

        assert!(form.slippage_set(0.0));
        assert_eq!(form.slippage, 0.1);

        assert!(!form.slippage_set(f64::NAN));
        assert_eq!(form.slippage, 0.1);
    }

    /// The view wires prices, balances and validation together.
    #[test]
    fn test_view_worked_example() {
        let p = prices(&[("SWTH", 0.5), ("USDC", 1.0)]);
        let balances = BalanceMap::mock();
        let mut form = SwapForm::new(&p);

        assert!(form.amount_input("100"));
        let view = form.view(&p, &balances);

        assert!(view.validation.ok);
        assert_eq!(view.quote.rate, 0.5);
        assert_eq!(view.quote.estimated_receive, 50.0);
        assert_eq!(view.quote.fee, 0.15);
        assert_eq!(view.quote.min_received, 49.75);
        assert_eq!(view.balance, 123.4567);
    }
}
