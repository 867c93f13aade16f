use std::time::Duration;

use tokio::time::sleep;

use crate::{
    balances::BalanceMap,
    format::format_amount,
    quote::Quote,
};



/// Fixed simulated settlement delay. There is no venue behind this form,
/// the delay only makes the confirm step feel like a submission.
const SETTLE_DELAY: Duration = Duration::from_millis(1200);



/// One confirmed swap, with every quantity captured at confirm time so a
/// price or input change during the simulated delay can not alter what
/// settles.
///
/// `received` - what is credited to the destination: the estimate net of
/// the fee.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub received: f64,
    pub min_received: f64,
    pub slippage: f64,
}



impl Settlement {
    pub fn prepare(from: &str, to: &str, amount: f64, slippage: f64,
        quote: &Quote,
    )
        -> Self
    {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            received: quote.estimated_receive - quote.fee,
            min_received: quote.min_received,
            slippage,
        }
    }



    /// Mutate the balance book: debit the source (floored at 0), credit
    /// the destination net of fee.
    pub fn apply(&self, balances: &mut BalanceMap) {
        balances.debit(&self.from, self.amount);
        balances.credit(&self.to, self.received);
    }



    /// The transient confirmation line shown after settlement.
    pub fn toast(&self) -> String {
        format!("Swapped {} {} → {} {} (min received; slippage {}%)",
            format_amount(self.amount, 6), self.from,
            format_amount(self.min_received, 6), self.to,
            self.slippage,
        )
    }



    /// Wait out the simulated delay, then settle.
    pub async fn execute(&self, balances: &mut BalanceMap) {
        sleep(SETTLE_DELAY).await;
        self.apply(balances);
    }
}
