use std::collections::BTreeMap;



/// In-memory balance book seeded with fixed mock values.
///
/// There is no real settlement behind this demo, so balances only exist
/// for the lifetime of the process and are mutated synchronously from the
/// frontend task. Symbols without an entry read as balance 0.
#[derive(Debug, Clone, Default)]
pub struct BalanceMap {
    balances: BTreeMap<String, f64>,
}



impl BalanceMap {
    /// The demo seed balances.
    pub fn mock() -> Self {
        let mut balances = BTreeMap::new();

        balances.insert("SWTH".to_string(), 123.4567);
        balances.insert("ETH".to_string(), 0.789);
        balances.insert("ATOM".to_string(), 45.12);
        balances.insert("BTC".to_string(), 0.02345);
        balances.insert("USDC".to_string(), 530.45);
        balances.insert("OSMO".to_string(), 300.0);

        Self {
            balances,
        }
    }



    pub fn get(&self, symbol: &str) -> f64 {
        match self.balances.get(symbol) {
            Some(bal) => *bal,
            None => 0.0,
        }
    }



    /// Subtract from a balance, floored at 0.
    pub fn debit(&mut self, symbol: &str, amount: f64) {
        let next = (self.get(symbol) - amount).max(0.0);
        self.balances.insert(symbol.to_string(), next);
    }



    pub fn credit(&mut self, symbol: &str, amount: f64) {
        let next = self.get(symbol) + amount;
        self.balances.insert(symbol.to_string(), next);
    }



    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.balances.iter().map(|(sym, bal)| (sym.as_str(), *bal))
    }
}
