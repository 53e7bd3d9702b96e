use std::collections::HashMap;

/// Stateless conversion between currency codes via a pivot-relative
/// rate table.
///
/// The table maps each code to "units of that currency per one unit of
/// the pivot currency", so any-to-any conversion is two hops: divide
/// into the pivot, multiply out of it. Arbitrary-pair tables are never
/// needed.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Returns `None` when the table is empty or lacks either code —
    /// callers must surface that as "unavailable", never as zero.
    /// Identical codes (after uppercasing) convert to themselves even
    /// with no rate table at all.
    #[must_use]
    pub fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        rates: &HashMap<String, f64>,
    ) -> Option<f64> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();

        if from == to {
            return Some(amount);
        }

        let from_rate = *rates.get(&from)?;
        let to_rate = *rates.get(&to)?;

        // A zero factor cannot be divided through; treat it like a
        // missing entry.
        if from_rate == 0.0 || to_rate == 0.0 {
            return None;
        }

        let pivot_amount = amount / from_rate;
        Some(pivot_amount * to_rate)
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
