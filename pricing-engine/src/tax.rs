use pricing_catalog::TaxContext;
use pricing_core::{invalid_config, PricingResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// Category used when the tax context does not name one
pub const FALLBACK_CATEGORY: &str = "other";

/// Computes tax on an already-discounted amount.
pub trait TaxCalculator: Send + Sync + fmt::Debug {
    /// Never negative; a non-positive amount owes nothing.
    fn calculate_tax(&self, amount: Decimal, context: &TaxContext) -> Decimal;

    fn name(&self) -> String;
}

fn validate_rate(label: &str, rate: Decimal) -> PricingResult<Decimal> {
    if rate < Decimal::ZERO {
        return Err(invalid_config(format!("{} cannot be negative: {}", label, rate)));
    }
    Ok(rate)
}

fn apply_rate(amount: Decimal, rate: Decimal) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    amount * rate
}

/// Same rate everywhere
#[derive(Debug, Clone)]
pub struct FlatRateTax {
    rate: Decimal,
}

impl FlatRateTax {
    pub fn new(rate: Decimal) -> PricingResult<Self> {
        Ok(Self {
            rate: validate_rate("Flat tax rate", rate)?,
        })
    }
}

impl TaxCalculator for FlatRateTax {
    fn calculate_tax(&self, amount: Decimal, _context: &TaxContext) -> Decimal {
        apply_rate(amount, self.rate)
    }

    fn name(&self) -> String {
        "Standard Tax".to_string()
    }
}

/// Rate looked up by region code; unknown regions are untaxed.
///
/// Region codes are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct RegionalRateTax {
    rates_by_region: HashMap<String, Decimal>,
}

impl RegionalRateTax {
    pub fn new(rates_by_region: HashMap<String, Decimal>) -> PricingResult<Self> {
        let mut rates = HashMap::with_capacity(rates_by_region.len());
        for (region, rate) in rates_by_region {
            let rate = validate_rate(&format!("Tax rate for region {}", region), rate)?;
            rates.insert(region.trim().to_uppercase(), rate);
        }
        Ok(Self { rates_by_region: rates })
    }

    fn rate_for(&self, region: &str) -> Decimal {
        self.rates_by_region
            .get(&region.trim().to_uppercase())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl TaxCalculator for RegionalRateTax {
    fn calculate_tax(&self, amount: Decimal, context: &TaxContext) -> Decimal {
        apply_rate(amount, self.rate_for(&context.region))
    }

    fn name(&self) -> String {
        "Regional Tax".to_string()
    }
}

/// Rate looked up by product category, with a fallback rate
#[derive(Debug, Clone)]
pub struct CategoryRateTax {
    rates_by_category: HashMap<String, Decimal>,
    default_rate: Decimal,
}

impl CategoryRateTax {
    pub fn new(
        rates_by_category: HashMap<String, Decimal>,
        default_rate: Decimal,
    ) -> PricingResult<Self> {
        let mut rates = HashMap::with_capacity(rates_by_category.len());
        for (category, rate) in rates_by_category {
            let rate = validate_rate(&format!("Tax rate for category {}", category), rate)?;
            rates.insert(category.trim().to_lowercase(), rate);
        }
        Ok(Self {
            rates_by_category: rates,
            default_rate: validate_rate("Default category tax rate", default_rate)?,
        })
    }

    /// Same as [`CategoryRateTax::new`] with the usual 8% fallback.
    pub fn with_default_rate(rates_by_category: HashMap<String, Decimal>) -> PricingResult<Self> {
        Self::new(rates_by_category, Decimal::new(8, 2))
    }

    fn rate_for(&self, category: Option<&str>) -> Decimal {
        let key = category.unwrap_or(FALLBACK_CATEGORY).trim().to_lowercase();
        self.rates_by_category
            .get(&key)
            .copied()
            .unwrap_or(self.default_rate)
    }
}

impl TaxCalculator for CategoryRateTax {
    fn calculate_tax(&self, amount: Decimal, context: &TaxContext) -> Decimal {
        apply_rate(amount, self.rate_for(context.category.as_deref()))
    }

    fn name(&self) -> String {
        "Category Tax".to_string()
    }
}

/// One marginal band of a progressive schedule: `[lower, upper)` at `rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBracket {
    pub lower: Decimal,
    /// `None` is open-ended
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(lower: Decimal, upper: Decimal, rate: Decimal) -> Self {
        Self { lower, upper: Some(upper), rate }
    }

    pub fn open(lower: Decimal, rate: Decimal) -> Self {
        Self { lower, upper: None, rate }
    }

    fn width(&self) -> Option<Decimal> {
        self.upper.map(|upper| upper - self.lower)
    }
}

/// Marginal bracket tax.
///
/// Brackets must start at zero, be contiguous and ascending. Only the last
/// one may be open-ended; if it is bounded, anything above it is untaxed.
#[derive(Debug, Clone)]
pub struct ProgressiveBracketTax {
    brackets: Vec<TaxBracket>,
}

impl ProgressiveBracketTax {
    pub fn new(brackets: Vec<TaxBracket>) -> PricingResult<Self> {
        let first = brackets
            .first()
            .ok_or_else(|| invalid_config("Progressive tax needs at least one bracket"))?;
        if !first.lower.is_zero() {
            return Err(invalid_config(format!(
                "First tax bracket must start at 0, starts at {}",
                first.lower
            )));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            validate_rate(&format!("Rate of tax bracket {}", index), bracket.rate)?;
            let is_last = index + 1 == brackets.len();

            match bracket.upper {
                Some(upper) if upper <= bracket.lower => {
                    return Err(invalid_config(format!(
                        "Tax bracket {} is empty or inverted: [{}, {})",
                        index, bracket.lower, upper
                    )));
                }
                None if !is_last => {
                    return Err(invalid_config(format!(
                        "Only the last tax bracket may be open-ended, bracket {} is not last",
                        index
                    )));
                }
                _ => {}
            }

            if let Some(next) = brackets.get(index + 1) {
                if bracket.upper != Some(next.lower) {
                    return Err(invalid_config(format!(
                        "Tax brackets {} and {} are not contiguous",
                        index,
                        index + 1
                    )));
                }
            }
        }

        if let Some(top) = brackets.last().and_then(|b| b.upper) {
            tracing::warn!(top = %top, "Progressive tax schedule is bounded; amounts above the top bracket are untaxed");
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl TaxCalculator for ProgressiveBracketTax {
    fn calculate_tax(&self, amount: Decimal, _context: &TaxContext) -> Decimal {
        let mut remaining = amount;
        let mut tax = Decimal::ZERO;

        for bracket in &self.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }
            let taxable = match bracket.width() {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            tax += taxable * bracket.rate;
            remaining -= taxable;
        }

        tax
    }

    fn name(&self) -> String {
        "Progressive Tax".to_string()
    }
}
