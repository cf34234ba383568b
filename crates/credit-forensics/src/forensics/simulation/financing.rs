use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanProduct {
    Mortgage,
    AutoLoan,
    CreditCard,
}

impl LoanProduct {
    pub const fn all() -> [Self; 3] {
        [Self::Mortgage, Self::AutoLoan, Self::CreditCard]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mortgage => "30-year mortgage",
            Self::AutoLoan => "60-month auto loan",
            Self::CreditCard => "Credit card balance",
        }
    }

    pub const fn principal(self) -> f64 {
        match self {
            Self::Mortgage => 300_000.0,
            Self::AutoLoan => 35_000.0,
            Self::CreditCard => 10_000.0,
        }
    }

    /// Months over which savings are totalled. Card balances are carried for five years.
    pub const fn term_months(self) -> u32 {
        match self {
            Self::Mortgage => 360,
            Self::AutoLoan => 60,
            Self::CreditCard => 60,
        }
    }
}

/// Annual percentage rates offered to one score band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub min_score: u16,
    pub mortgage: f64,
    pub auto_loan: f64,
    pub credit_card: f64,
}

impl RateQuote {
    pub const fn rate(&self, product: LoanProduct) -> f64 {
        match product {
            LoanProduct::Mortgage => self.mortgage,
            LoanProduct::AutoLoan => self.auto_loan,
            LoanProduct::CreditCard => self.credit_card,
        }
    }
}

const fn quote(min_score: u16, mortgage: f64, auto_loan: f64, credit_card: f64) -> RateQuote {
    RateQuote {
        min_score,
        mortgage,
        auto_loan,
        credit_card,
    }
}

/// Highest band first.
const RATE_TABLE: [RateQuote; 7] = [
    quote(760, 6.50, 5.50, 18.0),
    quote(700, 6.72, 6.75, 21.0),
    quote(680, 6.90, 8.25, 23.0),
    quote(660, 7.11, 10.25, 25.0),
    quote(640, 7.54, 12.75, 27.0),
    quote(620, 8.08, 15.50, 28.0),
    quote(300, 9.00, 18.75, 29.9),
];

pub fn rate_quote(score: u16) -> RateQuote {
    RATE_TABLE
        .iter()
        .copied()
        .find(|quote| score >= quote.min_score)
        .unwrap_or(RATE_TABLE[RATE_TABLE.len() - 1])
}

/// Fixed-rate amortized payment. Card balances use the monthly interest charge.
pub fn monthly_payment(product: LoanProduct, annual_rate: f64) -> f64 {
    let principal = product.principal();
    let monthly_rate = annual_rate / 1200.0;
    match product {
        LoanProduct::CreditCard => principal * monthly_rate,
        LoanProduct::Mortgage | LoanProduct::AutoLoan => {
            if monthly_rate <= 0.0 {
                return principal / f64::from(product.term_months());
            }
            let months = f64::from(product.term_months());
            principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-months))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialBenefit {
    pub product: LoanProduct,
    pub label: String,
    pub principal: f64,
    pub current_rate: f64,
    pub projected_rate: f64,
    pub current_monthly: f64,
    pub projected_monthly: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub lifetime_savings: f64,
}

pub fn financial_benefits(current_score: u16, projected_score: u16) -> Vec<FinancialBenefit> {
    let current = rate_quote(current_score);
    let projected = rate_quote(projected_score);

    LoanProduct::all()
        .into_iter()
        .map(|product| {
            let current_rate = current.rate(product);
            let projected_rate = projected.rate(product);
            let current_monthly = round_cents(monthly_payment(product, current_rate));
            let projected_monthly = round_cents(monthly_payment(product, projected_rate));
            let monthly_savings = round_cents((current_monthly - projected_monthly).max(0.0));
            FinancialBenefit {
                product,
                label: product.label().to_string(),
                principal: product.principal(),
                current_rate,
                projected_rate,
                current_monthly,
                projected_monthly,
                monthly_savings,
                annual_savings: round_cents(monthly_savings * 12.0),
                lifetime_savings: round_cents(monthly_savings * f64::from(product.term_months())),
            }
        })
        .collect()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
