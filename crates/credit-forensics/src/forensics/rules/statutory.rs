use super::super::dates::{add_years, years_between};
use super::super::fields::DateField;
use super::super::flags::{Flag, RuleId};
use super::super::jurisdiction::{self, DebtInstrument};
use super::{FlagBuilder, RuleContext};

const MIN_YEARS_FOR_RATE: f64 = 0.5;

pub(super) fn interest_cap_exceeded(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let (Some(state), Some(current), Some(original), Some(dofd)) = (
        fields.state_code(),
        fields.current_balance(),
        fields.original_amount(),
        fields.dofd(),
    ) else {
        return Vec::new();
    };
    if original <= 0.0 {
        return Vec::new();
    }

    let years_elapsed = years_between(dofd, context.today);
    if years_elapsed <= MIN_YEARS_FOR_RATE {
        return Vec::new();
    }

    let implied_rate = (current - original) / original / years_elapsed * 100.0;
    let profile = jurisdiction::lookup(&state);
    let medical = fields.is_medical();
    let cap = profile.growth_cap(medical);
    if implied_rate <= cap {
        return Vec::new();
    }

    let explanation = format!(
        "Balance grew from {} to {} over {:.1} years since the delinquency date {}, an implied annual rate of {:.1}% against the {} {} interest cap of {:.1}%.",
        fields.original_amount.as_deref().unwrap_or_default(),
        fields.current_balance.as_deref().unwrap_or_default(),
        years_elapsed,
        fields.raw_date(DateField::Dofd).unwrap_or_default(),
        implied_rate,
        profile.state_code,
        if medical { "medical" } else { "consumer" },
        cap,
    );
    vec![FlagBuilder::new(RuleId::InterestCapExceeded, explanation)
        .value("stateCode", profile.state_code)
        .value("impliedAnnualRate", (implied_rate * 10.0).round() / 10.0)
        .value("interestCap", cap)
        .value("currentBalance", current)
        .value("originalAmount", original)
        .build()]
}

pub(super) fn statute_expired(context: &RuleContext<'_>) -> Vec<Flag> {
    let fields = context.fields;
    let (Some(state), Some(last_payment)) = (fields.state_code(), fields.last_payment_date())
    else {
        return Vec::new();
    };

    let profile = jurisdiction::lookup(&state);
    let instrument = DebtInstrument::WrittenContract;
    let years = profile.sol_years(instrument);
    let Some(expiry) = add_years(last_payment, years) else {
        return Vec::new();
    };
    if expiry > context.today {
        return Vec::new();
    }

    let explanation = format!(
        "Last payment {} plus the {}-year {} statute of limitations for a {} expired on {}.",
        fields.raw_date(DateField::LastPaymentDate).unwrap_or_default(),
        years,
        profile.state_code,
        instrument.label(),
        expiry.format("%Y-%m-%d"),
    );
    vec![FlagBuilder::new(RuleId::StatuteExpired, explanation)
        .value("stateCode", profile.state_code)
        .value(DateField::LastPaymentDate.key(), last_payment)
        .value("solYears", f64::from(years))
        .value("solExpirationDate", expiry)
        .build()]
}
