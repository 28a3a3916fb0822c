//! Bond valuation: the entry point tying the engine stages together.
//!
//! [`BondValuation`] derives the coupon schedule and cash flows once, at
//! construction, and recomputes every figure from them on request. Nothing is
//! cached, so identical inputs always give identical outputs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cashflows::CashFlowSeries;
use crate::pricing;
use crate::risk;
use crate::schedule::{AnnualSchedule, CouponSchedule, ScheduleBuilder};
use bondcalc_core::{BondResult, BondSpec, Date};

/// Valuation request in boundary units: rates in percent, dates as
/// `YYYY-MM-DD` strings.
///
/// Field aliases accept the short names `coupon_rate` and `ytm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    /// Face value.
    pub principal: f64,
    /// Annual coupon rate in percent (5 means 5%).
    #[serde(alias = "coupon_rate")]
    pub coupon_rate_percent: f64,
    /// Flat yield to maturity in percent.
    #[serde(alias = "ytm")]
    pub ytm_percent: f64,
    /// Maturity date, `YYYY-MM-DD`.
    pub maturity_date: String,
    /// Valuation date, `YYYY-MM-DD`. Today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation_date: Option<String>,
}

impl ValuationRequest {
    /// Converts to a validated [`BondSpec`], using `fallback` for a missing
    /// valuation date.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInput` for unparseable dates or values
    /// [`BondSpec::new`] rejects.
    pub fn to_spec(&self, fallback: impl FnOnce() -> Date) -> BondResult<BondSpec> {
        let maturity_date = Date::parse_field("maturity_date", &self.maturity_date)?;
        let valuation_date = match &self.valuation_date {
            Some(s) => Date::parse_field("valuation_date", s)?,
            None => fallback(),
        };

        BondSpec::new(
            self.principal,
            self.coupon_rate_percent / 100.0,
            self.ytm_percent / 100.0,
            maturity_date,
            valuation_date,
        )
    }
}

/// Prices and risk figures of a bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Dirty price net of accrued interest.
    pub clean_price: f64,
    /// Sum of discounted cash flows.
    pub dirty_price: f64,
    /// Macaulay duration / (1 + y).
    pub modified_duration: f64,
    /// Second-order yield sensitivity.
    pub convexity: f64,
    /// |modified duration × (1 + y)|.
    pub elasticity: f64,
}

/// [`ValuationResult`] with the intermediate figures behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskReport {
    /// Dirty price net of accrued interest.
    pub clean_price: f64,
    /// Sum of discounted cash flows.
    pub dirty_price: f64,
    /// Coupon earned since the last coupon date.
    pub accrued_interest: f64,
    /// PV-weighted average time to cash flows, years.
    pub macaulay_duration: f64,
    /// Macaulay duration / (1 + y).
    pub modified_duration: f64,
    /// Second-order yield sensitivity.
    pub convexity: f64,
    /// |modified duration × (1 + y)|.
    pub elasticity: f64,
    /// Price change for a 1bp yield move.
    pub dv01: f64,
    /// Remaining coupons, maturity included.
    pub period_count: usize,
    /// Remaining life in 365-day years.
    pub years_to_maturity: f64,
    /// First coupon after the valuation date.
    pub next_coupon_date: Date,
}

impl From<RiskReport> for ValuationResult {
    fn from(report: RiskReport) -> Self {
        Self {
            clean_price: report.clean_price,
            dirty_price: report.dirty_price,
            modified_duration: report.modified_duration,
            convexity: report.convexity,
            elasticity: report.elasticity,
        }
    }
}

/// Duration and convexity estimates of a yield move against full repricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftAnalysis {
    /// Yield move in basis points.
    pub shift_bps: f64,
    /// First-order estimate of the dirty price change.
    pub duration_estimate: f64,
    /// Second-order estimate of the dirty price change.
    pub convexity_estimate: f64,
    /// Dirty price change from repricing at the shifted yield.
    pub exact_change: f64,
}

/// A bond with its schedule and cash flows derived.
#[derive(Debug, Clone, PartialEq)]
pub struct BondValuation {
    spec: BondSpec,
    schedule: CouponSchedule,
    cash_flows: CashFlowSeries,
    times: Vec<f64>,
}

impl BondValuation {
    /// Derives the annual coupon schedule and cash flows of `spec`.
    pub fn new(spec: BondSpec) -> BondResult<Self> {
        Self::with_builder(spec, &AnnualSchedule)
    }

    /// Same as [`Self::new`] with a caller-supplied schedule builder.
    pub fn with_builder(spec: BondSpec, builder: &impl ScheduleBuilder) -> BondResult<Self> {
        let schedule = builder.build(spec.valuation_date(), spec.maturity_date())?;
        let cash_flows =
            CashFlowSeries::generate(spec.principal(), spec.coupon_rate(), schedule.period_count())?;
        let times = schedule.time_offsets();

        Ok(Self {
            spec,
            schedule,
            cash_flows,
            times,
        })
    }

    /// The bond being valued.
    #[must_use]
    pub fn spec(&self) -> &BondSpec {
        &self.spec
    }

    /// Remaining coupon schedule.
    #[must_use]
    pub fn schedule(&self) -> &CouponSchedule {
        &self.schedule
    }

    /// Remaining cash flows, aligned with the schedule.
    #[must_use]
    pub fn cash_flows(&self) -> &CashFlowSeries {
        &self.cash_flows
    }

    /// Discounted value of each cash flow.
    pub fn present_values(&self) -> BondResult<Vec<f64>> {
        pricing::present_values(&self.times, self.cash_flows.amounts(), self.ytm())
    }

    /// Sum of discounted cash flows.
    pub fn dirty_price(&self) -> BondResult<f64> {
        pricing::dirty_price(&self.times, self.cash_flows.amounts(), self.ytm())
    }

    /// Coupon earned since the last coupon date.
    #[must_use]
    pub fn accrued_interest(&self) -> f64 {
        pricing::accrued_interest(
            self.schedule.accrued_fraction(),
            self.spec.principal(),
            self.spec.coupon_rate(),
        )
    }

    /// Dirty price net of accrued interest.
    pub fn clean_price(&self) -> BondResult<f64> {
        Ok(pricing::clean_price(self.dirty_price()?, self.accrued_interest()))
    }

    /// PV-weighted average time to the cash flows.
    pub fn macaulay_duration(&self) -> BondResult<f64> {
        risk::macaulay_duration(&self.times, self.cash_flows.amounts(), self.ytm())
    }

    /// Macaulay duration / (1 + y).
    pub fn modified_duration(&self) -> BondResult<f64> {
        risk::modified_duration(&self.times, self.cash_flows.amounts(), self.ytm())
    }

    /// Analytical convexity.
    pub fn convexity(&self) -> BondResult<f64> {
        let dirty = self.dirty_price()?;
        risk::convexity(&self.times, self.cash_flows.amounts(), self.ytm(), dirty)
    }

    /// |modified duration × (1 + y)|.
    pub fn elasticity(&self) -> BondResult<f64> {
        Ok(risk::elasticity(self.modified_duration()?, self.ytm()))
    }

    /// Price change for a 1bp yield move.
    pub fn dv01(&self) -> BondResult<f64> {
        Ok(risk::dv01_from_duration(
            self.modified_duration()?,
            self.dirty_price()?,
        ))
    }

    /// Dirty price at `ytm + yield_change` over the same schedule.
    pub fn repriced(&self, yield_change: f64) -> BondResult<f64> {
        let shifted = self.spec.with_yield(self.ytm() + yield_change)?;
        pricing::dirty_price(
            &self.times,
            self.cash_flows.amounts(),
            shifted.yield_to_maturity(),
        )
    }

    /// Compares duration and convexity estimates with full repricing for a
    /// yield move of `shift_bps` basis points.
    pub fn shift_analysis(&self, shift_bps: f64) -> BondResult<ShiftAnalysis> {
        let dy = shift_bps * risk::BASIS_POINT;
        let dirty = self.dirty_price()?;
        let modified = self.modified_duration()?;
        let convexity = self.convexity()?;

        Ok(ShiftAnalysis {
            shift_bps,
            duration_estimate: risk::price_change_from_duration(modified, dirty, dy),
            convexity_estimate: risk::price_change_with_convexity(modified, convexity, dirty, dy),
            exact_change: self.repriced(dy)? - dirty,
        })
    }

    /// The five reported figures.
    pub fn result(&self) -> BondResult<ValuationResult> {
        let dirty_price = self.dirty_price()?;
        Ok(ValuationResult {
            clean_price: self.clean_price()?,
            dirty_price,
            modified_duration: self.modified_duration()?,
            convexity: self.convexity()?,
            elasticity: self.elasticity()?,
        })
    }

    /// Every figure, with the schedule facts behind them.
    pub fn report(&self) -> BondResult<RiskReport> {
        let report = RiskReport {
            clean_price: self.clean_price()?,
            dirty_price: self.dirty_price()?,
            accrued_interest: self.accrued_interest(),
            macaulay_duration: self.macaulay_duration()?,
            modified_duration: self.modified_duration()?,
            convexity: self.convexity()?,
            elasticity: self.elasticity()?,
            dv01: self.dv01()?,
            period_count: self.schedule.period_count(),
            years_to_maturity: self.schedule.years_to_maturity(),
            next_coupon_date: self.schedule.next_coupon_date(),
        };

        debug!(
            valuation_date = %self.spec.valuation_date(),
            maturity_date = %self.spec.maturity_date(),
            dirty_price = report.dirty_price,
            clean_price = report.clean_price,
            modified_duration = report.modified_duration,
            "Valued bond"
        );

        Ok(report)
    }

    fn ytm(&self) -> f64 {
        self.spec.yield_to_maturity()
    }
}

/// Values a bond given in boundary units.
///
/// A missing valuation date means today. For reproducible results pass the
/// date in the request or use [`valuate_on`].
pub fn valuate(request: &ValuationRequest) -> BondResult<ValuationResult> {
    let spec = request.to_spec(Date::today)?;
    BondValuation::new(spec)?.result()
}

/// Same as [`valuate`], with `default_valuation_date` standing in for a
/// missing valuation date.
pub fn valuate_on(
    request: &ValuationRequest,
    default_valuation_date: Date,
) -> BondResult<ValuationResult> {
    let spec = request.to_spec(|| default_valuation_date)?;
    BondValuation::new(spec)?.result()
}

/// Full [`RiskReport`] for a request, with the same date rules as [`valuate_on`].
pub fn risk_report(
    request: &ValuationRequest,
    default_valuation_date: Date,
) -> BondResult<RiskReport> {
    let spec = request.to_spec(|| default_valuation_date)?;
    BondValuation::new(spec)?.report()
}
