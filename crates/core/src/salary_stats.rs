//! Per-conference head coach pay summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize::is_power_four;

/// Head coaches listed per conference in [`ConferenceSalaryStats::top_paid`].
pub const TOP_PAID_PER_CONFERENCE: usize = 3;

/// One head coach with the newest salary recorded for the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadCoachPay {
    pub coach_name: String,
    pub school: String,
    pub conference: Option<String>,
    pub total_pay: Option<i64>,
    pub buyout: Option<i64>,
}

/// Pay summary for one conference. Averages cover coaches with a salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceSalaryStats {
    pub conference: String,
    pub power_four: bool,
    pub coaches: usize,
    pub with_salary: usize,
    pub avg_pay: i64,
    pub max_pay: i64,
    pub min_pay: i64,
    pub total_payroll: i64,
    pub top_paid: Vec<HeadCoachPay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceSalaryQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Keep only SEC, Big 10, Big 12 and ACC.
    #[serde(default)]
    pub power_four: bool,
}

/// Group head coach pay by conference, highest average first.
///
/// Coaches without a conference are left out, as are conferences where no
/// coach has a salary.
#[must_use]
pub fn conference_salary_breakdown(rows: &[HeadCoachPay], power_four_only: bool) -> Vec<ConferenceSalaryStats> {
    let mut by_conference: BTreeMap<&str, Vec<&HeadCoachPay>> = BTreeMap::new();
    for row in rows {
        if let Some(conference) = row.conference.as_deref() {
            by_conference.entry(conference).or_default().push(row);
        }
    }

    let mut stats: Vec<ConferenceSalaryStats> = by_conference
        .into_iter()
        .filter(|(conference, _)| !power_four_only || is_power_four(Some(conference)))
        .filter_map(|(conference, coaches)| summarize(conference, &coaches))
        .collect();
    stats.sort_by(|a, b| b.avg_pay.cmp(&a.avg_pay).then_with(|| a.conference.cmp(&b.conference)));
    stats
}

fn summarize(conference: &str, coaches: &[&HeadCoachPay]) -> Option<ConferenceSalaryStats> {
    let pays: Vec<i64> = coaches.iter().filter_map(|c| c.total_pay).collect();
    let total_payroll: i64 = pays.iter().sum();
    let with_salary = pays.len();
    let avg_pay = total_payroll / i64::try_from(with_salary).ok().filter(|n| *n > 0)?;

    let mut ranked: Vec<&HeadCoachPay> = coaches.iter().copied().filter(|c| c.total_pay.is_some()).collect();
    ranked.sort_by(|a, b| b.total_pay.cmp(&a.total_pay).then_with(|| a.coach_name.cmp(&b.coach_name)));

    Some(ConferenceSalaryStats {
        conference: conference.to_owned(),
        power_four: is_power_four(Some(conference)),
        coaches: coaches.len(),
        with_salary,
        avg_pay,
        max_pay: pays.iter().copied().max()?,
        min_pay: pays.iter().copied().min()?,
        total_payroll,
        top_paid: ranked.into_iter().take(TOP_PAID_PER_CONFERENCE).cloned().collect(),
    })
}
