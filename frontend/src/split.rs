use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::{parse_amount, AmountMode};
use crate::participant::Participant;

/// Divides `total` into `count` shares. Every share but the last is the
/// quotient floored to the mode's precision; the last one takes whatever is
/// left so the shares always add up to the total.
///
/// Returns `None` when the arithmetic would leave `Decimal`'s range.
pub fn allocate(total: Decimal, count: usize, mode: AmountMode) -> Option<Vec<Decimal>> {
    if count == 0 {
        return Some(Vec::new());
    }
    let total = normalize_total(total, mode);
    let n = Decimal::from(count);
    let quota = match mode {
        AmountMode::Decimal => {
            total.checked_div(n)?.checked_mul(dec!(100))?.floor().checked_div(dec!(100))?
        }
        AmountMode::Integer => total.checked_div(n)?.floor(),
    };
    let mut shares = vec![quota; count - 1];
    let assigned = shares
        .iter()
        .try_fold(Decimal::ZERO, |acc, share| acc.checked_add(*share))?;
    shares.push(total.checked_sub(assigned)?);
    Some(shares)
}

// Integer mode works on whole units only.
fn normalize_total(total: Decimal, mode: AmountMode) -> Decimal {
    match mode {
        AmountMode::Decimal => total,
        AmountMode::Integer => total.trunc(),
    }
}

/// Splits the total typed in `total_text` among every participant.
/// Returns false, leaving everything untouched, when there is nobody to
/// split among or the total is zero.
pub fn split_equal(total_text: &str, participants: &mut [Participant], mode: AmountMode) -> bool {
    split_among(total_text, participants, mode, |_| true)
}

/// Like [`split_equal`] but only among selected participants; the others keep
/// their current share.
pub fn split_selected(
    total_text: &str,
    participants: &mut [Participant],
    mode: AmountMode,
) -> bool {
    split_among(total_text, participants, mode, |p| p.selected)
}

fn split_among<F>(
    total_text: &str,
    participants: &mut [Participant],
    mode: AmountMode,
    include: F,
) -> bool
where
    F: Fn(&Participant) -> bool,
{
    let total = normalize_total(parse_amount(total_text), mode);
    let targets: Vec<usize> = participants
        .iter()
        .enumerate()
        .filter(|(_, p)| include(p))
        .map(|(idx, _)| idx)
        .collect();
    if targets.is_empty() || total.is_zero() {
        log::debug!(
            "nothing to split: total={} participants={}",
            total,
            targets.len()
        );
        return false;
    }

    let Some(shares) = allocate(total, targets.len(), mode) else {
        log::warn!("cannot split {} among {}: out of range", total, targets.len());
        return false;
    };
    for (idx, share) in targets.into_iter().zip(shares) {
        participants[idx].assign_share(share, mode);
    }
    true
}

/// Totals shown under the split form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub total: Decimal,
    pub assigned: Decimal,
    pub paid: Decimal,
    pub owed: Decimal,
    /// `total - assigned`; non-zero means the shares do not cover the total.
    pub unassigned: Decimal,
}

pub fn summarize(total_text: &str, participants: &[Participant]) -> SplitSummary {
    let total = parse_amount(total_text);
    let mut summary = SplitSummary {
        total,
        ..SplitSummary::default()
    };
    for p in participants {
        summary.assigned = summary.assigned.saturating_add(p.share());
        summary.paid = summary.paid.saturating_add(p.paid());
        summary.owed = summary.owed.saturating_add(p.owed);
    }
    summary.unassigned = total.saturating_sub(summary.assigned);
    summary
}
