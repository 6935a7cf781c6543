use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{format_amount, parse_amount, AmountMode};

/// Paid state of a detalle. Serialized with the literal labels the server uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estado {
    Pagado,
    #[default]
    Debe,
}

impl Estado {
    pub fn label(self) -> &'static str {
        match self {
            Estado::Pagado => "Pagado",
            Estado::Debe => "Debe",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Estado::Pagado => Estado::Debe,
            Estado::Debe => Estado::Pagado,
        }
    }

    /// Button class for this state. The two classes are mutually exclusive.
    pub fn button_class(self) -> &'static str {
        match self {
            Estado::Pagado => "btn-success",
            Estado::Debe => "btn-outline-secondary",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "Pagado" => Some(Estado::Pagado),
            "Debe" => Some(Estado::Debe),
            _ => None,
        }
    }
}

/// Participant state as rendered by the server.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ParticipantSeed {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub monto: Option<Decimal>,
    #[serde(default)]
    pub abonado: Option<Decimal>,
    #[serde(default)]
    pub estado: Estado,
    #[serde(default)]
    pub pago_todo: bool,
}

/// One row of the split form. Share and paid keep the text the user typed;
/// `owed` is derived from them.
#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    pub id: u32,
    pub name: String,
    pub selected: bool,
    pub pays_all: bool,
    pub share_text: String,
    pub paid_text: String,
    pub owed: Decimal,
    pub estado: Estado,
}

impl Participant {
    pub fn from_seed(seed: ParticipantSeed, mode: AmountMode) -> Self {
        let mut participant = Participant {
            id: seed.id,
            name: seed.name,
            selected: true,
            pays_all: seed.pago_todo,
            share_text: seed
                .monto
                .map(|v| format_amount(v, mode))
                .unwrap_or_default(),
            paid_text: seed
                .abonado
                .map(|v| format_amount(v, mode))
                .unwrap_or_default(),
            owed: Decimal::ZERO,
            estado: seed.estado,
        };
        participant.recalculate(mode);
        participant
    }

    pub fn share(&self) -> Decimal {
        parse_amount(&self.share_text)
    }

    pub fn paid(&self) -> Decimal {
        parse_amount(&self.paid_text)
    }

    /// Recomputes the owed amount. A paid participant always owes nothing and
    /// has paid exactly their share; otherwise owed is `share - paid`, which
    /// goes negative when overpaid.
    pub fn recalculate(&mut self, mode: AmountMode) {
        let share = self.share();
        match self.estado {
            Estado::Pagado => {
                self.paid_text = format_amount(share, mode);
                self.owed = Decimal::ZERO;
            }
            Estado::Debe => {
                let paid = self.paid();
                self.owed = share.checked_sub(paid).unwrap_or_else(|| {
                    log::warn!("owed amount for {} out of range: {} - {}", self.id, share, paid);
                    Decimal::ZERO
                });
            }
        }
    }

    pub fn assign_share(&mut self, share: Decimal, mode: AmountMode) {
        self.share_text = format_amount(share, mode);
        self.recalculate(mode);
    }

    pub fn set_share_text(&mut self, text: String, mode: AmountMode) {
        self.share_text = text;
        self.recalculate(mode);
    }

    pub fn set_paid_text(&mut self, text: String, mode: AmountMode) {
        self.paid_text = text;
        self.recalculate(mode);
    }

    /// Local Pagado/Debe switch, no request is sent. Going back to Debe clears
    /// the paid amount.
    pub fn toggle_estado(&mut self, mode: AmountMode) {
        self.estado = self.estado.toggled();
        if self.estado == Estado::Debe {
            self.paid_text.clear();
        }
        self.recalculate(mode);
    }

    /// Re-renders the typed amounts in `mode` so inputs, owed and totals
    /// agree after the amount mode changes. Empty inputs stay empty.
    pub fn change_mode(&mut self, mode: AmountMode) {
        if !self.share_text.trim().is_empty() {
            self.share_text = format_amount(self.share(), mode);
        }
        if !self.paid_text.trim().is_empty() {
            self.paid_text = format_amount(self.paid(), mode);
        }
        self.recalculate(mode);
    }

    pub fn owed_text(&self, mode: AmountMode) -> String {
        format_amount(self.owed, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn participant(share: &str, paid: &str) -> Participant {
        Participant {
            id: 1,
            name: "Ana".to_string(),
            selected: true,
            pays_all: false,
            share_text: share.to_string(),
            paid_text: paid.to_string(),
            owed: Decimal::ZERO,
            estado: Estado::Debe,
        }
    }

    #[test]
    fn unpaid_owes_share_minus_paid() {
        let mut p = participant("1,000.00", "250.50");
        p.recalculate(AmountMode::Decimal);
        assert_eq!(p.owed, dec!(749.50));
        assert_eq!(p.owed_text(AmountMode::Decimal), "749.50");
    }

    #[test]
    fn unparseable_paid_counts_as_zero() {
        let mut p = participant("80", "n/a");
        p.recalculate(AmountMode::Integer);
        assert_eq!(p.owed, dec!(80));
    }

    #[test]
    fn overpaid_goes_negative() {
        let mut p = participant("50.00", "60.00");
        p.recalculate(AmountMode::Decimal);
        assert_eq!(p.owed, dec!(-10.00));
        assert_eq!(p.owed_text(AmountMode::Decimal), "-10.00");
    }

    #[test]
    fn huge_amounts_do_not_break_the_row() {
        let mut p = participant(
            "70000000000000000000000000000",
            "-70000000000000000000000000000",
        );
        p.recalculate(AmountMode::Decimal);
        assert_eq!(p.owed, Decimal::ZERO);

        let mut p = participant("1,000,000,000,000,000", "-1,000,000,000,000,000");
        p.recalculate(AmountMode::Decimal);
        assert_eq!(p.owed, dec!(2000000000000000));
    }

    #[test]
    fn changing_mode_reformats_typed_amounts() {
        let mut p = participant("33.33", "10.6");
        p.change_mode(AmountMode::Integer);
        assert_eq!(p.share_text, "33");
        assert_eq!(p.paid_text, "11");
        assert_eq!(p.owed, dec!(22));

        let mut p = participant("1234", "");
        p.change_mode(AmountMode::Decimal);
        assert_eq!(p.share_text, "1,234.00");
        assert_eq!(p.paid_text, "");
        assert_eq!(p.owed, dec!(1234));
    }

    #[test]
    fn marking_paid_forces_owed_to_zero() {
        let mut p = participant("33.34", "5.00");
        p.toggle_estado(AmountMode::Decimal);
        assert_eq!(p.estado, Estado::Pagado);
        assert_eq!(p.owed, Decimal::ZERO);
        assert_eq!(p.paid_text, "33.34");

        // idempotent
        p.recalculate(AmountMode::Decimal);
        assert_eq!(p.owed, Decimal::ZERO);
        assert_eq!(p.paid_text, "33.34");
    }

    #[test]
    fn unmarking_owes_full_share_again() {
        let mut p = participant("33.34", "");
        p.toggle_estado(AmountMode::Decimal);
        p.toggle_estado(AmountMode::Decimal);
        assert_eq!(p.estado, Estado::Debe);
        assert_eq!(p.paid(), Decimal::ZERO);
        assert_eq!(p.owed, dec!(33.34));
    }

    #[test]
    fn share_edit_while_paid_keeps_paid_in_sync() {
        let mut p = participant("10", "");
        p.toggle_estado(AmountMode::Integer);
        p.set_share_text("15".to_string(), AmountMode::Integer);
        assert_eq!(p.paid_text, "15");
        assert_eq!(p.owed, Decimal::ZERO);
    }

    #[test]
    fn seed_is_formatted_and_recalculated() {
        let seed: ParticipantSeed = serde_json::from_str(
            r#"{"id": 7, "name": "Luis", "monto": 1500, "abonado": 200.5, "estado": "Debe"}"#,
        )
        .unwrap();
        let p = Participant::from_seed(seed, AmountMode::Decimal);
        assert_eq!(p.share_text, "1,500.00");
        assert_eq!(p.paid_text, "200.50");
        assert_eq!(p.owed, dec!(1299.50));
    }

    #[test]
    fn estado_labels_and_classes() {
        assert_eq!(Estado::parse("Pagado"), Some(Estado::Pagado));
        assert_eq!(Estado::parse(" Debe "), Some(Estado::Debe));
        assert_eq!(Estado::parse("pagado"), None);
        assert_eq!(Estado::Pagado.toggled().label(), "Debe");
        assert_ne!(Estado::Pagado.button_class(), Estado::Debe.button_class());
    }
}
