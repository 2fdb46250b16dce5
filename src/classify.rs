// src/classify.rs
//! Keyword rules that turn free-text modality and badge labels into the
//! fixed set of display variants. Matching is case- and accent-insensitive.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::fold;

/// Delivery mode of a class session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ModalityVariant {
    Presencial,
    Virtual,
    SinDefinir,
}

impl ModalityVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalityVariant::Presencial => "presencial",
            ModalityVariant::Virtual => "virtual",
            ModalityVariant::SinDefinir => "sin_definir",
        }
    }
}

impl fmt::Display for ModalityVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual emphasis of a badge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeVariant {
    Info,
    Warning,
    Danger,
    Primary,
    PrimaryOutline,
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Info => "info",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Danger => "danger",
            BadgeVariant::Primary => "primary",
            BadgeVariant::PrimaryOutline => "primary-outline",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A badge label together with its variant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BadgeItem {
    pub label: String,
    pub variant: BadgeVariant,
}

impl BadgeItem {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let variant = badge_variant(&label);
        Self { label, variant }
    }
}

/// A presentation "TP" (trabajo práctico) on its own, e.g. `tp3`.
static TP_PRESENTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^tp[0-9]+$").expect("tp regex should be valid"));

type Rule = (fn(&str) -> bool, BadgeVariant);

fn is_class_practice(label: &str) -> bool {
    ["repaso", "ejercicios", "laboratorio"]
        .iter()
        .any(|kw| label.contains(kw))
}

fn is_exam(label: &str) -> bool {
    label.contains("parcial") || label.contains("recuperatorio")
}

fn is_final(label: &str) -> bool {
    label.contains("final")
}

fn is_delivery(label: &str) -> bool {
    label.contains("entrega") || label.contains("reentrega")
}

fn is_tp_presentation(label: &str) -> bool {
    TP_PRESENTATION_RE.is_match(label)
}

/// Evaluated top to bottom against the folded label; first hit wins.
const BADGE_RULES: &[Rule] = &[
    (is_class_practice, BadgeVariant::Info),
    (is_exam, BadgeVariant::Warning),
    (is_final, BadgeVariant::Danger),
    (is_delivery, BadgeVariant::Primary),
    (is_tp_presentation, BadgeVariant::PrimaryOutline),
];

pub fn badge_variant(label: &str) -> BadgeVariant {
    let folded = fold(label.trim());
    BADGE_RULES
        .iter()
        .find(|(matches, _)| matches(folded.as_str()))
        .map(|&(_, variant)| variant)
        .unwrap_or(BadgeVariant::Info)
}

/// `presencial` wins over `virtual` when both appear.
pub fn modality_variant(modality: &str) -> ModalityVariant {
    let folded = fold(modality.trim());
    if folded.contains("presencial") {
        ModalityVariant::Presencial
    } else if folded.contains("virtual") {
        ModalityVariant::Virtual
    } else {
        ModalityVariant::SinDefinir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modality() {
        assert_eq!(modality_variant("Presencial"), ModalityVariant::Presencial);
        assert_eq!(modality_variant("Virtual (sincrónico)"), ModalityVariant::Virtual);
        assert_eq!(modality_variant("  VIRTUAL  "), ModalityVariant::Virtual);
        assert_eq!(modality_variant(""), ModalityVariant::SinDefinir);
        assert_eq!(modality_variant("A confirmar"), ModalityVariant::SinDefinir);
        assert_eq!(
            modality_variant("Híbrida: presencial + virtual"),
            ModalityVariant::Presencial
        );
    }

    #[test]
    fn badge_precedence() {
        assert_eq!(badge_variant("Entrega TP3"), BadgeVariant::Primary);
        assert_eq!(badge_variant("Reentrega TP1"), BadgeVariant::Primary);
        assert_eq!(badge_variant("tp3"), BadgeVariant::PrimaryOutline);
        assert_eq!(badge_variant(" TP12 "), BadgeVariant::PrimaryOutline);
        assert_eq!(badge_variant("TP 3"), BadgeVariant::Info);
        assert_eq!(badge_variant("Recuperatorio Parcial 2"), BadgeVariant::Warning);
        assert_eq!(badge_variant("Parcial"), BadgeVariant::Warning);
        assert_eq!(badge_variant("Final"), BadgeVariant::Danger);
        assert_eq!(badge_variant("Entrega final"), BadgeVariant::Danger);
        assert_eq!(badge_variant("Repaso parcial"), BadgeVariant::Info);
        assert_eq!(badge_variant("Laboratorio"), BadgeVariant::Info);
        assert_eq!(badge_variant("Ejercicios de entrega"), BadgeVariant::Info);
        assert_eq!(badge_variant("Feriado"), BadgeVariant::Info);
        assert_eq!(badge_variant(""), BadgeVariant::Info);
    }

    #[test]
    fn badge_matching_ignores_accents() {
        assert_eq!(badge_variant("LABORATÓRIO"), BadgeVariant::Info);
        assert_eq!(badge_variant("Recuperatório"), BadgeVariant::Warning);
        assert_eq!(badge_variant("Fínal"), BadgeVariant::Danger);
    }

    #[test]
    fn badge_item_keeps_original_label() {
        let item = BadgeItem::new("Entrega TP2");
        assert_eq!(item.label, "Entrega TP2");
        assert_eq!(item.variant, BadgeVariant::Primary);
    }

    #[test]
    fn variants_serialize_as_css_suffixes() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::to_string(&BadgeVariant::PrimaryOutline)?,
            "\"primary-outline\""
        );
        assert_eq!(
            serde_json::to_string(&ModalityVariant::SinDefinir)?,
            "\"sin_definir\""
        );
        assert_eq!(BadgeVariant::PrimaryOutline.to_string(), "primary-outline");
        Ok(())
    }
}
