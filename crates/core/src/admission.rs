use std::num::IntErrorKind;

use crate::errors::DomainError;

/// Probability bucket for a given entrance-exam rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmissionOutlook {
    Excellent,
    VeryGood,
    Average,
    Limited,
    Low,
}

impl AdmissionOutlook {
    /// Upper bounds are inclusive: 200 is still excellent, 201 is very good.
    pub fn for_rank(rank: i64) -> Self {
        match rank {
            i64::MIN..=200 => Self::Excellent,
            201..=500 => Self::VeryGood,
            501..=1000 => Self::Average,
            1001..=1500 => Self::Limited,
            _ => Self::Low,
        }
    }

    pub fn probability_pct(&self) -> u8 {
        match self {
            Self::Excellent => 95,
            Self::VeryGood => 80,
            Self::Average => 50,
            Self::Limited => 30,
            Self::Low => 15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "excellentes",
            Self::VeryGood => "très bonnes",
            Self::Average => "moyennes",
            Self::Limited => "limitées",
            Self::Low => "faibles",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Excellent => {
                "Félicitations ! Avec ce rang, vous avez d'excellentes chances d'être admis dans la filière de votre choix."
            }
            Self::VeryGood => {
                "Très bon rang ! Vous avez de fortes chances d'admission, surtout si vous privilégiez les filières GC, GE ou GMP."
            }
            Self::Average => {
                "Chances correctes. Privilégiez les filières GC, GE, GMP ou GIND pour maximiser vos chances."
            }
            Self::Limited => {
                "Les chances sont plus faibles. Je vous recommande de cibler GMP, GIND ou GC. Préparez également un plan B."
            }
            Self::Low => {
                "Les chances d'admission sont limitées avec ce rang. Envisagez de repasser le concours l'année prochaine ou de postuler dans d'autres établissements."
            }
        }
    }

    /// Label with its probability, e.g. `excellentes (95%)`.
    pub fn summary(&self) -> String {
        format!("{} ({}%)", self.label(), self.probability_pct())
    }
}

/// Digit strings too large for `i64` saturate, so they still land in the
/// outermost bucket instead of being reported as non-numeric.
pub fn parse_rank(raw: &str) -> Result<i64, DomainError> {
    match raw.trim().parse::<i64>() {
        Ok(rank) => Ok(rank),
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(DomainError::InvalidRank { value: raw.to_string() }),
        },
    }
}
