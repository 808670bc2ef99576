use serde::{Deserialize, Serialize};

/// Степень сохранности стороны монеты (от FDC до нечитаемой)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum OptionConservation {
    FDC,
    qFDC,
    SPL,
    qSPL,
    BB,
    qBB,
    MB,
    B,
    D,
    ILLEGIBILE,
}

impl OptionConservation {
    /// Символьный код
    pub fn code(&self) -> &'static str {
        match self {
            OptionConservation::FDC => "FDC",
            OptionConservation::qFDC => "qFDC",
            OptionConservation::SPL => "SPL",
            OptionConservation::qSPL => "qSPL",
            OptionConservation::BB => "BB",
            OptionConservation::qBB => "qBB",
            OptionConservation::MB => "MB",
            OptionConservation::B => "B",
            OptionConservation::D => "D",
            OptionConservation::ILLEGIBILE => "ILLEGIBILE",
        }
    }

    /// Позиция на шкале: 0 для FDC, 9 для ILLEGIBILE
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Человекочитаемое название
    pub fn wording(&self) -> &'static str {
        match self {
            OptionConservation::FDC => "Fior di conio",
            OptionConservation::qFDC => "Quasi fior di conio",
            OptionConservation::SPL => "Splendido",
            OptionConservation::qSPL => "Quasi splendido",
            OptionConservation::BB => "Bellissimo",
            OptionConservation::qBB => "Quasi bellissimo",
            OptionConservation::MB => "Molto bello",
            OptionConservation::B => "Bello",
            OptionConservation::D => "Discreto",
            OptionConservation::ILLEGIBILE => "Illegibile",
        }
    }

    pub fn all() -> Vec<OptionConservation> {
        vec![
            OptionConservation::FDC,
            OptionConservation::qFDC,
            OptionConservation::SPL,
            OptionConservation::qSPL,
            OptionConservation::BB,
            OptionConservation::qBB,
            OptionConservation::MB,
            OptionConservation::B,
            OptionConservation::D,
            OptionConservation::ILLEGIBILE,
        ]
    }

    /// Парсинг из символьного кода (регистр важен: "qFDC" != "QFDC")
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code)
    }
}

impl std::fmt::Display for OptionConservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
