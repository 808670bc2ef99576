use serde::{Deserialize, Serialize};

/// Степень редкости монеты (нумизматическая шкала R5..C)
///
/// Порядок объявления вариантов совпадает с порядком шкалы: от уникальной
/// монеты (R5) до обычной (C). `Ord` опирается именно на этот порядок.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumismaticRarity {
    R5,
    R4,
    R3,
    R2,
    R,
    NC,
    C,
}

impl NumismaticRarity {
    /// Символьный код (так значение хранится в БД и передаётся по сети)
    pub fn code(&self) -> &'static str {
        match self {
            NumismaticRarity::R5 => "R5",
            NumismaticRarity::R4 => "R4",
            NumismaticRarity::R3 => "R3",
            NumismaticRarity::R2 => "R2",
            NumismaticRarity::R => "R",
            NumismaticRarity::NC => "NC",
            NumismaticRarity::C => "C",
        }
    }

    /// Позиция на шкале: 0 для R5, 6 для C
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Человекочитаемое название степени редкости
    pub fn wording(&self) -> &'static str {
        match self {
            NumismaticRarity::R5 => "Unica",
            NumismaticRarity::R4 => "Estremamente rara",
            NumismaticRarity::R3 => "Rarissima",
            NumismaticRarity::R2 => "Molto rara",
            NumismaticRarity::R => "Rara",
            NumismaticRarity::NC => "Non comune",
            NumismaticRarity::C => "Comune",
        }
    }

    /// Все значения в порядке шкалы
    pub fn all() -> Vec<NumismaticRarity> {
        vec![
            NumismaticRarity::R5,
            NumismaticRarity::R4,
            NumismaticRarity::R3,
            NumismaticRarity::R2,
            NumismaticRarity::R,
            NumismaticRarity::NC,
            NumismaticRarity::C,
        ]
    }

    /// Парсинг из символьного кода
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "R5" => Some(NumismaticRarity::R5),
            "R4" => Some(NumismaticRarity::R4),
            "R3" => Some(NumismaticRarity::R3),
            "R2" => Some(NumismaticRarity::R2),
            "R" => Some(NumismaticRarity::R),
            "NC" => Some(NumismaticRarity::NC),
            "C" => Some(NumismaticRarity::C),
            _ => None,
        }
    }
}

impl std::fmt::Display for NumismaticRarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
