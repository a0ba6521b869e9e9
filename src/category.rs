//! The fixed category vocabulary for transactions.
//!
//! A transaction is classified by a [MainCategory] (income or one of seven
//! expense groups) and a sub category drawn from the list owned by that main
//! category. [Category] holds a validated pair, so a sub category can never be
//! attached to the wrong main category.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// The top-level classification of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MainCategory {
    /// Money earned. The only main category that adds to the monthly figure.
    #[serde(rename = "收")]
    Income,
    #[serde(rename = "食")]
    Food,
    #[serde(rename = "人")]
    People,
    #[serde(rename = "行")]
    Transport,
    #[serde(rename = "住")]
    Housing,
    #[serde(rename = "育")]
    Education,
    #[serde(rename = "樂")]
    Leisure,
    #[serde(rename = "衣")]
    Clothing,
}

impl MainCategory {
    /// Every main category in display order.
    pub const ALL: [MainCategory; 8] = [
        MainCategory::Income,
        MainCategory::Food,
        MainCategory::People,
        MainCategory::Transport,
        MainCategory::Housing,
        MainCategory::Education,
        MainCategory::Leisure,
        MainCategory::Clothing,
    ];

    /// The label stored in the spreadsheet and shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            MainCategory::Income => "收",
            MainCategory::Food => "食",
            MainCategory::People => "人",
            MainCategory::Transport => "行",
            MainCategory::Housing => "住",
            MainCategory::Education => "育",
            MainCategory::Leisure => "樂",
            MainCategory::Clothing => "衣",
        }
    }

    /// Whether amounts in this category count as money coming in.
    pub fn is_income(self) -> bool {
        matches!(self, MainCategory::Income)
    }

    /// The sub categories that may be paired with this main category.
    pub fn sub_categories(self) -> &'static [&'static str] {
        match self {
            MainCategory::Income => &[
                "薪水", "獎金", "投資盈餘", "中獎", "利息", "禮金人情", "其他",
            ],
            MainCategory::Food => &[
                "三餐外食", "水果零食", "茶飲酒類", "食材", "健康食品", "幼兒食品", "其他",
            ],
            MainCategory::People => &[
                "保險", "尊親捐款", "醫療藥品", "紅白包", "稅款罰款", "投資", "送禮", "其他",
            ],
            MainCategory::Transport => &["租車加油", "公共運輸", "保養維修", "停車過路", "其他"],
            MainCategory::Housing => &[
                "房租房貸", "電視網路", "水電瓦斯", "生活用品", "手機通訊", "清潔用品", "電器用品",
                "家具修繕", "幼兒用品", "其他",
            ],
            MainCategory::Education => &["運動健身", "文具用品", "教育學費", "其他"],
            MainCategory::Leisure => &[
                "寵物", "電影音樂", "休覽玩樂", "遊戲3C", "幼兒玩具", "其他",
            ],
            MainCategory::Clothing => &["治裝配件", "美妝保養", "幼兒衣物", "其他"],
        }
    }

    /// The display colour for this category as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            MainCategory::Income => "#A3B18A",
            MainCategory::Food => "#E6BEB3",
            MainCategory::People => "#BDBDBD",
            MainCategory::Transport => "#8ECAE6",
            MainCategory::Housing => "#D4A373",
            MainCategory::Education => "#98B4AA",
            MainCategory::Leisure => "#E9C46A",
            MainCategory::Clothing => "#D8A7B1",
        }
    }
}

impl Display for MainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MainCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        MainCategory::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| Error::InvalidMainCategory(s.to_owned()))
    }
}

/// A main category paired with one of its own sub categories.
///
/// Construct with [Category::new], which rejects sub categories that belong
/// to a different main category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "RawCategory")]
pub struct Category {
    main: MainCategory,
    sub: &'static str,
}

impl Category {
    /// Pair `main` with the sub category named `sub`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidSubCategory] if `sub` is not one of
    /// `main.sub_categories()`.
    pub fn new(main: MainCategory, sub: &str) -> Result<Self, Error> {
        let sub = sub.trim();

        main.sub_categories()
            .iter()
            .find(|candidate| **candidate == sub)
            .map(|&sub| Self { main, sub })
            .ok_or_else(|| Error::InvalidSubCategory {
                main: main.label().to_owned(),
                sub: sub.to_owned(),
            })
    }

    pub fn main(&self) -> MainCategory {
        self.main
    }

    pub fn sub(&self) -> &'static str {
        self.sub
    }

    pub fn is_income(&self) -> bool {
        self.main.is_income()
    }
}

/// The flat wire form of a category, as stored in the spreadsheet columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    main_category: String,
    sub_category: String,
}

impl TryFrom<RawCategory> for Category {
    type Error = Error;

    fn try_from(raw: RawCategory) -> Result<Self, Self::Error> {
        let main = raw.main_category.parse()?;
        Category::new(main, &raw.sub_category)
    }
}

// Written by hand: a derived impl would bind 'de to the 'static sub category
// and leak that bound into every struct that flattens a category.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCategory::deserialize(deserializer)?;
        Category::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl From<Category> for RawCategory {
    fn from(category: Category) -> Self {
        Self {
            main_category: category.main.label().to_owned(),
            sub_category: category.sub.to_owned(),
        }
    }
}
