//! Free-text tags attached to transactions, and the two person marker tags
//! used to attribute spending to a member of the household.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Tags offered in the transaction form before any custom tags.
pub const COMMON_TAGS: [&str; 17] = [
    "羅",
    "朱",
    "晚餐",
    "早餐",
    "午餐",
    "刷卡",
    "固定支出",
    "分期",
    "水泥車",
    "中油捷利卡",
    "屁洋",
    "朱機車",
    "mini",
    "tiida",
    "全聯",
    "捐款",
    "嘿來",
];

/// A validated, non-empty tag name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    /// Create a tag name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTagName] if `name` is empty
    /// or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyTagName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagName::new(s)
    }
}

impl TryFrom<String> for TagName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TagName::new(&value)
    }
}

impl From<TagName> for String {
    fn from(tag: TagName) -> Self {
        tag.0
    }
}

impl Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered collection of tags that never holds the same tag twice.
///
/// Order follows insertion and only matters for display.
#[derive(Clone, Debug, Default, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TagName>", into = "Vec<TagName>")]
pub struct Tags(Vec<TagName>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tag` to the end of the collection unless it is already present.
    ///
    /// Returns `true` if the tag was added.
    pub fn insert(&mut self, tag: TagName) -> bool {
        if self.contains(tag.as_ref()) {
            return false;
        }

        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|existing| existing.as_ref() == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The tags joined with commas, the way the spreadsheet stores them.
    pub fn to_comma_separated(&self) -> String {
        self.0
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",")
    }
}

// Two tag sets are equal when they hold the same tags, regardless of order.
impl PartialEq for Tags {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|tag| other.contains(tag.as_ref()))
    }
}

impl From<Vec<TagName>> for Tags {
    fn from(tags: Vec<TagName>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Tags> for Vec<TagName> {
    fn from(tags: Tags) -> Self {
        tags.0
    }
}

impl FromIterator<TagName> for Tags {
    fn from_iter<I: IntoIterator<Item = TagName>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a TagName;
    type IntoIter = std::slice::Iter<'a, TagName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A member of the household whose spending is tracked against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Person {
    Zhu,
    Luo,
}

impl Person {
    /// Both people in banner order.
    pub const ALL: [Person; 2] = [Person::Zhu, Person::Luo];

    /// The tag that attributes a transaction to this person.
    pub fn marker_tag(self) -> &'static str {
        match self {
            Person::Zhu => "朱",
            Person::Luo => "羅",
        }
    }

    /// The key used for this person in stored budgets and form fields.
    pub fn key(self) -> &'static str {
        match self {
            Person::Zhu => "zhu",
            Person::Luo => "luo",
        }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.marker_tag())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        tag::{COMMON_TAGS, Person, TagName, Tags},
    };

    fn tags(names: &[&str]) -> Tags {
        names.iter().map(|name| TagName::new(name).unwrap()).collect()
    }

    #[test]
    fn tag_name_is_trimmed() {
        assert_eq!(TagName::new("  全聯 "), Ok(TagName::new("全聯").unwrap()));
    }

    #[test]
    fn empty_tag_name_is_rejected() {
        assert_eq!(TagName::new("   "), Err(Error::EmptyTagName));
    }

    #[test]
    fn insert_ignores_duplicates() {
        let mut tags = tags(&["朱", "午餐"]);

        let added = tags.insert(TagName::new("朱").unwrap());

        assert!(!added);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn equality_ignores_order() {
        assert_eq!(tags(&["朱", "羅"]), tags(&["羅", "朱"]));
        assert_ne!(tags(&["朱"]), tags(&["朱", "羅"]));
    }

    #[test]
    fn deserializing_drops_duplicates() {
        let tags: Tags = serde_json::from_str(r#"["朱","朱","晚餐"]"#).unwrap();

        assert_eq!(tags.to_comma_separated(), "朱,晚餐");
    }

    #[test]
    fn deserializing_rejects_empty_tag() {
        let result = serde_json::from_str::<Tags>(r#"["朱",""]"#);

        assert!(result.is_err(), "want error, got {result:?}");
    }

    #[test]
    fn person_markers_are_common_tags() {
        for person in Person::ALL {
            assert!(COMMON_TAGS.contains(&person.marker_tag()));
        }
    }
}
